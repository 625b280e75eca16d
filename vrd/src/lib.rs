//! Variance ridge detection.
//!
//! Computes a boundary-strength map from a color image: high along visually
//! distinctive boundaries (object outlines, texture transitions), low inside
//! homogeneous regions. The stages are
//!
//! 1. RGB → LAB conversion,
//! 2. integral images of the LAB pixels and their squares,
//! 3. local variance blur reduced to a scalar texture energy,
//! 4. oriented gradient of that energy from 8 sampling directions,
//! 5. ridge response from opposing gradients minus the local gradient norm.
//!
//! Every stage exists twice: a `scalar` reference in `f64` and a `wide`
//! variant that processes four `f32` lanes per operation. Both compute the
//! same per-pixel formulas and agree to single-precision rounding.
//!
//! ```rust,ignore
//! use vrd::{Config, RidgeDetector, synthetic};
//!
//! let image = synthetic::square_patch(64, 64, (32, 32), 6, 100.0, 250.0);
//! let detector = RidgeDetector::new(Config::default().with_radius(3))?;
//! let output = detector.detect(&image)?;
//! println!("{}", output.timings);
//! ```

pub mod config;
pub mod directions;
pub mod error;
pub mod gradient;
pub mod integral;
pub mod pipeline;
pub mod pixel;
pub mod ridge;
pub mod synthetic;
pub mod timing;
pub mod variance;

pub use common::Buffer2;
pub use config::{Config, MAX_RADIUS, Variant};
pub use directions::{DirectionTable, GRADIENT_DIRECTIONS, RIDGE_AXES};
pub use error::{Error, Result};
pub use gradient::GradientField;
pub use integral::IntegralImage;
pub use pipeline::{Comparison, RidgeDetector, RidgeOutput};
pub use pixel::{F32x4, Lab, Labx, Pixel, Rgb};
pub use ridge::RidgeRule;
pub use timing::{Stage, StageTimings};
pub use variance::Reduction;
