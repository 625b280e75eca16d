//! End-to-end ridge detection: RGB image in, ridge score map out.
//!
//! Stages run in order, each a full barrier:
//! convert → integral → variance → gradient → ridge.


use common::Buffer2;

use crate::config::{Config, Variant};
use crate::directions::DirectionTable;
use crate::error::{Result, ensure_non_empty};
use crate::integral::IntegralImage;
use crate::pixel::{Lab, Labx, Rgb, to_lab_image, to_labx_image};
use crate::timing::{Stage, StageTimings};
use crate::{gradient, ridge, variance};

/// Ridge map of one run with the timings of its stages.
#[derive(Debug, Clone)]
pub struct RidgeOutput {
    pub ridge: Buffer2<f32>,
    pub timings: StageTimings,
}

/// Both variants on the same input.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub reference: RidgeOutput,
    pub wide: RidgeOutput,
    /// Largest per-pixel `|reference - wide|`.
    pub max_abs_diff: f32,
}

#[derive(Debug, Clone, Default)]
pub struct RidgeDetector {
    config: Config,
}

impl RidgeDetector {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the configured variant. `image` channels are on the 0..=255 scale.
    pub fn detect(&self, image: &Buffer2<Rgb<f32>>) -> Result<RidgeOutput> {
        self.detect_with(image, self.config.variant)
    }

    /// Runs `variant` regardless of the configured one.
    pub fn detect_with(&self, image: &Buffer2<Rgb<f32>>, variant: Variant) -> Result<RidgeOutput> {
        ensure_non_empty(image)?;
        let output = match variant {
            Variant::Reference => self.run_reference(image)?,
            Variant::Wide => self.run_wide(image)?,
        };
        tracing::info!(
            "Ridge detection {:?} r={} on {}x{}: {:.1}ms",
            variant,
            self.config.radius,
            image.width(),
            image.height(),
            output.timings.total().as_secs_f64() * 1000.0
        );
        Ok(output)
    }

    /// Runs both variants and reports how far apart they are.
    pub fn compare(&self, image: &Buffer2<Rgb<f32>>) -> Result<Comparison> {
        let reference = self.detect_with(image, Variant::Reference)?;
        let wide = self.detect_with(image, Variant::Wide)?;
        let max_abs_diff = reference
            .ridge
            .iter()
            .zip(wide.ridge.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        tracing::info!("Variant max abs difference: {:.6}", max_abs_diff);
        Ok(Comparison {
            reference,
            wide,
            max_abs_diff,
        })
    }

    fn run_reference(&self, image: &Buffer2<Rgb<f32>>) -> Result<RidgeOutput> {
        let Config {
            radius,
            ridge_rule,
            reduction,
            ..
        } = self.config;
        let directions = DirectionTable::new(radius);
        let mut timings = StageTimings::new();

        let lab: Buffer2<Lab<f64>> = timings.time(Stage::Convert, || to_lab_image(image));
        let integral = timings.time(Stage::Integral, || {
            IntegralImage::build_with_offset(&lab, lab[(0, 0)])
        })?;
        let magnitude = timings.time(Stage::Variance, || {
            variance::scalar::variance_from_integral(&integral, radius, reduction)
        });
        let field = timings.time(Stage::Gradient, || {
            gradient::scalar::oriented_gradient(&magnitude, &directions)
        })?;
        let ridge = timings.time(Stage::Ridge, || {
            ridge::scalar::ridge_map(&field, &directions, ridge_rule)
        })?;

        Ok(RidgeOutput {
            ridge: ridge.map(|&v| v as f32),
            timings,
        })
    }

    fn run_wide(&self, image: &Buffer2<Rgb<f32>>) -> Result<RidgeOutput> {
        let Config {
            radius,
            ridge_rule,
            reduction,
            ..
        } = self.config;
        let directions = DirectionTable::new(radius);
        let mut timings = StageTimings::new();

        let labx: Buffer2<Labx<f32>> = timings.time(Stage::Convert, || to_labx_image(image));
        let integral = timings.time(Stage::Integral, || {
            IntegralImage::<f64, 4>::build_promoted(&labx, labx[(0, 0)])
        })?;
        let magnitude = timings.time(Stage::Variance, || {
            variance::wide::variance_from_integral(&integral, radius, reduction)
        });
        let field = timings.time(Stage::Gradient, || {
            gradient::wide::oriented_gradient(&magnitude, &directions)
        })?;
        let ridge = timings.time(Stage::Ridge, || {
            ridge::wide::ridge_map(&field, &directions, ridge_rule)
        })?;

        Ok(RidgeOutput { ridge, timings })
    }
}
