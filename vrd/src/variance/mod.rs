//! Local variance blur: per-pixel texture energy from box statistics.
//!
//! For each pixel the `(2r+1)×(2r+1)` box centered on it is truncated to the
//! image, per-channel variance `max(0, E[p²] - E[p]²)` is read from the
//! integral tables, and the channel variances are reduced to one
//! non-negative scalar with a [`Reduction`].
//!
//! `scalar` works on `f64` LAB one channel at a time, `wide` on `f32` LABX
//! with all four lanes per operation. Both use the same formula at every pixel.

pub mod scalar;
pub mod wide;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

/// How per-channel variances collapse to one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Reduction {
    /// `sqrt(Σ variance)`: the standard deviation of the pixel vector.
    #[default]
    StdDev,
    /// `sqrt(Σ variance²)`: Euclidean norm of the variance vector.
    VarianceNorm,
}

/// Inclusive box of radius `r` around `(x, y)`, each axis clamped to the image.
///
/// Returns `(x0, y0, x1, y1, area)`; area is at least 1.
#[inline]
pub(crate) fn clamped_box(
    x: usize,
    y: usize,
    radius: usize,
    width: usize,
    height: usize,
) -> (usize, usize, usize, usize, usize) {
    let x0 = x.saturating_sub(radius);
    let y0 = y.saturating_sub(radius);
    let x1 = x.saturating_add(radius).min(width - 1);
    let y1 = y.saturating_add(radius).min(height - 1);
    (x0, y0, x1, y1, (x1 - x0 + 1) * (y1 - y0 + 1))
}
