//! Wide variance blur: `f32` LABX, four channels per operation.
//!
//! Box statistics come from `f64` tables; each pixel's variance vector is
//! narrowed to [`F32x4`] before the reduction.

use common::Buffer2;
use common::parallel::par_for_each_row;

use super::{Reduction, clamped_box};
use crate::error::{Result, ensure_non_empty};
use crate::integral::IntegralImage;
use crate::pixel::{F32x4, Labx, Pixel};

/// Variance magnitude of `image` over boxes of radius `radius`.
///
/// The integral tables are shifted by the top-left pixel and accumulated in `f64`.
pub fn local_variance(
    image: &Buffer2<Labx<f32>>,
    radius: usize,
    reduction: Reduction,
) -> Result<Buffer2<f32>> {
    ensure_non_empty(image)?;
    let integral = IntegralImage::<f64, 4>::build_promoted(image, image[(0, 0)])?;
    Ok(variance_from_integral(&integral, radius, reduction))
}

/// Variance magnitude read from prebuilt integral tables.
pub fn variance_from_integral(
    integral: &IntegralImage<f64, 4>,
    radius: usize,
    reduction: Reduction,
) -> Buffer2<f32> {
    let (width, height) = (integral.width(), integral.height());
    let mut output = Buffer2::new_default(width, height);

    par_for_each_row(output.pixels_mut(), width, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let (x0, y0, x1, y1, area) = clamped_box(x, y, radius, width, height);
            let norm = area as f64;

            let mean = integral.box_sum(x0, y0, x1, y1) / norm;
            let mean_sq = integral.box_sum_sq(x0, y0, x1, y1) / norm;
            let variance: F32x4 = (mean_sq - mean * mean)
                .max(Pixel::zero())
                .map(|v| v as f32);

            let energy = match reduction {
                Reduction::StdDev => variance,
                Reduction::VarianceNorm => variance * variance,
            };
            *out = energy.sum().sqrt();
        }
    });

    output
}

/// Per-pixel Euclidean norm of the four lanes.
pub fn channel_magnitude(image: &Buffer2<Labx<f32>>) -> Result<Buffer2<f32>> {
    ensure_non_empty(image)?;
    let width = image.width();
    let mut output = Buffer2::new_default(width, image.height());

    par_for_each_row(output.pixels_mut(), width, |y, row| {
        for (out, &p) in row.iter_mut().zip(image.row(y)) {
            *out = p.magnitude();
        }
    });

    Ok(output)
}
