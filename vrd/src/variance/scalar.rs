//! Reference variance blur: `f64` arithmetic, one channel per operation.

use common::Buffer2;
use common::parallel::par_for_each_row;

use super::{Reduction, clamped_box};
use crate::error::{Result, ensure_non_empty};
use crate::integral::IntegralImage;
use crate::pixel::Pixel;

/// Variance magnitude of `image` over boxes of radius `radius`.
///
/// The integral tables are shifted by the top-left pixel.
pub fn local_variance<const N: usize>(
    image: &Buffer2<Pixel<f64, N>>,
    radius: usize,
    reduction: Reduction,
) -> Result<Buffer2<f64>> {
    ensure_non_empty(image)?;
    let integral = IntegralImage::build_with_offset(image, image[(0, 0)])?;
    Ok(variance_from_integral(&integral, radius, reduction))
}

/// Variance magnitude read from prebuilt integral tables.
pub fn variance_from_integral<const N: usize>(
    integral: &IntegralImage<f64, N>,
    radius: usize,
    reduction: Reduction,
) -> Buffer2<f64> {
    let (width, height) = (integral.width(), integral.height());
    let mut output = Buffer2::new_default(width, height);

    par_for_each_row(output.pixels_mut(), width, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let (x0, y0, x1, y1, area) = clamped_box(x, y, radius, width, height);
            let sum = integral.box_sum(x0, y0, x1, y1);
            let sum_sq = integral.box_sum_sq(x0, y0, x1, y1);
            let norm = area as f64;

            let mut acc = 0.0f64;
            for c in 0..N {
                let mean = sum[c] / norm;
                let variance = (sum_sq[c] / norm - mean * mean).max(0.0);
                acc += match reduction {
                    Reduction::StdDev => variance,
                    Reduction::VarianceNorm => variance * variance,
                };
            }
            *out = acc.sqrt();
        }
    });

    output
}

/// Same result as [`local_variance`] computed by visiting every pixel of
/// every box, with a two-pass mean/deviation per box. O(w·h·r²).
pub fn local_variance_direct<const N: usize>(
    image: &Buffer2<Pixel<f64, N>>,
    radius: usize,
    reduction: Reduction,
) -> Result<Buffer2<f64>> {
    ensure_non_empty(image)?;
    let (width, height) = image.dimensions();
    let mut output = Buffer2::new_default(width, height);

    par_for_each_row(output.pixels_mut(), width, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let (x0, y0, x1, y1, area) = clamped_box(x, y, radius, width, height);
            let norm = area as f64;

            let mut mean = [0.0f64; N];
            for j in y0..=y1 {
                for p in &image.row(j)[x0..=x1] {
                    for c in 0..N {
                        mean[c] += p[c];
                    }
                }
            }
            mean.iter_mut().for_each(|m| *m /= norm);

            let mut variance = [0.0f64; N];
            for j in y0..=y1 {
                for p in &image.row(j)[x0..=x1] {
                    for c in 0..N {
                        let d = p[c] - mean[c];
                        variance[c] += d * d;
                    }
                }
            }

            let acc: f64 = variance
                .iter()
                .map(|&v| {
                    let v = v / norm;
                    match reduction {
                        Reduction::StdDev => v,
                        Reduction::VarianceNorm => v * v,
                    }
                })
                .sum();
            *out = acc.sqrt();
        }
    });

    Ok(output)
}

/// Per-pixel Euclidean norm of the channels, `sqrt(Σ p_c²)`.
pub fn channel_magnitude<const N: usize>(image: &Buffer2<Pixel<f64, N>>) -> Result<Buffer2<f64>> {
    ensure_non_empty(image)?;
    let width = image.width();
    let mut output = Buffer2::new_default(width, image.height());

    par_for_each_row(output.pixels_mut(), width, |y, row| {
        for (out, p) in row.iter_mut().zip(image.row(y)) {
            let mut acc = 0.0f64;
            for c in 0..N {
                acc += p[c] * p[c];
            }
            *out = acc.sqrt();
        }
    });

    Ok(output)
}
