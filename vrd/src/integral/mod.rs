//! Summed-area tables over channel-wise pixels.
//!
//! `sum(x, y)` holds the channel-wise sum of all source pixels in
//! `[0, x] × [0, y]`, `sum_sq(x, y)` the sum of their squares. Any inclusive
//! axis-aligned box sum is then four lookups.
//!
//! Sources may be shifted by a constant per-channel offset before accumulation.
//! Variance is unaffected by the shift, and picking a representative pixel as the
//! offset keeps the sums small. Tables for `f32` sources are still kept in
//! `f64` (see [`IntegralImage::build_promoted`]): whole-image totals of squares
//! exceed what `f32` can difference without cancellation.

#[cfg(test)]
mod tests;

use common::Buffer2;
use common::parallel::par_rows2_mut;
use num_traits::Float;
use rayon::prelude::*;

use crate::error::{Result, ensure_non_empty};
use crate::pixel::Pixel;

/// Prefix-sum and prefix-sum-of-squares tables for one image.
#[derive(Debug, Clone)]
pub struct IntegralImage<T, const N: usize> {
    sum: Buffer2<Pixel<T, N>>,
    sum_sq: Buffer2<Pixel<T, N>>,
    offset: Pixel<T, N>,
}

impl<T, const N: usize> IntegralImage<T, N>
where
    T: Float + Default + Send + Sync,
{
    /// Tables over the unshifted source.
    pub fn build(src: &Buffer2<Pixel<T, N>>) -> Result<Self> {
        Self::build_with_offset(src, Pixel::zero())
    }

    /// Tables over `src - offset`.
    pub fn build_with_offset(src: &Buffer2<Pixel<T, N>>, offset: Pixel<T, N>) -> Result<Self> {
        Self::build_promoted(src, offset)
    }

    /// Tables over `src - offset` with every channel widened to `T` first.
    ///
    /// Prefix totals grow with the image area, so a narrow source (`f32`)
    /// still accumulates in `T` (`f64`). Rows are prefix-scanned in parallel,
    /// then accumulated top to bottom.
    pub fn build_promoted<S>(src: &Buffer2<Pixel<S, N>>, offset: Pixel<S, N>) -> Result<Self>
    where
        S: Copy + Into<T> + Sync,
    {
        ensure_non_empty(src)?;
        let (width, height) = src.dimensions();
        let offset: Pixel<T, N> = offset.map(Into::into);

        let mut sum = Buffer2::new_default(width, height);
        let mut sum_sq = Buffer2::new_default(width, height);

        par_rows2_mut(sum.pixels_mut(), sum_sq.pixels_mut(), width).for_each(
            |(start_row, sum_chunk, sq_chunk)| {
                let rows = sum_chunk
                    .chunks_exact_mut(width)
                    .zip(sq_chunk.chunks_exact_mut(width));
                for (local_y, (sum_row, sq_row)) in rows.enumerate() {
                    let src_row = src.row(start_row + local_y);
                    let mut acc = Pixel::zero();
                    let mut acc_sq = Pixel::zero();
                    for ((s, sq), &p) in sum_row.iter_mut().zip(sq_row.iter_mut()).zip(src_row) {
                        let wide: Pixel<T, N> = p.map(Into::into);
                        let d = wide - offset;
                        acc += d;
                        acc_sq += d * d;
                        *s = acc;
                        *sq = acc_sq;
                    }
                }
            },
        );

        accumulate_rows(sum.pixels_mut(), width);
        accumulate_rows(sum_sq.pixels_mut(), width);

        Ok(Self {
            sum,
            sum_sq,
            offset,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.sum.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.sum.height()
    }

    /// Per-channel shift subtracted from every source pixel.
    #[inline]
    pub fn offset(&self) -> Pixel<T, N> {
        self.offset
    }

    #[inline]
    pub fn sum_table(&self) -> &Buffer2<Pixel<T, N>> {
        &self.sum
    }

    #[inline]
    pub fn sum_sq_table(&self) -> &Buffer2<Pixel<T, N>> {
        &self.sum_sq
    }

    /// Sum of shifted pixels over the inclusive box `[x0, x1] × [y0, y1]`.
    #[inline]
    pub fn box_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> Pixel<T, N> {
        box_query(&self.sum, x0, y0, x1, y1)
    }

    /// Sum of squared shifted pixels over the inclusive box `[x0, x1] × [y0, y1]`.
    #[inline]
    pub fn box_sum_sq(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> Pixel<T, N> {
        box_query(&self.sum_sq, x0, y0, x1, y1)
    }
}

#[inline]
fn box_query<T: Float, const N: usize>(
    table: &Buffer2<Pixel<T, N>>,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
) -> Pixel<T, N> {
    debug_assert!(x0 <= x1 && x1 < table.width());
    debug_assert!(y0 <= y1 && y1 < table.height());

    let mut total = table[(x1, y1)];
    if x0 > 0 {
        total -= table[(x0 - 1, y1)];
    }
    if y0 > 0 {
        total -= table[(x1, y0 - 1)];
    }
    if x0 > 0 && y0 > 0 {
        total += table[(x0 - 1, y0 - 1)];
    }
    total
}

/// Turns row prefix sums into 2-D prefix sums by adding each row onto the next.
fn accumulate_rows<P>(data: &mut [P], width: usize)
where
    P: Copy + std::ops::AddAssign,
{
    let height = data.len() / width;
    for y in 1..height {
        let (above, rest) = data.split_at_mut(y * width);
        let prev = &above[(y - 1) * width..];
        for (cur, &p) in rest[..width].iter_mut().zip(prev) {
            *cur += p;
        }
    }
}
