//! Oriented gradient field from multi-directional finite differences.
//!
//! For every direction `k` the magnitude image is sampled at `p + o_k` and
//! `p - o_k` (integer offsets of length ~r, clamped per axis into the image);
//! the difference is projected back on the unit vector `d_k` and summed:
//! `G = Σ_k (m(p + o_k) - m(p - o_k)) · d_k`.

pub mod scalar;
pub mod wide;


use common::Buffer2;
use num_traits::Float;

/// Per-pixel gradient as two scalar images of equal size.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField<T> {
    gx: Buffer2<T>,
    gy: Buffer2<T>,
}

impl<T> GradientField<T> {
    /// Panics if `gx` and `gy` differ in size.
    pub fn new(gx: Buffer2<T>, gy: Buffer2<T>) -> Self {
        assert!(
            gx.same_dimensions(&gy),
            "Gradient components must have equal dimensions: {:?} vs {:?}",
            gx.dimensions(),
            gy.dimensions()
        );
        Self { gx, gy }
    }

    #[inline]
    pub fn gx(&self) -> &Buffer2<T> {
        &self.gx
    }

    #[inline]
    pub fn gy(&self) -> &Buffer2<T> {
        &self.gy
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.gx.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.gx.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        self.gx.dimensions()
    }

    pub fn into_parts(self) -> (Buffer2<T>, Buffer2<T>) {
        (self.gx, self.gy)
    }
}

impl<T: Float> GradientField<T> {
    /// `sqrt(gx² + gy²)` at `(x, y)`.
    #[inline]
    pub fn norm_at(&self, x: usize, y: usize) -> T {
        self.gx[(x, y)].hypot(self.gy[(x, y)])
    }
}
