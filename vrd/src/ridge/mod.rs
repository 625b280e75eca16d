//! Ridge detection from opposing gradient evidence.
//!
//! A ridge at `p` shows up as gradients on either side of `p` that point
//! toward each other along one of the `K/2` axes. Each axis yields a
//! response, the best axis wins, and the local gradient norm is subtracted
//! so that plain step edges (strong gradient at `p` itself) are suppressed:
//!
//! `score(p) = max_k response_k(p) - |G(p)|`
//!
//! Two combination rules are available, see [`RidgeRule`].

pub mod scalar;
pub mod wide;


use common::Buffer2;
use common::parallel::par_for_each_row;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// How the two sides of an axis combine into a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RidgeRule {
    /// Project the gradients at `p - o_k` and `p + o_k` on `d_k`:
    /// `sqrt(max(0, -proj_m·proj_p)) + max(0, proj_m - proj_p)`.
    #[default]
    AxisScan,
    /// Keep the gradient at `p + o_k` only where it points against `d_k`,
    /// then score each axis by `sqrt(max(0, -(E_k · E_{k+K/2})))`.
    PositiveEvidence,
}

/// Pixel-wise maximum of all layers, reduced two at a time.
///
/// An odd layer out is carried to the next round unchanged.
pub(crate) fn max_tree<T>(mut layers: Vec<Buffer2<T>>) -> Buffer2<T>
where
    T: Float + Send + Sync,
{
    assert!(!layers.is_empty(), "max_tree needs at least one layer");
    while layers.len() > 1 {
        let mut next = Vec::with_capacity(layers.len().div_ceil(2));
        let mut iter = layers.into_iter();
        while let Some(mut a) = iter.next() {
            if let Some(b) = iter.next() {
                let width = a.width();
                par_for_each_row(a.pixels_mut(), width, |y, row| {
                    for (v, &other) in row.iter_mut().zip(b.row(y)) {
                        *v = (*v).max(other);
                    }
                });
            }
            next.push(a);
        }
        layers = next;
    }
    layers.swap_remove(0)
}

/// `combined(x, y) - sqrt(gx² + gy²)` in place.
pub(crate) fn subtract_gradient_norm<T>(combined: &mut Buffer2<T>, gx: &Buffer2<T>, gy: &Buffer2<T>)
where
    T: Float + Send + Sync,
{
    let width = combined.width();
    par_for_each_row(combined.pixels_mut(), width, |y, row| {
        for ((v, &dx), &dy) in row.iter_mut().zip(gx.row(y)).zip(gy.row(y)) {
            *v = *v - dx.hypot(dy);
        }
    });
}
