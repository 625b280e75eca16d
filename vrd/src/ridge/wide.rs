//! Wide ridge stage: `f32`, the four ridge axes as the four lanes.

use common::Buffer2;
use common::parallel::par_for_each_row;

use super::{RidgeRule, subtract_gradient_norm};
use crate::directions::{DirectionTable, RIDGE_AXES};
use crate::error::{Result, ensure_non_empty};
use crate::gradient::GradientField;
use crate::pixel::F32x4;

/// Ridge score per pixel: best axis response minus the local gradient norm.
pub fn ridge_map(
    field: &GradientField<f32>,
    directions: &DirectionTable,
    rule: RidgeRule,
) -> Result<Buffer2<f32>> {
    ensure_non_empty(field.gx())?;
    let mut combined = match rule {
        RidgeRule::AxisScan => axis_response(field, directions),
        RidgeRule::PositiveEvidence => evidence_response(field, directions),
    };
    subtract_gradient_norm(&mut combined, field.gx(), field.gy());
    Ok(combined)
}

/// Gradient components at `p + sign·o_k` for the four axes `k`, one per lane.
#[inline]
fn gather(
    field: &GradientField<f32>,
    directions: &DirectionTable,
    x: isize,
    y: isize,
    sign: isize,
) -> (F32x4, F32x4) {
    let mut gx = [0.0; RIDGE_AXES];
    let mut gy = [0.0; RIDGE_AXES];
    for k in 0..RIDGE_AXES {
        let (ox, oy) = directions.offset(k);
        let (sx, sy) = (x + sign * ox, y + sign * oy);
        gx[k] = *field.gx().get_clamped(sx, sy);
        gy[k] = *field.gy().get_clamped(sx, sy);
    }
    (F32x4::new(gx), F32x4::new(gy))
}

/// Pairwise lane maximum, the same reduction tree as the per-axis images use.
#[inline]
fn lane_max_tree(v: F32x4) -> f32 {
    v[0].max(v[1]).max(v[2].max(v[3]))
}

/// Best [`RidgeRule::AxisScan`] response over all axes, before the edge penalty.
pub fn axis_response(field: &GradientField<f32>, directions: &DirectionTable) -> Buffer2<f32> {
    let (width, height) = field.dimensions();
    let mut output = Buffer2::new_default(width, height);
    let dx = directions.dx_lanes(0);
    let dy = directions.dy_lanes(0);

    par_for_each_row(output.pixels_mut(), width, |y, row| {
        let y = y as isize;
        for (x, out) in row.iter_mut().enumerate() {
            let x = x as isize;
            let (mx, my) = gather(field, directions, x, y, -1);
            let (px, py) = gather(field, directions, x, y, 1);
            let proj_m = mx * dx + my * dy;
            let proj_p = px * dx + py * dy;

            let geometric = (-(proj_m * proj_p)).max(F32x4::zero()).sqrt();
            let arithmetic = (proj_m - proj_p).max(F32x4::zero());
            *out = (geometric + arithmetic).horizontal_max();
        }
    });

    output
}

/// Best [`RidgeRule::PositiveEvidence`] response over all axes, before the edge penalty.
pub fn evidence_response(field: &GradientField<f32>, directions: &DirectionTable) -> Buffer2<f32> {
    let (width, height) = field.dimensions();
    let mut output = Buffer2::new_default(width, height);
    let front_dx = directions.dx_lanes(0);
    let front_dy = directions.dy_lanes(0);
    let back_dx = directions.dx_lanes(RIDGE_AXES);
    let back_dy = directions.dy_lanes(RIDGE_AXES);

    par_for_each_row(output.pixels_mut(), width, |y, row| {
        let y = y as isize;
        for (x, out) in row.iter_mut().enumerate() {
            let x = x as isize;
            // p + o_k for the front half, p + o_{k+K/2} = p - o_k for the back half.
            let (fx, fy) = gather(field, directions, x, y, 1);
            let (bx, by) = gather(field, directions, x, y, -1);

            let front_dot = fx * front_dx + fy * front_dy;
            let back_dot = bx * back_dx + by * back_dy;
            let (fx, fy) = (
                F32x4::select_negative(front_dot, fx),
                F32x4::select_negative(front_dot, fy),
            );
            let (bx, by) = (
                F32x4::select_negative(back_dot, bx),
                F32x4::select_negative(back_dot, by),
            );

            let axes = (-(fx * bx + fy * by)).max(F32x4::zero()).sqrt();
            *out = lane_max_tree(axes);
        }
    });

    output
}
