//! Reference ridge stage: `f64`, one axis per operation.

use common::Buffer2;
use common::parallel::par_for_each_row;
use glam::DVec2;

use super::{RidgeRule, max_tree, subtract_gradient_norm};
use crate::directions::{DirectionTable, GRADIENT_DIRECTIONS, RIDGE_AXES};
use crate::error::{Result, ensure_non_empty};
use crate::gradient::GradientField;

/// Ridge score per pixel: best axis response minus the local gradient norm.
pub fn ridge_map(
    field: &GradientField<f64>,
    directions: &DirectionTable,
    rule: RidgeRule,
) -> Result<Buffer2<f64>> {
    ensure_non_empty(field.gx())?;
    let mut combined = match rule {
        RidgeRule::AxisScan => axis_response(field, directions),
        RidgeRule::PositiveEvidence => evidence_response(field, directions),
    };
    subtract_gradient_norm(&mut combined, field.gx(), field.gy());
    Ok(combined)
}

#[inline]
fn gradient_at(field: &GradientField<f64>, x: isize, y: isize) -> DVec2 {
    DVec2::new(*field.gx().get_clamped(x, y), *field.gy().get_clamped(x, y))
}

/// Best [`RidgeRule::AxisScan`] response over all axes, before the edge penalty.
pub fn axis_response(field: &GradientField<f64>, directions: &DirectionTable) -> Buffer2<f64> {
    let (width, height) = field.dimensions();
    let mut output = Buffer2::new_default(width, height);

    par_for_each_row(output.pixels_mut(), width, |y, row| {
        let y = y as isize;
        for (x, out) in row.iter_mut().enumerate() {
            let x = x as isize;
            let mut best = f64::NEG_INFINITY;
            for k in 0..RIDGE_AXES {
                let (ox, oy) = directions.offset(k);
                let unit = directions.unit(k);
                let proj_m = gradient_at(field, x - ox, y - oy).dot(unit);
                let proj_p = gradient_at(field, x + ox, y + oy).dot(unit);

                let geometric = (-(proj_m * proj_p)).max(0.0).sqrt();
                let arithmetic = (proj_m - proj_p).max(0.0);
                best = best.max(geometric + arithmetic);
            }
            *out = best;
        }
    });

    output
}

/// Gradient at `p + o_k` where it opposes `d_k`, zero elsewhere.
pub fn evidence_field(
    field: &GradientField<f64>,
    directions: &DirectionTable,
    k: usize,
) -> Buffer2<DVec2> {
    let (width, height) = field.dimensions();
    let (ox, oy) = directions.offset(k);
    let unit = directions.unit(k);
    let mut output = Buffer2::new_default(width, height);

    par_for_each_row(output.pixels_mut(), width, |y, row| {
        let y = y as isize;
        for (x, out) in row.iter_mut().enumerate() {
            let g = gradient_at(field, x as isize + ox, y + oy);
            *out = if g.dot(unit) < 0.0 { g } else { DVec2::ZERO };
        }
    });

    output
}

/// Best [`RidgeRule::PositiveEvidence`] response over all axes, before the edge penalty.
pub fn evidence_response(field: &GradientField<f64>, directions: &DirectionTable) -> Buffer2<f64> {
    let (width, height) = field.dimensions();
    let evidence: Vec<Buffer2<DVec2>> = (0..GRADIENT_DIRECTIONS)
        .map(|k| evidence_field(field, directions, k))
        .collect();

    let axes: Vec<Buffer2<f64>> = (0..RIDGE_AXES)
        .map(|k| {
            let (front, back) = (&evidence[k], &evidence[k + RIDGE_AXES]);
            let mut axis = Buffer2::new_default(width, height);
            par_for_each_row(axis.pixels_mut(), width, |y, row| {
                for ((out, e_front), e_back) in row.iter_mut().zip(front.row(y)).zip(back.row(y)) {
                    *out = (-e_front.dot(*e_back)).max(0.0).sqrt();
                }
            });
            axis
        })
        .collect();

    max_tree(axes)
}
