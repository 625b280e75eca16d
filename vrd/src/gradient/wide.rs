//! Wide gradient: `f32`, the eight directions as two groups of four lanes.

use common::Buffer2;
use common::parallel::par_rows2_mut;
use rayon::prelude::*;

use super::GradientField;
use crate::directions::{DirectionTable, GRADIENT_DIRECTIONS};
use crate::error::{Result, ensure_non_empty};
use crate::pixel::F32x4;

const LANES: usize = 4;
const GROUPS: usize = GRADIENT_DIRECTIONS / LANES;

pub fn oriented_gradient(
    magnitude: &Buffer2<f32>,
    directions: &DirectionTable,
) -> Result<GradientField<f32>> {
    ensure_non_empty(magnitude)?;
    let (width, height) = magnitude.dimensions();
    let mut gx = Buffer2::new_default(width, height);
    let mut gy = Buffer2::new_default(width, height);

    let dx: [F32x4; GROUPS] = std::array::from_fn(|g| directions.dx_lanes(g * LANES));
    let dy: [F32x4; GROUPS] = std::array::from_fn(|g| directions.dy_lanes(g * LANES));

    par_rows2_mut(gx.pixels_mut(), gy.pixels_mut(), width).for_each(
        |(start_row, gx_chunk, gy_chunk)| {
            for (i, (out_x, out_y)) in gx_chunk.iter_mut().zip(gy_chunk.iter_mut()).enumerate() {
                let x = (i % width) as isize;
                let y = (start_row + i / width) as isize;

                let mut acc_x = F32x4::zero();
                let mut acc_y = F32x4::zero();
                for g in 0..GROUPS {
                    let sample = |sign: isize| {
                        F32x4::new(std::array::from_fn(|lane| {
                            let (ox, oy) = directions.offset(g * LANES + lane);
                            *magnitude.get_clamped(x + sign * ox, y + sign * oy)
                        }))
                    };
                    let val = sample(1) - sample(-1);
                    acc_x += val * dx[g];
                    acc_y += val * dy[g];
                }
                *out_x = acc_x.sum();
                *out_y = acc_y.sum();
            }
        },
    );

    Ok(GradientField::new(gx, gy))
}
