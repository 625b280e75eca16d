//! Reference gradient: `f64`, one direction per operation.

use common::Buffer2;
use common::parallel::par_rows2_mut;
use rayon::prelude::*;

use super::GradientField;
use crate::directions::{DirectionTable, GRADIENT_DIRECTIONS};
use crate::error::{Result, ensure_non_empty};

pub fn oriented_gradient(
    magnitude: &Buffer2<f64>,
    directions: &DirectionTable,
) -> Result<GradientField<f64>> {
    ensure_non_empty(magnitude)?;
    let (width, height) = magnitude.dimensions();
    let mut gx = Buffer2::new_default(width, height);
    let mut gy = Buffer2::new_default(width, height);

    par_rows2_mut(gx.pixels_mut(), gy.pixels_mut(), width).for_each(
        |(start_row, gx_chunk, gy_chunk)| {
            for (i, (out_x, out_y)) in gx_chunk.iter_mut().zip(gy_chunk.iter_mut()).enumerate() {
                let x = (i % width) as isize;
                let y = (start_row + i / width) as isize;

                let mut sum_x = 0.0;
                let mut sum_y = 0.0;
                for k in 0..GRADIENT_DIRECTIONS {
                    let (ox, oy) = directions.offset(k);
                    let plus = *magnitude.get_clamped(x + ox, y + oy);
                    let minus = *magnitude.get_clamped(x - ox, y - oy);
                    let val = plus - minus;
                    let unit = directions.unit(k);
                    sum_x += val * unit.x;
                    sum_y += val * unit.y;
                }
                *out_x = sum_x;
                *out_y = sum_y;
            }
        },
    );

    Ok(GradientField::new(gx, gy))
}
