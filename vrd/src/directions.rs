//! Sampling directions shared by the gradient and ridge stages.
//!
//! Directions are `K = 8` unit vectors at angles `2πk/K`. Direction `k` and
//! `k + K/2` are antiparallel and together form ridge axis `k`.

use glam::{DVec2, Vec2};

use crate::config::MAX_RADIUS;
use crate::pixel::F32x4;

pub const GRADIENT_DIRECTIONS: usize = 8;
pub const RIDGE_AXES: usize = GRADIENT_DIRECTIONS / 2;

/// Unit vectors are rounded to this many units per 1.0 so that axis-aligned
/// components are exactly zero and `d[k + K/2] == -d[k]` bit for bit.
const UNIT_QUANTUM: f64 = 1e12;

/// Unit vectors and integer sampling offsets for one radius.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionTable {
    radius: usize,
    units: [DVec2; GRADIENT_DIRECTIONS],
    units_f32: [Vec2; GRADIENT_DIRECTIONS],
    offsets: [(isize, isize); GRADIENT_DIRECTIONS],
}

impl DirectionTable {
    /// Panics if `radius` exceeds [`MAX_RADIUS`]; larger offsets would overflow
    /// the samplers' index arithmetic.
    pub fn new(radius: usize) -> Self {
        assert!(
            radius <= MAX_RADIUS,
            "radius must be at most {}, got {}",
            MAX_RADIUS,
            radius
        );

        let units: [DVec2; GRADIENT_DIRECTIONS] = std::array::from_fn(|k| {
            let angle = std::f64::consts::TAU * k as f64 / GRADIENT_DIRECTIONS as f64;
            let (sin, cos) = angle.sin_cos();
            DVec2::new(quantize(cos), quantize(sin))
        });

        let r = radius as f64;
        let mut offsets = [(0isize, 0isize); GRADIENT_DIRECTIONS];
        for k in 0..RIDGE_AXES {
            // Truncation toward zero keeps opposite offsets exact negatives.
            let dx = (r * units[k].x).trunc() as isize;
            let dy = (r * units[k].y).trunc() as isize;
            offsets[k] = (dx, dy);
            offsets[k + RIDGE_AXES] = (-dx, -dy);
        }

        Self {
            radius,
            units,
            units_f32: units.map(|u| u.as_vec2()),
            offsets,
        }
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    #[inline]
    pub fn unit(&self, k: usize) -> DVec2 {
        self.units[k]
    }

    #[inline]
    pub fn unit_f32(&self, k: usize) -> Vec2 {
        self.units_f32[k]
    }

    /// Integer sampling offset `(dx, dy)` for direction `k`.
    #[inline]
    pub fn offset(&self, k: usize) -> (isize, isize) {
        self.offsets[k]
    }

    /// X components of directions `first..first + 4` as lanes.
    #[inline]
    pub fn dx_lanes(&self, first: usize) -> F32x4 {
        F32x4::new(std::array::from_fn(|lane| self.units_f32[first + lane].x))
    }

    /// Y components of directions `first..first + 4` as lanes.
    #[inline]
    pub fn dy_lanes(&self, first: usize) -> F32x4 {
        F32x4::new(std::array::from_fn(|lane| self.units_f32[first + lane].y))
    }
}

#[inline]
fn quantize(v: f64) -> f64 {
    (v * UNIT_QUANTUM).round() / UNIT_QUANTUM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_are_unit_length() {
        let table = DirectionTable::new(3);
        for k in 0..GRADIENT_DIRECTIONS {
            let len = table.unit(k).length();
            assert!((len - 1.0).abs() < 1e-11, "direction {} has length {}", k, len);
        }
    }

    #[test]
    fn test_axis_aligned_components_exact() {
        let table = DirectionTable::new(1);
        assert_eq!(table.unit(0), DVec2::new(1.0, 0.0));
        assert_eq!(table.unit(2), DVec2::new(0.0, 1.0));
        assert_eq!(table.unit(4), DVec2::new(-1.0, 0.0));
        assert_eq!(table.unit(6), DVec2::new(0.0, -1.0));
        assert_eq!(table.unit(1).x, table.unit(1).y);
    }

    #[test]
    fn test_opposite_directions_are_exact_negatives() {
        let table = DirectionTable::new(7);
        for k in 0..RIDGE_AXES {
            assert_eq!(table.unit(k + RIDGE_AXES), -table.unit(k));
            assert_eq!(table.unit_f32(k + RIDGE_AXES), -table.unit_f32(k));
            let (dx, dy) = table.offset(k);
            assert_eq!(table.offset(k + RIDGE_AXES), (-dx, -dy));
        }
    }

    #[test]
    fn test_offsets_truncate_toward_zero() {
        let table = DirectionTable::new(2);
        assert_eq!(table.offset(0), (2, 0));
        assert_eq!(table.offset(1), (1, 1));
        assert_eq!(table.offset(2), (0, 2));
        assert_eq!(table.offset(3), (-1, 1));

        let table = DirectionTable::new(5);
        assert_eq!(table.offset(1), (3, 3));
        assert_eq!(table.offset(3), (-3, 3));
    }

    #[test]
    fn test_zero_radius_has_zero_offsets() {
        let table = DirectionTable::new(0);
        for k in 0..GRADIENT_DIRECTIONS {
            assert_eq!(table.offset(k), (0, 0));
        }
    }

    #[test]
    fn test_lanes_match_units() {
        let table = DirectionTable::new(4);
        for first in [0, RIDGE_AXES] {
            let dx = table.dx_lanes(first);
            let dy = table.dy_lanes(first);
            for lane in 0..4 {
                assert_eq!(dx[lane], table.unit_f32(first + lane).x);
                assert_eq!(dy[lane], table.unit_f32(first + lane).y);
            }
        }
    }

    #[test]
    fn test_max_radius_offsets() {
        let table = DirectionTable::new(MAX_RADIUS);
        assert_eq!(table.offset(0), (MAX_RADIUS as isize, 0));
        assert_eq!(table.offset(6), (0, -(MAX_RADIUS as isize)));
    }

    #[test]
    #[should_panic(expected = "radius must be at most")]
    fn test_radius_above_max_panics() {
        DirectionTable::new(MAX_RADIUS + 1);
    }
}
