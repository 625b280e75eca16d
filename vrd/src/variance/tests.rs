use common::Buffer2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::error::Error;
use crate::pixel::{Lab, Labx};

/// Integer-valued LAB image and its LABX twin; integer inputs keep the
/// single-precision sums exact so the two variants are directly comparable.
fn integer_lab_pair(
    width: usize,
    height: usize,
    seed: u64,
) -> (Buffer2<Lab<f64>>, Buffer2<Labx<f32>>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let lab = Buffer2::from_fn(width, height, |_, _| {
        Lab::new([
            rng.random_range(0..=100) as f64,
            rng.random_range(0..=100) as f64,
            rng.random_range(0..=100) as f64,
        ])
    });
    let labx = lab.map(|p| Labx::new([p[0] as f32, p[1] as f32, p[2] as f32, 0.0]));
    (lab, labx)
}

fn ramp_3x3() -> Buffer2<Lab<f64>> {
    Buffer2::from_fn(3, 3, |x, y| Lab::new([(y * 3 + x) as f64, 0.0, 0.0]))
}

// ============================================================================
// Known values
// ============================================================================

#[test]
fn test_ramp_center_and_corner() {
    let out = scalar::local_variance(&ramp_3x3(), 1, Reduction::StdDev).unwrap();
    // Center box covers all nine values 0..=8: variance 60/9.
    assert!((out[(1, 1)] - (60.0f64 / 9.0).sqrt()).abs() < 1e-12);
    // Corner box is truncated to {0, 1, 3, 4}: variance 2.5.
    assert!((out[(0, 0)] - 2.5f64.sqrt()).abs() < 1e-12);
    assert!((out[(2, 2)] - 2.5f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_variance_norm_single_channel() {
    let std = scalar::local_variance(&ramp_3x3(), 1, Reduction::StdDev).unwrap();
    let norm = scalar::local_variance(&ramp_3x3(), 1, Reduction::VarianceNorm).unwrap();
    // With one varying channel the norm of the variance vector is the variance itself.
    for (s, n) in std.iter().zip(norm.iter()) {
        assert!((s * s - n).abs() < 1e-9, "std {} norm {}", s, n);
    }
}

#[test]
fn test_radius_covering_image_is_global_variance() {
    let (lab, _) = integer_lab_pair(6, 4, 5);
    let out = scalar::local_variance(&lab, 50, Reduction::StdDev).unwrap();
    let first = out[(0, 0)];
    assert!(out.iter().all(|&v| (v - first).abs() < 1e-9));
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_uniform_image_is_exactly_zero() {
    for radius in [0, 1, 2, 5, 40] {
        let lab = Buffer2::new_filled(17, 9, Lab::new([53.2, -12.7, 30.1]));
        let labx = Buffer2::new_filled(17, 9, Labx::new([53.2f32, -12.7, 30.1, 0.0]));
        for reduction in [Reduction::StdDev, Reduction::VarianceNorm] {
            let a = scalar::local_variance(&lab, radius, reduction).unwrap();
            let b = wide::local_variance(&labx, radius, reduction).unwrap();
            assert!(a.iter().all(|&v| v == 0.0), "reference r={}", radius);
            assert!(b.iter().all(|&v| v == 0.0), "wide r={}", radius);
        }
    }
}

#[test]
fn test_non_negative_for_random_input() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let lab = Buffer2::from_fn(23, 19, |_, _| {
        Lab::new([
            rng.random_range(0.0..100.0),
            rng.random_range(-128.0..128.0),
            rng.random_range(-128.0..128.0),
        ])
    });
    let labx = lab.map(|p| Labx::new([p[0] as f32, p[1] as f32, p[2] as f32, 0.0]));
    for radius in [0, 1, 3, 8] {
        for reduction in [Reduction::StdDev, Reduction::VarianceNorm] {
            let a = scalar::local_variance(&lab, radius, reduction).unwrap();
            let b = wide::local_variance(&labx, radius, reduction).unwrap();
            assert!(a.iter().all(|v| *v >= 0.0 && v.is_finite()));
            assert!(b.iter().all(|v| *v >= 0.0 && v.is_finite()));
        }
    }
}

#[test]
fn test_dimensions_preserved() {
    for (w, h) in [(1, 1), (2, 17), (17, 2), (5, 5)] {
        let (lab, labx) = integer_lab_pair(w, h, 1);
        let a = scalar::local_variance(&lab, 2, Reduction::StdDev).unwrap();
        let b = wide::local_variance(&labx, 2, Reduction::StdDev).unwrap();
        assert_eq!(a.dimensions(), (w, h));
        assert_eq!(b.dimensions(), (w, h));
    }
}

#[test]
fn test_empty_image_rejected() {
    let lab: Buffer2<Lab<f64>> = Buffer2::new(0, 4, vec![]);
    assert_eq!(
        scalar::local_variance(&lab, 1, Reduction::StdDev).unwrap_err(),
        Error::EmptyImage {
            width: 0,
            height: 4
        }
    );
    let labx: Buffer2<Labx<f32>> = Buffer2::new(3, 0, vec![]);
    assert!(wide::local_variance(&labx, 1, Reduction::StdDev).is_err());
    assert!(wide::channel_magnitude(&labx).is_err());
}

// ============================================================================
// Cross-checks
// ============================================================================

#[test]
fn test_integral_matches_direct() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let lab = Buffer2::from_fn(21, 14, |_, _| {
        Lab::new([
            rng.random_range(0.0..100.0),
            rng.random_range(-50.0..50.0),
            rng.random_range(-50.0..50.0),
        ])
    });
    for radius in [0, 1, 4] {
        for reduction in [Reduction::StdDev, Reduction::VarianceNorm] {
            let fast = scalar::local_variance(&lab, radius, reduction).unwrap();
            let direct = scalar::local_variance_direct(&lab, radius, reduction).unwrap();
            for (a, b) in fast.iter().zip(direct.iter()) {
                // sqrt amplifies rounding near zero, so compare squares.
                assert!(
                    (a * a - b * b).abs() < 1e-6 * (1.0 + b * b),
                    "r={} {:?}: {} vs {}",
                    radius,
                    reduction,
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_wide_matches_reference() {
    let (lab, labx) = integer_lab_pair(32, 32, 2024);
    for radius in [1, 3, 6] {
        for reduction in [Reduction::StdDev, Reduction::VarianceNorm] {
            let reference = scalar::local_variance(&lab, radius, reduction).unwrap();
            let fast = wide::local_variance(&labx, radius, reduction).unwrap();
            for (&a, &b) in reference.iter().zip(fast.iter()) {
                let diff = (a - b as f64).abs();
                assert!(
                    diff <= 1e-3 * (1.0 + a),
                    "r={} {:?}: reference {} wide {}",
                    radius,
                    reduction,
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_channel_magnitude_both_variants() {
    let lab = Buffer2::from_fn(4, 2, |x, y| Lab::new([3.0 * x as f64, 4.0 * x as f64, y as f64]));
    let labx = lab.map(|p| Labx::new([p[0] as f32, p[1] as f32, p[2] as f32, 0.0]));
    let a = scalar::channel_magnitude(&lab).unwrap();
    let b = wide::channel_magnitude(&labx).unwrap();
    assert_eq!(a[(2, 0)], 10.0);
    assert_eq!(b[(2, 0)], 10.0);
    assert_eq!(a[(0, 1)], 1.0);
    for (&x, &y) in a.iter().zip(b.iter()) {
        assert!((x - y as f64).abs() < 1e-5);
    }
}

#[test]
fn test_flat_region_far_from_origin_is_exactly_zero() {
    // Busy left half drives the whole-image totals of squares far beyond f32's
    // exact integer range; the flat right half must still read as zero variance.
    let (width, height) = (600, 400);
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let lab = Buffer2::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Lab::new([
                rng.random_range(0..=100) as f64,
                rng.random_range(-100..=100) as f64,
                rng.random_range(-100..=100) as f64,
            ])
        } else {
            Lab::new([50.0, 20.0, -30.0])
        }
    });
    let labx = lab.map(|p| Labx::new([p[0] as f32, p[1] as f32, p[2] as f32, 0.0]));

    let radius = 3;
    let reference = scalar::local_variance(&lab, radius, Reduction::StdDev).unwrap();
    let fast = wide::local_variance(&labx, radius, Reduction::StdDev).unwrap();
    for y in 0..height {
        for x in width / 2 + radius..width {
            assert_eq!(reference[(x, y)], 0.0, "reference at ({}, {})", x, y);
            assert_eq!(fast[(x, y)], 0.0, "wide at ({}, {})", x, y);
        }
    }
}

#[test]
fn test_wide_matches_reference_on_color_scene() {
    use crate::pixel::{to_lab_image, to_labx_image};

    let rgb = crate::synthetic::discs(320, 240);
    let lab: Buffer2<Lab<f64>> = to_lab_image(&rgb);
    let labx: Buffer2<Labx<f32>> = to_labx_image(&rgb);
    for radius in [2, 5] {
        let reference = scalar::local_variance(&lab, radius, Reduction::StdDev).unwrap();
        let fast = wide::local_variance(&labx, radius, Reduction::StdDev).unwrap();
        for (&a, &b) in reference.iter().zip(fast.iter()) {
            assert!(
                (a - b as f64).abs() <= 1e-3 * (1.0 + a),
                "r={}: reference {} wide {}",
                radius,
                a,
                b
            );
        }
    }
}
