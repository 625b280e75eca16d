use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::error::Error;
use crate::pixel::{F32x4, Lab};

fn random_lab(width: usize, height: usize, seed: u64) -> Buffer2<Lab<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Buffer2::from_fn(width, height, |_, _| {
        Lab::new([
            rng.random_range(0.0..100.0),
            rng.random_range(-80.0..80.0),
            rng.random_range(-80.0..80.0),
        ])
    })
}

fn brute_force_sum(
    src: &Buffer2<Lab<f64>>,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
) -> (Lab<f64>, Lab<f64>) {
    let mut sum = Lab::zero();
    let mut sum_sq = Lab::zero();
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = src[(x, y)];
            sum += p;
            sum_sq += p * p;
        }
    }
    (sum, sum_sq)
}

fn assert_close(actual: Lab<f64>, expected: Lab<f64>, tol: f64) {
    for c in 0..3 {
        assert!(
            (actual[c] - expected[c]).abs() <= tol * (1.0 + expected[c].abs()),
            "channel {}: got {}, expected {}",
            c,
            actual[c],
            expected[c]
        );
    }
}

#[test]
fn test_table_corners() {
    let src = Buffer2::from_fn(4, 3, |x, y| Lab::new([(x + 10 * y) as f64, 1.0, 0.0]));
    let integral = IntegralImage::build(&src).unwrap();

    assert_eq!(integral.sum_table()[(0, 0)], src[(0, 0)]);
    // Bottom-right holds the total of the whole image.
    let (total, total_sq) = brute_force_sum(&src, 0, 0, 3, 2);
    assert_eq!(integral.sum_table()[(3, 2)], total);
    assert_eq!(integral.sum_sq_table()[(3, 2)], total_sq);
    assert_eq!(integral.sum_table()[(3, 2)][1], 12.0);
}

#[test]
fn test_box_sums_match_brute_force() {
    let (width, height) = (37, 23);
    let src = random_lab(width, height, 7);
    let integral = IntegralImage::build(&src).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..200 {
        let x0 = rng.random_range(0..width);
        let x1 = rng.random_range(x0..width);
        let y0 = rng.random_range(0..height);
        let y1 = rng.random_range(y0..height);

        let (sum, sum_sq) = brute_force_sum(&src, x0, y0, x1, y1);
        assert_close(integral.box_sum(x0, y0, x1, y1), sum, 1e-9);
        assert_close(integral.box_sum_sq(x0, y0, x1, y1), sum_sq, 1e-9);
    }
}

#[test]
fn test_single_pixel_boxes() {
    let src = random_lab(9, 6, 3);
    let integral = IntegralImage::build(&src).unwrap();
    for y in 0..6 {
        for x in 0..9 {
            assert_close(integral.box_sum(x, y, x, y), src[(x, y)], 1e-9);
        }
    }
}

#[test]
fn test_offset_shifts_every_pixel() {
    let src = random_lab(15, 11, 21);
    let offset = src[(0, 0)];
    let integral = IntegralImage::build_with_offset(&src, offset).unwrap();
    assert_eq!(integral.offset(), offset);

    let shifted = src.map(|&p| p - offset);
    let (sum, sum_sq) = brute_force_sum(&shifted, 2, 3, 12, 9);
    assert_close(integral.box_sum(2, 3, 12, 9), sum, 1e-9);
    assert_close(integral.box_sum_sq(2, 3, 12, 9), sum_sq, 1e-9);
}

#[test]
fn test_uniform_source_with_own_offset_is_all_zero() {
    let src = Buffer2::new_filled(20, 13, F32x4::new([41.5, -3.25, 7.0, 0.0]));
    let integral = IntegralImage::build_with_offset(&src, src[(0, 0)]).unwrap();
    assert!(integral.sum_table().iter().all(|p| *p == F32x4::zero()));
    assert!(integral.sum_sq_table().iter().all(|p| *p == F32x4::zero()));
}

#[test]
fn test_single_row_and_column() {
    let row = Buffer2::from_fn(6, 1, |x, _| Lab::new([x as f64, 0.0, 0.0]));
    let integral = IntegralImage::build(&row).unwrap();
    assert_eq!(integral.box_sum(1, 0, 4, 0)[0], 10.0);

    let col = Buffer2::from_fn(1, 6, |_, y| Lab::new([y as f64, 0.0, 0.0]));
    let integral = IntegralImage::build(&col).unwrap();
    assert_eq!(integral.box_sum(0, 2, 0, 5)[0], 14.0);
    assert_eq!(integral.width(), 1);
    assert_eq!(integral.height(), 6);
}

#[test]
fn test_empty_source_rejected() {
    let src: Buffer2<Lab<f64>> = Buffer2::new(0, 0, vec![]);
    let err = IntegralImage::build(&src).unwrap_err();
    assert_eq!(
        err,
        Error::EmptyImage {
            width: 0,
            height: 0
        }
    );
}

#[test]
fn test_promoted_source_matches_widened_source() {
    let narrow = Buffer2::from_fn(40, 30, |x, y| {
        F32x4::new([(x * 7 % 13) as f32 + 0.25, y as f32 * 1.5, -((x + y) as f32), 0.0])
    });
    let widened = narrow.map(|p| p.map(f64::from));

    let promoted = IntegralImage::<f64, 4>::build_promoted(&narrow, narrow[(0, 0)]).unwrap();
    let direct = IntegralImage::build_with_offset(&widened, widened[(0, 0)]).unwrap();
    assert_eq!(promoted.offset(), direct.offset());
    assert_eq!(promoted.sum_table(), direct.sum_table());
    assert_eq!(promoted.sum_sq_table(), direct.sum_sq_table());
}
