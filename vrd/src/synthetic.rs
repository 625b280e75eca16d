//! Synthetic RGB scenes for tests, benchmarks and demos.
//!
//! All channels are on the 0..=255 scale; every scene is gray unless noted.

use common::Buffer2;

use crate::pixel::Rgb;

/// Uniform gray image.
pub fn uniform(width: usize, height: usize, value: f32) -> Buffer2<Rgb<f32>> {
    Buffer2::new_filled(width, height, Rgb::splat(value))
}

/// Gray background with a bright square of half-size `half` centered at `(cx, cy)`.
///
/// The square covers `[cx - half, cx + half] × [cy - half, cy + half]`.
pub fn square_patch(
    width: usize,
    height: usize,
    (cx, cy): (usize, usize),
    half: usize,
    background: f32,
    foreground: f32,
) -> Buffer2<Rgb<f32>> {
    Buffer2::from_fn(width, height, |x, y| {
        let inside = x.abs_diff(cx) <= half && y.abs_diff(cy) <= half;
        Rgb::splat(if inside { foreground } else { background })
    })
}

/// Vertical step edge: `left` for `x < edge`, `right` from `edge` on.
pub fn step_edge(
    width: usize,
    height: usize,
    edge: usize,
    left: f32,
    right: f32,
) -> Buffer2<Rgb<f32>> {
    Buffer2::from_fn(width, height, |x, _| {
        Rgb::splat(if x < edge { left } else { right })
    })
}

/// Vertical ribbon of `ribbon_width` columns starting at `start`.
pub fn ribbon(
    width: usize,
    height: usize,
    start: usize,
    ribbon_width: usize,
    background: f32,
    foreground: f32,
) -> Buffer2<Rgb<f32>> {
    Buffer2::from_fn(width, height, |x, _| {
        let inside = x >= start && x < start + ribbon_width;
        Rgb::splat(if inside { foreground } else { background })
    })
}

/// Checkerboard of `cell`-pixel squares alternating between two colors.
pub fn checkerboard(
    width: usize,
    height: usize,
    cell: usize,
    a: Rgb<f32>,
    b: Rgb<f32>,
) -> Buffer2<Rgb<f32>> {
    let cell = cell.max(1);
    Buffer2::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 { a } else { b }
    })
}

/// Colored discs on a textured background, a busier scene for benchmarks.
pub fn discs(width: usize, height: usize) -> Buffer2<Rgb<f32>> {
    let centers = [
        (0.25, 0.3, 0.12, Rgb::new([220.0, 40.0, 40.0])),
        (0.7, 0.35, 0.18, Rgb::new([40.0, 200.0, 60.0])),
        (0.45, 0.75, 0.15, Rgb::new([50.0, 70.0, 230.0])),
    ];
    let scale = width.min(height) as f32;
    Buffer2::from_fn(width, height, |x, y| {
        let (fx, fy) = (x as f32, y as f32);
        for &(cx, cy, r, color) in &centers {
            let dx = fx - cx * width as f32;
            let dy = fy - cy * height as f32;
            if dx * dx + dy * dy <= (r * scale) * (r * scale) {
                return color;
            }
        }
        // Low-amplitude stripes so the background is not perfectly flat.
        let stripe = if (x / 7 + y / 11) % 2 == 0 { 8.0 } else { 0.0 };
        Rgb::splat(110.0 + stripe)
    })
}
