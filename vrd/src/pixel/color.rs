//! RGB <-> CIE L*a*b* conversion (D65 white point, sRGB primaries).
//!
//! RGB channels are on the 0..=255 scale. L is 0..=100, a and b are signed.
//! The fourth LABX channel is always 0 on the way in and ignored on the way out.

use common::Buffer2;
use common::parallel::par_for_each_row;

use super::{Channel, Lab, Labx, Pixel, Rgb, clamped_convert};

const WHITE_X: f64 = 0.950456;
const WHITE_Z: f64 = 1.088754;

/// Below this normalized tristimulus value the cube root is replaced by a line.
const LINEAR_THRESHOLD: f64 = 0.008856;
const LINEAR_SLOPE: f64 = 7.787;
const LINEAR_OFFSET: f64 = 16.0 / 116.0;

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LINEAR_THRESHOLD {
        t.cbrt()
    } else {
        LINEAR_SLOPE * t + LINEAR_OFFSET
    }
}

#[inline]
fn lab_f_inv(f: f64) -> f64 {
    let cube = f * f * f;
    if cube > LINEAR_THRESHOLD {
        cube
    } else {
        (f - LINEAR_OFFSET) / LINEAR_SLOPE
    }
}

#[inline]
fn srgb_gamma(linear: f64) -> f64 {
    if linear > 0.0031308 {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * linear
    }
}

fn rgb_to_lab_f64(r: f64, g: f64, b: f64) -> [f64; 3] {
    let x = (0.412453 * r + 0.357580 * g + 0.180423 * b) / (255.0 * WHITE_X);
    let y = (0.212671 * r + 0.715160 * g + 0.072169 * b) / 255.0;
    let z = (0.019334 * r + 0.119193 * g + 0.950227 * b) / (255.0 * WHITE_Z);

    let fy = lab_f(y);
    let l = if y > LINEAR_THRESHOLD {
        116.0 * fy - 16.0
    } else {
        903.3 * y
    };
    let a = 500.0 * (lab_f(x) - fy);
    let b = 200.0 * (fy - lab_f(z));
    [l, a, b]
}

fn lab_to_rgb_f64(l: f64, a: f64, b: f64) -> [f64; 3] {
    let fy = (l + 16.0) / 116.0;
    let x = WHITE_X * lab_f_inv(a / 500.0 + fy);
    let y = lab_f_inv(fy);
    let z = WHITE_Z * lab_f_inv(fy - b / 200.0);

    let red = 3.240479 * x - 1.537150 * y - 0.498535 * z;
    let green = -0.969256 * x + 1.875991 * y + 0.041556 * z;
    let blue = 0.055648 * x - 0.204043 * y + 1.057311 * z;
    [
        srgb_gamma(red) * 255.0,
        srgb_gamma(green) * 255.0,
        srgb_gamma(blue) * 255.0,
    ]
}

#[inline]
fn channel_f64<T: Channel>(value: T) -> f64 {
    clamped_convert(value)
}

pub fn rgb_to_lab<S: Channel, D: Channel>(rgb: Rgb<S>) -> Lab<D> {
    let [r, g, b] = rgb.0.map(channel_f64);
    Pixel(rgb_to_lab_f64(r, g, b)).convert()
}

pub fn rgb_to_labx<S: Channel, D: Channel>(rgb: Rgb<S>) -> Labx<D> {
    let [r, g, b] = rgb.0.map(channel_f64);
    let [l, a, b] = rgb_to_lab_f64(r, g, b);
    Pixel([l, a, b, 0.0]).convert()
}

pub fn lab_to_rgb<S: Channel, D: Channel>(lab: Lab<S>) -> Rgb<D> {
    let [l, a, b] = lab.0.map(channel_f64);
    Pixel(lab_to_rgb_f64(l, a, b)).convert()
}

pub fn labx_to_rgb<S: Channel, D: Channel>(labx: Labx<S>) -> Rgb<D> {
    let [l, a, b, _] = labx.0.map(channel_f64);
    Pixel(lab_to_rgb_f64(l, a, b)).convert()
}

/// Converts a whole RGB image to LAB, rows in parallel.
pub fn to_lab_image<S: Channel, D: Channel>(rgb: &Buffer2<Rgb<S>>) -> Buffer2<Lab<D>> {
    convert_image(rgb, rgb_to_lab)
}

/// Converts a whole RGB image to LABX, rows in parallel.
pub fn to_labx_image<S: Channel, D: Channel>(rgb: &Buffer2<Rgb<S>>) -> Buffer2<Labx<D>> {
    convert_image(rgb, rgb_to_labx)
}

fn convert_image<S, D, F>(src: &Buffer2<S>, f: F) -> Buffer2<D>
where
    S: Copy + Sync,
    D: Copy + Default + Send,
    F: Fn(S) -> D + Sync + Send,
{
    let width = src.width();
    let mut out = Buffer2::new_default(width, src.height());
    if out.is_empty() {
        return out;
    }
    par_for_each_row(out.pixels_mut(), width, |y, row| {
        for (dst, &p) in row.iter_mut().zip(src.row(y)) {
            *dst = f(p);
        }
    });
    out
}
