//! Fixed-arity numeric pixels with channel-wise arithmetic.
//!
//! [`Pixel<T, N>`] is the single pixel representation used throughout the
//! crate. Three-channel pixels carry RGB or LAB, four-channel pixels carry
//! LABX (LAB plus an unused lane) and double as the 4-lane `f32` vector
//! ([`F32x4`]) of the wide variant.

mod color;
mod convert;


use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use num_traits::Float;

pub use color::{lab_to_rgb, labx_to_rgb, rgb_to_lab, rgb_to_labx, to_lab_image, to_labx_image};
pub use convert::{Channel, clamped_convert};

/// `N` numeric channels stored inline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Pixel<T, const N: usize>(pub [T; N]);

pub type Rgb<T> = Pixel<T, 3>;
pub type Lab<T> = Pixel<T, 3>;
pub type Labx<T> = Pixel<T, 4>;

/// Four `f32` lanes processed together.
pub type F32x4 = Pixel<f32, 4>;

impl<T: Copy, const N: usize> Pixel<T, N> {
    #[inline]
    pub const fn new(channels: [T; N]) -> Self {
        Self(channels)
    }

    /// All channels set to `value`.
    #[inline]
    pub fn splat(value: T) -> Self {
        Self([value; N])
    }

    #[inline]
    pub fn channels(&self) -> &[T; N] {
        &self.0
    }

    #[inline]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Pixel<U, N> {
        Pixel(self.0.map(f))
    }

    #[inline]
    pub fn zip_map<U: Copy, R>(
        self,
        other: Pixel<U, N>,
        mut f: impl FnMut(T, U) -> R,
    ) -> Pixel<R, N> {
        Pixel(std::array::from_fn(|c| f(self.0[c], other.0[c])))
    }

    /// Converts every channel with saturation, see [`clamped_convert`].
    #[inline]
    pub fn convert<U: Channel>(self) -> Pixel<U, N>
    where
        T: Channel,
    {
        self.map(clamped_convert)
    }
}

impl<T: Float, const N: usize> Pixel<T, N> {
    #[inline]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    /// Sum of all channels, accumulated left to right.
    #[inline]
    pub fn sum(self) -> T {
        self.0.iter().fold(T::zero(), |acc, &v| acc + v)
    }

    #[inline]
    pub fn horizontal_max(self) -> T {
        self.0.iter().fold(T::neg_infinity(), |acc, &v| acc.max(v))
    }

    #[inline]
    pub fn sqrt(self) -> Self {
        self.map(T::sqrt)
    }

    #[inline]
    pub fn abs(self) -> Self {
        self.map(T::abs)
    }

    #[inline]
    pub fn max(self, other: Self) -> Self {
        self.zip_map(other, T::max)
    }

    #[inline]
    pub fn min(self, other: Self) -> Self {
        self.zip_map(other, T::min)
    }

    /// Channel-wise `if mask < 0 { value } else { 0 }`.
    #[inline]
    pub fn select_negative(mask: Self, value: Self) -> Self {
        mask.zip_map(value, |m, v| if m < T::zero() { v } else { T::zero() })
    }

    /// Euclidean norm of the channel vector.
    #[inline]
    pub fn magnitude(self) -> T {
        (self * self).sum().sqrt()
    }
}

impl<T: Copy + Default, const N: usize> Default for Pixel<T, N> {
    #[inline]
    fn default() -> Self {
        Self([T::default(); N])
    }
}

impl<T, const N: usize> From<[T; N]> for Pixel<T, N> {
    #[inline]
    fn from(channels: [T; N]) -> Self {
        Self(channels)
    }
}

impl<T, const N: usize> Index<usize> for Pixel<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Pixel<T, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index]
    }
}

macro_rules! impl_channel_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Copy + $trait<Output = T>, const N: usize> $trait for Pixel<T, N> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Self(std::array::from_fn(|c| self.0[c] $op rhs.0[c]))
            }
        }
    };
}

impl_channel_op!(Add, add, +);
impl_channel_op!(Sub, sub, -);
impl_channel_op!(Mul, mul, *);
impl_channel_op!(Div, div, /);

impl<T: Copy + Add<Output = T>, const N: usize> AddAssign for Pixel<T, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Copy + Sub<Output = T>, const N: usize> SubAssign for Pixel<T, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Copy + Neg<Output = T>, const N: usize> Neg for Pixel<T, N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

// Scalar operands are implemented per element type; a blanket `Mul<T>` would
// overlap with the pixel-by-pixel impls above.
macro_rules! impl_scalar_ops {
    ($($t:ty),*) => {$(
        impl<const N: usize> Add<$t> for Pixel<$t, N> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: $t) -> Self {
                self.map(|v| v + rhs)
            }
        }

        impl<const N: usize> Sub<$t> for Pixel<$t, N> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: $t) -> Self {
                self.map(|v| v - rhs)
            }
        }

        impl<const N: usize> Mul<$t> for Pixel<$t, N> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: $t) -> Self {
                self.map(|v| v * rhs)
            }
        }

        impl<const N: usize> Div<$t> for Pixel<$t, N> {
            type Output = Self;

            #[inline]
            fn div(self, rhs: $t) -> Self {
                self.map(|v| v / rhs)
            }
        }
    )*};
}

impl_scalar_ops!(f32, f64, u8, u16, i16, i32, u32);
