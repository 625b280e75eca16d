use std::fmt::Debug;

use num_traits::{Bounded, NumCast, ToPrimitive};

/// Numeric element type a pixel channel may hold.
pub trait Channel:
    Copy + Default + PartialOrd + Debug + NumCast + ToPrimitive + Bounded + Send + Sync + 'static
{
    /// Integer channels round on conversion, float channels keep fractions.
    const INTEGER: bool;
}

macro_rules! impl_channel {
    ($integer:expr => $($t:ty),*) => {$(
        impl Channel for $t {
            const INTEGER: bool = $integer;
        }
    )*};
}

impl_channel!(true => u8, u16, i16, i32, u32);
impl_channel!(false => f32, f64);

/// Saturating conversion between channel types.
///
/// The value is clamped into the destination's representable range and
/// rounded to nearest when the destination is an integer type. NaN maps to 0.
pub fn clamped_convert<D: Channel, S: Channel>(value: S) -> D {
    let Some(v) = value.to_f64() else {
        return D::default();
    };
    if v.is_nan() {
        return D::default();
    }

    let lo = D::min_value().to_f64().unwrap_or(f64::MIN);
    let hi = D::max_value().to_f64().unwrap_or(f64::MAX);
    let v = v.clamp(lo, hi);
    let v = if D::INTEGER { v.round() } else { v };

    match D::from(v) {
        Some(out) => out,
        None if v > 0.0 => D::max_value(),
        None => D::min_value(),
    }
}
