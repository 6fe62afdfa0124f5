//! Sample - numeric element types stored in images
//!
//! Downsampling averages samples in `f64` and converts the mean back to
//! the source type, so every pyramid level keeps the dtype of the input.
//! Integer conversions round half away from zero and saturate at the
//! type's range.

use std::fmt::Debug;

/// A numeric image element.
pub trait Sample: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    /// Widen to `f64` for accumulation.
    fn to_f64(self) -> f64;

    /// Narrow an accumulated value back to this type.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_sample_int {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    // `as` saturates and maps NaN to zero
                    value.round() as $t
                }
            }
        )*
    };
}

macro_rules! impl_sample_float {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_sample_int!(u8, u16, u32, i8, i16, i32);
impl_sample_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_rounds_half_away_from_zero() {
        assert_eq!(u8::from_f64(2.5), 3);
        assert_eq!(u8::from_f64(2.49), 2);
    }

    #[test]
    fn test_u8_saturates() {
        assert_eq!(u8::from_f64(300.0), 255);
        assert_eq!(u8::from_f64(-4.0), 0);
    }

    #[test]
    fn test_i16_negative_rounding() {
        assert_eq!(i16::from_f64(-2.5), -3);
    }

    #[test]
    fn test_float_passthrough() {
        assert_eq!(f32::from_f64(0.25), 0.25);
        assert_eq!(0.5f64.to_f64(), 0.5);
    }
}
