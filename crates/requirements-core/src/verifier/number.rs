//! Sign, divisibility and floating-point checks for primitive numbers.

use crate::errors::{ExceptionKind, Result};
use crate::message::builder::ACTUAL;
use crate::message::Describe;

use super::Verifier;

/// Primitive numeric types
pub trait Number: Copy + PartialOrd + Describe {
    const ZERO: Self;

    /// True if `self` is an integer multiple of `divisor`
    ///
    /// Zero is the only multiple of zero.
    fn is_multiple_of(self, divisor: Self) -> bool;
}

/// Primitive floating-point types
pub trait Float: Number {
    fn is_nan(self) -> bool;
    fn is_finite(self) -> bool;
    fn is_infinite(self) -> bool;
    fn is_whole(self) -> bool;
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Number for $ty {
                const ZERO: Self = 0;

                fn is_multiple_of(self, divisor: Self) -> bool {
                    if divisor == 0 {
                        return self == 0;
                    }
                    self.wrapping_rem(divisor) == 0
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Number for $ty {
                const ZERO: Self = 0.0;

                fn is_multiple_of(self, divisor: Self) -> bool {
                    if divisor == 0.0 {
                        return self == 0.0;
                    }
                    self % divisor == 0.0
                }
            }

            impl Float for $ty {
                fn is_nan(self) -> bool {
                    <$ty>::is_nan(self)
                }

                fn is_finite(self) -> bool {
                    <$ty>::is_finite(self)
                }

                fn is_infinite(self) -> bool {
                    <$ty>::is_infinite(self)
                }

                fn is_whole(self) -> bool {
                    <$ty>::is_finite(self) && self.fract() == 0.0
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl<T: Number> Verifier<T> {
    fn check_number(
        self,
        op: &'static str,
        passed: impl FnOnce(T) -> bool,
        requirement: &str,
    ) -> Result<Self> {
        self.verify(
            |value| passed(*value),
            |v| {
                v.failure(
                    op,
                    ExceptionKind::InvalidArgument,
                    format!("{} {}.", v.quoted_name(), requirement),
                )
                .add_context(ACTUAL, v.value())
                .build()
            },
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the value is zero.
    pub fn is_zero(self) -> Result<Self> {
        self.check_number("is_zero", |x| x == T::ZERO, "must be zero")
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value is zero.
    pub fn is_not_zero(self) -> Result<Self> {
        self.check_number("is_not_zero", |x| x != T::ZERO, "may not be zero")
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the value is greater than zero.
    pub fn is_positive(self) -> Result<Self> {
        self.check_number("is_positive", |x| x > T::ZERO, "must be positive")
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value is greater than zero.
    pub fn is_not_positive(self) -> Result<Self> {
        self.check_number("is_not_positive", |x| !(x > T::ZERO), "may not be positive")
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the value is less than zero.
    pub fn is_negative(self) -> Result<Self> {
        self.check_number("is_negative", |x| x < T::ZERO, "must be negative")
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value is less than zero.
    pub fn is_not_negative(self) -> Result<Self> {
        self.check_number("is_not_negative", |x| !(x < T::ZERO), "may not be negative")
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the value is a multiple of `divisor`.
    pub fn is_multiple_of(self, divisor: T) -> Result<Self> {
        self.check_number(
            "is_multiple_of",
            |x| x.is_multiple_of(divisor),
            &format!("must be a multiple of {}", divisor.describe()),
        )
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value is a multiple of `divisor`.
    pub fn is_not_multiple_of(self, divisor: T) -> Result<Self> {
        self.check_number(
            "is_not_multiple_of",
            |x| !x.is_multiple_of(divisor),
            &format!("may not be a multiple of {}", divisor.describe()),
        )
    }
}

impl<T: Float> Verifier<T> {
    /// # Errors
    ///
    /// `InvalidArgument` if the value is NaN.
    pub fn is_number(self) -> Result<Self> {
        self.check_number("is_number", |x| !x.is_nan(), "must be a well-defined number")
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the value is NaN.
    pub fn is_not_number(self) -> Result<Self> {
        self.check_number("is_not_number", |x| x.is_nan(), "may not be a well-defined number")
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value is infinite or NaN.
    pub fn is_finite(self) -> Result<Self> {
        self.check_number("is_finite", |x| x.is_finite(), "must be a finite number")
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the value is positive or negative infinity.
    pub fn is_infinite(self) -> Result<Self> {
        self.check_number("is_infinite", |x| x.is_infinite(), "must be an infinite number")
    }

    /// # Errors
    ///
    /// `InvalidArgument` unless the value is finite and has no fractional part.
    pub fn is_whole_number(self) -> Result<Self> {
        self.check_number("is_whole_number", |x| x.is_whole(), "must be a whole number")
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the value is finite and has no fractional part.
    pub fn is_not_whole_number(self) -> Result<Self> {
        self.check_number("is_not_whole_number", |x| !x.is_whole(), "may not be a whole number")
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Configuration;

    use super::*;

    fn verifier<T>(value: T) -> Verifier<T> {
        Verifier::new(value, "n".to_string(), Configuration::new(), true)
    }

    #[test]
    fn test_sign_checks() {
        assert!(verifier(0).is_zero().is_ok());
        assert!(verifier(0).is_not_positive().is_ok());
        assert!(verifier(0).is_not_negative().is_ok());
        assert!(verifier(-1_i64).is_negative().is_ok());
        assert!(verifier(3_u8).is_positive().is_ok());

        let err = verifier(-2).is_positive().unwrap_err();
        assert_eq!(err.message(), "\"n\" must be positive.\nActual: -2");
    }

    #[test]
    fn test_multiples() {
        assert!(verifier(12).is_multiple_of(4).is_ok());
        assert!(verifier(13).is_multiple_of(4).is_err());
        assert!(verifier(0).is_multiple_of(0).is_ok());
        assert!(verifier(5).is_multiple_of(0).is_err());
        assert!(verifier(i32::MIN).is_multiple_of(-1).is_ok());
        assert!(verifier(7.5).is_multiple_of(2.5).is_ok());
        assert!(verifier(7).is_not_multiple_of(2).is_ok());
    }

    #[test]
    fn test_nan_is_neither_positive_nor_negative() {
        assert!(verifier(f64::NAN).is_not_positive().is_ok());
        assert!(verifier(f64::NAN).is_not_negative().is_ok());
        assert!(verifier(f64::NAN).is_number().is_err());
        assert!(verifier(f64::NAN).is_not_number().is_ok());
    }

    #[test]
    fn test_float_classification() {
        assert!(verifier(1.0_f32).is_finite().is_ok());
        assert!(verifier(f64::INFINITY).is_infinite().is_ok());
        assert!(verifier(f64::INFINITY).is_whole_number().is_err());
        assert!(verifier(2.0).is_whole_number().is_ok());
        assert!(verifier(2.5).is_not_whole_number().is_ok());
    }
}
