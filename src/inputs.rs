use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

use crate::types::{InputField, ZakatError};

/// Trait for converting various types into `Decimal` for Zakat calculations.
///
/// This trait allows users to pass `i32`, `f64`, `&str`, etc. directly into
/// calculators without needing to wrap them in `dec!()` or `Decimal::from()`.
/// Conversion errors are reported against the field being converted.
pub trait IntoZakatDecimal {
    fn into_zakat_decimal(self) -> Result<Decimal, String>;
}

// Implement for Decimal (passthrough)
impl IntoZakatDecimal for Decimal {
    fn into_zakat_decimal(self) -> Result<Decimal, String> {
        Ok(self)
    }
}

impl IntoZakatDecimal for &Decimal {
    fn into_zakat_decimal(self) -> Result<Decimal, String> {
        Ok(*self)
    }
}

// Implement for Integers
macro_rules! impl_into_zakat_decimal_int {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, String> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_zakat_decimal_int!(i32, u32, i64, u64, isize, usize);

// Implement for Floats
macro_rules! impl_into_zakat_decimal_float {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, String> {
                    if !self.is_finite() {
                        return Err(self.to_string());
                    }
                    // Shortest round-trip text keeps 0.1 as 0.1 rather than its binary expansion.
                    let decimal = Decimal::from_str(&self.to_string())
                        .ok()
                        .or_else(|| Decimal::from_f64_retain(self as f64))
                        .ok_or_else(|| self.to_string())?;
                    // Below Decimal's 28-digit scale a non-zero float would silently become zero.
                    if decimal.is_zero() && self != 0.0 {
                        return Err(self.to_string());
                    }
                    Ok(decimal)
                }
            }
        )*
    };
}

impl_into_zakat_decimal_float!(f32, f64);

// Implement for Strings
impl IntoZakatDecimal for &str {
    fn into_zakat_decimal(self) -> Result<Decimal, String> {
        let trimmed = self.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| self.to_string())
    }
}

impl IntoZakatDecimal for String {
    fn into_zakat_decimal(self) -> Result<Decimal, String> {
        self.as_str().into_zakat_decimal()
    }
}

impl IntoZakatDecimal for &String {
    fn into_zakat_decimal(self) -> Result<Decimal, String> {
        self.as_str().into_zakat_decimal()
    }
}

/// Converts a value into a strictly positive decimal, or fails with a
/// validation error naming `field`.
pub(crate) fn positive_decimal(
    value: impl IntoZakatDecimal,
    field: InputField,
) -> Result<Decimal, ZakatError> {
    let decimal = value
        .into_zakat_decimal()
        .map_err(|raw| ZakatError::invalid(field, raw))?;
    if decimal <= Decimal::ZERO {
        return Err(ZakatError::invalid(field, decimal));
    }
    Ok(decimal)
}

/// Trait for turning a raw head count into the number of people Zakat Fitrah
/// is paid for.
///
/// Fallback policy: anything that is not an integer (fractions, NaN, text that
/// does not parse as a whole number) counts as one person. Integers are passed
/// through unchanged, so zero and negatives still reach validation.
pub trait IntoPersonCount {
    fn into_person_count(self) -> i64;
}

macro_rules! impl_into_person_count_int {
    ($($t:ty),*) => {
        $(
            impl IntoPersonCount for $t {
                fn into_person_count(self) -> i64 {
                    i64::try_from(self).unwrap_or(i64::MAX)
                }
            }
        )*
    };
}

impl_into_person_count_int!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

macro_rules! impl_into_person_count_float {
    ($($t:ty),*) => {
        $(
            impl IntoPersonCount for $t {
                fn into_person_count(self) -> i64 {
                    if self.is_finite() && self.fract() == 0.0 {
                        self as i64
                    } else {
                        1
                    }
                }
            }
        )*
    };
}

impl_into_person_count_float!(f32, f64);

impl IntoPersonCount for &str {
    fn into_person_count(self) -> i64 {
        // Same rule as floats: "4.0" is four people, "2.5" is one.
        match self.into_zakat_decimal() {
            Ok(count) if count.fract().is_zero() => count.to_i64().unwrap_or(if count.is_sign_negative() {
                i64::MIN
            } else {
                i64::MAX
            }),
            _ => 1,
        }
    }
}

impl IntoPersonCount for String {
    fn into_person_count(self) -> i64 {
        self.as_str().into_person_count()
    }
}

impl IntoPersonCount for &String {
    fn into_person_count(self) -> i64 {
        self.as_str().into_person_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_float_conversion_is_shortest() {
        assert_eq!(0.1f64.into_zakat_decimal().unwrap(), dec!(0.1));
        assert_eq!(1100000.0f64.into_zakat_decimal().unwrap(), dec!(1100000));
        assert!(f64::NAN.into_zakat_decimal().is_err());
        assert!(f64::INFINITY.into_zakat_decimal().is_err());
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(" 12000 ".into_zakat_decimal().unwrap(), dec!(12000));
        assert_eq!("1.5e3".into_zakat_decimal().unwrap(), dec!(1500));
        assert_eq!("abc".into_zakat_decimal(), Err("abc".to_string()));
    }

    #[test]
    fn test_positive_decimal_rejects_zero_and_garbage() {
        let err = positive_decimal(0, InputField::GoldWeight).unwrap_err();
        assert_eq!(err.invalid_field(), Some(InputField::GoldWeight));

        let err = positive_decimal("", InputField::FoodPrice).unwrap_err();
        assert_eq!(err.invalid_field(), Some(InputField::FoodPrice));

        assert_eq!(positive_decimal(dec!(0.5), InputField::GoldPrice).unwrap(), dec!(0.5));
    }

    #[test]
    fn test_tiny_float_reports_original_value() {
        assert_eq!(1e-30f64.into_zakat_decimal().unwrap_err(), 1e-30f64.to_string());
        assert_eq!(0.0f64.into_zakat_decimal().unwrap(), Decimal::ZERO);

        match positive_decimal(1e-30f64, InputField::GoldPrice).unwrap_err() {
            ZakatError::Validation(err) => {
                assert_eq!(err.field, InputField::GoldPrice);
                assert_eq!(err.value, 1e-30f64.to_string());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_person_count_fallback() {
        assert_eq!(4.into_person_count(), 4);
        assert_eq!(0.into_person_count(), 0);
        assert_eq!((-2i64).into_person_count(), -2);
        assert_eq!(3.0f64.into_person_count(), 3);
        assert_eq!(2.5f64.into_person_count(), 1);
        assert_eq!(f64::NAN.into_person_count(), 1);
        assert_eq!("7".into_person_count(), 7);
        assert_eq!("seven".into_person_count(), 1);
        assert_eq!("2.5".into_person_count(), 1);
        assert_eq!("-3".into_person_count(), -3);
        // Whole-number text agrees with the float impl.
        assert_eq!("4.0".into_person_count(), 4.0f64.into_person_count());
        assert_eq!("4.0".into_person_count(), 4);
        assert_eq!(" 0.00 ".into_person_count(), 0);
        assert_eq!("-2.0".into_person_count(), -2);
        assert_eq!("1e1".into_person_count(), 10);
    }
}
