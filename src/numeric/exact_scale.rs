// ============================================================================
// Exact Scaling
// Multiply/divide an i64 by a finite double without floating-point rounding
// ============================================================================
//
// `(v as f64 * f) as i64` rounds once on the multiply and again on the
// cast, and saturates instead of reporting overflow. Here the factor is
// decomposed into its decimal significand and power of ten, the product is
// formed in 128 bits, and the only lossy step is the final truncating
// division. The result is `trunc(v * f)` with `f` read as the decimal it
// prints as.
//
// Cost is bounded by the exponent loop; for factors in everyday use that is
// a handful of limb passes, and large exponents stop early once the
// accumulator overflows or reaches zero.

use super::checked::{integral_value, multiply_exact};
use super::decimal::ParsedDecimal;
use super::errors::{NumericError, NumericResult};
use super::uint128::Uint128;
use std::num::NonZeroU64;

/// Magnitude of i64::MIN, the largest magnitude a negative i64 can hold.
const MIN_MAGNITUDE: u64 = i64::MIN.unsigned_abs();

/// Compute `trunc(value * factor)` exactly.
///
/// # Errors
/// - `InvalidArgument` if `factor` is NaN or infinite
/// - `Overflow` if the truncated result does not fit in i64
///
/// # Example
/// ```
/// use exact_quantity::numeric::scale_exact;
///
/// assert_eq!(scale_exact(123_456_789_123_456_789, 0.1), Ok(12_345_678_912_345_678));
/// ```
pub fn scale_exact(value: i64, factor: f64) -> NumericResult<i64> {
    if !factor.is_finite() {
        return Err(NumericError::InvalidArgument);
    }
    if value == 0 || factor == 0.0 {
        return Ok(0);
    }
    if let Some(integral) = integral_value(factor) {
        return multiply_exact(value, integral);
    }

    let decimal = ParsedDecimal::from_f64(factor)?;
    if decimal.is_zero() {
        return Ok(0);
    }
    let negative = (value < 0) != decimal.negative;

    let mut accumulator = Uint128::from_u64(value.unsigned_abs())
        .multiply_by_u64(decimal.significand)
        .ok_or(NumericError::Overflow)?;

    if decimal.exponent10 > 0 {
        for _ in 0..decimal.exponent10 {
            accumulator = accumulator.multiply_by_10().ok_or(NumericError::Overflow)?;
        }
    } else {
        for _ in 0..decimal.exponent10.unsigned_abs() {
            if accumulator.is_zero() {
                break;
            }
            accumulator = accumulator.divide_by_10();
        }
    }

    narrow_signed(accumulator, negative)
}

/// Compute `trunc(value / divisor)` exactly.
///
/// The numerator is scaled by the divisor's power of ten in 128 bits and then
/// divided by its 64-bit significand; that division is the only truncation.
///
/// # Errors
/// - `InvalidArgument` if `divisor` is NaN, infinite or zero
/// - `Overflow` if the truncated quotient does not fit in i64
pub fn descale_exact(value: i64, divisor: f64) -> NumericResult<i64> {
    if !divisor.is_finite() || divisor == 0.0 {
        return Err(NumericError::InvalidArgument);
    }
    if value == 0 {
        return Ok(0);
    }
    if let Some(integral) = integral_value(divisor) {
        // MIN / -1 is the only overflowing case
        return value.checked_div(integral).ok_or(NumericError::Overflow);
    }

    let decimal = ParsedDecimal::from_f64(divisor)?;
    let significand = NonZeroU64::new(decimal.significand).ok_or(NumericError::InvalidArgument)?;
    let negative = (value < 0) != decimal.negative;

    let mut numerator = Uint128::from_u64(value.unsigned_abs());
    if decimal.exponent10 < 0 {
        // Past 2^128 the quotient exceeds 2^64 because the significand is below 2^64
        for _ in 0..decimal.exponent10.unsigned_abs() {
            numerator = numerator.multiply_by_10().ok_or(NumericError::Overflow)?;
        }
    }

    let (mut quotient, _) = numerator.divide_by_u64(significand);

    // floor(floor(a / b) / c) == floor(a / (b * c)) for positive integers
    if decimal.exponent10 > 0 {
        for _ in 0..decimal.exponent10 {
            if quotient.is_zero() {
                break;
            }
            quotient = quotient.divide_by_10();
        }
    }

    narrow_signed(quotient, negative)
}

/// `1.0 / x`, validated.
///
/// Turns "per unit" ratios into multiplicative factors for [`scale_exact`].
///
/// # Errors
/// - `InvalidArgument` if `x` is zero, NaN or infinite
/// - `Overflow` if the reciprocal is not finite (subnormal `x`)
pub fn reciprocal_exact(x: f64) -> NumericResult<f64> {
    if !x.is_finite() || x == 0.0 {
        return Err(NumericError::InvalidArgument);
    }
    let reciprocal = 1.0 / x;
    if reciprocal.is_finite() {
        Ok(reciprocal)
    } else {
        Err(NumericError::Overflow)
    }
}

/// Apply a sign to an unsigned 128-bit magnitude and narrow to i64.
#[inline]
fn narrow_signed(magnitude: Uint128, negative: bool) -> NumericResult<i64> {
    let magnitude = magnitude.to_u64().ok_or(NumericError::Overflow)?;
    if negative {
        if magnitude > MIN_MAGNITUDE {
            return Err(NumericError::Overflow);
        }
        // 2^63 reinterprets as MIN, and negating MIN wraps back to MIN
        Ok((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).map_err(|_| NumericError::Overflow)
    }
}
