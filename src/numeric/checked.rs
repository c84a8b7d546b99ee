// ============================================================================
// Checked Integer Arithmetic
// Overflow-checked i64 operations and float-to-integer narrowing
// ============================================================================
//
// Two narrowing contracts live here side by side:
// - `round_away_to_i64` is exact-or-error (raises Overflow / InvalidArgument)
// - `wrapping_trunc_to_i64` / `wrapping_round_to_i64` never fail and keep the
//   low 64 bits of the mathematical integer, like a two's-complement cast
//
// Conversions for display use the wrapping pair; arithmetic that must stay
// exact uses the checked functions.

use super::errors::{NumericError, NumericResult};

/// 2^63 as an f64 (exactly representable). First value above i64::MAX.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Overflow-checked addition.
///
/// # Errors
/// Returns `Overflow` when `b > 0 && a > MAX - b` or `b < 0 && a < MIN - b`.
#[inline]
pub fn add_exact(a: i64, b: i64) -> NumericResult<i64> {
    a.checked_add(b).ok_or(NumericError::Overflow)
}

/// Overflow-checked subtraction.
///
/// `b == i64::MIN` cannot be negated, so it is valid only when `a < 0`
/// (giving `MAX + (a + 1)`).
#[inline]
pub fn subtract_exact(a: i64, b: i64) -> NumericResult<i64> {
    if b == i64::MIN {
        return if a < 0 {
            Ok(i64::MAX + (a + 1))
        } else {
            Err(NumericError::Overflow)
        };
    }
    add_exact(a, negate_exact(b)?)
}

/// Overflow-checked negation. Fails only for `i64::MIN`.
#[inline]
pub fn negate_exact(a: i64) -> NumericResult<i64> {
    a.checked_neg().ok_or(NumericError::Overflow)
}

/// Overflow-checked multiplication.
///
/// Covers `-1 * MIN` and `MIN * -1`, which a division round-trip check
/// would miss.
#[inline]
pub fn multiply_exact(a: i64, b: i64) -> NumericResult<i64> {
    a.checked_mul(b).ok_or(NumericError::Overflow)
}

/// Returns the integer value of `x` when `x` is integral and fits in i64.
///
/// `f64 as i64` saturates, so 2^63 would otherwise masquerade as `i64::MAX`.
#[inline]
pub fn integral_value(x: f64) -> Option<i64> {
    if !(-TWO_POW_63..TWO_POW_63).contains(&x) {
        return None;
    }
    let truncated = x as i64;
    (truncated as f64 == x).then_some(truncated)
}

/// Round to the nearest i64, ties away from zero.
///
/// # Errors
/// - `InvalidArgument` if `x` is NaN or infinite
/// - `Overflow` if the rounded magnitude does not fit in i64
#[inline]
pub fn round_away_to_i64(x: f64) -> NumericResult<i64> {
    if !x.is_finite() {
        return Err(NumericError::InvalidArgument);
    }
    // f64::round already rounds half away from zero
    let rounded = x.round();
    if (-TWO_POW_63..TWO_POW_63).contains(&rounded) {
        Ok(rounded as i64)
    } else {
        Err(NumericError::Overflow)
    }
}

/// Truncate toward zero and keep the low 64 bits of the result.
///
/// NaN and the infinities have no integer value; they map to 0.
pub fn wrapping_trunc_to_i64(x: f64) -> i64 {
    if !x.is_finite() {
        return 0;
    }
    let truncated = x.trunc();
    if (-TWO_POW_63..TWO_POW_63).contains(&truncated) {
        return truncated as i64;
    }

    // |truncated| >= 2^63, so it is mantissa * 2^shift with shift >= 11
    let bits = truncated.to_bits();
    let biased_exponent = ((bits >> 52) & 0x7ff) as i64;
    let shift = biased_exponent - 1075;
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);
    let low_bits = if shift >= 64 { 0 } else { mantissa << shift };

    let wrapped = low_bits as i64;
    if truncated.is_sign_negative() {
        wrapped.wrapping_neg()
    } else {
        wrapped
    }
}

/// Round half away from zero and keep the low 64 bits of the result.
#[inline]
pub fn wrapping_round_to_i64(x: f64) -> i64 {
    wrapping_trunc_to_i64(x.round())
}

/// Snap `x` to the nearest integer when it lies within `ulps` ULPs of it.
///
/// Absorbs the noise a quotient picks up from inexact decimal factors, so
/// `1.0 / 1e-9` reads as 1e9 rather than 999999999.9999999. NaN and the
/// infinities pass through unchanged.
#[inline]
pub fn snap_to_integral(x: f64, ulps: f64) -> f64 {
    let nearest = x.round();
    let ulp = x.abs().next_up() - x.abs();
    if (x - nearest).abs() <= ulps * ulp {
        nearest
    } else {
        x
    }
}
