// ============================================================================
// Fixed-Point Quantity
// Exact i64 count of nano-canonical units (nanometers, nanoseconds, ...)
// ============================================================================

use super::dimension::{are_equal, hash_canonical, Dimension};
use super::float_point::FloatQuantity;
use super::unit::{QuantityUnit, NANOS_PER_CANONICAL, SNAP_ULPS};
use crate::interfaces::Quantity;
use crate::numeric::{
    add_exact, descale_exact, integral_value, multiply_exact, round_away_to_i64, scale_exact,
    snap_to_integral, subtract_exact, wrapping_round_to_i64, wrapping_trunc_to_i64, NumericError,
    NumericResult,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decimal places of the fine unit relative to the canonical unit.
const NANO_DECIMALS: u32 = 9;

/// Fixed-point quantity of dimension `D`.
///
/// Internally stores the amount as an i64 count of 10^-9 canonical units.
/// For length that is a nanometer count, for time a nanosecond count.
///
/// # Value Range
/// - Minimum: -9,223,372,036.854775808 canonical units
/// - Maximum: +9,223,372,036.854775807 canonical units
/// - Resolution: 0.000000001 canonical units
///
/// # Example
/// ```
/// use exact_quantity::domain::{Dimension, FixedLength, Length};
/// use exact_quantity::interfaces::Quantity;
///
/// let km = Length::unit("km").unwrap();
/// let distance = FixedLength::from_i64(3, km).unwrap();
/// assert_eq!(distance.to_i64(Length::canonical_unit()), 3000);
/// ```
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent, bound = ""))]
pub struct FixedQuantity<D: Dimension> {
    nanos: i64,
    #[cfg_attr(feature = "serde", serde(skip))]
    _dimension: PhantomData<D>,
}

impl<D: Dimension> FixedQuantity<D> {
    /// Zero value
    pub const ZERO: Self = Self::from_nanos(0);

    /// Maximum representable value
    pub const MAX: Self = Self::from_nanos(i64::MAX);

    /// Minimum representable value
    pub const MIN: Self = Self::from_nanos(i64::MIN);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from a raw nano-unit count.
    #[inline]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self {
            nanos,
            _dimension: PhantomData,
        }
    }

    /// Create from an integer amount of `unit`.
    ///
    /// # Errors
    /// - `InvalidArgument` if `unit` is finer than one nano-unit
    /// - `Overflow` if the nano count does not fit in i64
    pub fn from_i64(value: i64, unit: &QuantityUnit<D>) -> NumericResult<Self> {
        if value == 0 {
            return Ok(Self::ZERO);
        }
        match unit.nanos_per_unit() {
            Some(nanos_per_unit) => multiply_exact(value, nanos_per_unit).map(Self::from_nanos),
            // One unit alone exceeds the nano range
            None if unit.factor() >= 1.0 => Err(NumericError::Overflow),
            None => Err(NumericError::InvalidArgument),
        }
    }

    /// Create from a floating amount of `unit`, rounding half away from zero
    /// to the nearest nano-unit.
    ///
    /// # Errors
    /// - `InvalidArgument` if `value` is NaN or infinite
    /// - `Overflow` if the nano count does not fit in i64
    pub fn from_f64(value: f64, unit: &QuantityUnit<D>) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidArgument);
        }
        let nanos = value * (unit.factor() * NANOS_PER_CANONICAL as f64);
        if !nanos.is_finite() {
            return Err(NumericError::Overflow);
        }
        round_away_to_i64(nanos).map(Self::from_nanos)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw nano-unit count.
    #[inline]
    pub const fn nanos(self) -> i64 {
        self.nanos
    }

    /// Check if value is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.nanos == 0
    }

    /// Check if value is positive.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.nanos > 0
    }

    /// Check if value is negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.nanos < 0
    }

    // ========================================================================
    // Exact Scaling
    // ========================================================================

    /// Multiply by `factor` exactly, truncating toward zero to whole nano-units.
    ///
    /// Unlike [`Quantity::checked_mul_scalar`], no step goes through f64, so
    /// counts beyond 2^53 keep every digit.
    ///
    /// # Errors
    /// - `InvalidArgument` if `factor` is NaN or infinite
    /// - `Overflow` if the result does not fit in i64
    #[inline]
    pub fn scale_exact(self, factor: f64) -> NumericResult<Self> {
        scale_exact(self.nanos, factor).map(Self::from_nanos)
    }

    /// Nano count of any same-dimension quantity.
    ///
    /// Same representation: the raw count. Otherwise the canonical value is
    /// rounded half away from zero to nano-units.
    fn bridge_nanos(other: &dyn Quantity<D>) -> NumericResult<i64> {
        if let Some(fixed) = other.as_any().downcast_ref::<Self>() {
            return Ok(fixed.nanos);
        }
        let nanos = other.to_f64(D::canonical_unit()) * NANOS_PER_CANONICAL as f64;
        if nanos.is_infinite() {
            return Err(NumericError::Overflow);
        }
        round_away_to_i64(nanos)
    }
}

/// `numerator / divisor`, rounded half away from zero. `divisor` must be positive.
#[inline]
fn divide_round_half_away(numerator: i64, divisor: i64) -> i64 {
    let quotient = numerator / divisor;
    let remainder = numerator % divisor;
    // 2|r| >= d, written to avoid overflow
    if remainder.unsigned_abs() >= divisor.unsigned_abs() - remainder.unsigned_abs() {
        if numerator < 0 {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}

// ============================================================================
// Quantity Contract
// ============================================================================

impl<D: Dimension> Quantity<D> for FixedQuantity<D> {
    /// Nano-units to canonical by plain division; lossy, never fails.
    #[inline]
    fn to_f64(&self, unit: &QuantityUnit<D>) -> f64 {
        self.nanos as f64 / NANOS_PER_CANONICAL as f64 * unit.denominator() / unit.numerator()
    }

    /// Integer division in nano space; float fallback for sub-nano units.
    #[inline]
    fn to_i64(&self, unit: &QuantityUnit<D>) -> i64 {
        match unit.nanos_per_unit() {
            Some(nanos_per_unit) => self.nanos / nanos_per_unit,
            None => wrapping_trunc_to_i64(snap_to_integral(self.to_f64(unit), SNAP_ULPS)),
        }
    }

    #[inline]
    fn round_to_i64(&self, unit: &QuantityUnit<D>) -> i64 {
        match unit.nanos_per_unit() {
            Some(nanos_per_unit) => divide_round_half_away(self.nanos, nanos_per_unit),
            None => wrapping_round_to_i64(snap_to_integral(self.to_f64(unit), SNAP_ULPS)),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn checked_add(&self, other: &dyn Quantity<D>) -> NumericResult<Self> {
        let other_nanos = Self::bridge_nanos(other)?;
        add_exact(self.nanos, other_nanos)
            .map(Self::from_nanos)
            .inspect_err(|err| tracing::trace!(nanos = self.nanos, other_nanos, %err, "fixed add failed"))
    }

    fn checked_sub(&self, other: &dyn Quantity<D>) -> NumericResult<Self> {
        let other_nanos = Self::bridge_nanos(other)?;
        subtract_exact(self.nanos, other_nanos)
            .map(Self::from_nanos)
            .inspect_err(|err| tracing::trace!(nanos = self.nanos, other_nanos, %err, "fixed sub failed"))
    }

    /// Integral scalars multiply exactly; others round half away from zero
    /// from the f64 product.
    fn checked_mul_scalar(&self, scalar: f64) -> NumericResult<Self> {
        if !scalar.is_finite() {
            return Err(NumericError::InvalidArgument);
        }
        if let Some(integral) = integral_value(scalar) {
            return multiply_exact(self.nanos, integral).map(Self::from_nanos);
        }
        let product = self.nanos as f64 * scalar;
        if product.is_infinite() {
            return Err(NumericError::Overflow);
        }
        round_away_to_i64(product).map(Self::from_nanos)
    }

    /// Exact quotient truncated toward zero.
    #[inline]
    fn checked_div_scalar(&self, scalar: f64) -> NumericResult<Self> {
        descale_exact(self.nanos, scalar).map(Self::from_nanos)
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl<D: Dimension> FixedQuantity<D> {
    /// Canonical-unit value as a decimal with nine places.
    ///
    /// Exact; intended for display and persistence.
    #[inline]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.nanos, NANO_DECIMALS)
    }

    /// Create from a canonical-unit decimal, rounding half away from zero
    /// to the nearest nano-unit.
    ///
    /// # Errors
    /// Returns `Overflow` if the value is too large.
    pub fn from_decimal(canonical: Decimal) -> NumericResult<Self> {
        let scaled = canonical
            .checked_mul(Decimal::from(NANOS_PER_CANONICAL))
            .ok_or(NumericError::Overflow)?;
        scaled
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Self::from_nanos)
            .ok_or(NumericError::Overflow)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<D: Dimension> Default for FixedQuantity<D> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<D: Dimension> PartialEq for FixedQuantity<D> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        are_equal(self, other)
    }
}

// Canonical values of fixed quantities are never NaN
impl<D: Dimension> Eq for FixedQuantity<D> {}

impl<D: Dimension> PartialEq<FloatQuantity<D>> for FixedQuantity<D> {
    #[inline]
    fn eq(&self, other: &FloatQuantity<D>) -> bool {
        are_equal(self, other)
    }
}

impl<D: Dimension> PartialOrd for FixedQuantity<D> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Ordered by canonical value so that it agrees with `Eq`
impl<D: Dimension> Ord for FixedQuantity<D> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        let unit = D::canonical_unit();
        self.to_f64(unit).total_cmp(&other.to_f64(unit))
    }
}

impl<D: Dimension> Hash for FixedQuantity<D> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_canonical(self, state);
    }
}

// Infallible Neg/Add/Sub for ergonomics (panics on overflow - use checked_* in production)
impl<D: Dimension> Neg for FixedQuantity<D> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.checked_neg().expect("FixedQuantity negation overflow")
    }
}

impl<D: Dimension> Add for FixedQuantity<D> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(&rhs).expect("FixedQuantity addition overflow")
    }
}

impl<D: Dimension> Sub for FixedQuantity<D> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(&rhs).expect("FixedQuantity subtraction overflow")
    }
}

impl<D: Dimension> fmt::Debug for FixedQuantity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedQuantity<{}>({}, nanos={})", D::KIND, self, self.nanos)
    }
}

impl<D: Dimension> fmt::Display for FixedQuantity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.to_decimal().normalize(),
            D::KIND.canonical_symbol()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
