// ============================================================================
// Rates
// A quantity of the lower dimension accumulated per second
// ============================================================================

use super::dimension::{
    are_equal, hash_canonical, Acceleration, Dimension, Jerk, Length, RateDimension, Speed, Time,
};
use super::fixed_point::FixedQuantity;
use super::float_point::FloatQuantity;
use super::unit::{QuantityUnit, SNAP_ULPS};
use crate::interfaces::Quantity;
use crate::numeric::{
    snap_to_integral, wrapping_round_to_i64, wrapping_trunc_to_i64, NumericError, NumericResult,
};
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-point length (nanometers).
pub type FixedLength = FixedQuantity<Length>;

/// Fixed-point duration (nanoseconds).
pub type FixedTime = FixedQuantity<Time>;

/// Nanometers per second.
pub type FixedSpeed = Rate<Speed, FixedLength>;

/// Nanometers per second per second.
pub type FixedAcceleration = Rate<Acceleration, FixedSpeed>;

/// Nanometers per second cubed.
pub type FixedJerk = Rate<Jerk, FixedAcceleration>;

/// Quantity of rate dimension `D`, stored as the amount of `D::Lower`
/// covered in one second.
///
/// Arithmetic delegates to the inner quantity, so a rate inherits its
/// exactness: `FixedSpeed` adds and scales in whole nanometers per second.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent, bound(serialize = "Q: Serialize", deserialize = "Q: Deserialize<'de>")))]
pub struct Rate<D: RateDimension, Q: Quantity<D::Lower>> {
    per_second: Q,
    #[cfg_attr(feature = "serde", serde(skip))]
    _dimension: PhantomData<D>,
}

impl<D: RateDimension, Q: Quantity<D::Lower>> Rate<D, Q> {
    /// Wrap the amount covered in one second.
    #[inline]
    pub fn from_per_second(per_second: Q) -> Self {
        Self {
            per_second,
            _dimension: PhantomData,
        }
    }

    /// Amount covered in one second.
    #[inline]
    pub fn per_second(&self) -> &Q {
        &self.per_second
    }

    /// Unwrap into the amount covered in one second.
    #[inline]
    pub fn into_per_second(self) -> Q {
        self.per_second
    }

    /// `amount` spread over `duration`.
    ///
    /// # Errors
    /// - `InvalidArgument` if `duration` is zero
    /// - `Overflow` if the per-second amount cannot be represented
    ///
    /// # Example
    /// ```
    /// use exact_quantity::domain::{Dimension, FixedLength, FixedSpeed, FixedTime, Length, Time};
    ///
    /// let distance = FixedLength::from_i64(3600, Length::canonical_unit()).unwrap();
    /// let hour = FixedTime::from_i64(1, Time::unit("h").unwrap()).unwrap();
    /// let speed = FixedSpeed::per(&distance, &hour).unwrap();
    /// assert_eq!(speed.per_second().nanos(), 1_000_000_000);
    /// ```
    pub fn per(amount: &Q, duration: &dyn Quantity<Time>) -> NumericResult<Self> {
        let seconds = duration.to_f64(Time::canonical_unit());
        amount.checked_div_scalar(seconds).map(Self::from_per_second)
    }

    /// Rate covering `amount` in one `time_unit`.
    ///
    /// # Errors
    /// Returns `Overflow` if the per-second amount cannot be represented.
    pub fn from_amount_per(amount: &Q, time_unit: &QuantityUnit<Time>) -> NumericResult<Self> {
        amount
            .checked_div_scalar(snap_to_integral(time_unit.factor(), SNAP_ULPS))
            .map(Self::from_per_second)
    }

    /// Amount covered in one `time_unit` at this rate.
    ///
    /// # Errors
    /// Returns `Overflow` if the amount cannot be represented.
    pub fn amount_per(&self, time_unit: &QuantityUnit<Time>) -> NumericResult<Q> {
        self.per_second
            .checked_mul_scalar(snap_to_integral(time_unit.factor(), SNAP_ULPS))
    }

    /// Any same-dimension rate as a per-second float of the lower dimension.
    fn bridge(other: &dyn Quantity<D>) -> NumericResult<FloatQuantity<D::Lower>> {
        let canonical = other.to_f64(D::canonical_unit());
        if canonical.is_infinite() {
            return Err(NumericError::Overflow);
        }
        FloatQuantity::from_canonical(canonical)
    }

    /// Amount covered in `unit.denominator()` seconds, and the lower unit
    /// worth `unit.numerator()` that reads it as a count of `unit`.
    ///
    /// km/h becomes "amount in 3600 s, read in km": one exact integer
    /// multiply and one exact division in the inner representation.
    fn over_unit(&self, unit: &QuantityUnit<D>) -> NumericResult<(Q, QuantityUnit<D::Lower>)> {
        let seconds = snap_to_integral(unit.denominator(), SNAP_ULPS);
        let amount = self.per_second.checked_mul_scalar(seconds)?;
        Ok((amount, QuantityUnit::scaled(unit.numerator())))
    }
}

impl<D: RateDimension, Q: Quantity<D::Lower>> Quantity<D> for Rate<D, Q> {
    #[inline]
    fn to_f64(&self, unit: &QuantityUnit<D>) -> f64 {
        self.per_second.to_f64(<D::Lower as Dimension>::canonical_unit()) * unit.denominator()
            / unit.numerator()
    }

    /// Exact in the inner representation; wraps through f64 if the amount
    /// over one `unit` of time overflows.
    fn to_i64(&self, unit: &QuantityUnit<D>) -> i64 {
        match self.over_unit(unit) {
            Ok((amount, lower)) => amount.to_i64(&lower),
            Err(_) => wrapping_trunc_to_i64(snap_to_integral(self.to_f64(unit), SNAP_ULPS)),
        }
    }

    fn round_to_i64(&self, unit: &QuantityUnit<D>) -> i64 {
        match self.over_unit(unit) {
            Ok((amount, lower)) => amount.round_to_i64(&lower),
            Err(_) => wrapping_round_to_i64(snap_to_integral(self.to_f64(unit), SNAP_ULPS)),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn checked_add(&self, other: &dyn Quantity<D>) -> NumericResult<Self> {
        let sum = match other.as_any().downcast_ref::<Self>() {
            Some(rate) => self.per_second.checked_add(&rate.per_second)?,
            None => self.per_second.checked_add(&Self::bridge(other)?)?,
        };
        Ok(Self::from_per_second(sum))
    }

    fn checked_sub(&self, other: &dyn Quantity<D>) -> NumericResult<Self> {
        let difference = match other.as_any().downcast_ref::<Self>() {
            Some(rate) => self.per_second.checked_sub(&rate.per_second)?,
            None => self.per_second.checked_sub(&Self::bridge(other)?)?,
        };
        Ok(Self::from_per_second(difference))
    }

    #[inline]
    fn checked_mul_scalar(&self, scalar: f64) -> NumericResult<Self> {
        self.per_second
            .checked_mul_scalar(scalar)
            .map(Self::from_per_second)
    }

    #[inline]
    fn checked_div_scalar(&self, scalar: f64) -> NumericResult<Self> {
        self.per_second
            .checked_div_scalar(scalar)
            .map(Self::from_per_second)
    }
}

impl<D, Q, R> PartialEq<Rate<D, R>> for Rate<D, Q>
where
    D: RateDimension,
    Q: Quantity<D::Lower>,
    R: Quantity<D::Lower>,
{
    #[inline]
    fn eq(&self, other: &Rate<D, R>) -> bool {
        are_equal(self, other)
    }
}

impl<D: RateDimension, Q: Quantity<D::Lower>> Hash for Rate<D, Q> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_canonical(self, state);
    }
}

impl<D: RateDimension, Q: Quantity<D::Lower>> fmt::Debug for Rate<D, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rate")
            .field("dimension", &D::KIND)
            .field("per_second", &self.per_second)
            .finish()
    }
}

impl<D: RateDimension, Q: Quantity<D::Lower>> fmt::Display for Rate<D, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.to_f64(D::canonical_unit()),
            D::KIND.canonical_symbol()
        )
    }
}
