// ============================================================================
// Quantity Units
// Units of a dimension as multiplicative factors of its canonical unit
// ============================================================================

use super::dimension::{Dimension, DimensionKind, RateDimension, Time};
use crate::numeric::{round_away_to_i64, snap_to_integral, NumericError, NumericResult};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// Fine units per canonical unit in the fixed-point representation (10^9).
pub const NANOS_PER_CANONICAL: i64 = 1_000_000_000;

/// Ratios within this many ULPs of an integer are snapped to it.
pub(crate) const SNAP_ULPS: f64 = 2.0;

/// A unit of dimension `D`.
///
/// `factor` converts one of this unit into canonical units
/// (`1 km = 1000.0 m`). Units are immutable once built; the canonical unit
/// has factor 1.0 and derived units multiply an existing factor.
///
/// The factor is also kept as `numerator / denominator` with both parts
/// exact, so units like km/h (1000 / 3600) convert without the rounding
/// baked into `0.2777777777777778`.
#[derive(Clone)]
pub struct QuantityUnit<D: Dimension> {
    factor: f64,
    numerator: f64,
    denominator: f64,
    /// `round_away(factor * 1e9)`; `None` below one nano-unit or beyond i64
    nanos_per_unit: Option<i64>,
    name: Cow<'static, str>,
    symbol: Cow<'static, str>,
    _dimension: PhantomData<D>,
}

impl<D: Dimension> QuantityUnit<D> {
    /// Create a base unit (factor 1.0).
    pub fn base(name: impl Into<Cow<'static, str>>, symbol: impl Into<Cow<'static, str>>) -> Self {
        Self::with_ratio(1.0, 1.0, name.into(), symbol.into())
    }

    /// Nameless unit worth `factor` canonical units, for internal rescaling.
    pub(crate) fn scaled(factor: f64) -> Self {
        Self::with_ratio(factor, 1.0, Cow::Borrowed(""), Cow::Borrowed(""))
    }

    fn with_ratio(
        numerator: f64,
        denominator: f64,
        name: Cow<'static, str>,
        symbol: Cow<'static, str>,
    ) -> Self {
        let factor = numerator / denominator;
        let nanos_per_unit = round_away_to_i64(factor * NANOS_PER_CANONICAL as f64)
            .ok()
            .filter(|&nanos| nanos > 0);
        Self {
            factor,
            numerator,
            denominator,
            nanos_per_unit,
            name,
            symbol,
            _dimension: PhantomData,
        }
    }

    /// Derive a unit worth `new_to_this` of this unit.
    ///
    /// # Errors
    /// - `InvalidArgument` if `new_to_this` is not finite and positive
    /// - `Overflow` if the combined factor is not a finite positive double
    ///
    /// # Example
    /// ```
    /// use exact_quantity::domain::{Dimension, Length};
    ///
    /// let meter = Length::canonical_unit();
    /// let kilometer = meter.derive(1000.0, "kilometer", "km").unwrap();
    /// assert_eq!(kilometer.factor(), 1000.0);
    /// ```
    pub fn derive(
        &self,
        new_to_this: f64,
        name: impl Into<Cow<'static, str>>,
        symbol: impl Into<Cow<'static, str>>,
    ) -> NumericResult<Self> {
        self.derive_ratio(new_to_this, 1.0, name, symbol)
    }

    /// Derive a unit worth `numerator / denominator` of this unit, keeping
    /// both parts exact.
    ///
    /// # Errors
    /// - `InvalidArgument` if either part is not finite and positive
    /// - `Overflow` if the combined ratio is not a finite positive double
    ///
    /// # Example
    /// ```
    /// use exact_quantity::domain::{Dimension, Speed};
    ///
    /// let kmh = Speed::canonical_unit()
    ///     .derive_ratio(1000.0, 3600.0, "kilometer per hour", "km/h")
    ///     .unwrap();
    /// assert_eq!(kmh.numerator(), 1000.0);
    /// assert_eq!(kmh.denominator(), 3600.0);
    /// ```
    pub fn derive_ratio(
        &self,
        numerator: f64,
        denominator: f64,
        name: impl Into<Cow<'static, str>>,
        symbol: impl Into<Cow<'static, str>>,
    ) -> NumericResult<Self> {
        let valid = |part: f64| part.is_finite() && part > 0.0;
        if !valid(numerator) || !valid(denominator) {
            return Err(NumericError::InvalidArgument);
        }
        Self::checked_ratio(
            self.numerator * numerator,
            self.denominator * denominator,
            name.into(),
            symbol.into(),
        )
    }

    fn checked_ratio(
        numerator: f64,
        denominator: f64,
        name: Cow<'static, str>,
        symbol: Cow<'static, str>,
    ) -> NumericResult<Self> {
        let factor = numerator / denominator;
        let finite_positive = |x: f64| x.is_finite() && x > 0.0;
        if !finite_positive(numerator) || !finite_positive(denominator) || !finite_positive(factor) {
            return Err(NumericError::Overflow);
        }
        Ok(Self::with_ratio(numerator, denominator, name, symbol))
    }

    /// How many of this unit make one `other`.
    ///
    /// Snapped to the nearest integer within 2 ULPs, so `second.per(minute)`
    /// is exactly 60 even when the factors carry float noise.
    ///
    /// # Errors
    /// Returns `Overflow` if the ratio is infinite.
    pub fn per(&self, other: &Self) -> NumericResult<f64> {
        let ratio = other.factor / self.factor;
        if !ratio.is_finite() {
            return Err(NumericError::Overflow);
        }
        Ok(snap_to_integral(ratio, SNAP_ULPS))
    }

    /// Conversion factor to the canonical unit.
    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Exact numerator of the factor (the factor itself for plain units).
    #[inline]
    pub fn numerator(&self) -> f64 {
        self.numerator
    }

    /// Exact denominator of the factor (1.0 for plain units).
    #[inline]
    pub fn denominator(&self) -> f64 {
        self.denominator
    }

    /// Fine units (10^-9 canonical) per one of this unit, if at least one.
    #[inline]
    pub fn nanos_per_unit(&self) -> Option<i64> {
        self.nanos_per_unit
    }

    /// Unit name (e.g. "kilometer").
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit symbol (e.g. "km").
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Dimension tag of this unit.
    #[inline]
    pub fn dimension(&self) -> DimensionKind {
        D::KIND
    }

    /// True for a factor of exactly 1.0.
    #[inline]
    pub fn is_canonical(&self) -> bool {
        self.factor == 1.0
    }
}

impl<D: RateDimension> QuantityUnit<D> {
    /// Build a rate unit `lower / time` (e.g. km/h from km and h).
    ///
    /// Seconds per `time` unit are snapped like [`QuantityUnit::per`], so the
    /// unit keeps exact parts (km/h is 1000 / 3600).
    ///
    /// # Errors
    /// Returns `Overflow` if the combined factor is not finite and positive.
    pub fn rate(
        lower: &QuantityUnit<D::Lower>,
        time: &QuantityUnit<Time>,
        name: impl Into<Cow<'static, str>>,
        symbol: impl Into<Cow<'static, str>>,
    ) -> NumericResult<Self> {
        let seconds = snap_to_integral(time.factor, SNAP_ULPS);
        Self::checked_ratio(
            lower.numerator,
            lower.denominator * seconds,
            name.into(),
            symbol.into(),
        )
    }
}

impl<D: Dimension> PartialEq for QuantityUnit<D> {
    fn eq(&self, other: &Self) -> bool {
        self.factor == other.factor && self.symbol == other.symbol
    }
}

impl<D: Dimension> fmt::Debug for QuantityUnit<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QuantityUnit<{}>({}, factor={})",
            D::KIND,
            self.symbol,
            self.factor
        )
    }
}

impl<D: Dimension> fmt::Display for QuantityUnit<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dimension::{Length, Speed};

    #[test]
    fn test_base_unit() {
        let meter = QuantityUnit::<Length>::base("meter", "m");
        assert_eq!(meter.factor(), 1.0);
        assert_eq!(meter.nanos_per_unit(), Some(NANOS_PER_CANONICAL));
        assert!(meter.is_canonical());
        assert_eq!(meter.dimension(), DimensionKind::Length);
    }

    #[test]
    fn test_derive_chain() {
        let meter = QuantityUnit::<Length>::base("meter", "m");
        let cm = meter.derive(0.01, "centimeter", "cm").unwrap();
        let inch = cm.derive(2.54, "inch", "in").unwrap();
        assert!((inch.factor() - 0.0254).abs() < 1e-15);
        assert_eq!(inch.nanos_per_unit(), Some(25_400_000));
    }

    #[test]
    fn test_derive_rejects_invalid_factor() {
        let meter = QuantityUnit::<Length>::base("meter", "m");
        assert_eq!(
            meter.derive(0.0, "zero", "z").unwrap_err(),
            NumericError::InvalidArgument
        );
        assert_eq!(
            meter.derive(-2.0, "neg", "n").unwrap_err(),
            NumericError::InvalidArgument
        );
        assert_eq!(
            meter.derive(f64::NAN, "nan", "nan").unwrap_err(),
            NumericError::InvalidArgument
        );
        let huge = meter.derive(1e300, "huge", "H").unwrap();
        assert_eq!(
            huge.derive(1e300, "huger", "HH").unwrap_err(),
            NumericError::Overflow
        );
    }

    #[test]
    fn test_sub_nano_unit_has_no_nano_count() {
        let meter = QuantityUnit::<Length>::base("meter", "m");
        let pm = meter.derive(1e-12, "picometer", "pm").unwrap();
        assert_eq!(pm.nanos_per_unit(), None);
    }

    #[test]
    fn test_per_snaps_to_integer() {
        let second = QuantityUnit::<Time>::base("second", "s");
        let ms = second.derive(0.001, "millisecond", "ms").unwrap();
        let minute = ms.derive(60_000.0, "minute", "min").unwrap();
        assert_eq!(second.per(&minute).unwrap(), 60.0);
        assert_eq!(ms.per(&second).unwrap(), 1000.0);
        assert_eq!(minute.per(&second).unwrap(), 1.0 / 60.0);
    }

    #[test]
    fn test_per_overflow() {
        let meter = QuantityUnit::<Length>::base("meter", "m");
        let tiny = meter.derive(1e-300, "tiny", "t").unwrap();
        let huge = meter.derive(1e300, "huge", "H").unwrap();
        assert_eq!(tiny.per(&huge).unwrap_err(), NumericError::Overflow);
    }

    #[test]
    fn test_rate_unit() {
        let km = Length::canonical_unit().derive(1000.0, "kilometer", "km").unwrap();
        let hour = QuantityUnit::<Time>::base("second", "s")
            .derive(3600.0, "hour", "h")
            .unwrap();
        let kmh = QuantityUnit::<Speed>::rate(&km, &hour, "kilometer per hour", "km/h").unwrap();
        assert!((kmh.factor() - 1.0 / 3.6).abs() < 1e-15);
        assert_eq!(kmh.numerator(), 1000.0);
        assert_eq!(kmh.denominator(), 3600.0);
        assert_eq!(kmh.dimension(), DimensionKind::Speed);
    }

    #[test]
    fn test_rate_unit_snaps_noisy_time_factor() {
        let second = QuantityUnit::<Time>::base("second", "s");
        // 0.9 * 66.66666666666667 == 60.00000000000001
        let noisy_minute = second
            .derive(0.9, "nine tenths", "s9")
            .unwrap()
            .derive(66.66666666666667, "minute", "min")
            .unwrap();
        assert_ne!(noisy_minute.factor(), 60.0);
        let mpm = QuantityUnit::<Speed>::rate(
            Length::canonical_unit(),
            &noisy_minute,
            "meter per minute",
            "m/min",
        )
        .unwrap();
        assert_eq!(mpm.denominator(), 60.0);
    }

    #[test]
    fn test_derive_ratio() {
        let mps = QuantityUnit::<Speed>::base("meter per second", "m/s");
        let knot = mps.derive_ratio(1852.0, 3600.0, "knot", "kn").unwrap();
        assert_eq!(knot.numerator(), 1852.0);
        assert_eq!(knot.denominator(), 3600.0);
        assert_eq!(knot.factor(), 1852.0 / 3600.0);
        assert_eq!(
            mps.derive_ratio(1.0, 0.0, "bad", "b").unwrap_err(),
            NumericError::InvalidArgument
        );

        // Plain derivation keeps a unit denominator
        let km = QuantityUnit::<Length>::base("meter", "m")
            .derive(1000.0, "kilometer", "km")
            .unwrap();
        assert_eq!((km.numerator(), km.denominator()), (1000.0, 1.0));
    }

    #[test]
    fn test_display_and_debug() {
        let meter = QuantityUnit::<Length>::base("meter", "m");
        assert_eq!(meter.to_string(), "m");
        assert_eq!(format!("{:?}", meter), "QuantityUnit<length>(m, factor=1)");
    }
}
