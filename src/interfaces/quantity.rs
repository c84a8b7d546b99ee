// ============================================================================
// Quantity Interface
// Conversion and arithmetic contract every representation implements
// ============================================================================

use crate::domain::{Dimension, QuantityUnit};
use crate::numeric::NumericResult;
use std::any::Any;
use std::fmt;

/// An immutable amount of dimension `D`.
///
/// Two contracts coexist:
/// - Conversions (`to_f64`, `to_i64`, ...) never fail. `to_f64` saturates to
///   ±infinity / signed zero, the integer conversions keep the low bits of
///   the mathematical result. They are meant for display and rendering.
/// - Arithmetic (`checked_*`) is exact in the receiver's representation and
///   reports `Overflow` instead of losing information.
///
/// Implementations must compare and hash through
/// [`are_equal`](crate::domain::are_equal) and
/// [`hash_canonical`](crate::domain::hash_canonical) so that equal amounts
/// held in different representations stay equal.
pub trait Quantity<D: Dimension>: fmt::Debug + Send + Sync + 'static {
    /// Best-effort value in `unit`.
    fn to_f64(&self, unit: &QuantityUnit<D>) -> f64;

    /// Value in `unit`, truncated toward zero, wrapping to the low 64 bits.
    fn to_i64(&self, unit: &QuantityUnit<D>) -> i64;

    /// Value in `unit`, rounded half away from zero, wrapping to the low 64 bits.
    fn round_to_i64(&self, unit: &QuantityUnit<D>) -> i64;

    /// Low 32 bits of [`Quantity::to_i64`].
    #[inline]
    fn to_i32(&self, unit: &QuantityUnit<D>) -> i32 {
        self.to_i64(unit) as i32
    }

    /// Low 32 bits of [`Quantity::round_to_i64`].
    #[inline]
    fn round_to_i32(&self, unit: &QuantityUnit<D>) -> i32 {
        self.round_to_i64(unit) as i32
    }

    /// Low 16 bits of [`Quantity::to_i64`].
    #[inline]
    fn to_i16(&self, unit: &QuantityUnit<D>) -> i16 {
        self.to_i64(unit) as i16
    }

    /// Low 16 bits of [`Quantity::round_to_i64`].
    #[inline]
    fn round_to_i16(&self, unit: &QuantityUnit<D>) -> i16 {
        self.round_to_i64(unit) as i16
    }

    /// Low 8 bits of [`Quantity::to_i64`].
    #[inline]
    fn to_i8(&self, unit: &QuantityUnit<D>) -> i8 {
        self.to_i64(unit) as i8
    }

    /// Low 8 bits of [`Quantity::round_to_i64`].
    #[inline]
    fn round_to_i8(&self, unit: &QuantityUnit<D>) -> i8 {
        self.round_to_i64(unit) as i8
    }

    /// Downcast hook so implementations can detect their own representation.
    fn as_any(&self) -> &dyn Any;

    /// Exact sum in the receiver's representation.
    ///
    /// # Errors
    /// Returns `Overflow` if the sum cannot be represented.
    fn checked_add(&self, other: &dyn Quantity<D>) -> NumericResult<Self>
    where
        Self: Sized;

    /// Exact difference in the receiver's representation.
    ///
    /// # Errors
    /// Returns `Overflow` if the difference cannot be represented.
    fn checked_sub(&self, other: &dyn Quantity<D>) -> NumericResult<Self>
    where
        Self: Sized;

    /// Scale by a scalar.
    ///
    /// # Errors
    /// - `InvalidArgument` if `scalar` is NaN or infinite
    /// - `Overflow` if the scaled magnitude cannot be represented
    fn checked_mul_scalar(&self, scalar: f64) -> NumericResult<Self>
    where
        Self: Sized;

    /// Divide by a scalar.
    ///
    /// # Errors
    /// - `InvalidArgument` if `scalar` is NaN, infinite or zero
    /// - `Overflow` if the quotient cannot be represented
    fn checked_div_scalar(&self, scalar: f64) -> NumericResult<Self>
    where
        Self: Sized;

    /// Negation, i.e. `checked_mul_scalar(-1.0)`.
    ///
    /// # Errors
    /// Returns `Overflow` at the representation's asymmetric minimum.
    #[inline]
    fn checked_neg(&self) -> NumericResult<Self>
    where
        Self: Sized,
    {
        self.checked_mul_scalar(-1.0)
    }
}

impl<D: Dimension> PartialEq for dyn Quantity<D> {
    fn eq(&self, other: &Self) -> bool {
        crate::domain::are_equal(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Length, NANOS_PER_CANONICAL};
    use crate::numeric::wrapping_trunc_to_i64;

    // Minimal implementation exercising the default methods
    #[derive(Debug)]
    struct MockMeters(f64);

    impl Quantity<Length> for MockMeters {
        fn to_f64(&self, unit: &QuantityUnit<Length>) -> f64 {
            self.0 / unit.factor()
        }

        fn to_i64(&self, unit: &QuantityUnit<Length>) -> i64 {
            wrapping_trunc_to_i64(self.to_f64(unit))
        }

        fn round_to_i64(&self, unit: &QuantityUnit<Length>) -> i64 {
            self.to_f64(unit).round() as i64
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn checked_add(&self, other: &dyn Quantity<Length>) -> NumericResult<Self> {
            Ok(Self(self.0 + other.to_f64(Length::canonical_unit())))
        }

        fn checked_sub(&self, other: &dyn Quantity<Length>) -> NumericResult<Self> {
            Ok(Self(self.0 - other.to_f64(Length::canonical_unit())))
        }

        fn checked_mul_scalar(&self, scalar: f64) -> NumericResult<Self> {
            Ok(Self(self.0 * scalar))
        }

        fn checked_div_scalar(&self, scalar: f64) -> NumericResult<Self> {
            Ok(Self(self.0 / scalar))
        }
    }

    #[test]
    fn test_narrow_defaults_keep_low_bits() {
        let meters = Length::canonical_unit();
        let q = MockMeters(4_294_967_296.0 + 300.0); // 2^32 + 300
        assert_eq!(q.to_i32(meters), 300);
        assert_eq!(q.to_i16(meters), 300);
        assert_eq!(q.to_i8(meters), 44); // 300 - 256
        assert_eq!(MockMeters(-2.5).round_to_i8(meters), -3);
        assert_eq!(MockMeters(70_000.4).round_to_i16(meters), 70_000i64 as i16);
        assert_eq!(MockMeters(1.5).round_to_i32(meters), 2);
    }

    #[test]
    fn test_default_negation() {
        let q = MockMeters(2.0).checked_neg().unwrap();
        assert_eq!(q.0, -2.0);
    }

    #[test]
    fn test_dyn_equality() {
        let a: Box<dyn Quantity<Length>> = Box::new(MockMeters(1.0));
        let b: Box<dyn Quantity<Length>> = Box::new(MockMeters(1.0));
        let c: Box<dyn Quantity<Length>> = Box::new(MockMeters(NANOS_PER_CANONICAL as f64));
        assert!(*a == *b);
        assert!(*a != *c);
    }
}
