// ============================================================================
// Floating-Point Quantity
// Canonical-unit f64 representation, lossy but wide-ranged
// ============================================================================

use super::dimension::{are_equal, hash_canonical, Dimension};
use super::fixed_point::FixedQuantity;
use super::unit::{QuantityUnit, SNAP_ULPS};
use crate::interfaces::Quantity;
use crate::numeric::{
    snap_to_integral, wrapping_round_to_i64, wrapping_trunc_to_i64, NumericError, NumericResult,
};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Quantity of dimension `D` held as a finite f64 in canonical units.
///
/// Arithmetic follows IEEE-754 rounding; the only errors are results that
/// stop being finite.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent, bound = ""))]
pub struct FloatQuantity<D: Dimension> {
    canonical: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    _dimension: PhantomData<D>,
}

impl<D: Dimension> FloatQuantity<D> {
    /// Zero value
    pub const ZERO: Self = Self {
        canonical: 0.0,
        _dimension: PhantomData,
    };

    /// Create from an amount of `unit`.
    ///
    /// # Errors
    /// - `InvalidArgument` if `value` is NaN or infinite
    /// - `Overflow` if the canonical value is infinite
    pub fn new(value: f64, unit: &QuantityUnit<D>) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidArgument);
        }
        Self::finite(value * unit.numerator() / unit.denominator())
    }

    /// Create from a canonical-unit value.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `canonical` is NaN or infinite.
    pub fn from_canonical(canonical: f64) -> NumericResult<Self> {
        if !canonical.is_finite() {
            return Err(NumericError::InvalidArgument);
        }
        Self::finite(canonical)
    }

    /// Value in the canonical unit.
    #[inline]
    pub fn canonical(self) -> f64 {
        self.canonical
    }

    #[inline]
    fn finite(canonical: f64) -> NumericResult<Self> {
        if canonical.is_finite() {
            Ok(Self {
                canonical,
                _dimension: PhantomData,
            })
        } else {
            Err(NumericError::Overflow)
        }
    }
}

impl<D: Dimension> Quantity<D> for FloatQuantity<D> {
    #[inline]
    fn to_f64(&self, unit: &QuantityUnit<D>) -> f64 {
        self.canonical * unit.denominator() / unit.numerator()
    }

    /// Quotients within 2 ULPs of an integer count as that integer, so
    /// 1 m reads as 1e9 nm rather than 999999999.
    #[inline]
    fn to_i64(&self, unit: &QuantityUnit<D>) -> i64 {
        wrapping_trunc_to_i64(snap_to_integral(self.to_f64(unit), SNAP_ULPS))
    }

    #[inline]
    fn round_to_i64(&self, unit: &QuantityUnit<D>) -> i64 {
        wrapping_round_to_i64(snap_to_integral(self.to_f64(unit), SNAP_ULPS))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn checked_add(&self, other: &dyn Quantity<D>) -> NumericResult<Self> {
        Self::finite(self.canonical + other.to_f64(D::canonical_unit()))
    }

    fn checked_sub(&self, other: &dyn Quantity<D>) -> NumericResult<Self> {
        Self::finite(self.canonical - other.to_f64(D::canonical_unit()))
    }

    fn checked_mul_scalar(&self, scalar: f64) -> NumericResult<Self> {
        if !scalar.is_finite() {
            return Err(NumericError::InvalidArgument);
        }
        Self::finite(self.canonical * scalar)
    }

    fn checked_div_scalar(&self, scalar: f64) -> NumericResult<Self> {
        if !scalar.is_finite() || scalar == 0.0 {
            return Err(NumericError::InvalidArgument);
        }
        Self::finite(self.canonical / scalar)
    }
}

impl<D: Dimension> Default for FloatQuantity<D> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<D: Dimension> PartialEq for FloatQuantity<D> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        are_equal(self, other)
    }
}

impl<D: Dimension> PartialEq<FixedQuantity<D>> for FloatQuantity<D> {
    #[inline]
    fn eq(&self, other: &FixedQuantity<D>) -> bool {
        are_equal(self, other)
    }
}

impl<D: Dimension> PartialOrd for FloatQuantity<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.canonical.partial_cmp(&other.canonical)
    }
}

impl<D: Dimension> Hash for FloatQuantity<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_canonical(self, state);
    }
}

impl<D: Dimension> fmt::Debug for FloatQuantity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FloatQuantity<{}>({})", D::KIND, self)
    }
}

impl<D: Dimension> fmt::Display for FloatQuantity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.canonical, D::KIND.canonical_symbol())
    }
}
