// ============================================================================
// Physical Dimensions
// Dimension tags, canonical-unit table and cross-representation equality
// ============================================================================

use super::catalog::UnitCatalog;
use super::unit::QuantityUnit;
use crate::interfaces::Quantity;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Dimension Kind (runtime tag)
// ============================================================================

/// Runtime tag identifying a physical dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DimensionKind {
    /// Distance, canonical unit meter
    Length,
    /// Duration, canonical unit second
    Time,
    /// Length per second
    Speed,
    /// Speed per second
    Acceleration,
    /// Acceleration per second
    Jerk,
}

impl DimensionKind {
    /// All dimension tags, lowest first
    pub const ALL: [DimensionKind; 5] = [
        DimensionKind::Length,
        DimensionKind::Time,
        DimensionKind::Speed,
        DimensionKind::Acceleration,
        DimensionKind::Jerk,
    ];

    /// Name of the canonical unit.
    pub const fn canonical_name(self) -> &'static str {
        match self {
            DimensionKind::Length => "meter",
            DimensionKind::Time => "second",
            DimensionKind::Speed => "meter per second",
            DimensionKind::Acceleration => "meter per second squared",
            DimensionKind::Jerk => "meter per second cubed",
        }
    }

    /// Symbol of the canonical unit.
    pub const fn canonical_symbol(self) -> &'static str {
        match self {
            DimensionKind::Length => "m",
            DimensionKind::Time => "s",
            DimensionKind::Speed => "m/s",
            DimensionKind::Acceleration => "m/s²",
            DimensionKind::Jerk => "m/s³",
        }
    }

    /// The dimension this one is "per second" of, if it is a rate.
    pub const fn lower(self) -> Option<DimensionKind> {
        match self {
            DimensionKind::Length | DimensionKind::Time => None,
            DimensionKind::Speed => Some(DimensionKind::Length),
            DimensionKind::Acceleration => Some(DimensionKind::Speed),
            DimensionKind::Jerk => Some(DimensionKind::Acceleration),
        }
    }

    /// True for per-second dimensions.
    #[inline]
    pub const fn is_rate(self) -> bool {
        self.lower().is_some()
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DimensionKind::Length => "length",
            DimensionKind::Time => "time",
            DimensionKind::Speed => "speed",
            DimensionKind::Acceleration => "acceleration",
            DimensionKind::Jerk => "jerk",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Dimension Markers (compile-time tag)
// ============================================================================

/// Compile-time dimension tag.
///
/// Quantities and units are parameterised by a zero-sized marker so that
/// mixing dimensions is a type error. Each marker owns a lazily built,
/// process-lifetime unit catalog.
pub trait Dimension:
    fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + Default + Send + Sync + 'static
{
    /// Runtime tag for this dimension
    const KIND: DimensionKind;

    /// Memoized catalog of the canonical and derived units.
    fn catalog() -> &'static UnitCatalog<Self>;

    /// The canonical unit; basis of equality and hashing.
    #[inline]
    fn canonical_unit() -> &'static QuantityUnit<Self> {
        Self::catalog().canonical()
    }

    /// Look up a unit by symbol.
    #[inline]
    fn unit(symbol: &str) -> Option<&'static QuantityUnit<Self>> {
        Self::catalog().get(symbol)
    }
}

/// A dimension defined as another dimension per second.
pub trait RateDimension: Dimension {
    /// The dimension being divided by time
    type Lower: Dimension;
}

macro_rules! dimension_marker {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name;

        impl Dimension for $name {
            const KIND: DimensionKind = DimensionKind::$kind;

            fn catalog() -> &'static UnitCatalog<Self> {
                static CATALOG: OnceLock<UnitCatalog<$name>> = OnceLock::new();
                CATALOG.get_or_init(UnitCatalog::preset)
            }
        }
    };
}

dimension_marker!(
    /// Length marker (canonical unit: meter)
    Length => Length
);
dimension_marker!(
    /// Time marker (canonical unit: second)
    Time => Time
);
dimension_marker!(
    /// Speed marker (canonical unit: meter per second)
    Speed => Speed
);
dimension_marker!(
    /// Acceleration marker (canonical unit: meter per second squared)
    Acceleration => Acceleration
);
dimension_marker!(
    /// Jerk marker (canonical unit: meter per second cubed)
    Jerk => Jerk
);

impl RateDimension for Speed {
    type Lower = Length;
}

impl RateDimension for Acceleration {
    type Lower = Speed;
}

impl RateDimension for Jerk {
    type Lower = Acceleration;
}

// ============================================================================
// Equality and Hashing Across Representations
// ============================================================================

/// Bit pattern every NaN hashes as.
const CANONICAL_NAN_BITS: u64 = 0x7ff8_0000_0000_0000;

/// True iff both quantities have the same canonical-unit value.
///
/// Plain IEEE comparison: NaN is never equal to anything.
#[inline]
pub fn are_equal<D: Dimension>(a: &dyn Quantity<D>, b: &dyn Quantity<D>) -> bool {
    let unit = D::canonical_unit();
    a.to_f64(unit) == b.to_f64(unit)
}

/// Normalize a canonical value for hashing: -0.0 as +0.0, one NaN pattern.
#[inline]
pub fn canonical_hash_bits(value: f64) -> u64 {
    if value.is_nan() {
        CANONICAL_NAN_BITS
    } else if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

/// Feed the normalized canonical value into a hasher.
#[inline]
pub fn hash_canonical<D: Dimension, H: Hasher>(quantity: &dyn Quantity<D>, state: &mut H) {
    state.write_u64(canonical_hash_bits(quantity.to_f64(D::canonical_unit())));
}

/// Hash code of a quantity that agrees with [`are_equal`] across representations.
pub fn calculate_hash_code<D: Dimension>(quantity: &dyn Quantity<D>) -> u64 {
    let mut hasher = DefaultHasher::new();
    hash_canonical(quantity, &mut hasher);
    hasher.finish()
}
