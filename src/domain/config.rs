// ============================================================================
// Unit Catalog Configuration
// Declarative derived-unit definitions per dimension, with presets
// ============================================================================

use super::dimension::DimensionKind;
use smallvec::SmallVec;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Unit Definition
// ============================================================================

/// A derived unit worth `factor` of an already defined unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitDefinition {
    /// Full name (e.g. "kilometer")
    pub name: String,

    /// Symbol used for lookup (e.g. "km")
    pub symbol: String,

    /// Symbol of the unit this one is derived from; the canonical symbol
    /// or any unit defined earlier in the same config
    pub base_symbol: String,

    /// How many `base_symbol` units make one of this unit (numerator when
    /// `divisor` is set)
    pub factor: f64,

    /// Exact denominator for ratio units such as km/h (1000 / 3600)
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub divisor: Option<f64>,
}

impl UnitDefinition {
    /// Create a new definition
    pub fn new(name: &str, symbol: &str, base_symbol: &str, factor: f64) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            base_symbol: base_symbol.to_string(),
            factor,
            divisor: None,
        }
    }

    /// Create a definition worth `numerator / denominator` of the base unit
    pub fn ratio(name: &str, symbol: &str, base_symbol: &str, numerator: f64, denominator: f64) -> Self {
        Self {
            divisor: Some(denominator),
            ..Self::new(name, symbol, base_symbol, numerator)
        }
    }
}

// ============================================================================
// Catalog Configuration
// ============================================================================

/// Derived units of one dimension, in definition order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitCatalogConfig {
    /// The dimension the units belong to
    pub dimension: DimensionKind,

    /// Derived unit definitions; the canonical unit is implicit
    pub units: SmallVec<[UnitDefinition; 8]>,
}

impl UnitCatalogConfig {
    /// Create an empty configuration (canonical unit only)
    pub fn new(dimension: DimensionKind) -> Self {
        Self {
            dimension,
            units: SmallVec::new(),
        }
    }

    /// Builder method: Add a derived unit
    pub fn with_unit(mut self, name: &str, symbol: &str, base_symbol: &str, factor: f64) -> Self {
        self.units
            .push(UnitDefinition::new(name, symbol, base_symbol, factor));
        self
    }

    /// Builder method: Add a derived unit with an exact ratio to its base
    pub fn with_ratio_unit(
        mut self,
        name: &str,
        symbol: &str,
        base_symbol: &str,
        numerator: f64,
        denominator: f64,
    ) -> Self {
        self.units.push(UnitDefinition::ratio(
            name,
            symbol,
            base_symbol,
            numerator,
            denominator,
        ));
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let mut known: HashSet<&str> = HashSet::new();
        known.insert(self.dimension.canonical_symbol());

        for unit in &self.units {
            if unit.name.is_empty() {
                return Err("Unit name cannot be empty".to_string());
            }
            if unit.symbol.is_empty() {
                return Err(format!("Unit '{}' has an empty symbol", unit.name));
            }
            if !unit.factor.is_finite() || unit.factor <= 0.0 {
                return Err(format!(
                    "Unit '{}' must have a finite positive factor",
                    unit.symbol
                ));
            }
            if let Some(divisor) = unit.divisor {
                if !divisor.is_finite() || divisor <= 0.0 {
                    return Err(format!(
                        "Unit '{}' must have a finite positive divisor",
                        unit.symbol
                    ));
                }
            }
            if !known.contains(unit.base_symbol.as_str()) {
                return Err(format!(
                    "Unit '{}' derives from undefined unit '{}'",
                    unit.symbol, unit.base_symbol
                ));
            }
            if !known.insert(unit.symbol.as_str()) {
                return Err(format!("Duplicate unit symbol '{}'", unit.symbol));
            }
        }

        Ok(())
    }

    /// Parse a configuration from JSON and validate it
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json).map_err(|err| err.to_string())?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl UnitCatalogConfig {
    /// Preset for a dimension tag
    pub fn for_dimension(dimension: DimensionKind) -> Self {
        match dimension {
            DimensionKind::Length => Self::length_units(),
            DimensionKind::Time => Self::time_units(),
            DimensionKind::Speed => Self::speed_units(),
            DimensionKind::Acceleration => Self::acceleration_units(),
            DimensionKind::Jerk => Self::jerk_units(),
        }
    }

    /// Metric prefixes down to the nanometer, plus international imperial units.
    ///
    /// Every unit derives straight from the meter with its exact decimal
    /// factor; chaining (mi from yd from ft ...) would compound float error.
    pub fn length_units() -> Self {
        Self::new(DimensionKind::Length)
            .with_unit("kilometer", "km", "m", 1000.0)
            .with_unit("centimeter", "cm", "m", 0.01)
            .with_unit("millimeter", "mm", "m", 0.001)
            .with_unit("micrometer", "µm", "m", 1e-6)
            .with_unit("nanometer", "nm", "m", 1e-9)
            .with_unit("inch", "in", "m", 0.0254)
            .with_unit("foot", "ft", "m", 0.3048)
            .with_unit("yard", "yd", "m", 0.9144)
            .with_unit("mile", "mi", "m", 1609.344)
    }

    /// Sub-second prefixes and calendar-free multiples
    pub fn time_units() -> Self {
        Self::new(DimensionKind::Time)
            .with_unit("millisecond", "ms", "s", 0.001)
            .with_unit("microsecond", "µs", "s", 1e-6)
            .with_unit("nanosecond", "ns", "s", 1e-9)
            .with_unit("minute", "min", "s", 60.0)
            .with_unit("hour", "h", "s", 3600.0)
            .with_unit("day", "d", "s", 86_400.0)
    }

    /// Road and nautical speeds
    pub fn speed_units() -> Self {
        Self::new(DimensionKind::Speed)
            .with_ratio_unit("kilometer per hour", "km/h", "m/s", 1000.0, 3600.0)
            .with_unit("mile per hour", "mph", "m/s", 0.44704)
            .with_ratio_unit("knot", "kn", "m/s", 1852.0, 3600.0)
    }

    /// Standard gravity and the gal
    pub fn acceleration_units() -> Self {
        Self::new(DimensionKind::Acceleration)
            .with_unit("standard gravity", "g0", "m/s²", 9.80665)
            .with_unit("gal", "Gal", "m/s²", 0.01)
    }

    /// Standard gravity per second
    pub fn jerk_units() -> Self {
        Self::new(DimensionKind::Jerk).with_unit("standard gravity per second", "g0/s", "m/s³", 9.80665)
    }
}
