// ============================================================================
// Unit Catalog
// Built set of units for one dimension, canonical unit first
// ============================================================================

use super::config::UnitCatalogConfig;
use super::dimension::Dimension;
use super::unit::QuantityUnit;
use crate::numeric::{NumericError, NumericResult};

/// Units of dimension `D` built from a [`UnitCatalogConfig`].
///
/// Each dimension memoizes its preset catalog on first access (see
/// [`Dimension::catalog`]); after that it is read-only for the life of the
/// process.
#[derive(Debug, Clone)]
pub struct UnitCatalog<D: Dimension> {
    /// Never empty: index 0 is the canonical unit
    units: Vec<QuantityUnit<D>>,
}

impl<D: Dimension> UnitCatalog<D> {
    /// Catalog holding only the canonical unit.
    pub fn canonical_only() -> Self {
        Self {
            units: vec![QuantityUnit::base(
                D::KIND.canonical_name(),
                D::KIND.canonical_symbol(),
            )],
        }
    }

    /// Build a catalog by deriving each configured unit from its base.
    ///
    /// # Errors
    /// - `InvalidArgument` if the config is for another dimension or fails validation
    /// - `Overflow` if a derived factor leaves the finite positive range
    pub fn build(config: &UnitCatalogConfig) -> NumericResult<Self> {
        if config.dimension != D::KIND {
            tracing::warn!(
                expected = %D::KIND,
                actual = %config.dimension,
                "unit catalog config has the wrong dimension"
            );
            return Err(NumericError::InvalidArgument);
        }
        if let Err(reason) = config.validate() {
            tracing::warn!(dimension = %D::KIND, %reason, "unit catalog config rejected");
            return Err(NumericError::InvalidArgument);
        }

        let mut catalog = Self::canonical_only();
        for definition in &config.units {
            let base = catalog
                .get(&definition.base_symbol)
                .ok_or(NumericError::InvalidArgument)?;
            let unit = base.derive_ratio(
                definition.factor,
                definition.divisor.unwrap_or(1.0),
                definition.name.clone(),
                definition.symbol.clone(),
            )?;
            catalog.units.push(unit);
        }
        Ok(catalog)
    }

    /// Build the preset catalog for `D`, falling back to the canonical unit alone.
    pub fn preset() -> Self {
        match Self::build(&UnitCatalogConfig::for_dimension(D::KIND)) {
            Ok(catalog) => {
                tracing::debug!(dimension = %D::KIND, units = catalog.len(), "unit catalog built");
                catalog
            }
            Err(err) => {
                tracing::warn!(dimension = %D::KIND, %err, "preset unit catalog failed to build");
                Self::canonical_only()
            }
        }
    }

    /// The canonical unit.
    #[inline]
    pub fn canonical(&self) -> &QuantityUnit<D> {
        &self.units[0]
    }

    /// Look up a unit by symbol.
    pub fn get(&self, symbol: &str) -> Option<&QuantityUnit<D>> {
        self.units.iter().find(|unit| unit.symbol() == symbol)
    }

    /// Iterate over all units, canonical first.
    pub fn iter(&self) -> impl Iterator<Item = &QuantityUnit<D>> {
        self.units.iter()
    }

    /// Number of units, canonical included.
    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Always false; the canonical unit is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
