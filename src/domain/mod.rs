// ============================================================================
// Domain Models Module
// Dimensions, units and the quantity representations built on them
// ============================================================================

pub mod catalog;
pub mod config;
pub mod dimension;
pub mod fixed_point;
pub mod float_point;
pub mod rate;
pub mod unit;

pub use catalog::UnitCatalog;
pub use config::{UnitCatalogConfig, UnitDefinition};
pub use dimension::{
    are_equal, calculate_hash_code, canonical_hash_bits, hash_canonical, Acceleration, Dimension,
    DimensionKind, Jerk, Length, RateDimension, Speed, Time,
};
pub use fixed_point::FixedQuantity;
pub use float_point::FloatQuantity;
pub use rate::{FixedAcceleration, FixedJerk, FixedLength, FixedSpeed, FixedTime, Rate};
pub use unit::{QuantityUnit, NANOS_PER_CANONICAL};
