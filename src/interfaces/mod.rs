// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod quantity;

pub use quantity::Quantity;
