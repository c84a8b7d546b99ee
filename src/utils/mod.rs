// ============================================================================
// Utilities Module
// Logging bootstrap for binaries, demos and benchmarks
// ============================================================================

#[cfg(feature = "logging")]
mod logging;

#[cfg(feature = "logging")]
pub use logging::init_logging;
