// ============================================================================
// Logging Bootstrap
// ============================================================================
//
// The library only emits `tracing` events:
// - debug: a dimension's unit catalog was built
// - warn: a unit catalog config was rejected
// - trace: fixed-point arithmetic overflowed
//
// Binaries decide where those go. `init_logging` is the shortcut for
// formatted output on stderr.

use tracing::Level;

/// Install a formatted `tracing` subscriber filtered at `max_level`.
///
/// Returns false if a global subscriber was already installed.
pub fn init_logging(max_level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
