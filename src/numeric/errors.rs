// ============================================================================
// Numeric Errors
// Error types for exact arithmetic and unit conversion
// ============================================================================

use std::fmt;

/// Errors that can occur during exact arithmetic operations.
///
/// Both kinds are detected before any value is returned: an operation that
/// fails never hands back a partially computed or silently truncated result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// The exact result does not fit the fixed-width target type
    Overflow,
    /// A precondition was violated before computation started
    /// (non-finite factor, zero divisor, non-positive unit factor, ...)
    InvalidArgument,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: exact result does not fit the target type")
            },
            NumericError::InvalidArgument => {
                write!(f, "invalid argument: operation precondition violated")
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: exact result does not fit the target type"
        );
        assert_eq!(
            NumericError::InvalidArgument.to_string(),
            "invalid argument: operation precondition violated"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(NumericError::Overflow, NumericError::InvalidArgument);
    }
}
