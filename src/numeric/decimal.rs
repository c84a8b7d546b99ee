// ============================================================================
// Decimal Parsing
// Exact {sign, significand, power-of-ten} decomposition of a double
// ============================================================================

use super::errors::{NumericError, NumericResult};
use arrayvec::ArrayString;
use std::fmt::Write;

/// Longest `{:e}` rendering of a finite f64 is 24 bytes ("-2.2250738585072014e-308").
const FORMAT_CAPACITY: usize = 32;

/// A finite decimal `sign * significand * 10^exponent10`.
///
/// Built from the shortest round-tripping decimal string of a double, so the
/// value it denotes is the decimal the double prints as, not the binary
/// fraction it stores (0.1 parses as exactly one tenth).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDecimal {
    /// True for values with a leading minus sign (including -0.0)
    pub negative: bool,
    /// Decimal digits with the point removed, trailing zeros folded into the exponent
    pub significand: u64,
    /// Power of ten applied to the significand
    pub exponent10: i32,
}

impl ParsedDecimal {
    /// Decompose a finite double.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for NaN and the infinities.
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidArgument);
        }
        let mut rendered = ArrayString::<FORMAT_CAPACITY>::new();
        write!(rendered, "{:e}", value).map_err(|_| NumericError::InvalidArgument)?;
        rendered.parse()
    }

    /// Sign as -1 or +1.
    #[inline]
    pub const fn sign(&self) -> i32 {
        if self.negative {
            -1
        } else {
            1
        }
    }

    /// Check if the decimal is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.significand == 0
    }
}

impl std::str::FromStr for ParsedDecimal {
    type Err = NumericError;

    /// Parse a plain or scientific decimal string.
    ///
    /// # Examples
    /// - "1e-1" -> {+, 1, -1}
    /// - "-1.2345e3" -> {-, 12345, -1}
    /// - "0.0025" -> {+, 25, -4}
    /// - "1500" -> {+, 15, 2}
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (mantissa, notation_exponent) = match unsigned.find(['e', 'E']) {
            Some(pos) => {
                let exponent: i32 = unsigned[pos + 1..]
                    .parse()
                    .map_err(|_| NumericError::InvalidArgument)?;
                (&unsigned[..pos], exponent)
            }
            None => (unsigned, 0),
        };

        let decimal_places = match mantissa.find('.') {
            Some(pos) => mantissa.len() - pos - 1,
            None => 0,
        };

        let mut significand: u64 = 0;
        let mut digit_count = 0usize;
        for byte in mantissa.bytes().filter(|&b| b != b'.') {
            if !byte.is_ascii_digit() {
                return Err(NumericError::InvalidArgument);
            }
            significand = significand
                .checked_mul(10)
                .and_then(|acc| acc.checked_add((byte - b'0') as u64))
                .ok_or(NumericError::InvalidArgument)?;
            digit_count += 1;
        }
        if digit_count == 0 || mantissa.matches('.').count() > 1 {
            return Err(NumericError::InvalidArgument);
        }

        // 0 times any power of ten is 0
        if significand == 0 {
            return Ok(Self {
                negative,
                significand: 0,
                exponent10: 0,
            });
        }

        let decimal_places =
            i32::try_from(decimal_places).map_err(|_| NumericError::InvalidArgument)?;
        let mut exponent10 = notation_exponent
            .checked_sub(decimal_places)
            .ok_or(NumericError::InvalidArgument)?;

        while significand % 10 == 0 {
            significand /= 10;
            exponent10 = exponent10
                .checked_add(1)
                .ok_or(NumericError::InvalidArgument)?;
        }

        Ok(Self {
            negative,
            significand,
            exponent10,
        })
    }
}
