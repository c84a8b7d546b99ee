// ============================================================================
// Numeric Module
// Exact, overflow-checked arithmetic underlying the quantity types
// ============================================================================
//
// This module provides:
// - checked: overflow-checked i64 add/sub/mul/neg and float narrowing
// - Uint128: four-limb unsigned magnitude for 128-bit intermediates
// - ParsedDecimal: {sign, significand, 10^exponent} view of a double
// - scale_exact/descale_exact: i64 times/over f64 without float rounding
// - reciprocal_exact: checked 1/x for turning per-unit ratios into factors
// - NumericError: the two failure kinds (Overflow, InvalidArgument)
//
// Design principles:
// - Exact operations are all-or-nothing: Ok(exact) or Err, never a truncated value
// - Only the explicitly wrapping helpers may lose information
// - No allocation on the scaling path

mod checked;
mod decimal;
mod errors;
mod exact_scale;
mod uint128;

pub use checked::{
    add_exact, integral_value, multiply_exact, negate_exact, round_away_to_i64, snap_to_integral,
    subtract_exact, wrapping_round_to_i64, wrapping_trunc_to_i64,
};
pub use decimal::ParsedDecimal;
pub use errors::{NumericError, NumericResult};
pub use exact_scale::{descale_exact, reciprocal_exact, scale_exact};
pub use uint128::Uint128;
