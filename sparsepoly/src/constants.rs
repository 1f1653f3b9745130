/// Magnitude at or below which a coefficient is dropped when no epsilon is given
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Results of `+ - *` are always re-filtered with this, whatever eps the operands were built with
pub const OPERATOR_EPSILON: f64 = 1e-6;

/// Two coefficients closer than this are considered equal. Used by `PartialEq` and `Hash`,
/// independent of any construction epsilon.
pub const COMPARISON_TOLERANCE: f64 = 1e-6;

/// Largest degree a term may carry. Products of two polynomials must stay within it too, so
/// degree sums never overflow `usize`.
pub const MAX_DEGREE: usize = i32::MAX as usize;
