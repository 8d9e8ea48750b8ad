//! Tolerance used to compare floating-point values throughout the engine.
//!
//! Numbers produced by earlier transformations carry round-off error, so exact comparisons would
//! fail to merge terms like `0.1 + 0.2` and `0.3`.

/// The absolute tolerance below which two numbers are considered equal.
pub const EPSILON: f64 = 1e-10;

/// Returns true if the two numbers differ by less than [`EPSILON`].
#[inline]
pub fn approx_eq(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() < EPSILON
}

/// Returns true if the number is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(value: f64) -> bool {
    approx_eq(value, 0.0)
}

/// Returns true if the number is within [`EPSILON`] of one.
#[inline]
pub fn is_one(value: f64) -> bool {
    approx_eq(value, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_off() {
        assert!(approx_eq(0.1 + 0.2, 0.3));
        assert!(!approx_eq(1.0, 1.0 + 1e-9));
        assert!(is_zero(-1e-12));
        assert!(is_one(3.0 * (1.0 / 3.0)));
    }
}
