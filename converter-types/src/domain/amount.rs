//! Amount normalization.
//!
//! Bad numeric input never produces an error: anything that is not a finite,
//! non-negative number becomes `0.0`.

/// Clamps `value` to a finite non-negative amount.
///
/// `NaN`, infinities and negative numbers all map to `0.0`.
pub fn normalize_amount(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        // -0.0 compares equal to 0.0; keep the sign bit out of rendered output
        value + 0.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_positive_passes_through() {
        assert_eq!(normalize_amount(12.5), 12.5);
        assert_eq!(normalize_amount(0.0), 0.0);
    }

    #[test]
    fn test_nan_and_infinity_become_zero() {
        assert_eq!(normalize_amount(f64::NAN), 0.0);
        assert_eq!(normalize_amount(f64::INFINITY), 0.0);
        assert_eq!(normalize_amount(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_negative_becomes_zero() {
        assert_eq!(normalize_amount(-3.0), 0.0);
        assert!(normalize_amount(-0.0).is_sign_positive());
    }
}
