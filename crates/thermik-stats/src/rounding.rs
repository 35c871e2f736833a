/// Rounds `value` to `decimals` places, resolving ties to the even digit.
///
/// Rounding works on the exact decimal expansion of `value`, so `0.15`
/// (stored as `0.1499...`) rounds down to `0.1`. Non-finite values are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use thermik_stats::rounding::round_half_even;
///
/// assert_eq!(round_half_even(2.5, 0), 2.0);
/// assert_eq!(round_half_even(3.5, 0), 4.0);
/// assert_eq!(round_half_even(33.333, 1), 33.3);
/// ```
#[must_use]
pub fn round_half_even(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Rounds `value` to the nearest integer, ties to even.
///
/// Values outside the `i64` range saturate.
#[expect(clippy::cast_possible_truncation)]
#[must_use]
pub fn round_to_integer(value: f64) -> i64 {
    value.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_decimal() {
        assert_eq!(round_half_even(1.25, 1), 1.2);
        assert_eq!(round_half_even(-0.25, 1), -0.2);
        assert_eq!(round_half_even(4.0, 1), 4.0);
    }

    #[test]
    fn test_one_decimal_uses_exact_expansion() {
        assert_eq!(round_half_even(0.15, 1), 0.1);
        assert_eq!(round_half_even(0.35, 1), 0.3);
        assert_eq!(round_half_even(1.15, 1), 1.1);
        assert_eq!(round_half_even(1.45, 1), 1.4);
        assert_eq!(round_half_even(-1.15, 1), -1.1);
    }

    #[test]
    fn test_non_finite_unchanged() {
        assert!(round_half_even(f64::NAN, 1).is_nan());
        assert_eq!(round_half_even(f64::INFINITY, 1), f64::INFINITY);
    }

    #[test]
    fn test_to_integer() {
        assert_eq!(round_to_integer(12.6), 13);
        assert_eq!(round_to_integer(0.5), 0);
        assert_eq!(round_to_integer(1.5), 2);
        assert_eq!(round_to_integer(-2.5), -2);
    }
}
