//! Rounding and averaging helpers shared by the scoring code.

/// Round to the nearest integer, halves toward positive infinity
/// (`2.5 -> 3`, `-2.5 -> -2`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Arithmetic mean accumulated in input order; `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Round a 0-100 score into a `u8`, clamping anything outside the range
pub fn to_percent(value: f64) -> u8 {
    round_half_up(value).clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-10.5), -10.0);
        assert_eq!(round_half_up(-10.6), -11.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_to_percent_clamps() {
        assert_eq!(to_percent(-4.0), 0);
        assert_eq!(to_percent(49.5), 50);
        assert_eq!(to_percent(180.0), 100);
    }
}
