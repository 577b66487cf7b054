/// Divide two metrics, yielding `None` rather than an infinite or NaN result.
#[must_use]
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }

    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(10.0, 4.0), Some(2.5));
        assert_eq!(ratio(0.0, 4.0), Some(0.0));
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(10.0, 0.0), None);
        assert_eq!(ratio(0.0, 0.0), None);
    }

    #[test]
    fn test_ratio_overflow_is_absent() {
        assert_eq!(ratio(f64::MAX, 1e-300), None);
    }
}
