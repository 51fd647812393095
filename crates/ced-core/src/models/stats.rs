//! Small descriptive statistics over `f64` slices.

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with `ddof` delta degrees of freedom.
/// `NaN` when fewer than `ddof + 1` values are present.
pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    let n = values.len();
    if n <= ddof {
        return f64::NAN;
    }
    let m = mean(values);
    let ss = values.iter().map(|v| (v - m).powi(2)).sum::<f64>();
    (ss / (n - ddof) as f64).sqrt()
}

/// Round half away from zero to `decimals` places. `NaN` passes through.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Euclidean norm of the given terms.
pub fn l2_norm(terms: &[f64]) -> f64 {
    terms.iter().map(|t| t * t).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_nan() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn std_dev_population_and_sample() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std_dev(&values, 0) - 2.0).abs() < 1e-12);
        assert!((std_dev(&values, 1) - 2.138_089_935).abs() < 1e-9);
    }

    #[test]
    fn round_to_three_places() {
        assert_eq!(round_to(0.123_456, 3), 0.123);
        assert_eq!(round_to(-0.123_45, 3), -0.123);
        assert!(round_to(f64::NAN, 3).is_nan());
    }

    #[test]
    fn l2_norm_pythagorean() {
        assert_eq!(l2_norm(&[3.0, 4.0]), 5.0);
    }
}
