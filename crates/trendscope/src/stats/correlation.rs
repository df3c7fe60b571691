//! Correlation measures.

use super::descriptive::mean;

/// Pearson correlation coefficient between `x` and `y`.
///
/// Returns 0 when the slices differ in length, are empty, or either side
/// has zero variance. The result is clamped to `[-1, 1]` and is exactly
/// symmetric in its arguments.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }

    let r = cov / (var_x * var_y).sqrt();
    if r.is_finite() { r.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Autocorrelation of `values` at `lag`.
///
/// Returns 0 if `values.len() <= lag` or the series is constant.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    let n = values.len();
    if n <= lag {
        return 0.0;
    }

    let m = mean(values);
    let denominator: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    if denominator == 0.0 {
        return 0.0;
    }

    let numerator: f64 = (0..n - lag)
        .map(|i| (values[i] - m) * (values[i + lag] - m))
        .sum();

    let r = numerator / denominator;
    if r.is_finite() { r } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_self_is_one() {
        let x = [1.0, 3.0, 2.0, 8.0, 5.0];
        assert!((pearson_correlation(&x, &x) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_negative() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson_correlation(&x, &y) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_symmetric() {
        let x = [1.0, 3.0, 2.0, 8.0, 5.0];
        let y = [0.5, 0.1, 4.0, 2.0, 9.0];
        assert_eq!(pearson_correlation(&x, &y), pearson_correlation(&y, &x));
    }

    #[test]
    fn test_pearson_degenerate_inputs() {
        assert_eq!(pearson_correlation(&[], &[]), 0.0);
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(pearson_correlation(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_autocorrelation_short_series() {
        assert_eq!(autocorrelation(&[1.0, 2.0, 3.0], 3), 0.0);
        assert_eq!(autocorrelation(&[4.0, 4.0, 4.0, 4.0], 1), 0.0);
    }

    #[test]
    fn test_autocorrelation_periodic() {
        let values: Vec<f64> = (0..48).map(|i| if i % 12 < 6 { 10.0 } else { 0.0 }).collect();
        assert!(autocorrelation(&values, 12) > 0.6);
        assert!(autocorrelation(&values, 6) < 0.0);
    }
}
