//! Moment and order statistics over plain `f64` samples.
//!
//! All functions take present values only; callers drop missing cells first.

/// Centred power sums below this are floating-point noise and count as zero.
const FP_NOISE: f64 = 1e-14;

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (ddof = 1).
pub(crate) fn sample_variance(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = mean(values)?;
    let ss = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some(ss / (n as f64 - 1.0))
}

/// Population standard deviation (ddof = 0).
pub(crate) fn population_std(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let ss = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some((ss / values.len() as f64).sqrt())
}

pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Quantile of ascending-sorted values with linear interpolation between
/// the closest ranks (position `q * (n - 1)`).
pub(crate) fn quantile_sorted(values: &[f64], quantile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let pos = quantile.clamp(0.0, 1.0) * (values.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(values[lower]);
    }
    let weight = pos - lower as f64;
    Some(values[lower] + (values[upper] - values[lower]) * weight)
}

fn centred_sums(values: &[f64], mean: f64) -> (f64, f64, f64) {
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for v in values {
        let d = v - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    let zero_noise = |x: f64| if x.abs() < FP_NOISE { 0.0 } else { x };
    (zero_noise(m2), zero_noise(m3), zero_noise(m4))
}

/// Adjusted Fisher-Pearson skewness. Undefined below 3 values.
pub(crate) fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let (m2, m3, _) = centred_sums(values, mean(values)?);
    if m2 == 0.0 {
        return Some(0.0);
    }
    let n = n as f64;
    Some(n * (n - 1.0).sqrt() / (n - 2.0) * (m3 / m2.powf(1.5)))
}

/// Bias-corrected excess kurtosis. Undefined below 4 values.
pub(crate) fn kurtosis(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 4 {
        return None;
    }
    let (m2, _, m4) = centred_sums(values, mean(values)?);
    if m2 == 0.0 {
        return Some(0.0);
    }
    let n = n as f64;
    let numerator = n * (n + 1.0) * (n - 1.0) * m4;
    let denominator = (n - 2.0) * (n - 3.0) * m2 * m2;
    let adjustment = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    Some(numerator / denominator - adjustment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean_and_variance() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(mean(&values), Some(3.0));
        assert_eq!(sample_variance(&values), Some(2.5));
        assert!(approx(population_std(&values).unwrap(), 2.0f64.sqrt()));
    }

    #[test]
    fn test_variance_undefined_for_single_value() {
        assert_eq!(sample_variance(&[5.0]), None);
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std(&[]), None);
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let values = sorted(&[100.0, 1.0, 3.0, 2.0, 5.0, 4.0]);
        assert!(approx(quantile_sorted(&values, 0.25).unwrap(), 2.25));
        assert!(approx(quantile_sorted(&values, 0.5).unwrap(), 3.5));
        assert!(approx(quantile_sorted(&values, 0.75).unwrap(), 4.75));
        assert_eq!(quantile_sorted(&values, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&values, 1.0), Some(100.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_skewness_known_value() {
        // Right tail: adjusted skewness of [1, 2, 3, 4, 10] is 1.697056...
        let skew = skewness(&[1.0, 2.0, 3.0, 4.0, 10.0]).unwrap();
        assert!((skew - 1.697_056).abs() < 1e-5);
    }

    #[test]
    fn test_skewness_symmetric_and_degenerate() {
        assert!(approx(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 0.0));
        assert_eq!(skewness(&[5.0, 5.0, 5.0]), Some(0.0));
        assert_eq!(skewness(&[1.0, 2.0]), None);
    }

    #[test]
    fn test_kurtosis_known_value() {
        // Excess kurtosis of a uniform 1..=5 ramp is -1.2
        let kurt = kurtosis(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(approx(kurt, -1.2));
    }

    #[test]
    fn test_kurtosis_degenerate() {
        assert_eq!(kurtosis(&[1.0, 2.0, 3.0]), None);
        assert_eq!(kurtosis(&[0.1, 0.1, 0.1, 0.1]), Some(0.0));
    }
}
