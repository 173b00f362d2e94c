//! Small descriptive-statistics helpers for the outlier filter and the
//! summary reporter.
//!
//! Every helper returns `None` on empty input instead of panicking or
//! producing NaN, so a category emptied by filtering degrades to a
//! "no data" report rather than an arithmetic error.

use serde::Serialize;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(statistical::mean(values))
    }
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Quantile with linear interpolation between closest ranks.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = q * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    if below == above {
        return Some(sorted[below]);
    }
    let fraction = position - below as f64;
    Some(sorted[below] * (1.0 - fraction) + sorted[above] * fraction)
}

/// The acceptance interval [Q1 - k*IQR, Q3 + k*IQR].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IqrBounds {
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

pub fn iqr_bounds(values: &[f64], k: f64) -> Option<IqrBounds> {
    let q1 = quantile(values, 0.25)?;
    let q3 = quantile(values, 0.75)?;
    let iqr = q3 - q1;
    Some(IqrBounds {
        lower: q1 - k * iqr,
        upper: q3 + k * iqr,
    })
}

/// How many samples lie more than `threshold` population standard
/// deviations from the mean. Degenerate samples (zero spread) have no
/// Z-score outliers.
pub fn zscore_outlier_count(values: &[f64], threshold: f64) -> usize {
    let Some(sample_mean) = mean(values) else {
        return 0;
    };
    let std_dev = statistical::population_standard_deviation(values, Some(sample_mean));
    if std_dev == 0.0 {
        return 0;
    }
    values
        .iter()
        .filter(|value| ((*value - sample_mean) / std_dev).abs() > threshold)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_none_everywhere() {
        assert_eq!(mean(&[]), None);
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
        assert_eq!(quantile(&[], 0.25), None);
        assert_eq!(iqr_bounds(&[], 1.5), None);
        assert_eq!(zscore_outlier_count(&[], 3.0), 0);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.25), Some(1.75));
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(quantile(&values, 0.75), Some(3.25));
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
    }

    #[test]
    fn iqr_bounds_widen_with_k() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let narrow = iqr_bounds(&values, 1.2).unwrap();
        let wide = iqr_bounds(&values, 1.5).unwrap();
        assert!(wide.lower < narrow.lower);
        assert!(wide.upper > narrow.upper);
        assert!(narrow.contains(2.5));
    }

    #[test]
    fn zscore_flags_the_far_sample() {
        let mut values = vec![10.0; 20];
        values.push(1000.0);
        assert_eq!(zscore_outlier_count(&values, 2.5), 1);
        // A constant sample has zero spread and therefore no outliers.
        assert_eq!(zscore_outlier_count(&[5.0, 5.0, 5.0], 2.5), 0);
    }
}
