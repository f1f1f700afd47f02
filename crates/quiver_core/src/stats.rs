use anyhow::{bail, Result};
use serde::Serialize;

/// Descriptive statistics for one column of samples.
///
/// `count` counts finite samples only; the remaining fields are computed over
/// those. `std` is the sample deviation (ddof = 1) and is NaN when fewer than
/// two finite samples exist. Quartiles interpolate linearly between order
/// statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Summarizes a column of samples, skipping NaN and infinite entries.
pub fn describe(values: &[f64]) -> Result<Summary> {
    if values.is_empty() {
        bail!("Cannot summarize an empty column.");
    }
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        bail!("Column has no finite samples to summarize.");
    }
    finite.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let count = finite.len();
    let mean = finite.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let squared: f64 = finite.iter().map(|v| (v - mean) * (v - mean)).sum();
        (squared / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    Ok(Summary {
        count,
        mean,
        std,
        min: finite[0],
        q1: quantile(&finite, 0.25),
        median: quantile(&finite, 0.5),
        q3: quantile(&finite, 0.75),
        max: finite[count - 1],
    })
}

/// Linearly interpolated quantile of an ascending-sorted, non-empty slice.
/// Rank is (n - 1) * p, split between the two nearest order statistics.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let rank = (sorted.len() - 1) as f64 * p;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::describe;

    #[test]
    fn describe_matches_hand_computed_values() {
        let summary = describe(&[1.0, 2.0, 3.0, 4.0, 5.0]).expect("describable column");
        assert_eq!(summary.count, 5);
        assert_eq!(summary.mean, 3.0);
        assert!((summary.std - 2.5_f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.max, 5.0);
    }

    #[test]
    fn quartiles_interpolate_between_order_statistics() {
        let summary = describe(&[1.0, 2.0, 3.0, 4.0]).expect("describable column");
        assert_eq!(summary.q1, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q3, 3.25);
    }

    #[test]
    fn describe_is_order_independent() {
        let sorted = describe(&[1.0, 2.0, 3.0, 4.0]).expect("describable column");
        let shuffled = describe(&[3.0, 1.0, 4.0, 2.0]).expect("describable column");
        assert_eq!(sorted, shuffled);
    }

    #[test]
    fn non_finite_samples_are_skipped() {
        let summary = describe(&[1.0, f64::NAN, 3.0, f64::INFINITY, f64::NEG_INFINITY])
            .expect("two finite samples");
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
    }

    #[test]
    fn single_sample_has_undefined_deviation() {
        let summary = describe(&[7.5]).expect("single finite sample");
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean, 7.5);
        assert!(summary.std.is_nan());
        assert_eq!(summary.min, 7.5);
        assert_eq!(summary.median, 7.5);
        assert_eq!(summary.max, 7.5);
    }

    #[test]
    fn empty_column_is_rejected() {
        let err = describe(&[]).expect_err("empty column must fail");
        assert!(err.to_string().contains("empty column"));
    }

    #[test]
    fn all_nan_column_is_rejected() {
        let err = describe(&[f64::NAN, f64::NAN]).expect_err("all-NaN column must fail");
        assert!(err.to_string().contains("no finite samples"));
    }
}
