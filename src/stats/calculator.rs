//! Statistics Calculator Module
//! Percentile extraction, box-plot summaries and histogram binning.

use crate::error::{ChartError, ChartResult};

/// Box-plot summary: interpolated quartiles, 1.5*IQR whiskers, outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// One histogram bin over [start, end).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

/// Percentile with linear interpolation between closest ranks
/// (NumPy compatible).
pub fn percentile(values: &[f64], p: f64) -> ChartResult<f64> {
    let sorted = sorted_copy(values);
    if sorted.is_empty() {
        return Err(ChartError::Computation(
            "percentile of an empty column".into(),
        ));
    }
    Ok(percentile_sorted(&sorted, p))
}

/// The (25th, 50th, 75th) percentile triple.
pub fn quartiles(values: &[f64]) -> ChartResult<(f64, f64, f64)> {
    let sorted = sorted_copy(values);
    if sorted.is_empty() {
        return Err(ChartError::Computation(
            "quartiles of an empty column".into(),
        ));
    }
    Ok((
        percentile_sorted(&sorted, 25.0),
        percentile_sorted(&sorted, 50.0),
        percentile_sorted(&sorted, 75.0),
    ))
}

/// Box summary with whiskers at the most extreme values inside the
/// 1.5*IQR fences and everything beyond collected as outliers.
pub fn box_stats(values: &[f64]) -> ChartResult<BoxStats> {
    let sorted = sorted_copy(values);
    if sorted.is_empty() {
        return Err(ChartError::Computation(
            "box statistics of an empty column".into(),
        ));
    }

    let q1 = percentile_sorted(&sorted, 25.0);
    let median = percentile_sorted(&sorted, 50.0);
    let q3 = percentile_sorted(&sorted, 75.0);
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let whisker_low = sorted
        .iter()
        .copied()
        .find(|&v| v >= lower_fence)
        .unwrap_or(q1);
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= upper_fence)
        .unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|&v| v < lower_fence || v > upper_fence)
        .collect();

    Ok(BoxStats {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        outliers,
    })
}

/// Bin a column into frequency counts. `bins` overrides the automatic
/// bin count (Freedman-Diaconis width, Sturges fallback when the IQR
/// degenerates).
pub fn histogram_bins(values: &[f64], bins: Option<usize>) -> ChartResult<Vec<HistBin>> {
    let sorted = sorted_copy(values);
    if sorted.is_empty() {
        return Err(ChartError::Computation("histogram of an empty column".into()));
    }

    let n = sorted.len();
    let min = sorted[0];
    let max = sorted[n - 1];

    if min == max {
        return Ok(vec![HistBin {
            start: min - 0.5,
            end: max + 0.5,
            count: n,
        }]);
    }

    let bin_count = match bins {
        Some(b) if b > 0 => b,
        Some(_) => {
            return Err(ChartError::InvalidRequest(
                "histogram bin count must be positive".into(),
            ))
        }
        None => {
            let iqr = percentile_sorted(&sorted, 75.0) - percentile_sorted(&sorted, 25.0);
            let fd_width = 2.0 * iqr / (n as f64).cbrt();
            if fd_width > 0.0 {
                (((max - min) / fd_width).ceil() as usize).clamp(1, 512)
            } else {
                ((n as f64).log2().ceil() as usize + 1).clamp(1, 512)
            }
        }
    };

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &v in &sorted {
        let idx = (((v - min) / width).floor() as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect())
}

/// Axis range with padding. Adds 15%, or a fixed pad for degenerate spans.
pub fn pad_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let span = (max - min).abs();
    let padding = if span < 1e-6 { 0.5 } else { span * 0.15 };
    (min - padding, max + padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn percentile_interpolates_between_ranks() {
        let values: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        assert_relative_eq!(percentile(&values, 25.0).unwrap(), 3.25);
        assert_relative_eq!(percentile(&values, 50.0).unwrap(), 5.5);
        assert_relative_eq!(percentile(&values, 75.0).unwrap(), 7.75);
    }

    #[test]
    fn percentile_of_empty_column_fails() {
        let err = percentile(&[], 50.0).unwrap_err();
        assert!(matches!(err, ChartError::Computation(_)));
    }

    #[test]
    fn single_value_percentile_is_that_value() {
        assert_relative_eq!(percentile(&[7.0], 75.0).unwrap(), 7.0);
    }

    #[test]
    fn box_stats_flag_outliers_beyond_fences() {
        let mut values: Vec<f64> = (1..=20).map(|v| v as f64).collect();
        values.push(100.0);
        let stats = box_stats(&values).unwrap();
        assert_eq!(stats.outliers, vec![100.0]);
        assert!(stats.whisker_high <= 20.0);
        assert!(stats.q1 < stats.median && stats.median < stats.q3);
    }

    #[test]
    fn histogram_counts_cover_all_samples() {
        let values: Vec<f64> = (0..100).map(|v| v as f64).collect();
        let bins = histogram_bins(&values, None).unwrap();
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 100);
        assert!(bins.len() > 1);
    }

    #[test]
    fn constant_column_gets_one_bin() {
        let bins = histogram_bins(&[3.0, 3.0, 3.0], None).unwrap();
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn pad_range_handles_inverted_and_tiny_spans() {
        let (lo, hi) = pad_range(10.0, 0.0);
        assert!(lo < 0.0 && hi > 10.0);
        let (lo, hi) = pad_range(2.0, 2.0);
        assert_relative_eq!(lo, 1.5);
        assert_relative_eq!(hi, 2.5);
    }
}
