//! Kernel Density Estimation
//! Gaussian kernel, Silverman's rule-of-thumb bandwidth.

use crate::error::{ChartError, ChartResult};
use rayon::prelude::*;
use statrs::distribution::{Continuous, Normal};

const GRID_POINTS: usize = 200;

/// Silverman's rule of thumb: 1.06 * sigma * n^(-1/5), floored so a
/// degenerate sample still yields a drawable curve.
pub fn silverman_bandwidth(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (1.06 * variance.sqrt() * n.powf(-0.2)).max(1e-2)
}

/// Sample the estimated density on a uniform grid spanning the data
/// support padded by 10% on each side. Returns (x, density) pairs.
pub fn kde_curve(values: &[f64]) -> ChartResult<Vec<(f64, f64)>> {
    let samples: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if samples.is_empty() {
        return Err(ChartError::Computation(
            "density estimate of an empty column".into(),
        ));
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let pad = if span > 0.0 { span * 0.1 } else { 1.0 };
    let x_min = min - pad;
    let x_max = max + pad;

    let n = samples.len() as f64;
    let bandwidth = silverman_bandwidth(&samples);
    let kernel =
        Normal::new(0.0, 1.0).map_err(|e| ChartError::Computation(format!("kernel: {e}")))?;

    let curve = (0..GRID_POINTS)
        .map(|i| {
            let x = x_min + (i as f64 / (GRID_POINTS - 1) as f64) * (x_max - x_min);
            let density = samples
                .iter()
                .map(|&xi| kernel.pdf((x - xi) / bandwidth))
                .sum::<f64>()
                / (n * bandwidth);
            (x, density)
        })
        .collect();

    Ok(curve)
}

/// Estimate one curve per group, groups evaluated in parallel.
pub fn kde_curves_by_group(
    groups: &[(String, Vec<f64>)],
) -> ChartResult<Vec<(String, Vec<(f64, f64)>)>> {
    groups
        .par_iter()
        .map(|(name, values)| Ok((name.clone(), kde_curve(values)?)))
        .collect()
}
