//! Statistics module - percentiles, box summaries, binning, density estimation

mod calculator;
mod density;

pub use calculator::{box_stats, histogram_bins, pad_range, percentile, quartiles, BoxStats, HistBin};
pub use density::{kde_curve, kde_curves_by_group, silverman_bandwidth};
