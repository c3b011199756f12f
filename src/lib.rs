//! statchart - styled statistical charts over tabular data
//!
//! Wraps a bitmap chart backend with a small set of rendering entry points
//! (density, histogram, box plot, line plot, grouped time distributions)
//! that share one cosmetic contract: despined frames, optional dashed
//! gridlines, dashed reference markers, verbatim labels. Input is a
//! caller-supplied `polars` DataFrame; output is a `ChartArtifact` that can
//! be saved as PNG or handed to the system image viewer.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod stats;
pub mod telemetry;

pub use charts::{
    AxisLabels, BoxplotChart, ChartArtifact, ChartRenderer, DensityChart, FigureSpec,
    HistogramChart, LegendSpec, LinePlotChart, RefLine, SeriesKind, SeriesSpec, Theme,
    TimeDistributionChart, LIGHT_GREY, PALETTE,
};
pub use config::ArtifactConfig;
pub use data::{DataProcessor, Dataset};
pub use error::{ChartError, ChartResult};
