//! Figure model.
//! The renderer assembles a `FigureSpec`; the drawing framework rasterizes
//! it. Everything a test needs to assert about a chart (series, reference
//! lines, ticks, legend state) is visible here without pixel inspection.

use crate::stats::{BoxStats, HistBin};
use plotters::style::RGBColor;

/// A dashed vertical reference line (percentile marker, budget line).
#[derive(Debug, Clone, PartialEq)]
pub struct RefLine {
    pub x: f64,
    pub label: String,
}

/// Legend entries are always computed; `visible` controls drawing only.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendSpec {
    pub entries: Vec<String>,
    pub visible: bool,
}

impl LegendSpec {
    pub fn hidden() -> Self {
        Self {
            entries: Vec::new(),
            visible: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesKind {
    /// Filled curve down to the baseline (density plots).
    Area { points: Vec<(f64, f64)> },
    /// Plain polyline (line plots, unfilled densities).
    Line { points: Vec<(f64, f64)> },
    /// Frequency bars (histograms).
    Bars { bins: Vec<HistBin> },
    /// One box glyph centered at `center` with the given width.
    Box {
        stats: BoxStats,
        center: f64,
        width: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub label: String,
    pub color: RGBColor,
    pub kind: SeriesKind,
}

/// Complete description of one figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// Explicit tick positions; `None` lets the backend pick.
    pub x_ticks: Option<Vec<f64>>,
    pub show_x_tick_labels: bool,
    pub show_y_tick_labels: bool,
    /// Gridline opacity; `None` disables the grid.
    pub grid_alpha: Option<f64>,
    pub series: Vec<SeriesSpec>,
    pub ref_lines: Vec<RefLine>,
    pub legend: LegendSpec,
}

impl FigureSpec {
    pub fn series_count(&self) -> usize {
        self.series.len()
    }
}
