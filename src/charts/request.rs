//! Chart requests.
//! One plain value struct per chart kind. A request never mutates the
//! dataset it is rendered against; implicit column-name conventions and
//! axis conventions are explicit, defaulted fields here.

use crate::charts::style::LIGHT_GREY;
use plotters::style::RGBColor;

/// Axis labels and title, applied verbatim; empty strings render as no text.
#[derive(Debug, Clone, Default)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
    pub title: String,
}

impl AxisLabels {
    pub fn new(
        x: impl Into<String>,
        y: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            title: title.into(),
        }
    }
}

/// Filled kernel density plot, optionally split by a grouping column.
#[derive(Debug, Clone)]
pub struct DensityChart {
    pub value_column: String,
    pub group_column: Option<String>,
    pub labels: AxisLabels,
    /// One color per group; single-series charts use the first entry.
    pub colors: Vec<RGBColor>,
    /// Drawing order for the groups; must be a permutation of the
    /// distinct values when given.
    pub group_order: Option<Vec<String>>,
    pub x_limit: Option<(f64, f64)>,
    pub export_fig: bool,
    pub filename: Option<String>,
}

impl DensityChart {
    pub fn new(value_column: impl Into<String>) -> Self {
        Self {
            value_column: value_column.into(),
            group_column: None,
            labels: AxisLabels::default(),
            colors: vec![LIGHT_GREY],
            group_order: None,
            x_limit: None,
            export_fig: false,
            filename: None,
        }
    }
}

/// Frequency histogram with optional quartile markers.
#[derive(Debug, Clone)]
pub struct HistogramChart {
    pub value_column: String,
    pub labels: AxisLabels,
    pub show_percentiles: bool,
    /// Bin count override; `None` selects automatically.
    pub bins: Option<usize>,
}

impl HistogramChart {
    pub fn new(value_column: impl Into<String>) -> Self {
        Self {
            value_column: value_column.into(),
            labels: AxisLabels::default(),
            show_percentiles: false,
            bins: None,
        }
    }
}

/// Single-category box plot.
#[derive(Debug, Clone)]
pub struct BoxplotChart {
    pub value_column: String,
    pub labels: AxisLabels,
}

impl BoxplotChart {
    pub fn new(value_column: impl Into<String>) -> Self {
        Self {
            value_column: value_column.into(),
            labels: AxisLabels::default(),
        }
    }
}

/// Grouped duration densities on a fixed hours axis.
///
/// Field defaults carry the long-format conventions: a `"value"` column
/// grouped by `"variable"`, axis spanning [0, 175) with a tick every 10.
#[derive(Debug, Clone)]
pub struct TimeDistributionChart {
    pub value_column: String,
    pub group_column: String,
    pub x_range: (f64, f64),
    pub tick_step: f64,
    pub budget_line: Option<f64>,
    pub legend_visible: bool,
    pub palette: Option<Vec<RGBColor>>,
    pub title: String,
}

impl Default for TimeDistributionChart {
    fn default() -> Self {
        Self {
            value_column: "value".into(),
            group_column: "variable".into(),
            x_range: (0.0, 175.0),
            tick_step: 10.0,
            budget_line: None,
            legend_visible: true,
            palette: None,
            title: String::new(),
        }
    }
}

/// Line series of y over x, one line per distinct group value.
#[derive(Debug, Clone)]
pub struct LinePlotChart {
    pub x_column: String,
    pub y_column: String,
    pub group_column: Option<String>,
    pub labels: AxisLabels,
}

impl LinePlotChart {
    pub fn new(x_column: impl Into<String>, y_column: impl Into<String>) -> Self {
        Self {
            x_column: x_column.into(),
            y_column: y_column.into(),
            group_column: None,
            labels: AxisLabels::default(),
        }
    }
}
