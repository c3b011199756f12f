//! Charts module - requests, figure model, rendering

mod artifact;
mod figure;
mod framework;
mod renderer;
mod request;
mod style;

pub use artifact::ChartArtifact;
pub use figure::{FigureSpec, LegendSpec, RefLine, SeriesKind, SeriesSpec};
pub use renderer::ChartRenderer;
pub use request::{
    AxisLabels, BoxplotChart, DensityChart, HistogramChart, LinePlotChart, TimeDistributionChart,
};
pub use style::{Theme, LIGHT_GREY, PALETTE};
