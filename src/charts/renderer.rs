//! Chart Renderer
//! Translates chart requests into artifacts: validate, extract columns,
//! compute the statistics the chart needs, assemble a figure, rasterize.
//! Every operation is synchronous and stateless; a failed call produces
//! no artifact and no file.

use crate::charts::artifact::{self, ChartArtifact};
use crate::charts::figure::{FigureSpec, LegendSpec, RefLine, SeriesKind, SeriesSpec};
use crate::charts::framework;
use crate::charts::request::{
    BoxplotChart, DensityChart, HistogramChart, LinePlotChart, TimeDistributionChart,
};
use crate::charts::style::{Theme, LIGHT_GREY, PALETTE};
use crate::config::ArtifactConfig;
use crate::data::Dataset;
use crate::error::{ChartError, ChartResult};
use crate::stats;
use polars::prelude::DataFrame;
use tracing::debug;

pub struct ChartRenderer {
    theme: Theme,
    artifacts: ArtifactConfig,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(Theme::default(), ArtifactConfig::default())
    }
}

fn point_extent(series: &[SeriesSpec]) -> Option<((f64, f64), f64)> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in series {
        let points = match &s.kind {
            SeriesKind::Area { points } | SeriesKind::Line { points } => points,
            _ => continue,
        };
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_max = y_max.max(y);
        }
    }
    if x_min.is_finite() && x_max > x_min && y_max.is_finite() {
        Some(((x_min, x_max), y_max))
    } else {
        None
    }
}

impl ChartRenderer {
    pub fn new(theme: Theme, artifacts: ArtifactConfig) -> Self {
        Self { theme, artifacts }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn artifacts(&self) -> &ArtifactConfig {
        &self.artifacts
    }

    /// Filled kernel density plot, optionally split by a grouping column,
    /// optionally exported at 300 DPI under the artifacts root.
    pub fn render_density(
        &self,
        df: &DataFrame,
        request: &DensityChart,
    ) -> ChartResult<ChartArtifact> {
        if request.export_fig && request.filename.is_none() {
            return Err(ChartError::InvalidRequest(
                "export requested without a filename".into(),
            ));
        }

        let ds = Dataset::new(df);
        let colors = if request.colors.is_empty() {
            vec![LIGHT_GREY]
        } else {
            request.colors.clone()
        };

        let (series, legend) = match &request.group_column {
            Some(group_column) => {
                let distinct = ds.unique_values(group_column)?;
                if distinct.is_empty() {
                    return Err(ChartError::Computation(format!(
                        "grouping column '{group_column}' has no values"
                    )));
                }
                if distinct.len() > colors.len() {
                    return Err(ChartError::InvalidRequest(format!(
                        "{} groups in '{group_column}' but only {} colors supplied",
                        distinct.len(),
                        colors.len()
                    )));
                }
                let order = match &request.group_order {
                    Some(order) => {
                        let mut sorted = order.clone();
                        sorted.sort();
                        if sorted != distinct {
                            return Err(ChartError::InvalidRequest(format!(
                                "group_order is not a permutation of the values in '{group_column}'"
                            )));
                        }
                        order.clone()
                    }
                    None => distinct,
                };

                let groups: Vec<(String, Vec<f64>)> = order
                    .iter()
                    .map(|g| {
                        Ok((
                            g.clone(),
                            ds.values_for_group(&request.value_column, group_column, g)?,
                        ))
                    })
                    .collect::<ChartResult<_>>()?;
                let curves = stats::kde_curves_by_group(&groups)?;

                let series: Vec<SeriesSpec> = curves
                    .into_iter()
                    .enumerate()
                    .map(|(i, (name, points))| SeriesSpec {
                        label: name,
                        color: colors[i],
                        kind: SeriesKind::Area { points },
                    })
                    .collect();
                let entries = series.iter().map(|s| s.label.clone()).collect();
                (
                    series,
                    LegendSpec {
                        entries,
                        visible: true,
                    },
                )
            }
            None => {
                let values = ds.numeric_values(&request.value_column)?;
                let points = stats::kde_curve(&values)?;
                (
                    vec![SeriesSpec {
                        label: String::new(),
                        color: colors[0],
                        kind: SeriesKind::Area { points },
                    }],
                    LegendSpec::hidden(),
                )
            }
        };

        let ((auto_min, auto_max), y_max) = point_extent(&series).ok_or_else(|| {
            ChartError::Computation("density produced no drawable points".into())
        })?;
        let x_range = request.x_limit.unwrap_or((auto_min, auto_max));

        let figure = FigureSpec {
            title: request.labels.title.clone(),
            x_label: request.labels.x.clone(),
            y_label: request.labels.y.clone(),
            x_range,
            y_range: (0.0, y_max * 1.05),
            x_ticks: None,
            show_x_tick_labels: true,
            show_y_tick_labels: false,
            grid_alpha: Some(1.0),
            series,
            ref_lines: Vec::new(),
            legend,
        };

        debug!(
            value_column = %request.value_column,
            series = figure.series_count(),
            "rendering density chart"
        );
        let image = framework::render_figure(&figure, &self.theme, self.theme.screen_dpi)?;

        if request.export_fig {
            // Presence checked on entry.
            if let Some(filename) = request.filename.as_deref() {
                let export = framework::render_figure(&figure, &self.theme, self.theme.export_dpi)?;
                let trimmed = artifact::trim_margins(&export, self.theme.export_dpi / 20);
                let path = self.artifacts.image_path(filename);
                artifact::save_image(&trimmed, &path)?;
                debug!(path = %path.display(), "exported density chart");
            }
        }

        Ok(ChartArtifact::new(image, figure))
    }

    /// Frequency histogram with optional 25th/50th/75th percentile markers.
    pub fn render_histogram(
        &self,
        df: &DataFrame,
        request: &HistogramChart,
    ) -> ChartResult<ChartArtifact> {
        let values = Dataset::new(df).numeric_values(&request.value_column)?;
        let bins = stats::histogram_bins(&values, request.bins)?;

        let mut ref_lines = Vec::new();
        if request.show_percentiles {
            let (q1, q2, q3) = stats::quartiles(&values)?;
            ref_lines.push(RefLine {
                x: q1,
                label: "25th Percentile".into(),
            });
            ref_lines.push(RefLine {
                x: q2,
                label: "50th Percentile".into(),
            });
            ref_lines.push(RefLine {
                x: q3,
                label: "75th Percentile".into(),
            });
        }

        let x_range = (bins[0].start, bins[bins.len() - 1].end);
        let y_max = bins.iter().map(|b| b.count).max().unwrap_or(1) as f64;
        let legend = LegendSpec {
            entries: ref_lines.iter().map(|l| l.label.clone()).collect(),
            visible: false,
        };

        let figure = FigureSpec {
            title: request.labels.title.clone(),
            x_label: request.labels.x.clone(),
            y_label: request.labels.y.clone(),
            x_range,
            y_range: (0.0, y_max * 1.05),
            x_ticks: None,
            show_x_tick_labels: true,
            show_y_tick_labels: true,
            grid_alpha: None,
            series: vec![SeriesSpec {
                label: String::new(),
                color: LIGHT_GREY,
                kind: SeriesKind::Bars { bins },
            }],
            ref_lines,
            legend,
        };

        debug!(
            value_column = %request.value_column,
            percentiles = request.show_percentiles,
            "rendering histogram"
        );
        let image = framework::render_figure(&figure, &self.theme, self.theme.screen_dpi)?;
        Ok(ChartArtifact::new(image, figure))
    }

    /// Single-category box plot with reduced-size outlier markers.
    pub fn render_boxplot(
        &self,
        df: &DataFrame,
        request: &BoxplotChart,
    ) -> ChartResult<ChartArtifact> {
        let values = Dataset::new(df).numeric_values(&request.value_column)?;
        let box_stats = stats::box_stats(&values)?;

        let mut lo = box_stats.whisker_low;
        let mut hi = box_stats.whisker_high;
        for &v in &box_stats.outliers {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        let y_range = stats::pad_range(lo, hi);

        let figure = FigureSpec {
            title: request.labels.title.clone(),
            x_label: request.labels.x.clone(),
            y_label: request.labels.y.clone(),
            x_range: (0.0, 1.0),
            y_range,
            x_ticks: None,
            show_x_tick_labels: false,
            show_y_tick_labels: true,
            grid_alpha: None,
            series: vec![SeriesSpec {
                label: String::new(),
                color: LIGHT_GREY,
                kind: SeriesKind::Box {
                    stats: box_stats,
                    center: 0.5,
                    width: 0.4,
                },
            }],
            ref_lines: Vec::new(),
            legend: LegendSpec::hidden(),
        };

        debug!(value_column = %request.value_column, "rendering box plot");
        let image = framework::render_figure(&figure, &self.theme, self.theme.screen_dpi)?;
        Ok(ChartArtifact::new(image, figure))
    }

    /// Grouped duration densities on a fixed hours axis, with an optional
    /// dashed budget marker. Legend entries are computed even when hidden.
    pub fn render_time_distribution(
        &self,
        df: &DataFrame,
        request: &TimeDistributionChart,
    ) -> ChartResult<ChartArtifact> {
        if request.tick_step <= 0.0 {
            return Err(ChartError::InvalidRequest(
                "tick_step must be positive".into(),
            ));
        }
        let (x_start, x_end) = request.x_range;
        if x_end <= x_start {
            return Err(ChartError::InvalidRequest(format!(
                "empty x_range ({x_start}, {x_end})"
            )));
        }

        let ds = Dataset::new(df);
        let distinct = ds.unique_values(&request.group_column)?;
        if distinct.is_empty() {
            return Err(ChartError::Computation(format!(
                "grouping column '{}' has no values",
                request.group_column
            )));
        }

        let groups: Vec<(String, Vec<f64>)> = distinct
            .iter()
            .map(|g| {
                Ok((
                    g.clone(),
                    ds.values_for_group(&request.value_column, &request.group_column, g)?,
                ))
            })
            .collect::<ChartResult<_>>()?;
        let curves = stats::kde_curves_by_group(&groups)?;

        let palette = request
            .palette
            .clone()
            .unwrap_or_else(|| PALETTE.to_vec());
        let series: Vec<SeriesSpec> = curves
            .into_iter()
            .enumerate()
            .map(|(i, (name, points))| SeriesSpec {
                label: name,
                color: palette[i % palette.len()],
                kind: SeriesKind::Line { points },
            })
            .collect();

        let (_, y_max) = point_extent(&series).ok_or_else(|| {
            ChartError::Computation("density produced no drawable points".into())
        })?;

        let mut ticks = Vec::new();
        let mut t = x_start;
        while t < x_end - 1e-9 {
            ticks.push(t);
            t += request.tick_step;
        }

        let ref_lines = request
            .budget_line
            .map(|x| {
                vec![RefLine {
                    x,
                    label: "Budget".into(),
                }]
            })
            .unwrap_or_default();

        let legend = LegendSpec {
            entries: series.iter().map(|s| s.label.clone()).collect(),
            visible: request.legend_visible,
        };

        let figure = FigureSpec {
            title: request.title.clone(),
            x_label: "Hours".into(),
            y_label: String::new(),
            x_range: request.x_range,
            y_range: (0.0, y_max * 1.05),
            x_ticks: Some(ticks),
            show_x_tick_labels: true,
            show_y_tick_labels: false,
            grid_alpha: Some(0.5),
            series,
            ref_lines,
            legend,
        };

        debug!(
            groups = figure.series_count(),
            budget = ?request.budget_line,
            "rendering time distribution"
        );
        let image = framework::render_figure(&figure, &self.theme, self.theme.screen_dpi)?;
        Ok(ChartArtifact::new(image, figure))
    }

    /// Line series of y over x, one per distinct group value.
    pub fn render_line_plot(
        &self,
        df: &DataFrame,
        request: &LinePlotChart,
    ) -> ChartResult<ChartArtifact> {
        let ds = Dataset::new(df);

        let mut series = Vec::new();
        match &request.group_column {
            Some(group_column) => {
                let distinct = ds.unique_values(group_column)?;
                for (i, group) in distinct.iter().enumerate() {
                    let mut points = ds.xy_values(
                        &request.x_column,
                        &request.y_column,
                        Some((group_column.as_str(), group.as_str())),
                    )?;
                    points.sort_by(|a, b| {
                        a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal)
                    });
                    series.push(SeriesSpec {
                        label: group.clone(),
                        color: PALETTE[i % PALETTE.len()],
                        kind: SeriesKind::Line { points },
                    });
                }
            }
            None => {
                let mut points = ds.xy_values(&request.x_column, &request.y_column, None)?;
                points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
                series.push(SeriesSpec {
                    label: String::new(),
                    color: PALETTE[0],
                    kind: SeriesKind::Line { points },
                });
            }
        }

        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for s in &series {
            if let SeriesKind::Line { points } = &s.kind {
                for &(x, y) in points {
                    x_min = x_min.min(x);
                    x_max = x_max.max(x);
                    y_min = y_min.min(y);
                    y_max = y_max.max(y);
                }
            }
        }
        if !x_min.is_finite() || !y_min.is_finite() {
            return Err(ChartError::Computation(
                "line plot has no drawable points".into(),
            ));
        }

        let grouped = request.group_column.is_some();
        let legend = LegendSpec {
            entries: series.iter().map(|s| s.label.clone()).collect(),
            visible: grouped,
        };

        let figure = FigureSpec {
            title: request.labels.title.clone(),
            x_label: request.labels.x.clone(),
            y_label: request.labels.y.clone(),
            x_range: stats::pad_range(x_min, x_max),
            y_range: stats::pad_range(y_min, y_max),
            x_ticks: None,
            show_x_tick_labels: true,
            show_y_tick_labels: true,
            grid_alpha: None,
            series,
            ref_lines: Vec::new(),
            legend,
        };

        debug!(
            x_column = %request.x_column,
            y_column = %request.y_column,
            series = figure.series_count(),
            "rendering line plot"
        );
        let image = framework::render_figure(&figure, &self.theme, self.theme.screen_dpi)?;
        Ok(ChartArtifact::new(image, figure))
    }
}
