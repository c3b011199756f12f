// tests/renderer_contract_tests.rs
//
// Behavioral contract of the chart renderer: marker positions, series
// cardinality, tick layout, legend state, and the error taxonomy.

use approx::assert_relative_eq;
use polars::prelude::*;
use statchart::{
    BoxplotChart, ChartError, ChartRenderer, DataProcessor, DensityChart, HistogramChart,
    LinePlotChart, SeriesKind, TimeDistributionChart, LIGHT_GREY, PALETTE,
};

fn renderer() -> ChartRenderer {
    ChartRenderer::default()
}

fn value_frame() -> DataFrame {
    df!("value" => (1..=10).map(|v| v as f64).collect::<Vec<_>>()).unwrap()
}

fn grouped_frame() -> DataFrame {
    let mut values = Vec::new();
    let mut groups = Vec::new();
    for (g, offset) in [("alpha", 0.0), ("beta", 5.0), ("gamma", 10.0)] {
        for i in 0..12 {
            values.push(offset + i as f64 * 0.5);
            groups.push(g);
        }
    }
    df!("value" => values, "group" => groups).unwrap()
}

#[test]
fn histogram_percentile_markers_sit_at_interpolated_quartiles() -> anyhow::Result<()> {
    let df = value_frame();
    let mut request = HistogramChart::new("value");
    request.show_percentiles = true;

    let artifact = renderer().render_histogram(&df, &request)?;
    let lines = &artifact.figure().ref_lines;

    assert_eq!(lines.len(), 3);
    assert_relative_eq!(lines[0].x, 3.25);
    assert_relative_eq!(lines[1].x, 5.5);
    assert_relative_eq!(lines[2].x, 7.75);
    assert_eq!(lines[0].label, "25th Percentile");
    assert_eq!(lines[2].label, "75th Percentile");

    // Marker labels are recorded but a histogram never draws a legend.
    assert!(!artifact.figure().legend.visible);
    assert_eq!(artifact.figure().legend.entries.len(), 3);
    Ok(())
}

#[test]
fn histogram_without_flag_draws_no_markers() -> anyhow::Result<()> {
    let df = value_frame();
    let artifact = renderer().render_histogram(&df, &HistogramChart::new("value"))?;
    assert!(artifact.figure().ref_lines.is_empty());
    Ok(())
}

#[test]
fn histogram_bars_cover_every_sample() -> anyhow::Result<()> {
    let df = value_frame();
    let artifact = renderer().render_histogram(&df, &HistogramChart::new("value"))?;
    let total: usize = match &artifact.figure().series[0].kind {
        SeriesKind::Bars { bins } => bins.iter().map(|b| b.count).sum(),
        other => panic!("expected bars, got {other:?}"),
    };
    assert_eq!(total, 10);
    Ok(())
}

#[test]
fn missing_column_fails_every_operation() {
    let df = value_frame();
    let r = renderer();

    let err = r
        .render_density(&df, &DensityChart::new("missing"))
        .unwrap_err();
    assert!(matches!(err, ChartError::MissingColumn(name) if name == "missing"));

    let err = r
        .render_histogram(&df, &HistogramChart::new("missing"))
        .unwrap_err();
    assert!(matches!(err, ChartError::MissingColumn(_)));

    let err = r
        .render_boxplot(&df, &BoxplotChart::new("missing"))
        .unwrap_err();
    assert!(matches!(err, ChartError::MissingColumn(_)));

    // No "variable" column in this frame.
    let err = r
        .render_time_distribution(&df, &TimeDistributionChart::default())
        .unwrap_err();
    assert!(matches!(err, ChartError::MissingColumn(name) if name == "variable"));

    let err = r
        .render_line_plot(&df, &LinePlotChart::new("missing", "value"))
        .unwrap_err();
    assert!(matches!(err, ChartError::MissingColumn(_)));
}

#[test]
fn empty_column_is_a_computation_error() {
    let df = df!("value" => Vec::<f64>::new()).unwrap();
    let r = renderer();

    let err = r
        .render_histogram(&df, &HistogramChart::new("value"))
        .unwrap_err();
    assert!(matches!(err, ChartError::Computation(_)));

    let err = r
        .render_density(&df, &DensityChart::new("value"))
        .unwrap_err();
    assert!(matches!(err, ChartError::Computation(_)));

    let err = r
        .render_boxplot(&df, &BoxplotChart::new("value"))
        .unwrap_err();
    assert!(matches!(err, ChartError::Computation(_)));
}

#[test]
fn grouped_density_yields_one_series_per_group() -> anyhow::Result<()> {
    let df = grouped_frame();
    let mut request = DensityChart::new("value");
    request.group_column = Some("group".into());
    request.colors = vec![PALETTE[0], PALETTE[1], PALETTE[2]];

    let artifact = renderer().render_density(&df, &request)?;
    let figure = artifact.figure();

    assert_eq!(figure.series_count(), 3);
    assert!(figure.legend.visible);
    assert_eq!(figure.legend.entries, vec!["alpha", "beta", "gamma"]);
    assert!(figure
        .series
        .iter()
        .all(|s| matches!(s.kind, SeriesKind::Area { .. })));
    Ok(())
}

#[test]
fn density_rejects_color_list_shorter_than_group_count() {
    let df = grouped_frame();
    let mut request = DensityChart::new("value");
    request.group_column = Some("group".into());
    request.colors = vec![LIGHT_GREY, PALETTE[0]];

    let err = renderer().render_density(&df, &request).unwrap_err();
    assert!(matches!(err, ChartError::InvalidRequest(_)));
}

#[test]
fn density_group_order_must_be_a_permutation() -> anyhow::Result<()> {
    let df = grouped_frame();
    let mut request = DensityChart::new("value");
    request.group_column = Some("group".into());
    request.colors = vec![PALETTE[0], PALETTE[1], PALETTE[2]];
    request.group_order = Some(vec!["beta".into(), "alpha".into()]);

    let err = renderer().render_density(&df, &request).unwrap_err();
    assert!(matches!(err, ChartError::InvalidRequest(_)));

    request.group_order = Some(vec!["gamma".into(), "alpha".into(), "beta".into()]);
    let artifact = renderer().render_density(&df, &request)?;
    assert_eq!(
        artifact.figure().legend.entries,
        vec!["gamma", "alpha", "beta"]
    );
    Ok(())
}

#[test]
fn density_x_limit_clamps_the_axis() -> anyhow::Result<()> {
    let df = value_frame();
    let mut request = DensityChart::new("value");
    request.x_limit = Some((0.0, 20.0));

    let artifact = renderer().render_density(&df, &request)?;
    assert_eq!(artifact.figure().x_range, (0.0, 20.0));
    assert!(!artifact.figure().show_y_tick_labels);
    Ok(())
}

#[test]
fn time_distribution_budget_line_and_tick_layout() -> anyhow::Result<()> {
    let wide = df!(
        "planned" => (0..40).map(|i| 20.0 + (i % 7) as f64).collect::<Vec<_>>(),
        "actual" => (0..40).map(|i| 45.0 + (i % 11) as f64).collect::<Vec<_>>(),
    )?;
    let long = DataProcessor::stack_to_long(&wide, &["planned".into(), "actual".into()])?;

    let mut request = TimeDistributionChart::default();
    request.budget_line = Some(40.0);

    let artifact = renderer().render_time_distribution(&long, &request)?;
    let figure = artifact.figure();

    assert_eq!(figure.x_range, (0.0, 175.0));
    assert_eq!(figure.ref_lines.len(), 1);
    assert_relative_eq!(figure.ref_lines[0].x, 40.0);
    assert_eq!(figure.ref_lines[0].label, "Budget");

    let ticks = figure.x_ticks.as_ref().expect("explicit ticks");
    assert_eq!(ticks.len(), 18);
    assert_relative_eq!(ticks[0], 0.0);
    assert_relative_eq!(*ticks.last().unwrap(), 170.0);
    for tick in ticks {
        assert_relative_eq!(tick % 10.0, 0.0);
    }

    // One unfilled curve per stacked source column.
    assert_eq!(figure.series_count(), 2);
    assert_eq!(figure.legend.entries, vec!["actual", "planned"]);
    assert_eq!(figure.x_label, "Hours");
    Ok(())
}

#[test]
fn time_distribution_legend_is_computed_even_when_hidden() -> anyhow::Result<()> {
    let wide = df!(
        "planned" => (0..30).map(|i| 30.0 + (i % 5) as f64).collect::<Vec<_>>(),
        "actual" => (0..30).map(|i| 50.0 + (i % 9) as f64).collect::<Vec<_>>(),
    )?;
    let long = DataProcessor::stack_to_long(&wide, &["planned".into(), "actual".into()])?;

    let mut request = TimeDistributionChart::default();
    request.legend_visible = false;

    let artifact = renderer().render_time_distribution(&long, &request)?;
    assert!(!artifact.figure().legend.visible);
    assert_eq!(artifact.figure().legend.entries.len(), 2);
    Ok(())
}

#[test]
fn line_plot_yields_one_series_per_group() -> anyhow::Result<()> {
    let df = df!(
        "week" => [1.0f64, 2.0, 3.0, 1.0, 2.0, 3.0],
        "throughput" => [4.0f64, 5.0, 6.0, 7.0, 8.0, 9.0],
        "team" => ["core", "core", "core", "infra", "infra", "infra"],
    )?;

    let mut request = LinePlotChart::new("week", "throughput");
    request.group_column = Some("team".into());

    let artifact = renderer().render_line_plot(&df, &request)?;
    let figure = artifact.figure();
    assert_eq!(figure.series_count(), 2);
    assert!(figure.legend.visible);
    assert_eq!(figure.legend.entries, vec!["core", "infra"]);

    // Points arrive sorted by x within each series.
    for series in &figure.series {
        if let SeriesKind::Line { points } = &series.kind {
            assert!(points.windows(2).all(|w| w[0].0 <= w[1].0));
        }
    }
    Ok(())
}

#[test]
fn ungrouped_line_plot_is_a_single_series() -> anyhow::Result<()> {
    let df = df!(
        "week" => [3.0f64, 1.0, 2.0],
        "throughput" => [6.0f64, 4.0, 5.0],
    )?;
    let artifact = renderer().render_line_plot(&df, &LinePlotChart::new("week", "throughput"))?;
    assert_eq!(artifact.figure().series_count(), 1);
    assert!(!artifact.figure().legend.visible);
    Ok(())
}

#[test]
fn boxplot_carries_whiskers_and_reduced_outliers() -> anyhow::Result<()> {
    let mut values: Vec<f64> = (1..=20).map(|v| v as f64).collect();
    values.push(100.0);
    let df = df!("value" => values)?;

    let artifact = renderer().render_boxplot(&df, &BoxplotChart::new("value"))?;
    let figure = artifact.figure();
    assert_eq!(figure.series_count(), 1);
    assert!(!figure.show_x_tick_labels);

    match &figure.series[0].kind {
        SeriesKind::Box { stats, .. } => {
            assert_eq!(stats.outliers, vec![100.0]);
            assert!(stats.whisker_high <= 20.0);
        }
        other => panic!("expected box, got {other:?}"),
    }
    // The outlier stays inside the drawn range.
    assert!(figure.y_range.1 >= 100.0);
    Ok(())
}

#[test]
fn labels_apply_verbatim_and_empty_labels_are_silent() -> anyhow::Result<()> {
    let df = value_frame();
    let mut request = HistogramChart::new("value");
    request.labels.x = "Lead Time".into();
    request.labels.title = "Cycle".into();

    let artifact = renderer().render_histogram(&df, &request)?;
    assert_eq!(artifact.figure().x_label, "Lead Time");
    assert_eq!(artifact.figure().title, "Cycle");
    assert_eq!(artifact.figure().y_label, "");
    Ok(())
}
