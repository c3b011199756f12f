//! Drawing framework.
//! Rasterizes a `FigureSpec` onto a plotters bitmap surface. The frame is
//! never given spines: the axis style is fully transparent, so despining
//! holds for every chart kind by construction.

use crate::charts::figure::{FigureSpec, SeriesKind};
use crate::charts::style::{
    Theme, FONT_SIZE_AXIS_LABEL, FONT_SIZE_LEGEND, FONT_SIZE_TICK_LABEL, FONT_SIZE_TITLE,
    GRID_GREY,
};
use crate::error::{ChartError, ChartResult};
use image::RgbImage;
use plotters::prelude::*;

const REF_LINE_DASHES: usize = 24;

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

fn format_tick(v: f64) -> String {
    if v.fract().abs() < 1e-9 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

/// Draw `figure` at the given pixel density and hand back the pixels.
pub fn render_figure(figure: &FigureSpec, theme: &Theme, dpi: u32) -> ChartResult<RgbImage> {
    let (width, height) = theme.surface_size(dpi);
    if width == 0 || height == 0 {
        return Err(ChartError::Render("zero-sized drawing surface".into()));
    }
    let (x0, x1) = figure.x_range;
    let (y0, y1) = figure.y_range;
    if !(x1 > x0) || !(y1 > y0) {
        return Err(ChartError::Render(format!(
            "degenerate axis range x=({x0}, {x1}) y=({y0}, {y1})"
        )));
    }

    let px_scale = dpi as f64 / 100.0;
    let font_px = |base: f64| (base * theme.font_scale * px_scale).round() as i32;

    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let y_label_area = if figure.show_y_tick_labels {
            50.0 * px_scale
        } else if figure.y_label.is_empty() {
            20.0 * px_scale
        } else {
            35.0 * px_scale
        };

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin((12.0 * px_scale) as i32)
            .x_label_area_size((45.0 * px_scale) as i32)
            .y_label_area_size(y_label_area as i32);
        if !figure.title.is_empty() {
            builder.caption(
                &figure.title,
                ("sans-serif", font_px(FONT_SIZE_TITLE)).into_font(),
            );
        }
        let mut chart = builder
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(render_err)?;

        let grid_style = GRID_GREY.mix(figure.grid_alpha.unwrap_or(0.0) * 0.6);
        let x_tick_count = figure
            .x_ticks
            .as_ref()
            .map(|t| t.len())
            .unwrap_or(10)
            .max(1);

        {
            let tick_font = ("sans-serif", font_px(FONT_SIZE_TICK_LABEL));
            let desc_font = ("sans-serif", font_px(FONT_SIZE_AXIS_LABEL));
            let blank = |_: &f64| String::new();
            let ticked = |v: &f64| format_tick(*v);

            let mut mesh = chart.configure_mesh();
            mesh.axis_style(TRANSPARENT)
                .light_line_style(GRID_GREY.mix(0.0))
                .bold_line_style(grid_style)
                .label_style(tick_font)
                .axis_desc_style(desc_font)
                .x_desc(&figure.x_label)
                .y_desc(&figure.y_label)
                .x_labels(x_tick_count);

            if figure.show_x_tick_labels {
                mesh.x_label_formatter(&ticked);
            } else {
                mesh.x_label_formatter(&blank);
            }
            if figure.show_y_tick_labels {
                mesh.y_labels(10);
                mesh.y_label_formatter(&ticked);
            } else {
                mesh.y_labels(0);
                mesh.y_label_formatter(&blank);
            }

            mesh.draw().map_err(render_err)?;
        }

        let mut labeled_series = 0usize;
        for series in &figure.series {
            let color = series.color;
            match &series.kind {
                SeriesKind::Area { points } => {
                    let drawn = chart
                        .draw_series(
                            AreaSeries::new(points.iter().copied(), 0.0, color.mix(0.35))
                                .border_style(color.stroke_width(2)),
                        )
                        .map_err(render_err)?;
                    if !series.label.is_empty() {
                        drawn.label(&series.label).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                        labeled_series += 1;
                    }
                }
                SeriesKind::Line { points } => {
                    let drawn = chart
                        .draw_series(LineSeries::new(
                            points.iter().copied(),
                            color.stroke_width(2),
                        ))
                        .map_err(render_err)?;
                    if !series.label.is_empty() {
                        drawn.label(&series.label).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                        labeled_series += 1;
                    }
                }
                SeriesKind::Bars { bins } => {
                    let drawn = chart
                        .draw_series(bins.iter().filter(|b| b.count > 0).map(|b| {
                            Rectangle::new(
                                [(b.start, 0.0), (b.end, b.count as f64)],
                                color.filled(),
                            )
                        }))
                        .map_err(render_err)?;
                    if !series.label.is_empty() {
                        drawn.label(&series.label).legend(move |(x, y)| {
                            Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                        });
                        labeled_series += 1;
                    }
                }
                SeriesKind::Box {
                    stats,
                    center,
                    width: box_width,
                } => {
                    let half = box_width / 2.0;
                    let cap = box_width / 3.0;
                    chart
                        .draw_series(std::iter::once(Rectangle::new(
                            [(center - half, stats.q1), (center + half, stats.q3)],
                            color.mix(0.9).filled(),
                        )))
                        .map_err(render_err)?;
                    chart
                        .draw_series(std::iter::once(Rectangle::new(
                            [(center - half, stats.q1), (center + half, stats.q3)],
                            BLACK.stroke_width(1),
                        )))
                        .map_err(render_err)?;
                    // Median, whiskers, caps.
                    let segments = [
                        vec![(center - half, stats.median), (center + half, stats.median)],
                        vec![(*center, stats.whisker_low), (*center, stats.q1)],
                        vec![(*center, stats.q3), (*center, stats.whisker_high)],
                        vec![
                            (center - cap, stats.whisker_low),
                            (center + cap, stats.whisker_low),
                        ],
                        vec![
                            (center - cap, stats.whisker_high),
                            (center + cap, stats.whisker_high),
                        ],
                    ];
                    for segment in segments {
                        chart
                            .draw_series(std::iter::once(PathElement::new(
                                segment,
                                BLACK.stroke_width(1),
                            )))
                            .map_err(render_err)?;
                    }
                    // Outliers at reduced marker size.
                    let radius = ((1.5 * px_scale).round() as i32).max(1);
                    chart
                        .draw_series(
                            stats
                                .outliers
                                .iter()
                                .map(|&v| Circle::new((*center, v), radius, BLACK.filled())),
                        )
                        .map_err(render_err)?;
                }
            }
        }

        // Dashed vertical reference lines, drawn as segment runs.
        for line in &figure.ref_lines {
            if !line.x.is_finite() {
                continue;
            }
            let x = line.x.clamp(x0, x1);
            let dash = (y1 - y0) / (REF_LINE_DASHES as f64 * 2.0);
            for i in 0..REF_LINE_DASHES {
                let start = y0 + (i as f64 * 2.0) * dash;
                let end = (start + dash).min(y1);
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        vec![(x, start), (x, end)],
                        BLACK.stroke_width(2),
                    )))
                    .map_err(render_err)?;
            }
        }

        if figure.legend.visible && labeled_series > 0 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", font_px(FONT_SIZE_LEGEND)))
                .draw()
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
    }

    RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ChartError::Render("pixel buffer size mismatch".into()))
}
