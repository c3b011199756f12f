// tests/export_and_despine_tests.rs
//
// File-system contract of density export and a pixel-level check that no
// chart frame is drawn around the plot area.

use polars::prelude::*;
use statchart::{
    ArtifactConfig, ChartError, ChartRenderer, DensityChart, HistogramChart, Theme,
};

fn value_frame() -> DataFrame {
    df!("value" => (1..=40).map(|v| (v % 13) as f64).collect::<Vec<_>>()).unwrap()
}

#[test]
fn density_export_writes_png_under_the_images_dir() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let renderer = ChartRenderer::new(Theme::default(), ArtifactConfig::new(root.path()));

    let mut request = DensityChart::new("value");
    request.export_fig = true;
    request.filename = Some("lead_time".into());

    renderer.render_density(&value_frame(), &request)?;

    let expected = root.path().join("images").join("lead_time.png");
    assert!(expected.is_file());

    let decoded = image::open(&expected)?;
    assert!(decoded.width() > 0 && decoded.height() > 0);
    Ok(())
}

#[test]
fn export_without_filename_fails_and_writes_nothing() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let renderer = ChartRenderer::new(Theme::default(), ArtifactConfig::new(root.path()));

    let mut request = DensityChart::new("value");
    request.export_fig = true;

    let err = renderer
        .render_density(&value_frame(), &request)
        .unwrap_err();
    assert!(matches!(err, ChartError::InvalidRequest(_)));
    assert!(!root.path().join("images").exists());
    Ok(())
}

#[test]
fn missing_column_export_writes_nothing() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let renderer = ChartRenderer::new(Theme::default(), ArtifactConfig::new(root.path()));

    let mut request = DensityChart::new("absent");
    request.export_fig = true;
    request.filename = Some("never".into());

    let err = renderer
        .render_density(&value_frame(), &request)
        .unwrap_err();
    assert!(matches!(err, ChartError::MissingColumn(_)));
    assert!(!root.path().join("images").join("never.png").exists());
    Ok(())
}

/// A spine would show up as a near-solid dark row or column spanning the
/// plot area. Dashed reference markers and text never reach that density.
fn has_frame_line(image: &image::RgbImage) -> bool {
    let (width, height) = image.dimensions();
    let is_dark = |p: &image::Rgb<u8>| p.0[0] < 100 && p.0[1] < 100 && p.0[2] < 100;

    for x in 0..width {
        let dark = (0..height)
            .filter(|&y| is_dark(image.get_pixel(x, y)))
            .count();
        if dark as f64 / height as f64 > 0.6 {
            return true;
        }
    }
    for y in 0..height {
        let dark = (0..width)
            .filter(|&x| is_dark(image.get_pixel(x, y)))
            .count();
        if dark as f64 / width as f64 > 0.6 {
            return true;
        }
    }
    false
}

#[test]
fn rendered_charts_carry_no_frame_border() -> anyhow::Result<()> {
    let df = value_frame();
    let renderer = ChartRenderer::default();

    let histogram = renderer.render_histogram(&df, &HistogramChart::new("value"))?;
    assert!(!has_frame_line(histogram.image()));

    let density = renderer.render_density(&df, &DensityChart::new("value"))?;
    assert!(!has_frame_line(density.image()));
    Ok(())
}
