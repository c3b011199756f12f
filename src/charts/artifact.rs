//! Chart artifacts.
//! A rendered figure: pixels plus the figure description it was drawn
//! from. Persisting and showing are separate, explicit operations.

use crate::charts::figure::FigureSpec;
use crate::error::{ChartError, ChartResult};
use image::{ImageFormat, RgbImage};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static SHOW_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
pub struct ChartArtifact {
    image: RgbImage,
    figure: FigureSpec,
}

impl ChartArtifact {
    pub(crate) fn new(image: RgbImage, figure: FigureSpec) -> Self {
        Self { image, figure }
    }

    /// The figure description this artifact was rasterized from.
    pub fn figure(&self) -> &FigureSpec {
        &self.figure
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Write the pixels as PNG, creating parent directories as needed.
    pub fn save_png(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        save_image(&self.image, path.as_ref())
    }

    /// Write a temporary PNG and hand it to the system image viewer.
    pub fn show(&self) -> ChartResult<()> {
        let path = std::env::temp_dir().join(format!(
            "statchart-{}-{}.png",
            std::process::id(),
            SHOW_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        save_image(&self.image, &path)?;
        open::that(&path)?;
        Ok(())
    }
}

pub(crate) fn save_image(image: &RgbImage, path: &Path) -> ChartResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| ChartError::Render(format!("png encode: {e}")))
}

/// Crop uniform background margins down to the drawn content plus a small
/// pad, the way a tight bounding box behaves on export.
pub(crate) fn trim_margins(image: &RgbImage, pad: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    let background = image::Rgb([255u8, 255, 255]);

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    for (x, y, pixel) in image.enumerate_pixels() {
        if *pixel != background {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    if min_x > max_x || min_y > max_y {
        return image.clone();
    }

    let x0 = min_x.saturating_sub(pad);
    let y0 = min_y.saturating_sub(pad);
    let x1 = (max_x + pad + 1).min(width);
    let y1 = (max_y + pad + 1).min(height);
    image::imageops::crop_imm(image, x0, y0, x1 - x0, y1 - y0).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_crops_to_content() {
        let mut img = RgbImage::from_pixel(100, 80, image::Rgb([255, 255, 255]));
        img.put_pixel(40, 30, image::Rgb([0, 0, 0]));
        img.put_pixel(60, 50, image::Rgb([0, 0, 0]));
        let trimmed = trim_margins(&img, 5);
        assert_eq!(trimmed.dimensions(), (31, 31));
    }

    #[test]
    fn trim_of_blank_surface_is_identity() {
        let img = RgbImage::from_pixel(10, 10, image::Rgb([255, 255, 255]));
        assert_eq!(trim_margins(&img, 5).dimensions(), (10, 10));
    }
}
