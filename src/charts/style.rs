//! Chart styling: theme values and the categorical palette.

use plotters::style::RGBColor;

/// Default fill for single-series charts.
pub const LIGHT_GREY: RGBColor = RGBColor(211, 211, 211);

/// Grid line grey.
pub const GRID_GREY: RGBColor = RGBColor(176, 176, 176);

/// Categorical palette for grouped series.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),  // Red
    RGBColor(46, 204, 113), // Green
    RGBColor(155, 89, 182), // Purple
    RGBColor(243, 156, 18), // Orange
    RGBColor(26, 188, 156), // Teal
    RGBColor(233, 30, 99),  // Pink
    RGBColor(0, 188, 212),  // Cyan
    RGBColor(255, 87, 34),  // Deep Orange
    RGBColor(121, 85, 72),  // Brown
    RGBColor(96, 125, 139), // Blue Grey
];

// Base font sizes in pixels at 100 DPI, before the theme's font scale.
pub(crate) const FONT_SIZE_TITLE: f64 = 16.0;
pub(crate) const FONT_SIZE_AXIS_LABEL: f64 = 12.0;
pub(crate) const FONT_SIZE_TICK_LABEL: f64 = 10.0;
pub(crate) const FONT_SIZE_LEGEND: f64 = 11.0;

/// Explicit style values threaded through every render call.
/// No ambient global state: two renderers with different themes never
/// interfere.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Figure size in inches (width, height).
    pub figure_size_in: (f64, f64),
    /// Pixel density for interactively-sized artifacts.
    pub screen_dpi: u32,
    /// Pixel density for exported artifacts.
    pub export_dpi: u32,
    /// Multiplier applied to all font sizes.
    pub font_scale: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            figure_size_in: (10.0, 5.0),
            screen_dpi: 100,
            export_dpi: 300,
            font_scale: 1.5,
        }
    }
}

impl Theme {
    /// Pixel dimensions of the drawing surface at the given density.
    pub fn surface_size(&self, dpi: u32) -> (u32, u32) {
        (
            (self.figure_size_in.0 * dpi as f64).round() as u32,
            (self.figure_size_in.1 * dpi as f64).round() as u32,
        )
    }
}
