//! Canvas-wide settings: dimensions, colours, corner rounding and grid.

use serde::{Deserialize, Serialize};

use crate::{CanvasError, CanvasResult};

/// Smallest width or height accepted for the canvas.
pub const MIN_CANVAS_DIMENSION: f64 = 200.0;

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1280.0;

/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 720.0;

/// Default canvas background colour.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Default canvas foreground colour.
pub const DEFAULT_FOREGROUND: &str = "#000000";

/// Flat canvas configuration. Every field is independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSettings {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Background colour (hex).
    pub background_color: String,
    /// Foreground colour (hex).
    pub foreground_color: String,
    /// Whether square panels and the canvas are drawn with rounded corners.
    pub rounded_corners: bool,
    /// Whether the background grid is visible.
    pub show_grid: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            background_color: DEFAULT_BACKGROUND.to_string(),
            foreground_color: DEFAULT_FOREGROUND.to_string(),
            rounded_corners: true,
            show_grid: false,
        }
    }
}

impl CanvasSettings {
    /// Set the background colour.
    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = color.into();
    }

    /// Set the foreground colour.
    pub fn set_foreground_color(&mut self, color: impl Into<String>) {
        self.foreground_color = color.into();
    }

    /// Turn rounded corners on or off.
    pub fn set_rounded_corners(&mut self, rounded: bool) {
        self.rounded_corners = rounded;
    }

    /// Show or hide the grid.
    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    /// Set both dimensions together.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ValidationRejected`] unless both values are
    /// finite and at least [`MIN_CANVAS_DIMENSION`]; nothing changes then.
    pub fn commit_dimensions(&mut self, width: f64, height: f64) -> CanvasResult<()> {
        validate_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }
}

/// Check a proposed canvas size without applying it.
///
/// # Errors
///
/// Returns [`CanvasError::ValidationRejected`] if either value is not finite
/// or is below [`MIN_CANVAS_DIMENSION`].
pub fn validate_dimensions(width: f64, height: f64) -> CanvasResult<()> {
    let ok = |v: f64| v.is_finite() && v >= MIN_CANVAS_DIMENSION;
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(CanvasError::ValidationRejected {
            width,
            height,
            min: MIN_CANVAS_DIMENSION,
        })
    }
}
