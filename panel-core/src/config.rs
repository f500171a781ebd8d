//! Layout document: the flat, transport-neutral form of the editable state.
//!
//! ```json
//! {
//!   "panels": [{ "id": "…", "x": 0, "y": 0, "width": 400, "height": 400,
//!                "zIndex": 1, "title": "Title", "isCircle": false }],
//!   "canvasWidth": 1280,
//!   "canvasHeight": 720,
//!   "canvasBgColor": "#ffffff",
//!   "canvasFgColor": "#000000",
//!   "roundedCorners": true,
//!   "showGrid": false
//! }
//! ```
//!
//! Decoding is structural only. Out-of-range values such as a negative width
//! are accepted as written.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;
use crate::{CanvasError, CanvasResult, CanvasSettings, Panel, PanelId, PanelStyle, Shape, ShapeKind};

/// File name used when exporting a layout document.
pub const CONFIG_FILE_NAME: &str = "panel-layout.json";

/// File name used when exporting a raster image of the canvas.
pub const IMAGE_FILE_NAME: &str = "panel-drawing.png";

/// Pixel scale used for raster export.
pub const RASTER_SCALE: f64 = 2.0;

/// Document form of a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelDocument {
    /// Panel identifier.
    pub id: PanelId,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Bounding width.
    pub width: f64,
    /// Bounding height.
    pub height: f64,
    /// Stacking order.
    pub z_index: i32,
    /// Title.
    pub title: String,
    /// Circle flag; `false` means square.
    pub is_circle: bool,
    /// Presentation attributes, omitted when empty.
    #[serde(default, skip_serializing_if = "PanelStyle::is_empty")]
    pub style: PanelStyle,
}

impl From<&Panel> for PanelDocument {
    fn from(panel: &Panel) -> Self {
        Self {
            id: panel.id.clone(),
            x: panel.x,
            y: panel.y,
            width: panel.width(),
            height: panel.height(),
            z_index: panel.z_index,
            title: panel.title.clone(),
            is_circle: panel.shape.is_circle(),
            style: panel.style.clone(),
        }
    }
}

impl From<PanelDocument> for Panel {
    fn from(doc: PanelDocument) -> Self {
        let kind = if doc.is_circle {
            ShapeKind::Circle
        } else {
            ShapeKind::Square
        };
        if doc.is_circle && (doc.width - doc.height).abs() > f64::EPSILON {
            tracing::warn!(
                "Circle panel {} has unequal sides {}x{}; using the larger",
                doc.id,
                doc.width,
                doc.height
            );
        }
        Self {
            id: doc.id,
            x: doc.x,
            y: doc.y,
            shape: Shape::from_size(kind, Size::new(doc.width, doc.height)),
            z_index: doc.z_index,
            title: doc.title,
            style: doc.style,
        }
    }
}

/// Complete editable state: panels plus canvas settings.
///
/// This is also what the history stacks hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    /// Panels in insertion order.
    pub panels: Vec<Panel>,
    /// Canvas settings.
    pub settings: CanvasSettings,
}

/// Canonical layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    /// Panels in insertion order.
    pub panels: Vec<PanelDocument>,
    /// Canvas width.
    pub canvas_width: f64,
    /// Canvas height.
    pub canvas_height: f64,
    /// Background colour.
    pub canvas_bg_color: String,
    /// Foreground colour.
    pub canvas_fg_color: String,
    /// Rounded corners flag.
    pub rounded_corners: bool,
    /// Grid visibility flag.
    pub show_grid: bool,
}

impl From<&Layout> for LayoutDocument {
    fn from(layout: &Layout) -> Self {
        let settings = &layout.settings;
        Self {
            panels: layout.panels.iter().map(PanelDocument::from).collect(),
            canvas_width: settings.width,
            canvas_height: settings.height,
            canvas_bg_color: settings.background_color.clone(),
            canvas_fg_color: settings.foreground_color.clone(),
            rounded_corners: settings.rounded_corners,
            show_grid: settings.show_grid,
        }
    }
}

impl From<LayoutDocument> for Layout {
    fn from(doc: LayoutDocument) -> Self {
        Self {
            panels: doc.panels.into_iter().map(Panel::from).collect(),
            settings: CanvasSettings {
                width: doc.canvas_width,
                height: doc.canvas_height,
                background_color: doc.canvas_bg_color,
                foreground_color: doc.canvas_fg_color,
                rounded_corners: doc.rounded_corners,
                show_grid: doc.show_grid,
            },
        }
    }
}

/// Serialize a layout to a pretty-printed (2-space) JSON document.
///
/// # Errors
///
/// Returns [`CanvasError::Serialization`] if encoding fails.
pub fn serialize(layout: &Layout) -> CanvasResult<String> {
    serde_json::to_string_pretty(&LayoutDocument::from(layout))
        .map_err(|e| CanvasError::Serialization(e.to_string()))
}

/// Parse a JSON layout document.
///
/// Nothing is applied anywhere; callers install the returned layout only on
/// success.
///
/// # Errors
///
/// Returns [`CanvasError::ConfigParse`] if the text is not a well-formed
/// layout document.
pub fn deserialize(text: &str) -> CanvasResult<Layout> {
    let doc: LayoutDocument = serde_json::from_str(text)?;
    Ok(Layout::from(doc))
}

/// What the raster collaborator needs to capture the canvas as an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterExport {
    /// Background colour to paint behind the panels.
    pub background_color: String,
    /// Device pixel scale.
    pub scale: f64,
    /// Suggested download name.
    pub file_name: String,
}

impl RasterExport {
    /// Raster export request for the given settings.
    #[must_use]
    pub fn for_settings(settings: &CanvasSettings) -> Self {
        Self {
            background_color: settings.background_color.clone(),
            scale: RASTER_SCALE,
            file_name: IMAGE_FILE_NAME.to_string(),
        }
    }
}
