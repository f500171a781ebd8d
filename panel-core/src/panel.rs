//! Panels - the shapes users place on the canvas.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Rect, Size};
use crate::{CanvasError, CanvasResult};

/// Width and height of a freshly added panel.
pub const DEFAULT_PANEL_SIZE: f64 = 400.0;

/// Title given to a freshly added panel.
pub const DEFAULT_PANEL_TITLE: &str = "Title";

/// Opaque panel identifier.
///
/// New panels get a v4 UUID. Imported documents may carry any string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(String);

impl PanelId {
    /// Create a new unique panel ID.
    #[must_use]
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// The identifier as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PanelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PanelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Default for PanelId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of shape a panel is created as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Rectangle, optionally drawn with rounded corners.
    Square,
    /// Circle; always as wide as it is tall.
    Circle,
}

impl FromStr for ShapeKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> CanvasResult<Self> {
        match s {
            "square" => Ok(Self::Square),
            "circle" => Ok(Self::Circle),
            other => Err(CanvasError::InvalidOperation(format!(
                "unknown shape kind: {other}"
            ))),
        }
    }
}

/// Shape-specific dimensions.
///
/// A circle carries a single diameter, so it cannot drift out of round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned rectangle.
    Square {
        /// Width in canvas units.
        width: f64,
        /// Height in canvas units.
        height: f64,
    },
    /// Circle inscribed in a `diameter` x `diameter` box.
    Circle {
        /// Diameter in canvas units.
        diameter: f64,
    },
}

impl Shape {
    /// Default-sized shape of the given kind.
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Square => Self::Square {
                width: DEFAULT_PANEL_SIZE,
                height: DEFAULT_PANEL_SIZE,
            },
            ShapeKind::Circle => Self::Circle {
                diameter: DEFAULT_PANEL_SIZE,
            },
        }
    }

    /// Build a shape of `kind` from a bounding size.
    ///
    /// Circles take the larger of the two dimensions.
    #[must_use]
    pub fn from_size(kind: ShapeKind, size: Size) -> Self {
        match kind {
            ShapeKind::Square => Self::Square {
                width: size.width,
                height: size.height,
            },
            ShapeKind::Circle => Self::Circle {
                diameter: size.width.max(size.height),
            },
        }
    }

    /// The shape's kind.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Square { .. } => ShapeKind::Square,
            Self::Circle { .. } => ShapeKind::Circle,
        }
    }

    /// Bounding box size.
    #[must_use]
    pub const fn size(&self) -> Size {
        match *self {
            Self::Square { width, height } => Size { width, height },
            Self::Circle { diameter } => Size {
                width: diameter,
                height: diameter,
            },
        }
    }

    /// Whether this is a circle.
    #[must_use]
    pub const fn is_circle(&self) -> bool {
        matches!(self, Self::Circle { .. })
    }
}

/// Font weight for a panel's title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    Normal,
    /// Bold weight.
    Bold,
}

/// Font style for a panel's title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright.
    Normal,
    /// Italic.
    Italic,
}

/// Text decoration for a panel's title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    /// No decoration.
    None,
    /// Underlined.
    Underline,
}

/// Optional presentation attributes carried alongside the geometry.
///
/// Geometry operations never read these; they travel with the panel through
/// duplication, history and the layout document. Unset fields fall back to
/// the renderer's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelStyle {
    /// Fill colour (CSS colour string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    /// Stroke colour (CSS colour string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// Stroke width in canvas units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Corner radius in canvas units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    /// Title font colour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    /// Title font size in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Title font weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    /// Title font style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    /// Title text decoration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    /// CSS box shadow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
}

impl PanelStyle {
    /// Merge every field set in `patch` over this style.
    pub fn apply(&mut self, patch: &PanelStyle) {
        fn merge<T: Clone>(dst: &mut Option<T>, src: Option<&T>) {
            if let Some(value) = src {
                *dst = Some(value.clone());
            }
        }
        merge(&mut self.fill_color, patch.fill_color.as_ref());
        merge(&mut self.stroke_color, patch.stroke_color.as_ref());
        merge(&mut self.stroke_width, patch.stroke_width.as_ref());
        merge(&mut self.border_radius, patch.border_radius.as_ref());
        merge(&mut self.font_color, patch.font_color.as_ref());
        merge(&mut self.font_size, patch.font_size.as_ref());
        merge(&mut self.font_weight, patch.font_weight.as_ref());
        merge(&mut self.font_style, patch.font_style.as_ref());
        merge(&mut self.text_decoration, patch.text_decoration.as_ref());
        merge(&mut self.box_shadow, patch.box_shadow.as_ref());
    }

    /// Whether no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A shape placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Unique identifier.
    pub id: PanelId,
    /// Left edge in canvas coordinates. Not clamped; may be negative.
    pub x: f64,
    /// Top edge in canvas coordinates. Not clamped; may be negative.
    pub y: f64,
    /// Shape and its dimensions.
    pub shape: Shape,
    /// Stacking order; higher paints on top.
    pub z_index: i32,
    /// Free-form label.
    pub title: String,
    /// Presentation attributes.
    pub style: PanelStyle,
}

impl Panel {
    /// Create a default-sized panel of the given kind at the origin.
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            id: PanelId::new(),
            x: 0.0,
            y: 0.0,
            shape: Shape::new(kind),
            z_index: 0,
            title: DEFAULT_PANEL_TITLE.to_string(),
            style: PanelStyle::default(),
        }
    }

    /// Set the position.
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the style.
    #[must_use]
    pub fn with_style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    /// Width of the bounding box.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.shape.size().width
    }

    /// Height of the bounding box.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.shape.size().height
    }

    /// Bounding rectangle in canvas coordinates.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        let size = self.shape.size();
        Rect {
            x: self.x,
            y: self.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Replace position and size from a rectangle, respecting the shape kind.
    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.shape = Shape::from_size(self.shape.kind(), rect.size());
    }

    /// Check if a point (in canvas coordinates) is within this panel's box.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.rect().contains(x, y)
    }
}
