//! Geometry policy for panel placement, resizing and duplication.
//!
//! Everything here is a pure function of its inputs. The editor feeds in the
//! current panel and the values reported by the presentation layer at the end
//! of a gesture, and commits whatever comes back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CanvasError, CanvasResult};

/// Smallest size a freeform resize gesture may produce.
pub const MIN_RESIZE_SIZE: f64 = 100.0;

/// Offset applied to both axes when pasting a copied panel.
pub const PASTE_OFFSET: f64 = 10.0;

/// Per-copy offset step applied when duplicating a panel explicitly.
pub const DUPLICATE_OFFSET_STEP: f64 = 20.0;

/// Width and height pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width in canvas units.
    pub width: f64,
    /// Height in canvas units.
    pub height: f64,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Raise each dimension to at least `min`.
    #[must_use]
    pub fn clamp_min(self, min: f64) -> Self {
        Self {
            width: self.width.max(min),
            height: self.height.max(min),
        }
    }
}

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Size of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the point lies inside or on the edge of the rectangle.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Rendered size of the canvas container, as measured by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

impl ContainerSize {
    /// Create a container size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One of the eight resize grab points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// Top edge.
    N,
    /// Bottom edge.
    S,
    /// Right edge.
    E,
    /// Left edge.
    W,
    /// Top-right corner.
    Ne,
    /// Top-left corner.
    Nw,
    /// Bottom-right corner.
    Se,
    /// Bottom-left corner.
    Sw,
}

impl ResizeHandle {
    /// All handles, in the order the drag surface lists them.
    pub const ALL: [Self; 8] = [
        Self::S,
        Self::E,
        Self::N,
        Self::W,
        Self::Ne,
        Self::Nw,
        Self::Se,
        Self::Sw,
    ];

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub const fn moves_left_edge(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub const fn moves_top_edge(self) -> bool {
        matches!(self, Self::N | Self::Nw | Self::Ne)
    }

    /// Short lowercase name (`"nw"`, `"e"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::Ne => "ne",
            Self::Nw => "nw",
            Self::Se => "se",
            Self::Sw => "sw",
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeHandle {
    type Err = CanvasError;

    fn from_str(s: &str) -> CanvasResult<Self> {
        Self::ALL
            .into_iter()
            .find(|handle| handle.as_str() == s)
            .ok_or_else(|| CanvasError::InvalidOperation(format!("unknown resize handle: {s}")))
    }
}

/// How a copy of a panel is being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateMode {
    /// Clipboard paste: fixed small offset.
    Paste,
    /// Explicit duplicate action: offset grows with the number of copies.
    Duplicate,
}

impl DuplicateMode {
    /// Map the `viaPaste` flag used by callers.
    #[must_use]
    pub const fn from_via_paste(via_paste: bool) -> Self {
        if via_paste {
            Self::Paste
        } else {
            Self::Duplicate
        }
    }
}

/// Top-left position that centers a `size` box inside the container.
#[must_use]
pub fn centered_position(container: ContainerSize, size: Size) -> (f64, f64) {
    (
        container.width / 2.0 - size.width / 2.0,
        container.height / 2.0 - size.height / 2.0,
    )
}

/// Rectangle after a resize gesture ends on `handle` with the `reported` size.
///
/// Edges not adjacent to the handle stay put. Circles are squared up to the
/// larger reported dimension before anchoring. The size is committed as given;
/// `Editor::resize_panel` clamps to [`MIN_RESIZE_SIZE`] beforehand.
#[must_use]
pub fn resize_rect(current: Rect, reported: Size, handle: ResizeHandle, circle: bool) -> Rect {
    let size = if circle {
        let side = reported.width.max(reported.height);
        Size::new(side, side)
    } else {
        reported
    };

    let x = if handle.moves_left_edge() {
        current.x + (current.width - size.width)
    } else {
        current.x
    };
    let y = if handle.moves_top_edge() {
        current.y + (current.height - size.height)
    } else {
        current.y
    };

    Rect {
        x,
        y,
        width: size.width,
        height: size.height,
    }
}

/// Number of titles that start with `base` (case-sensitive prefix match).
#[must_use]
pub fn similar_title_count<'a>(titles: impl IntoIterator<Item = &'a str>, base: &str) -> usize {
    titles
        .into_iter()
        .filter(|title| title.starts_with(base))
        .count()
}

/// Offset applied to both axes of a copy, given how many similar titles exist.
#[must_use]
pub fn duplicate_offset(mode: DuplicateMode, similar_count: usize) -> f64 {
    match mode {
        DuplicateMode::Paste => PASTE_OFFSET,
        // Title counts are tiny; f64 holds them exactly.
        #[allow(clippy::cast_precision_loss)]
        DuplicateMode::Duplicate => DUPLICATE_OFFSET_STEP * similar_count as f64,
    }
}

/// Title for a copy of a panel titled `base`.
#[must_use]
pub fn copy_title(base: &str, similar_count: usize) -> String {
    format!("{base} Copy {similar_count}")
}
