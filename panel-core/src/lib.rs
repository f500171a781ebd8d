//! # Panel Core
//!
//! Geometry and history engine for the panel layout designer.
//! Compiles to WASM for the browser editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  Editor                     │
//! │  - validate, snapshot, then mutate          │
//! │  - clipboard, key chords, actions           │
//! ├─────────────────────────────────────────────┤
//! │  Panel Store      │  Canvas Settings        │
//! │  - ordered panels │  - dimensions, colours  │
//! │  - z-order        │  - corners, grid        │
//! │  - selection      │                         │
//! ├─────────────────────────────────────────────┤
//! │  Geometry Policy  │  History   │  Codec     │
//! │  - placement      │  - undo    │  - layout  │
//! │  - resize anchors │  - redo    │    document│
//! │  - copy offsets   │            │            │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod panel;
pub mod settings;
pub mod shortcut;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use action::{Action, Outcome, PanelTarget};
pub use config::{Layout, LayoutDocument, PanelDocument, RasterExport};
pub use editor::{Editor, EditorConfig};
pub use error::{CanvasError, CanvasResult};
pub use geometry::{ContainerSize, DuplicateMode, Rect, ResizeHandle, Size};
pub use history::History;
pub use panel::{
    FontStyle, FontWeight, Panel, PanelId, PanelStyle, Shape, ShapeKind, TextDecoration,
};
pub use settings::CanvasSettings;
pub use shortcut::{KeyInput, Shortcut};
pub use store::PanelStore;

/// Panel core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
