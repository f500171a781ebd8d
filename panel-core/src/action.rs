//! Serializable editor actions.
//!
//! Hosts that drive the editor from scripts or message channels send
//! [`Action`] values instead of calling [`Editor`] methods directly.

use serde::{Deserialize, Serialize};

use crate::geometry::{ContainerSize, DuplicateMode, ResizeHandle, Size};
use crate::shortcut::{KeyInput, Shortcut};
use crate::{CanvasError, CanvasResult, Editor, Panel, PanelId, PanelStyle, ShapeKind};

/// How an action refers to a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PanelTarget {
    /// Zero-based position in insertion order.
    Index(usize),
    /// Panel id.
    Id(PanelId),
}

impl From<PanelId> for PanelTarget {
    fn from(id: PanelId) -> Self {
        Self::Id(id)
    }
}

/// One editor operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Add a default panel centered in the container.
    AddPanel {
        /// Shape to create.
        shape: ShapeKind,
        /// Measured container size; absent when the canvas is not mounted.
        #[serde(default)]
        container: Option<ContainerSize>,
    },
    /// Remove a panel.
    RemovePanel {
        /// Panel to remove.
        panel: PanelTarget,
    },
    /// Remove all panels.
    ClearPanels,
    /// Copy an existing panel.
    DuplicatePanel {
        /// Panel to copy.
        panel: PanelTarget,
        /// Paste offset instead of duplicate offset.
        #[serde(default)]
        via_paste: bool,
    },
    /// Commit a drag gesture.
    MovePanel {
        /// Panel dragged.
        panel: PanelTarget,
        /// Final left edge.
        x: f64,
        /// Final top edge.
        y: f64,
    },
    /// A resize gesture started.
    BeginResize,
    /// Commit a resize gesture.
    ResizePanel {
        /// Panel resized.
        panel: PanelTarget,
        /// Reported width.
        width: f64,
        /// Reported height.
        height: f64,
        /// Handle dragged.
        handle: ResizeHandle,
    },
    /// Change a panel's title.
    RenamePanel {
        /// Panel renamed.
        panel: PanelTarget,
        /// New title.
        title: String,
    },
    /// Merge a style patch into a panel.
    RestylePanel {
        /// Panel restyled.
        panel: PanelTarget,
        /// Attributes to set.
        style: PanelStyle,
    },
    /// Select a panel.
    SelectPanel {
        /// Panel selected.
        panel: PanelTarget,
    },
    /// Clear the selection.
    Deselect,
    /// Set move mode.
    SetMoveMode {
        /// New value.
        enabled: bool,
    },
    /// Flip move mode.
    ToggleMoveMode,
    /// Set the canvas background colour.
    SetBackgroundColor {
        /// Colour string.
        color: String,
    },
    /// Set the canvas foreground colour.
    SetForegroundColor {
        /// Colour string.
        color: String,
    },
    /// Set rounded corners.
    SetRoundedCorners {
        /// New value.
        enabled: bool,
    },
    /// Set grid visibility.
    SetShowGrid {
        /// New value.
        enabled: bool,
    },
    /// Commit canvas dimensions from the settings form.
    CommitDimensions {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// Copy the selected panel.
    Copy,
    /// Paste the copied panel.
    Paste,
    /// Undo the last change.
    Undo,
    /// Redo the last undone change.
    Redo,
    /// A key was pressed.
    KeyDown(KeyInput),
    /// A key was released.
    KeyUp {
        /// Key value.
        key: String,
    },
}

/// What an action did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The action was applied.
    Applied,
    /// A panel was created.
    Created(Panel),
    /// A keyboard chord ran.
    Shortcut(Shortcut),
    /// Nothing to do (unknown removal target, empty clipboard, empty history,
    /// value already set, unbound key).
    Ignored,
}

impl Outcome {
    fn from_flag(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::Ignored
        }
    }
}

impl Editor {
    /// Resolve a panel reference to an id.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if the index is out of range or
    /// the id is unknown.
    pub fn resolve(&self, target: PanelTarget) -> CanvasResult<PanelId> {
        match target {
            PanelTarget::Index(index) => self
                .store()
                .get_index(index)
                .map(|p| p.id.clone())
                .ok_or_else(|| CanvasError::PanelNotFound(format!("#{index}"))),
            PanelTarget::Id(id) if self.store().contains(&id) => Ok(id),
            PanelTarget::Id(id) => Err(CanvasError::PanelNotFound(id.to_string())),
        }
    }

    /// Apply an action.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying editor operation.
    pub fn dispatch(&mut self, action: Action) -> CanvasResult<Outcome> {
        tracing::trace!("Dispatching {action:?}");
        let outcome = match action {
            Action::AddPanel { shape, container } => {
                Outcome::Created(self.add_panel(shape, container)?)
            }
            Action::RemovePanel { panel } => match self.resolve(panel) {
                Ok(id) => Outcome::from_flag(self.remove_panel(&id).is_some()),
                Err(_) => Outcome::Ignored,
            },
            Action::ClearPanels => Outcome::from_flag(self.clear_panels() > 0),
            Action::DuplicatePanel { panel, via_paste } => {
                let id = self.resolve(panel)?;
                Outcome::Created(self.duplicate_panel(&id, DuplicateMode::from_via_paste(via_paste))?)
            }
            Action::MovePanel { panel, x, y } => {
                let id = self.resolve(panel)?;
                self.move_panel(&id, x, y)?;
                Outcome::Applied
            }
            Action::BeginResize => {
                self.begin_resize();
                Outcome::Applied
            }
            Action::ResizePanel {
                panel,
                width,
                height,
                handle,
            } => {
                let id = self.resolve(panel)?;
                self.resize_panel(&id, Size::new(width, height), handle)?;
                Outcome::Applied
            }
            Action::RenamePanel { panel, title } => {
                let id = self.resolve(panel)?;
                self.rename_panel(&id, title)?;
                Outcome::Applied
            }
            Action::RestylePanel { panel, style } => {
                let id = self.resolve(panel)?;
                self.restyle_panel(&id, &style)?;
                Outcome::Applied
            }
            Action::SelectPanel { panel } => {
                let id = self.resolve(panel)?;
                self.select_panel(&id)?;
                Outcome::Applied
            }
            Action::Deselect => {
                self.deselect();
                Outcome::Applied
            }
            Action::SetMoveMode { enabled } => {
                self.set_move_mode(enabled);
                Outcome::Applied
            }
            Action::ToggleMoveMode => {
                self.toggle_move_mode();
                Outcome::Applied
            }
            Action::SetBackgroundColor { color } => {
                Outcome::from_flag(self.set_background_color(&color))
            }
            Action::SetForegroundColor { color } => {
                Outcome::from_flag(self.set_foreground_color(&color))
            }
            Action::SetRoundedCorners { enabled } => {
                Outcome::from_flag(self.set_rounded_corners(enabled))
            }
            Action::SetShowGrid { enabled } => Outcome::from_flag(self.set_show_grid(enabled)),
            Action::CommitDimensions { width, height } => {
                self.commit_dimensions(width, height)?;
                Outcome::Applied
            }
            Action::Copy => Outcome::from_flag(self.copy_selected()),
            Action::Paste => self.paste().map_or(Outcome::Ignored, Outcome::Created),
            Action::Undo => Outcome::from_flag(self.undo()),
            Action::Redo => Outcome::from_flag(self.redo()),
            Action::KeyDown(input) => self
                .key_down(&input)
                .map_or(Outcome::Ignored, Outcome::Shortcut),
            Action::KeyUp { key } => {
                self.key_up(&key);
                Outcome::Applied
            }
        };
        Ok(outcome)
    }
}
