//! Editor state: panels, canvas settings and their undo history.
//!
//! Every mutating operation validates its input first, then records the
//! pre-mutation [`Layout`] in the history, then applies the change. A failed
//! or no-op operation never leaves an entry behind.

use crate::config::{self, Layout, LayoutDocument, RasterExport};
use crate::geometry::{ContainerSize, DuplicateMode, ResizeHandle, Size, MIN_RESIZE_SIZE};
use crate::history::History;
use crate::settings::{self, CanvasSettings};
use crate::shortcut::{KeyInput, Shortcut, MODIFIER_KEY};
use crate::store::PanelStore;
use crate::{CanvasError, CanvasResult, Panel, PanelId, PanelStyle, ShapeKind};

/// Editor construction options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorConfig {
    /// Initial canvas settings.
    pub settings: CanvasSettings,
    /// Maximum undo entries retained; `None` (the default) keeps everything.
    pub history_depth: Option<usize>,
}

/// The panel editor.
#[derive(Debug, Clone)]
pub struct Editor {
    store: PanelStore,
    settings: CanvasSettings,
    history: History<Layout>,
    /// Panel captured by the last copy.
    clipboard: Option<Panel>,
    /// Whether the modifier key is currently held.
    modifier_held: bool,
    /// Whether the canvas settings form is open.
    editing_settings: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an empty editor.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            store: PanelStore::new(),
            settings: config.settings,
            history: History::new(config.history_depth),
            clipboard: None,
            modifier_held: false,
            editing_settings: false,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The panel store.
    #[must_use]
    pub fn store(&self) -> &PanelStore {
        &self.store
    }

    /// Panels in insertion order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        self.store.panels()
    }

    /// Get a panel by id.
    #[must_use]
    pub fn panel(&self, id: &PanelId) -> Option<&Panel> {
        self.store.get(id)
    }

    /// Current canvas settings.
    #[must_use]
    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    /// Undo/redo stacks.
    #[must_use]
    pub fn history(&self) -> &History<Layout> {
        &self.history
    }

    /// Deep copy of the editable state.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout {
            panels: self.store.panels().to_vec(),
            settings: self.settings.clone(),
        }
    }

    /// Document form of the editable state.
    #[must_use]
    pub fn document(&self) -> LayoutDocument {
        LayoutDocument::from(&self.layout())
    }

    /// Currently selected panel.
    #[must_use]
    pub fn selected(&self) -> Option<&Panel> {
        self.store.selected()
    }

    /// Panel held by the clipboard.
    #[must_use]
    pub fn clipboard(&self) -> Option<&Panel> {
        self.clipboard.as_ref()
    }

    /// Whether move mode is on.
    #[must_use]
    pub fn move_mode(&self) -> bool {
        self.store.move_mode()
    }

    /// Whether the modifier key is held.
    #[must_use]
    pub fn modifier_held(&self) -> bool {
        self.modifier_held
    }

    /// Whether panels may currently be dragged.
    #[must_use]
    pub fn can_drag(&self) -> bool {
        self.store.move_mode() || self.modifier_held
    }

    /// Whether the canvas settings form is open.
    #[must_use]
    pub fn is_editing_settings(&self) -> bool {
        self.editing_settings
    }

    /// Topmost panel at a canvas point.
    #[must_use]
    pub fn panel_at(&self, x: f64, y: f64) -> Option<PanelId> {
        self.store.panel_at(x, y)
    }

    /// Panels in paint order, bottom first.
    #[must_use]
    pub fn render_order(&self) -> Vec<&Panel> {
        self.store.render_order()
    }

    // -----------------------------------------------------------------------
    // Panel operations
    // -----------------------------------------------------------------------

    /// Add a default-sized panel centered in the measured container.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::MeasurementUnavailable`] if `container` is
    /// `None` (the canvas is not mounted).
    pub fn add_panel(
        &mut self,
        kind: ShapeKind,
        container: Option<ContainerSize>,
    ) -> CanvasResult<Panel> {
        let container = container.ok_or(CanvasError::MeasurementUnavailable)?;
        self.checkpoint();
        let panel = self.store.add(kind, container).clone();
        tracing::debug!("Added {:?} panel {} at ({}, {})", kind, panel.id, panel.x, panel.y);
        Ok(panel)
    }

    /// Remove a panel and clear the selection. Unknown ids are ignored.
    pub fn remove_panel(&mut self, id: &PanelId) -> Option<Panel> {
        if !self.store.contains(id) {
            tracing::debug!("Ignoring removal of unknown panel {id}");
            return None;
        }
        self.checkpoint();
        let removed = self.store.remove(id);
        self.store.deselect();
        tracing::debug!("Removed panel {id}");
        removed
    }

    /// Remove every panel. Returns how many were removed.
    pub fn clear_panels(&mut self) -> usize {
        let count = self.store.len();
        if count > 0 {
            self.checkpoint();
            self.store.clear();
            tracing::debug!("Cleared {count} panels");
        }
        self.store.deselect();
        count
    }

    /// Add a copy of an existing panel.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if `id` is not in the store.
    pub fn duplicate_panel(&mut self, id: &PanelId, mode: DuplicateMode) -> CanvasResult<Panel> {
        if !self.store.contains(id) {
            return Err(CanvasError::PanelNotFound(id.to_string()));
        }
        self.checkpoint();
        let copy = self.store.duplicate(id, mode)?.clone();
        tracing::debug!("Duplicated panel {id} as {} ({mode:?})", copy.id);
        Ok(copy)
    }

    /// Commit the final position of a drag gesture.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if `id` is not in the store.
    pub fn move_panel(&mut self, id: &PanelId, x: f64, y: f64) -> CanvasResult<()> {
        self.commit_panel_change(id, |store| store.update_position(id, x, y))?;
        tracing::debug!("Moved panel {id} to ({x}, {y})");
        Ok(())
    }

    /// A resize gesture is starting. Switches move mode off.
    pub fn begin_resize(&mut self) {
        self.store.begin_resize();
    }

    /// Commit the final size of a resize gesture made from `handle`.
    ///
    /// Each reported dimension is raised to at least [`MIN_RESIZE_SIZE`]
    /// first, the same floor the resize surface enforces.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if `id` is not in the store.
    pub fn resize_panel(&mut self, id: &PanelId, size: Size, handle: ResizeHandle) -> CanvasResult<()> {
        let size = size.clamp_min(MIN_RESIZE_SIZE);
        self.commit_panel_change(id, |store| store.update_size(id, size, handle))?;
        tracing::debug!(
            "Resized panel {id} from {handle} to {}x{}",
            size.width,
            size.height
        );
        Ok(())
    }

    /// Replace a panel's title.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if `id` is not in the store.
    pub fn rename_panel(&mut self, id: &PanelId, title: impl Into<String>) -> CanvasResult<()> {
        let title = title.into();
        self.commit_panel_change(id, |store| store.update_title(id, title))
    }

    /// Merge a style patch into a panel's style.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if `id` is not in the store.
    pub fn restyle_panel(&mut self, id: &PanelId, patch: &PanelStyle) -> CanvasResult<()> {
        self.commit_panel_change(id, |store| store.update_style(id, patch))
    }

    /// Select a panel, replacing any previous selection.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if `id` is not in the store.
    pub fn select_panel(&mut self, id: &PanelId) -> CanvasResult<()> {
        self.store.select(id)
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.store.deselect();
    }

    /// Turn move mode on or off.
    pub fn set_move_mode(&mut self, enabled: bool) {
        self.store.set_move_mode(enabled);
    }

    /// Flip move mode.
    pub fn toggle_move_mode(&mut self) {
        self.store.set_move_mode(!self.store.move_mode());
    }

    // -----------------------------------------------------------------------
    // Clipboard
    // -----------------------------------------------------------------------

    /// Copy the selected panel to the clipboard. Returns whether anything was
    /// copied.
    pub fn copy_selected(&mut self) -> bool {
        match self.store.selected() {
            Some(panel) => {
                tracing::debug!("Copied panel {}", panel.id);
                self.clipboard = Some(panel.clone());
                true
            }
            None => false,
        }
    }

    /// Paste the clipboard panel as a new panel. `None` if the clipboard is
    /// empty.
    pub fn paste(&mut self) -> Option<Panel> {
        let source = self.clipboard.clone()?;
        self.checkpoint();
        let copy = self
            .store
            .duplicate_from(&source, DuplicateMode::Paste)
            .clone();
        tracing::debug!("Pasted panel {} as {}", source.id, copy.id);
        Some(copy)
    }

    // -----------------------------------------------------------------------
    // Canvas settings
    // -----------------------------------------------------------------------

    /// Set the background colour. Returns whether it changed.
    pub fn set_background_color(&mut self, color: &str) -> bool {
        self.commit_setting(|s| s.background_color == color, |s| s.set_background_color(color))
    }

    /// Set the foreground colour. Returns whether it changed.
    pub fn set_foreground_color(&mut self, color: &str) -> bool {
        self.commit_setting(|s| s.foreground_color == color, |s| s.set_foreground_color(color))
    }

    /// Turn rounded corners on or off. Returns whether it changed.
    pub fn set_rounded_corners(&mut self, rounded: bool) -> bool {
        self.commit_setting(|s| s.rounded_corners == rounded, |s| s.set_rounded_corners(rounded))
    }

    /// Show or hide the grid. Returns whether it changed.
    pub fn set_show_grid(&mut self, show: bool) -> bool {
        self.commit_setting(|s| s.show_grid == show, |s| s.set_show_grid(show))
    }

    /// Open the canvas settings form.
    pub fn open_settings_editor(&mut self) {
        self.editing_settings = true;
    }

    /// Close the canvas settings form without committing dimensions.
    pub fn close_settings_editor(&mut self) {
        self.editing_settings = false;
    }

    /// Open or close the canvas settings form.
    pub fn toggle_settings_editor(&mut self) {
        self.editing_settings = !self.editing_settings;
    }

    /// Commit new canvas dimensions from the settings form.
    ///
    /// The form closes whether or not the values are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ValidationRejected`] unless both values are
    /// finite and at least 200; nothing changes then.
    pub fn commit_dimensions(&mut self, width: f64, height: f64) -> CanvasResult<()> {
        self.editing_settings = false;
        if let Err(e) = settings::validate_dimensions(width, height) {
            tracing::warn!("Rejected canvas dimensions {width}x{height}");
            return Err(e);
        }
        let unchanged = (self.settings.width - width).abs() < f64::EPSILON
            && (self.settings.height - height).abs() < f64::EPSILON;
        if !unchanged {
            self.checkpoint();
            self.settings.commit_dimensions(width, height)?;
            tracing::debug!("Canvas resized to {width}x{height}");
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Restore the state before the last recorded change. Returns whether
    /// anything was undone.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let current = self.layout();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                tracing::debug!("Undo; {} steps left", self.history.undo_depth());
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone change. Returns whether anything was redone.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let current = self.layout();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                tracing::debug!("Redo; {} steps left", self.history.redo_depth());
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Keyboard
    // -----------------------------------------------------------------------

    /// Handle a key press. Returns the chord command that ran, if any.
    pub fn key_down(&mut self, input: &KeyInput) -> Option<Shortcut> {
        if input.ctrl {
            self.modifier_held = true;
        }
        let shortcut = Shortcut::resolve(input)?;
        match shortcut {
            Shortcut::Copy => {
                self.copy_selected();
            }
            Shortcut::Paste => {
                self.paste();
            }
            Shortcut::Undo => {
                self.undo();
            }
            Shortcut::Redo => {
                self.redo();
            }
        }
        Some(shortcut)
    }

    /// Handle a key release.
    pub fn key_up(&mut self, key: &str) {
        if key == MODIFIER_KEY {
            self.modifier_held = false;
        }
    }

    // -----------------------------------------------------------------------
    // Import / export
    // -----------------------------------------------------------------------

    /// Replace the editable state with a parsed layout document.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ConfigParse`] if the text is malformed; state
    /// and history are left untouched.
    pub fn import_config(&mut self, text: &str) -> CanvasResult<()> {
        let layout = match config::deserialize(text) {
            Ok(layout) => layout,
            Err(e) => {
                tracing::warn!("Layout import rejected: {e}");
                return Err(e);
            }
        };
        self.import_layout(layout);
        Ok(())
    }

    /// Replace the editable state with an already-decoded layout.
    pub fn import_layout(&mut self, layout: Layout) {
        self.checkpoint();
        let count = layout.panels.len();
        self.restore(layout);
        tracing::info!("Imported layout with {count} panels");
    }

    /// Export the editable state as a pretty-printed layout document.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Serialization`] if encoding fails.
    pub fn export_config(&self) -> CanvasResult<String> {
        let text = config::serialize(&self.layout())?;
        tracing::info!("Exported layout with {} panels", self.store.len());
        Ok(text)
    }

    /// Request for the raster collaborator to capture the canvas.
    #[must_use]
    pub fn raster_export(&self) -> RasterExport {
        RasterExport::for_settings(&self.settings)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn checkpoint(&mut self) {
        let snapshot = self.layout();
        self.history.snapshot(snapshot);
    }

    fn restore(&mut self, layout: Layout) {
        self.store.replace_panels(layout.panels);
        self.settings = layout.settings;
    }

    /// Run a single-panel update, recording history only if the panel changed.
    fn commit_panel_change<F>(&mut self, id: &PanelId, update: F) -> CanvasResult<()>
    where
        F: FnOnce(&mut PanelStore) -> CanvasResult<()>,
    {
        let before = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| CanvasError::PanelNotFound(id.to_string()))?;
        let snapshot = self.layout();
        update(&mut self.store)?;
        if self.store.get(id) != Some(&before) {
            self.history.snapshot(snapshot);
        }
        Ok(())
    }

    /// Apply a settings change unless it is already in effect.
    fn commit_setting<P, F>(&mut self, unchanged: P, apply: F) -> bool
    where
        P: FnOnce(&CanvasSettings) -> bool,
        F: FnOnce(&mut CanvasSettings),
    {
        if unchanged(&self.settings) {
            return false;
        }
        self.checkpoint();
        apply(&mut self.settings);
        true
    }
}
