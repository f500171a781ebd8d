//! WebAssembly bindings for panel-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.
//! Ids and errors cross the boundary as strings.

use wasm_bindgen::prelude::*;

use crate::config::{PanelDocument, CONFIG_FILE_NAME};
use crate::geometry::{ContainerSize, DuplicateMode, Size};
use crate::shortcut::KeyInput;
use crate::{Action, Editor, PanelId, PanelStyle};

/// CSS selector of the canvas container element.
pub const CONTAINER_SELECTOR: &str = ".canvas-container";

/// Initialize the panel WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Measure the rendered size of the first element matching `selector`.
fn measure_container(selector: &str) -> Option<ContainerSize> {
    let document = web_sys::window()?.document()?;
    let element = document.query_selector(selector).ok()??;
    let rect = element.get_bounding_client_rect();
    Some(ContainerSize::new(rect.width(), rect.height()))
}

/// Panel editor instance for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    editor: Editor,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create a new editor with default settings.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            editor: Editor::default(),
        }
    }

    /// Add a panel centered in a container of the given size.
    ///
    /// # Errors
    ///
    /// Returns an error string if either dimension is missing or the shape is
    /// unknown.
    #[wasm_bindgen(js_name = addPanel)]
    pub fn add_panel(
        &mut self,
        shape: &str,
        container_width: Option<f64>,
        container_height: Option<f64>,
    ) -> Result<String, String> {
        let kind = shape.parse().map_err(|e: crate::CanvasError| e.to_string())?;
        let container = container_width
            .zip(container_height)
            .map(|(w, h)| ContainerSize::new(w, h));
        let panel = self
            .editor
            .add_panel(kind, container)
            .map_err(|e| e.to_string())?;
        Ok(panel.id.to_string())
    }

    /// Add a panel centered in the live `.canvas-container` element.
    ///
    /// # Errors
    ///
    /// Returns an error string if the container is not mounted.
    #[wasm_bindgen(js_name = addPanelInContainer)]
    pub fn add_panel_in_container(&mut self, shape: &str) -> Result<String, String> {
        let container = measure_container(CONTAINER_SELECTOR);
        self.add_panel(
            shape,
            container.map(|c| c.width),
            container.map(|c| c.height),
        )
    }

    /// Remove a panel. Returns whether it existed.
    #[wasm_bindgen(js_name = removePanel)]
    pub fn remove_panel(&mut self, id: &str) -> bool {
        self.editor.remove_panel(&PanelId::from(id)).is_some()
    }

    /// Remove every panel. Returns how many were removed.
    #[wasm_bindgen(js_name = clearPanels)]
    pub fn clear_panels(&mut self) -> usize {
        self.editor.clear_panels()
    }

    /// Copy a panel; returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error string if the panel does not exist.
    #[wasm_bindgen(js_name = duplicatePanel)]
    pub fn duplicate_panel(&mut self, id: &str, via_paste: bool) -> Result<String, String> {
        let id = PanelId::from(id);
        self.editor
            .duplicate_panel(&id, DuplicateMode::from_via_paste(via_paste))
            .map(|p| p.id.to_string())
            .map_err(|e| e.to_string())
    }

    /// Commit the end of a drag gesture.
    ///
    /// # Errors
    ///
    /// Returns an error string if the panel does not exist.
    #[wasm_bindgen(js_name = movePanel)]
    pub fn move_panel(&mut self, id: &str, x: f64, y: f64) -> Result<(), String> {
        let id = PanelId::from(id);
        self.editor.move_panel(&id, x, y).map_err(|e| e.to_string())
    }

    /// Notify the start of a resize gesture.
    #[wasm_bindgen(js_name = beginResize)]
    pub fn begin_resize(&mut self) {
        self.editor.begin_resize();
    }

    /// Commit the end of a resize gesture.
    ///
    /// # Errors
    ///
    /// Returns an error string if the panel does not exist or the handle is
    /// unknown.
    #[wasm_bindgen(js_name = resizePanel)]
    pub fn resize_panel(
        &mut self,
        id: &str,
        width: f64,
        height: f64,
        handle: &str,
    ) -> Result<(), String> {
        let id = PanelId::from(id);
        let handle = handle.parse().map_err(|e: crate::CanvasError| e.to_string())?;
        self.editor
            .resize_panel(&id, Size::new(width, height), handle)
            .map_err(|e| e.to_string())
    }

    /// Change a panel's title.
    ///
    /// # Errors
    ///
    /// Returns an error string if the panel does not exist.
    #[wasm_bindgen(js_name = renamePanel)]
    pub fn rename_panel(&mut self, id: &str, title: &str) -> Result<(), String> {
        let id = PanelId::from(id);
        self.editor.rename_panel(&id, title).map_err(|e| e.to_string())
    }

    /// Merge a JSON style patch into a panel.
    ///
    /// # Errors
    ///
    /// Returns an error string if the patch is malformed or the panel does
    /// not exist.
    #[wasm_bindgen(js_name = restylePanel)]
    pub fn restyle_panel(&mut self, id: &str, style_json: &str) -> Result<(), String> {
        let id = PanelId::from(id);
        let patch: PanelStyle = serde_json::from_str(style_json).map_err(|e| e.to_string())?;
        self.editor
            .restyle_panel(&id, &patch)
            .map_err(|e| e.to_string())
    }

    /// Select a panel.
    ///
    /// # Errors
    ///
    /// Returns an error string if the panel does not exist.
    #[wasm_bindgen(js_name = selectPanel)]
    pub fn select_panel(&mut self, id: &str) -> Result<(), String> {
        let id = PanelId::from(id);
        self.editor.select_panel(&id).map_err(|e| e.to_string())
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.editor.deselect();
    }

    /// Id of the selected panel.
    #[wasm_bindgen(js_name = selectedId)]
    #[must_use]
    pub fn selected_id(&self) -> Option<String> {
        self.editor.selected().map(|p| p.id.to_string())
    }

    /// Flip move mode.
    #[wasm_bindgen(js_name = toggleMoveMode)]
    pub fn toggle_move_mode(&mut self) {
        self.editor.toggle_move_mode();
    }

    /// Whether move mode is on.
    #[wasm_bindgen(js_name = moveMode)]
    #[must_use]
    pub fn move_mode(&self) -> bool {
        self.editor.move_mode()
    }

    /// Whether panels may be dragged right now.
    #[wasm_bindgen(js_name = canDrag)]
    #[must_use]
    pub fn can_drag(&self) -> bool {
        self.editor.can_drag()
    }

    /// Set the canvas background colour.
    #[wasm_bindgen(js_name = setBackgroundColor)]
    pub fn set_background_color(&mut self, color: &str) -> bool {
        self.editor.set_background_color(color)
    }

    /// Set the canvas foreground colour.
    #[wasm_bindgen(js_name = setForegroundColor)]
    pub fn set_foreground_color(&mut self, color: &str) -> bool {
        self.editor.set_foreground_color(color)
    }

    /// Set rounded corners.
    #[wasm_bindgen(js_name = setRoundedCorners)]
    pub fn set_rounded_corners(&mut self, rounded: bool) -> bool {
        self.editor.set_rounded_corners(rounded)
    }

    /// Set grid visibility.
    #[wasm_bindgen(js_name = setShowGrid)]
    pub fn set_show_grid(&mut self, show: bool) -> bool {
        self.editor.set_show_grid(show)
    }

    /// Open or close the canvas settings form.
    #[wasm_bindgen(js_name = toggleSettingsEditor)]
    pub fn toggle_settings_editor(&mut self) {
        self.editor.toggle_settings_editor();
    }

    /// Whether the canvas settings form is open.
    #[wasm_bindgen(js_name = isEditingSettings)]
    #[must_use]
    pub fn is_editing_settings(&self) -> bool {
        self.editor.is_editing_settings()
    }

    /// Commit canvas dimensions; closes the settings form either way.
    ///
    /// # Errors
    ///
    /// Returns an error string if the dimensions are rejected.
    #[wasm_bindgen(js_name = commitDimensions)]
    pub fn commit_dimensions(&mut self, width: f64, height: f64) -> Result<(), String> {
        self.editor
            .commit_dimensions(width, height)
            .map_err(|e| e.to_string())
    }

    /// Undo the last change.
    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    /// Whether undo is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.editor.history().can_undo()
    }

    /// Whether redo is available.
    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.editor.history().can_redo()
    }

    /// Handle a key press; returns the chord command name that ran.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, ctrl: bool, repeat: bool) -> Option<String> {
        let input = KeyInput {
            key: key.to_string(),
            ctrl,
            repeat,
        };
        self.editor
            .key_down(&input)
            .map(|s| format!("{s:?}").to_lowercase())
    }

    /// Handle a key release.
    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, key: &str) {
        self.editor.key_up(key);
    }

    /// Apply a JSON-encoded action.
    ///
    /// # Errors
    ///
    /// Returns an error string if the action is malformed or fails.
    #[wasm_bindgen(js_name = dispatchJson)]
    pub fn dispatch_json(&mut self, json: &str) -> Result<(), String> {
        let action: Action = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.editor.dispatch(action).map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Replace the editor state with a layout document.
    ///
    /// # Errors
    ///
    /// Returns an error string if the document cannot be parsed; the editor
    /// is left untouched.
    #[wasm_bindgen(js_name = importConfig)]
    pub fn import_config(&mut self, text: &str) -> Result<(), String> {
        self.editor.import_config(text).map_err(|e| e.to_string())
    }

    /// Export the editor state as a layout document.
    ///
    /// # Errors
    ///
    /// Returns an error string if encoding fails.
    #[wasm_bindgen(js_name = exportConfig)]
    pub fn export_config(&self) -> Result<String, String> {
        self.editor.export_config().map_err(|e| e.to_string())
    }

    /// Suggested file name for exported layouts.
    #[wasm_bindgen(js_name = configFileName)]
    #[must_use]
    pub fn config_file_name() -> String {
        CONFIG_FILE_NAME.to_string()
    }

    /// Raster export request as JSON.
    #[wasm_bindgen(js_name = rasterExportJson)]
    #[must_use]
    pub fn raster_export_json(&self) -> String {
        serde_json::to_string(&self.editor.raster_export()).unwrap_or_default()
    }

    /// Panels in paint order, as document JSON.
    #[wasm_bindgen(js_name = getPanelsJson)]
    #[must_use]
    pub fn get_panels_json(&self) -> String {
        let panels: Vec<PanelDocument> = self
            .editor
            .render_order()
            .into_iter()
            .map(PanelDocument::from)
            .collect();
        serde_json::to_string(&panels).unwrap_or_default()
    }

    /// Canvas settings as JSON.
    #[wasm_bindgen(js_name = getSettingsJson)]
    #[must_use]
    pub fn get_settings_json(&self) -> String {
        serde_json::to_string(self.editor.settings()).unwrap_or_default()
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}
