//! Ordered panel collection with selection and move-mode state.

use crate::geometry::{self, ContainerSize, DuplicateMode, ResizeHandle, Size};
use crate::{CanvasError, CanvasResult, Panel, PanelId, PanelStyle, ShapeKind};

/// The authoritative list of panels on the canvas.
///
/// List order is insertion order; paint order comes from `z_index`
/// (see [`PanelStore::render_order`]).
#[derive(Debug, Clone, Default)]
pub struct PanelStore {
    /// All panels, in insertion order.
    panels: Vec<Panel>,
    /// The single selected panel, if any.
    selected: Option<PanelId>,
    /// Whether panels can be dragged without holding the modifier key.
    move_mode: bool,
}

impl PanelStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `panels` in the given order.
    #[must_use]
    pub fn from_panels(panels: Vec<Panel>) -> Self {
        Self {
            panels,
            ..Self::default()
        }
    }

    /// Stacking order for the next panel: one above the current maximum.
    ///
    /// An empty store yields `1`.
    #[must_use]
    pub fn next_z_index(&self) -> i32 {
        self.panels
            .iter()
            .map(|p| p.z_index)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }

    /// Add a default-sized panel centered in the container.
    pub fn add(&mut self, kind: ShapeKind, container: ContainerSize) -> &Panel {
        let mut panel = Panel::new(kind).with_z_index(self.next_z_index());
        let (x, y) = geometry::centered_position(container, panel.shape.size());
        panel.x = x;
        panel.y = y;
        self.push(panel)
    }

    /// Append a panel as-is.
    pub fn push(&mut self, panel: Panel) -> &Panel {
        let index = self.panels.len();
        self.panels.push(panel);
        &self.panels[index]
    }

    /// Remove a panel. Unknown ids are ignored.
    pub fn remove(&mut self, id: &PanelId) -> Option<Panel> {
        let index = self.panels.iter().position(|p| &p.id == id)?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Some(self.panels.remove(index))
    }

    /// Remove every panel and the selection.
    pub fn clear(&mut self) {
        self.panels.clear();
        self.selected = None;
    }

    /// Add a copy of the panel `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if `id` is not in the store.
    pub fn duplicate(&mut self, id: &PanelId, mode: DuplicateMode) -> CanvasResult<&Panel> {
        let source = self.require(id)?.clone();
        Ok(self.duplicate_from(&source, mode))
    }

    /// Add a copy of `source`, which need not be in the store (clipboard).
    ///
    /// The copy gets a fresh id, the next z-index, a `"{title} Copy {n}"`
    /// title and is offset on both axes according to `mode`, where `n` counts
    /// the panels whose title starts with the source title.
    pub fn duplicate_from(&mut self, source: &Panel, mode: DuplicateMode) -> &Panel {
        let count = geometry::similar_title_count(
            self.panels.iter().map(|p| p.title.as_str()),
            &source.title,
        );
        let offset = geometry::duplicate_offset(mode, count);
        let copy = Panel {
            id: PanelId::new(),
            x: source.x + offset,
            y: source.y + offset,
            shape: source.shape,
            z_index: self.next_z_index(),
            title: geometry::copy_title(&source.title, count),
            style: source.style.clone(),
        };
        self.push(copy)
    }

    /// Commit the final position of a drag gesture.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if `id` is not in the store.
    pub fn update_position(&mut self, id: &PanelId, x: f64, y: f64) -> CanvasResult<()> {
        let panel = self.require_mut(id)?;
        panel.x = x;
        panel.y = y;
        Ok(())
    }

    /// Commit the final size of a resize gesture made from `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if `id` is not in the store.
    pub fn update_size(&mut self, id: &PanelId, size: Size, handle: ResizeHandle) -> CanvasResult<()> {
        let panel = self.require_mut(id)?;
        let rect = geometry::resize_rect(panel.rect(), size, handle, panel.shape.is_circle());
        panel.set_rect(rect);
        Ok(())
    }

    /// Replace a panel's title.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if `id` is not in the store.
    pub fn update_title(&mut self, id: &PanelId, title: impl Into<String>) -> CanvasResult<()> {
        self.require_mut(id)?.title = title.into();
        Ok(())
    }

    /// Merge a style patch into a panel's style.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if `id` is not in the store.
    pub fn update_style(&mut self, id: &PanelId, patch: &PanelStyle) -> CanvasResult<()> {
        self.require_mut(id)?.style.apply(patch);
        Ok(())
    }

    /// Select a panel, replacing any previous selection.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::PanelNotFound`] if `id` is not in the store.
    pub fn select(&mut self, id: &PanelId) -> CanvasResult<()> {
        self.require(id)?;
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Currently selected panel id.
    #[must_use]
    pub fn selected_id(&self) -> Option<&PanelId> {
        self.selected.as_ref()
    }

    /// Currently selected panel.
    #[must_use]
    pub fn selected(&self) -> Option<&Panel> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Turn move mode on or off.
    pub fn set_move_mode(&mut self, enabled: bool) {
        self.move_mode = enabled;
    }

    /// Whether move mode is on.
    #[must_use]
    pub fn move_mode(&self) -> bool {
        self.move_mode
    }

    /// A resize gesture is starting; move mode is switched off.
    pub fn begin_resize(&mut self) {
        self.move_mode = false;
    }

    /// Get a panel by id.
    #[must_use]
    pub fn get(&self, id: &PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| &p.id == id)
    }

    /// Get a panel by insertion index.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    /// Whether a panel with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &PanelId) -> bool {
        self.get(id).is_some()
    }

    /// All panels in insertion order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Replace the panel list, dropping the selection.
    pub fn replace_panels(&mut self, panels: Vec<Panel>) {
        self.panels = panels;
        self.selected = None;
    }

    /// Panels sorted by z-index, bottom first. Ties keep insertion order.
    #[must_use]
    pub fn render_order(&self) -> Vec<&Panel> {
        let mut ordered: Vec<_> = self.panels.iter().collect();
        ordered.sort_by_key(|p| p.z_index);
        ordered
    }

    /// Topmost panel containing the point.
    #[must_use]
    pub fn panel_at(&self, x: f64, y: f64) -> Option<PanelId> {
        self.render_order()
            .into_iter()
            .rev()
            .find(|p| p.contains_point(x, y))
            .map(|p| p.id.clone())
    }

    /// Number of panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    fn require(&self, id: &PanelId) -> CanvasResult<&Panel> {
        self.get(id)
            .ok_or_else(|| CanvasError::PanelNotFound(id.to_string()))
    }

    fn require_mut(&mut self, id: &PanelId) -> CanvasResult<&mut Panel> {
        self.panels
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CanvasError::PanelNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: ContainerSize = ContainerSize::new(1280.0, 720.0);

    #[test]
    fn test_store_add_remove() {
        let mut store = PanelStore::new();
        assert!(store.is_empty());

        let id = store.add(ShapeKind::Square, CONTAINER).id.clone();
        assert_eq!(store.len(), 1);
        assert!(store.get(&id).is_some());

        assert!(store.remove(&id).is_some());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_centers_and_stacks() {
        let mut store = PanelStore::new();
        let first = store.add(ShapeKind::Square, CONTAINER).clone();
        assert_eq!(first.z_index, 1);
        assert!((first.x - 440.0).abs() < f64::EPSILON);
        assert!((first.y - 160.0).abs() < f64::EPSILON);

        let second = store.add(ShapeKind::Circle, CONTAINER).clone();
        assert_eq!(second.z_index, 2);
        assert!(second.shape.is_circle());
    }

    #[test]
    fn test_next_z_index_uses_maximum() {
        let mut store = PanelStore::new();
        store.push(Panel::new(ShapeKind::Square).with_z_index(7));
        store.push(Panel::new(ShapeKind::Square).with_z_index(3));
        assert_eq!(store.next_z_index(), 8);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = PanelStore::new();
        store.add(ShapeKind::Square, CONTAINER);
        assert!(store.remove(&PanelId::new()).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_clears_matching_selection() {
        let mut store = PanelStore::new();
        let a = store.add(ShapeKind::Square, CONTAINER).id.clone();
        let b = store.add(ShapeKind::Square, CONTAINER).id.clone();

        store.select(&a).expect("select a");
        store.remove(&b);
        assert_eq!(store.selected_id(), Some(&a));

        store.remove(&a);
        assert_eq!(store.selected_id(), None);
    }

    #[test]
    fn test_clear() {
        let mut store = PanelStore::new();
        let id = store.add(ShapeKind::Square, CONTAINER).id.clone();
        store.select(&id).expect("select");
        store.clear();
        assert!(store.is_empty());
        assert!(store.selected_id().is_none());
    }

    #[test]
    fn test_paste_titles_count_prefix_matches() {
        let mut store = PanelStore::new();
        let id = store
            .push(Panel::new(ShapeKind::Square).with_title("X"))
            .id
            .clone();

        let first = store.duplicate(&id, DuplicateMode::Paste).expect("dup").clone();
        let second = store.duplicate(&id, DuplicateMode::Paste).expect("dup").clone();

        assert_eq!(first.title, "X Copy 1");
        assert_eq!(second.title, "X Copy 2");
        assert!((first.x - 10.0).abs() < f64::EPSILON);
        assert!((second.y - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_offset_grows_with_copies() {
        let mut store = PanelStore::new();
        let id = store
            .push(
                Panel::new(ShapeKind::Square)
                    .with_title("Card")
                    .with_position(100.0, 50.0),
            )
            .id
            .clone();

        let first = store.duplicate(&id, DuplicateMode::Duplicate).expect("dup").clone();
        assert!((first.x - 120.0).abs() < f64::EPSILON);
        assert!((first.y - 70.0).abs() < f64::EPSILON);

        let second = store.duplicate(&id, DuplicateMode::Duplicate).expect("dup").clone();
        assert!((second.x - 140.0).abs() < f64::EPSILON);
        assert_eq!(second.title, "Card Copy 2");
    }

    #[test]
    fn test_duplicate_keeps_shape_and_style_with_fresh_id() {
        let mut store = PanelStore::new();
        let style = PanelStyle {
            fill_color: Some("#112233".to_string()),
            ..PanelStyle::default()
        };
        let source = store
            .push(
                Panel::new(ShapeKind::Circle)
                    .with_z_index(4)
                    .with_style(style.clone()),
            )
            .clone();
        store.push(Panel::new(ShapeKind::Square).with_z_index(9));

        let copy = store
            .duplicate(&source.id, DuplicateMode::Duplicate)
            .expect("dup")
            .clone();
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.shape, source.shape);
        assert_eq!(copy.style, style);
        assert_eq!(copy.z_index, 10);
    }

    #[test]
    fn test_duplicate_unknown_fails() {
        let mut store = PanelStore::new();
        let result = store.duplicate(&PanelId::new(), DuplicateMode::Paste);
        assert!(matches!(result, Err(CanvasError::PanelNotFound(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_position_not_clamped() {
        let mut store = PanelStore::new();
        let id = store.add(ShapeKind::Square, CONTAINER).id.clone();
        store.update_position(&id, -30.0, -40.0).expect("update");
        let panel = store.get(&id).expect("exists");
        assert!((panel.x + 30.0).abs() < f64::EPSILON);
        assert!((panel.y + 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_size_circle_stays_round() {
        let mut store = PanelStore::new();
        let id = store.add(ShapeKind::Circle, CONTAINER).id.clone();
        store
            .update_size(&id, Size::new(150.0, 320.0), ResizeHandle::Sw)
            .expect("resize");
        let panel = store.get(&id).expect("exists");
        assert!((panel.width() - 320.0).abs() < f64::EPSILON);
        assert!((panel.height() - 320.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_updates_on_unknown_id_fail() {
        let mut store = PanelStore::new();
        let id = PanelId::new();
        assert!(store.update_position(&id, 1.0, 1.0).is_err());
        assert!(store
            .update_size(&id, Size::new(100.0, 100.0), ResizeHandle::E)
            .is_err());
        assert!(store.update_title(&id, "t").is_err());
        assert!(store.update_style(&id, &PanelStyle::default()).is_err());
        assert!(store.select(&id).is_err());
    }

    #[test]
    fn test_single_selection() {
        let mut store = PanelStore::new();
        let a = store.add(ShapeKind::Square, CONTAINER).id.clone();
        let b = store.add(ShapeKind::Square, CONTAINER).id.clone();
        store.select(&a).expect("select a");
        store.select(&b).expect("select b");
        assert_eq!(store.selected_id(), Some(&b));
        store.deselect();
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_begin_resize_turns_off_move_mode() {
        let mut store = PanelStore::new();
        store.set_move_mode(true);
        assert!(store.move_mode());
        store.begin_resize();
        assert!(!store.move_mode());
    }

    #[test]
    fn test_render_order_and_hit_testing() {
        let mut store = PanelStore::new();
        let top = store
            .push(Panel::new(ShapeKind::Square).with_z_index(5))
            .id
            .clone();
        let bottom = store
            .push(Panel::new(ShapeKind::Square).with_z_index(2))
            .id
            .clone();

        let order: Vec<_> = store.render_order().iter().map(|p| p.id.clone()).collect();
        assert_eq!(order, vec![bottom, top.clone()]);

        assert_eq!(store.panel_at(10.0, 10.0), Some(top));
        assert_eq!(store.panel_at(1000.0, 1000.0), None);
    }
}
