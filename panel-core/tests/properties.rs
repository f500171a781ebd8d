//! Property tests for panel geometry, history and the layout codec.

use std::collections::HashSet;

use panel_core::config::{deserialize, serialize};
use panel_core::{
    CanvasSettings, ContainerSize, DuplicateMode, Editor, FontWeight, History, Layout, Panel,
    PanelStore, PanelStyle, ResizeHandle, ShapeKind, Size,
};
use proptest::prelude::*;

const VIEWPORT: ContainerSize = ContainerSize::new(1280.0, 720.0);

/// Half-unit values are exact in binary and in the JSON text form.
fn coord() -> impl Strategy<Value = f64> {
    (-4000i32..4000).prop_map(|v| f64::from(v) / 2.0)
}

fn extent() -> impl Strategy<Value = f64> {
    (200i32..2000).prop_map(|v| f64::from(v) / 2.0)
}

fn arb_kind() -> impl Strategy<Value = ShapeKind> {
    prop_oneof![Just(ShapeKind::Square), Just(ShapeKind::Circle)]
}

fn arb_handle() -> impl Strategy<Value = ResizeHandle> {
    prop::sample::select(ResizeHandle::ALL.to_vec())
}

fn arb_style() -> impl Strategy<Value = PanelStyle> {
    (
        prop::option::of("#[0-9a-f]{6}"),
        prop::option::of(coord()),
        prop::option::of(prop_oneof![Just(FontWeight::Normal), Just(FontWeight::Bold)]),
        prop::option::of("[a-z0-9 ]{0,16}"),
    )
        .prop_map(|(fill_color, stroke_width, font_weight, box_shadow)| PanelStyle {
            fill_color,
            stroke_width,
            font_weight,
            box_shadow,
            ..PanelStyle::default()
        })
}

fn arb_panel() -> impl Strategy<Value = Panel> {
    (
        arb_kind(),
        coord(),
        coord(),
        extent(),
        -50i32..50,
        ".{0,24}",
        arb_style(),
    )
        .prop_map(|(kind, x, y, side, z, title, style)| {
            let mut panel = Panel::new(kind)
                .with_position(x, y)
                .with_z_index(z)
                .with_title(title)
                .with_style(style);
            let mut rect = panel.rect();
            rect.width = side;
            rect.height = side;
            panel.set_rect(rect);
            panel
        })
}

fn arb_layout() -> impl Strategy<Value = Layout> {
    (
        prop::collection::vec(arb_panel(), 0..8),
        extent(),
        extent(),
        "#[0-9a-f]{6}",
        "#[0-9a-f]{6}",
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(panels, width, height, background_color, foreground_color, rounded, grid)| Layout {
                panels,
                settings: CanvasSettings {
                    width,
                    height,
                    background_color,
                    foreground_color,
                    rounded_corners: rounded,
                    show_grid: grid,
                },
            },
        )
}

#[derive(Debug, Clone)]
enum Op {
    Add(ShapeKind),
    Remove(usize),
    Duplicate(usize, bool),
    CopyPaste(usize),
    Undo,
    Redo,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_kind().prop_map(Op::Add),
        (0usize..10).prop_map(Op::Remove),
        (0usize..10, any::<bool>()).prop_map(|(i, paste)| Op::Duplicate(i, paste)),
        (0usize..10).prop_map(Op::CopyPaste),
        Just(Op::Undo),
        Just(Op::Redo),
    ]
}

fn apply(editor: &mut Editor, op: &Op) {
    let id_at = |editor: &Editor, index: usize| editor.panels().get(index).map(|p| p.id.clone());
    match *op {
        Op::Add(kind) => {
            editor.add_panel(kind, Some(VIEWPORT)).expect("viewport measured");
        }
        Op::Remove(index) => {
            if let Some(id) = id_at(editor, index) {
                editor.remove_panel(&id);
            }
        }
        Op::Duplicate(index, paste) => {
            if let Some(id) = id_at(editor, index) {
                editor
                    .duplicate_panel(&id, DuplicateMode::from_via_paste(paste))
                    .expect("panel exists");
            }
        }
        Op::CopyPaste(index) => {
            if let Some(id) = id_at(editor, index) {
                editor.select_panel(&id).expect("panel exists");
                editor.copy_selected();
                editor.paste();
            }
        }
        Op::Undo => {
            editor.undo();
        }
        Op::Redo => {
            editor.redo();
        }
    }
}

proptest! {
    #[test]
    fn prop_panel_ids_stay_unique(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut editor = Editor::default();
        for op in &ops {
            apply(&mut editor, op);
            let ids: HashSet<_> = editor.panels().iter().map(|p| &p.id).collect();
            prop_assert_eq!(ids.len(), editor.panels().len(), "duplicate id after {:?}", op);
        }
    }

    #[test]
    fn prop_circles_stay_round(
        width in extent(),
        height in extent(),
        handle in arb_handle(),
    ) {
        let mut store = PanelStore::new();
        let id = store.add(ShapeKind::Circle, VIEWPORT).id.clone();
        store.update_size(&id, Size::new(width, height), handle).expect("panel exists");

        let panel = store.get(&id).expect("panel exists");
        prop_assert!((panel.width() - panel.height()).abs() < f64::EPSILON);
        prop_assert!((panel.width() - width.max(height)).abs() < f64::EPSILON);
    }

    #[test]
    fn prop_se_handle_keeps_origin(width in extent(), height in extent()) {
        let mut store = PanelStore::new();
        let id = store.add(ShapeKind::Square, VIEWPORT).id.clone();
        let before = store.get(&id).expect("panel exists").rect();

        store.update_size(&id, Size::new(width, height), ResizeHandle::Se).expect("panel exists");

        let after = store.get(&id).expect("panel exists").rect();
        prop_assert!((after.x - before.x).abs() < f64::EPSILON);
        prop_assert!((after.y - before.y).abs() < f64::EPSILON);
    }

    #[test]
    fn prop_nw_handle_keeps_bottom_right(
        kind in arb_kind(),
        width in extent(),
        height in extent(),
    ) {
        let mut store = PanelStore::new();
        let id = store.add(kind, VIEWPORT).id.clone();
        let before = store.get(&id).expect("panel exists").rect();

        store.update_size(&id, Size::new(width, height), ResizeHandle::Nw).expect("panel exists");

        let after = store.get(&id).expect("panel exists").rect();
        prop_assert!((after.right() - before.right()).abs() < f64::EPSILON);
        prop_assert!((after.bottom() - before.bottom()).abs() < f64::EPSILON);
    }

    #[test]
    fn prop_snapshot_then_undo_restores(
        states in prop::collection::vec(-100i32..100, 1..10),
        current in -100i32..100,
    ) {
        let mut history = History::new(None);
        for state in &states {
            history.snapshot(*state);
        }
        let last = *states.last().expect("non-empty");

        prop_assert_eq!(history.undo(current), Some(last));
        prop_assert_eq!(history.redo_entries(), &[current][..]);
        prop_assert_eq!(history.undo_depth(), states.len() - 1);
    }

    #[test]
    fn prop_layout_document_roundtrip(layout in arb_layout()) {
        let text = serialize(&layout).expect("serialize");
        let restored = deserialize(&text).expect("deserialize");
        prop_assert_eq!(restored, layout);
    }
}
