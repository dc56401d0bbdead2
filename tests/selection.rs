//! Selection tests - set operations, pointer gestures, keyboard movement

mod common;

use std::time::{Duration, Instant};

use common::{click, click_cell, flat, pos, press, press_with, test_model, test_model_with};
use sheetgrid::messages::{Direction, HitTarget, Key, Modifiers, PointerMsg, SelectMsg, TimerId};
use sheetgrid::model::GridBounds;
use sheetgrid::selection::{SelectMode, SelectionModel};
use sheetgrid::update::update;
use sheetgrid::{Cmd, GridConfig, GridMsg};

fn select(model: &mut sheetgrid::GridModel, msg: SelectMsg) -> Option<Cmd> {
    update(model, GridMsg::Select(msg))
}

// ========================================================================
// SelectionModel operations
// ========================================================================

#[test]
fn test_select_row_replace_on_eight_columns() {
    let bounds = GridBounds::new(10, 8);
    let mut sel = SelectionModel::new();
    sel.select_single(pos(0, 0), bounds).unwrap();
    sel.select_row(4, SelectMode::Replace, bounds).unwrap();

    assert_eq!(sel.len(), 8);
    assert!(sel.cells().all(|p| p.row == 4));
    assert_eq!(sel.selected_rows(), &[4]);
    assert!(sel.selected_columns().is_empty());
}

#[test]
fn test_range_is_commutative() {
    let bounds = GridBounds::new(20, 10);
    let pairs = [
        (pos(0, 0), pos(3, 4)),
        (pos(7, 2), pos(1, 9)),
        (pos(5, 5), pos(5, 5)),
        (pos(19, 0), pos(0, 9)),
    ];
    for (a, b) in pairs {
        let mut forward = SelectionModel::new();
        forward.select_range(a, b, bounds).unwrap();
        let mut backward = SelectionModel::new();
        backward.select_range(b, a, bounds).unwrap();
        assert_eq!(
            forward.cells().collect::<Vec<_>>(),
            backward.cells().collect::<Vec<_>>()
        );
        let rows = a.row.abs_diff(b.row) + 1;
        let cols = a.col.abs_diff(b.col) + 1;
        assert_eq!(forward.len(), rows * cols);
    }
}

#[test]
fn test_bounding_rect_of_sparse_selection() {
    let bounds = GridBounds::new(10, 10);
    let mut sel = SelectionModel::new();
    sel.select_single(pos(2, 7), bounds).unwrap();
    sel.toggle(pos(5, 1), bounds).unwrap();
    sel.toggle(pos(3, 4), bounds).unwrap();

    let rect = sel.bounding_rect().unwrap();
    assert_eq!((rect.min_row, rect.min_col), (2, 1));
    assert_eq!((rect.max_row, rect.max_col), (5, 7));
}

#[test]
fn test_derived_revision_only_moves_on_value_change() {
    let bounds = GridBounds::new(4, 3);
    let mut sel = SelectionModel::new();
    sel.select_single(pos(0, 0), bounds).unwrap();
    let derived = sel.derived_revision();

    // Still no full row or column
    sel.select_single(pos(1, 1), bounds).unwrap();
    assert_eq!(sel.derived_revision(), derived);

    sel.select_row(2, SelectMode::Replace, bounds).unwrap();
    assert_eq!(sel.derived_revision(), derived + 1);

    // Same row again is not a change
    sel.select_row(2, SelectMode::Replace, bounds).unwrap();
    assert_eq!(sel.derived_revision(), derived + 1);
}

#[test]
fn test_column_range_then_select_all() {
    let bounds = GridBounds::new(5, 6);
    let mut sel = SelectionModel::new();
    sel.select_column(1, SelectMode::Replace, bounds).unwrap();
    sel.select_column(3, SelectMode::Range, bounds).unwrap();
    assert_eq!(sel.selected_columns(), &[1, 2, 3]);
    assert_eq!(sel.anchor(), Some(pos(0, 1)));

    sel.select_all(bounds);
    assert_eq!(sel.len(), 30);
    assert_eq!(sel.selected_rows().len(), 5);
}

// ========================================================================
// Selection messages
// ========================================================================

#[test]
fn test_select_message_emits_summary() {
    let mut model = test_model(10, 4);
    let cmds = flat(select(
        &mut model,
        SelectMsg::Range {
            from: pos(1, 1),
            to: pos(2, 3),
        },
    ));
    let summary = cmds
        .iter()
        .find_map(|c| match c {
            Cmd::EmitSelectionChange(s) => Some(*s),
            _ => None,
        })
        .expect("selection change emitted");
    assert_eq!(summary.len, 6);
}

#[test]
fn test_invalid_select_message_is_noop() {
    let mut model = test_model(10, 4);
    select(&mut model, SelectMsg::Single(pos(1, 1)));
    let rev = model.selection.revision();

    assert!(select(&mut model, SelectMsg::Single(pos(10, 0))).is_none());
    assert!(select(&mut model, SelectMsg::Row { row: 99, mode: SelectMode::Replace }).is_none());
    assert_eq!(model.selection.revision(), rev);
    assert!(model.selection.is_selected(pos(1, 1)));
}

#[test]
fn test_repeated_selection_emits_nothing() {
    let mut model = test_model(10, 4);
    select(&mut model, SelectMsg::Single(pos(3, 3)));
    assert!(select(&mut model, SelectMsg::Single(pos(3, 3))).is_none());
}

#[test]
fn test_large_selection_raises_processing() {
    let config = GridConfig {
        selection_processing_threshold: 50,
        ..GridConfig::default()
    };
    let mut model = test_model_with(common::test_grid(20, 5), config);
    let cmds = flat(select(&mut model, SelectMsg::All));
    assert!(model.processing);
    assert!(cmds.iter().any(|c| matches!(
        c,
        Cmd::ScheduleTimer {
            id: TimerId::ProcessingDone,
            ..
        }
    )));

    update(
        &mut model,
        GridMsg::Timer {
            id: TimerId::ProcessingDone,
            at: Instant::now(),
        },
    );
    assert!(!model.processing);
}

// ========================================================================
// Pointer gestures
// ========================================================================

#[test]
fn test_click_shift_click_ctrl_click() {
    let mut model = test_model(10, 5);
    click_cell(&mut model, 1, 1);
    assert_eq!(model.selection.len(), 1);

    click(&mut model, HitTarget::Cell(pos(3, 2)), Modifiers::shift());
    assert_eq!(model.selection.len(), 6);
    assert_eq!(model.selection.anchor(), Some(pos(1, 1)));

    click(&mut model, HitTarget::Cell(pos(2, 2)), Modifiers::ctrl());
    assert_eq!(model.selection.len(), 5);
    assert!(!model.selection.is_selected(pos(2, 2)));
}

#[test]
fn test_plain_click_on_selected_cell_keeps_it() {
    let mut model = test_model(10, 5);
    click_cell(&mut model, 2, 2);
    click_cell(&mut model, 2, 2);
    assert!(model.selection.is_selected(pos(2, 2)));
}

#[test]
fn test_repeat_click_deselects_when_configured() {
    let config = GridConfig {
        repeat_click_deselects: true,
        ..GridConfig::default()
    };
    let mut model = test_model_with(common::test_grid(10, 5), config);
    click_cell(&mut model, 2, 2);
    click_cell(&mut model, 2, 2);
    assert!(model.selection.is_empty());
}

#[test]
fn test_header_clicks() {
    let mut model = test_model(6, 4);
    click(&mut model, HitTarget::RowNumber(2), Modifiers::NONE);
    assert_eq!(model.selection.selected_rows(), &[2]);

    click(&mut model, HitTarget::RowNumber(4), Modifiers::shift());
    assert_eq!(model.selection.selected_rows(), &[2, 3, 4]);

    click(&mut model, HitTarget::ColumnHeader(1), Modifiers::NONE);
    assert_eq!(model.selection.selected_columns(), &[1]);
    assert_eq!(model.selection.len(), 6);

    click(&mut model, HitTarget::Corner, Modifiers::NONE);
    assert_eq!(model.selection.len(), 24);
}

#[test]
fn test_drag_selects_rectangle_with_throttle() {
    let mut model = test_model(20, 6);
    let t0 = Instant::now();
    update(
        &mut model,
        GridMsg::Pointer(PointerMsg::Down {
            target: HitTarget::Cell(pos(1, 1)),
            modifiers: Modifiers::NONE,
            at: t0,
        }),
    );

    let enter = |model: &mut sheetgrid::GridModel, row, col, ms| {
        update(
            model,
            GridMsg::Pointer(PointerMsg::Enter {
                target: HitTarget::Cell(pos(row, col)),
                primary_held: true,
                at: t0 + Duration::from_millis(ms),
            }),
        )
    };

    // First hover applies immediately
    enter(&mut model, 2, 2, 10);
    assert_eq!(model.selection.len(), 4);

    // Within the throttle interval: deferred, flush timer requested once
    let cmd = enter(&mut model, 4, 3, 20);
    assert!(matches!(
        cmd,
        Some(Cmd::ScheduleTimer {
            id: TimerId::DragFlush,
            ..
        })
    ));
    assert!(enter(&mut model, 5, 3, 30).is_none());
    assert_eq!(model.selection.len(), 4);

    // Flush applies the latest hover
    update(
        &mut model,
        GridMsg::Timer {
            id: TimerId::DragFlush,
            at: t0 + Duration::from_millis(60),
        },
    );
    assert_eq!(model.selection.len(), 5 * 3);
    assert_eq!(model.selection.anchor(), Some(pos(1, 1)));

    update(
        &mut model,
        GridMsg::Pointer(PointerMsg::Up {
            at: t0 + Duration::from_millis(70),
        }),
    );
    assert!(model.drag.is_none());

    // Hovering after release changes nothing
    assert!(enter(&mut model, 9, 5, 200).is_none());
    assert_eq!(model.selection.len(), 15);
}

#[test]
fn test_pointer_up_applies_pending_hover() {
    let mut model = test_model(20, 6);
    let t0 = Instant::now();
    update(
        &mut model,
        GridMsg::Pointer(PointerMsg::Down {
            target: HitTarget::Cell(pos(0, 0)),
            modifiers: Modifiers::NONE,
            at: t0,
        }),
    );
    for (ms, row) in [(5, 1), (10, 3)] {
        update(
            &mut model,
            GridMsg::Pointer(PointerMsg::Enter {
                target: HitTarget::Cell(pos(row, 0)),
                primary_held: true,
                at: t0 + Duration::from_millis(ms),
            }),
        );
    }
    assert_eq!(model.selection.len(), 2);

    update(
        &mut model,
        GridMsg::Pointer(PointerMsg::Up {
            at: t0 + Duration::from_millis(15),
        }),
    );
    assert_eq!(model.selection.len(), 4);
}

// ========================================================================
// Keyboard movement
// ========================================================================

#[test]
fn test_arrows_move_and_clamp() {
    let mut model = test_model(5, 3);
    click_cell(&mut model, 0, 0);

    press(&mut model, Key::Arrow(Direction::Up));
    assert_eq!(model.selection.anchor(), Some(pos(0, 0)));

    press(&mut model, Key::Arrow(Direction::Down));
    press(&mut model, Key::Arrow(Direction::Right));
    assert_eq!(model.selection.anchor(), Some(pos(1, 1)));
    assert_eq!(model.selection.len(), 1);

    for _ in 0..10 {
        press(&mut model, Key::Arrow(Direction::Right));
    }
    assert_eq!(model.selection.anchor(), Some(pos(1, 2)));
}

#[test]
fn test_shift_arrows_extend_from_anchor() {
    let mut model = test_model(10, 5);
    click_cell(&mut model, 2, 2);
    press_with(&mut model, Key::Arrow(Direction::Down), Modifiers::shift());
    press_with(&mut model, Key::Arrow(Direction::Down), Modifiers::shift());
    press_with(&mut model, Key::Arrow(Direction::Left), Modifiers::shift());

    assert_eq!(model.selection.anchor(), Some(pos(2, 2)));
    assert_eq!(model.selection.head(), Some(pos(4, 1)));
    assert_eq!(model.selection.len(), 6);

    // Plain arrow collapses to a single cell next to the anchor
    press(&mut model, Key::Arrow(Direction::Right));
    assert_eq!(model.selection.len(), 1);
    assert_eq!(model.selection.anchor(), Some(pos(2, 3)));
}

#[test]
fn test_tab_wraps_rows() {
    let mut model = test_model(3, 2);
    click_cell(&mut model, 0, 1);
    press(&mut model, Key::Tab);
    assert_eq!(model.selection.anchor(), Some(pos(1, 0)));
    press_with(&mut model, Key::Tab, Modifiers::shift());
    assert_eq!(model.selection.anchor(), Some(pos(0, 1)));
}

#[test]
fn test_home_end_and_ctrl_variants() {
    let mut model = test_model(30, 6);
    click_cell(&mut model, 4, 3);
    press(&mut model, Key::End);
    assert_eq!(model.selection.anchor(), Some(pos(4, 5)));
    press(&mut model, Key::Home);
    assert_eq!(model.selection.anchor(), Some(pos(4, 0)));
    press_with(&mut model, Key::End, Modifiers::ctrl());
    assert_eq!(model.selection.anchor(), Some(pos(29, 5)));
    press_with(&mut model, Key::Home, Modifiers::ctrl());
    assert_eq!(model.selection.anchor(), Some(pos(0, 0)));
}

#[test]
fn test_page_down_moves_by_visible_rows() {
    let mut model = test_model(100, 3);
    click_cell(&mut model, 0, 0);
    // 600px body / 30px rows
    press(&mut model, Key::PageDown);
    assert_eq!(model.selection.anchor(), Some(pos(20, 0)));
    press(&mut model, Key::PageUp);
    assert_eq!(model.selection.anchor(), Some(pos(0, 0)));
}

#[test]
fn test_keyboard_move_scrolls_into_view() {
    let mut model = test_model(100, 3);
    click_cell(&mut model, 19, 0);
    let cmds = flat(press(&mut model, Key::Arrow(Direction::Down)));
    assert!(cmds.iter().any(|c| matches!(c, Cmd::ScrollTo { .. })));
    // Row 20 bottom edge at 630px, body is 600px tall
    assert_eq!(model.scroll.offsets().top, 30.0);
}

#[test]
fn test_ctrl_a_selects_everything() {
    let mut model = test_model(4, 4);
    press_with(&mut model, Key::Char('a'), Modifiers::ctrl());
    assert_eq!(model.selection.len(), 16);
    assert!(model.edit.is_idle());
}
