//! Keyboard handling
//!
//! While a session is open keys go to the draft. Otherwise they move the
//! active cell, which is the selection anchor.

use super::clipboard::{copy_selection, cut_selection, delete_selection};
use super::edit::{begin_cell, cancel, commit_and_advance, type_char};
use super::selection::selection_changed;
use crate::commands::Cmd;
use crate::edit::next_cell;
use crate::messages::{Direction, Key, Modifiers};
use crate::model::{CellPosition, GridBounds, GridModel};

pub fn update_key(model: &mut GridModel, key: Key, modifiers: Modifiers) -> Option<Cmd> {
    if model.edit.is_idle() {
        idle_key(model, key, modifiers)
    } else {
        editing_key(model, key, modifiers)
    }
}

fn editing_key(model: &mut GridModel, key: Key, modifiers: Modifiers) -> Option<Cmd> {
    match key {
        Key::Enter | Key::Tab => commit_and_advance(model),
        Key::Escape => cancel(model),
        Key::Backspace => model.edit.backspace().then(Cmd::redraw_editor),
        Key::Char(ch) if !modifiers.command() => type_char(model, ch),
        // Host handles cursor movement inside its editor widget
        _ => None,
    }
}

fn idle_key(model: &mut GridModel, key: Key, modifiers: Modifiers) -> Option<Cmd> {
    if modifiers.command() {
        if let Key::Char(ch) = key {
            return match ch.to_ascii_lowercase() {
                'c' => copy_selection(model),
                'x' => cut_selection(model),
                'v' => Some(Cmd::ReadClipboard),
                'a' => select_all(model),
                _ => None,
            };
        }
    }

    let bounds = model.bounds();
    let active = model.selection.anchor();

    match key {
        Key::Char(ch) if !modifiers.command() && !ch.is_control() => type_char(model, ch),
        Key::Enter | Key::F2 => begin_cell(model, active?, None),
        Key::Escape => None,
        Key::Delete | Key::Backspace => delete_selection(model),
        Key::Tab => {
            let from = active?;
            let to = if modifiers.shift {
                prev_cell(from, bounds)
            } else {
                next_cell(from, bounds)
            };
            move_to(model, to?, false)
        }
        Key::Arrow(dir) => {
            let cursor = cursor(model, modifiers)?;
            let to = step(cursor, dir, bounds);
            move_to(model, to, modifiers.shift)
        }
        Key::Home => {
            let cursor = cursor(model, modifiers)?;
            let to = if modifiers.command() {
                CellPosition::new(0, 0)
            } else {
                CellPosition::new(cursor.row, 0)
            };
            move_to(model, to, modifiers.shift)
        }
        Key::End => {
            let cursor = cursor(model, modifiers)?;
            let last = bounds.last()?;
            let to = if modifiers.command() {
                last
            } else {
                CellPosition::new(cursor.row, last.col)
            };
            move_to(model, to, modifiers.shift)
        }
        Key::PageUp | Key::PageDown => {
            let cursor = cursor(model, modifiers)?;
            let page = page_rows(model);
            let row = if key == Key::PageUp {
                cursor.row.saturating_sub(page)
            } else {
                (cursor.row + page).min(bounds.rows.saturating_sub(1))
            };
            move_to(model, CellPosition::new(row, cursor.col), modifiers.shift)
        }
        Key::Char(_) => None,
    }
}

/// Where movement starts: the extension head with Shift, else the active cell
fn cursor(model: &GridModel, modifiers: Modifiers) -> Option<CellPosition> {
    let anchor = model.selection.anchor()?;
    if modifiers.shift {
        Some(model.selection.head().unwrap_or(anchor))
    } else {
        Some(anchor)
    }
}

fn step(pos: CellPosition, dir: Direction, bounds: GridBounds) -> CellPosition {
    let last_row = bounds.rows.saturating_sub(1);
    let last_col = bounds.cols.saturating_sub(1);
    match dir {
        Direction::Up => CellPosition::new(pos.row.saturating_sub(1), pos.col),
        Direction::Down => CellPosition::new((pos.row + 1).min(last_row), pos.col),
        Direction::Left => CellPosition::new(pos.row, pos.col.saturating_sub(1)),
        Direction::Right => CellPosition::new(pos.row, (pos.col + 1).min(last_col)),
    }
}

fn prev_cell(pos: CellPosition, bounds: GridBounds) -> Option<CellPosition> {
    if pos.col > 0 {
        Some(CellPosition::new(pos.row, pos.col - 1))
    } else if pos.row > 0 {
        Some(CellPosition::new(pos.row - 1, bounds.cols.saturating_sub(1)))
    } else {
        None
    }
}

/// Rows that fit in the body, at least one
fn page_rows(model: &GridModel) -> usize {
    let geometry = model.geometry();
    let Some(container) = model.viewport.container() else {
        return 1;
    };
    let body = geometry.body_size(container);
    if geometry.row_height <= 0.0 {
        return 1;
    }
    ((body.height / geometry.row_height).floor() as usize).max(1)
}

fn move_to(model: &mut GridModel, to: CellPosition, extend: bool) -> Option<Cmd> {
    let before = model.selection.revision();
    let bounds = model.bounds();
    let result = if extend {
        model.selection.extend_to(to, bounds)
    } else {
        model.selection.select_single(to, bounds)
    };
    if let Err(e) = result {
        tracing::warn!("Ignoring keyboard move: {}", e);
        return None;
    }
    let changed = selection_changed(model, before);
    let scrolled = model.scroll_to_cell(to.row, to.col, false);
    Some(Cmd::batch(vec![changed.into(), scrolled.into()]))
}

fn select_all(model: &mut GridModel) -> Option<Cmd> {
    let before = model.selection.revision();
    let bounds = model.bounds();
    model.selection.select_all(bounds);
    selection_changed(model, before)
}
