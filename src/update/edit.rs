//! Edit session handling
//!
//! Every path that closes a session goes through `commit_open` or `cancel`,
//! and every path that opens one commits the previous session first.

use std::sync::Arc;

use super::data::adopt_and_emit;
use super::selection::selection_changed;
use crate::commands::Cmd;
use crate::edit::{commit_cell, commit_header, next_cell, EditSession, EditTarget};
use crate::error::GridError;
use crate::messages::EditMsg;
use crate::model::{CellPosition, GridModel};

pub fn update_edit(model: &mut GridModel, msg: EditMsg) -> Option<Cmd> {
    match msg {
        EditMsg::BeginCell(pos) => begin_cell(model, pos, None),
        EditMsg::RenameHeader(col) => begin_header(model, col),
        EditMsg::SetDraft(text) => model.edit.set_draft(text).then(Cmd::redraw_editor),
        EditMsg::Char(ch) => type_char(model, ch),
        EditMsg::Backspace => model.edit.backspace().then(Cmd::redraw_editor),
        EditMsg::Commit => commit_and_advance(model),
        EditMsg::Cancel => cancel(model),
    }
}

/// Open a cell edit. With `first_char` the draft is only that character.
pub(super) fn begin_cell(
    model: &mut GridModel,
    pos: CellPosition,
    first_char: Option<char>,
) -> Option<Cmd> {
    if !model.data.contains(pos) {
        tracing::warn!("Ignoring edit request: {}", GridError::invalid(pos));
        return None;
    }
    if first_char.is_none() && model.edit.target() == Some(EditTarget::Cell(pos)) {
        return None;
    }

    let mut cmds = vec![Cmd::from(resolve_open_session(model))];

    let before = model.selection.revision();
    if model.selection.select_single(pos, model.data.bounds()).is_ok() {
        cmds.push(selection_changed(model, before).into());
    }

    model.edit = match first_char {
        Some(ch) => EditSession::cell_with_char(pos, ch),
        None => EditSession::cell(&model.data, pos),
    };
    tracing::debug!(row = pos.row, col = pos.col, "editing cell");

    cmds.push(model.scroll_to_cell(pos.row, pos.col, false).into());
    cmds.push(Cmd::redraw_editor());
    Some(Cmd::batch(cmds))
}

pub(super) fn begin_header(model: &mut GridModel, col: usize) -> Option<Cmd> {
    if col >= model.data.column_count() {
        tracing::warn!(col, "Ignoring rename of a column outside the grid");
        return None;
    }
    if model.edit.target() == Some(EditTarget::Header(col)) {
        return None;
    }
    let commit = resolve_open_session(model);
    model.edit = EditSession::header(&model.data, col);
    tracing::debug!(col, "editing header");
    Some(Cmd::batch(vec![commit.into(), Cmd::redraw_editor()]))
}

/// An open session when a new one is requested: commit it rather than
/// dropping its draft
fn resolve_open_session(model: &mut GridModel) -> Option<Cmd> {
    if model.edit.is_idle() {
        return None;
    }
    tracing::debug!("{}, committing the open one", GridError::ConcurrentEditConflict);
    commit_open(model)
}

/// Commit whatever session is open. Unchanged drafts commit nothing.
pub(super) fn commit_open(model: &mut GridModel) -> Option<Cmd> {
    match std::mem::take(&mut model.edit) {
        EditSession::Idle => None,
        EditSession::EditingCell { row, col, draft } => {
            let emitted = commit_cell(&model.data, CellPosition::new(row, col), &draft)
                .map(|next| adopt_and_emit(model, next));
            Some(Cmd::batch(vec![emitted.into(), Cmd::redraw_editor()]))
        }
        EditSession::EditingHeader { col, draft } => {
            let emitted = commit_header(&model.data, col, &draft).map(|next| {
                model.adopt_data(next.clone());
                Cmd::EmitHeaderChange(Arc::clone(next.columns()))
            });
            Some(Cmd::batch(vec![emitted.into(), Cmd::redraw_editor()]))
        }
    }
}

/// Enter/Tab: commit, then open the next cell (or header)
pub(super) fn commit_and_advance(model: &mut GridModel) -> Option<Cmd> {
    let target = model.edit.target()?;
    let commit = commit_open(model);

    let advance = match target {
        EditTarget::Cell(pos) => {
            next_cell(pos, model.bounds()).and_then(|next| begin_cell(model, next, None))
        }
        EditTarget::Header(col) => {
            let has_next = col + 1 < model.data.column_count();
            if model.config.advance_header_on_commit && has_next {
                begin_header(model, col + 1)
            } else {
                None
            }
        }
    };
    Some(Cmd::batch(vec![commit.into(), advance.into()]))
}

pub(super) fn cancel(model: &mut GridModel) -> Option<Cmd> {
    if model.edit.is_idle() {
        return None;
    }
    tracing::debug!("edit discarded");
    model.edit = EditSession::Idle;
    Some(Cmd::redraw_editor())
}

/// Printable character: extend the draft, or start type-to-replace on the
/// active cell while it is still selected
pub(super) fn type_char(model: &mut GridModel, ch: char) -> Option<Cmd> {
    if model.edit.push_char(ch) {
        return Some(Cmd::redraw_editor());
    }
    let active = model
        .selection
        .anchor()
        .filter(|&pos| model.selection.is_selected(pos))?;
    begin_cell(model, active, Some(ch))
}
