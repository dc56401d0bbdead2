//! Clipboard message handling

use std::sync::Arc;

use super::data::adopt_and_emit;
use super::selection::{flag_processing, selection_changed};
use crate::clipboard::{self, TextTransform};
use crate::commands::{Cmd, Notice};
use crate::error::{ClipboardError, GridError};
use crate::messages::ClipboardMsg;
use crate::model::{CellPosition, GridModel};

pub fn update_clipboard(model: &mut GridModel, msg: ClipboardMsg) -> Option<Cmd> {
    match msg {
        ClipboardMsg::Copy => copy_selection(model),
        ClipboardMsg::Cut => cut_selection(model),
        ClipboardMsg::Paste => Some(Cmd::ReadClipboard),
        ClipboardMsg::Delete => delete_selection(model),
        ClipboardMsg::Transform(t) => transform_selection(model, t),
    }
}

pub(super) fn copy_selection(model: &mut GridModel) -> Option<Cmd> {
    match clipboard::copy(&model.data, &model.selection) {
        Some(text) => {
            tracing::debug!(cells = model.selection.len(), "copied selection");
            Some(Cmd::WriteClipboard(text))
        }
        None => Some(Cmd::Notice(Notice::NothingSelected)),
    }
}

pub(super) fn cut_selection(model: &mut GridModel) -> Option<Cmd> {
    let copied = copy_selection(model)?;
    if matches!(copied, Cmd::Notice(_)) {
        return Some(copied);
    }
    Some(Cmd::batch(vec![copied, delete_selection(model).into()]))
}

pub(super) fn delete_selection(model: &mut GridModel) -> Option<Cmd> {
    let next = clipboard::delete(&model.data, &model.selection)?;
    Some(Cmd::batch(vec![adopt_and_emit(model, next), Cmd::redraw_body()]))
}

fn transform_selection(model: &mut GridModel, t: TextTransform) -> Option<Cmd> {
    if model.selection.is_empty() {
        return Some(Cmd::Notice(Notice::NothingSelected));
    }
    let next = clipboard::transform(&model.data, &model.selection, t)?;
    Some(Cmd::batch(vec![adopt_and_emit(model, next), Cmd::redraw_body()]))
}

/// Answer to `Cmd::ReadClipboard`
pub(super) fn paste_text(
    model: &mut GridModel,
    result: Result<String, ClipboardError>,
) -> Option<Cmd> {
    let text = match result {
        Ok(text) => text,
        Err(ClipboardError::Empty) => return Some(Cmd::Notice(Notice::NothingToPaste)),
        Err(e) => {
            tracing::warn!("{}", GridError::from(e.clone()));
            return Some(Cmd::Notice(Notice::ClipboardUnavailable(e.to_string())));
        }
    };

    if !model.edit.is_idle() {
        return paste_into_draft(model, &text);
    }

    let anchor = model
        .selection
        .bounding_rect()
        .map(|r| r.top_left())
        .unwrap_or(CellPosition::new(0, 0));

    let outcome = match clipboard::paste(&model.data, anchor, &text) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Ignoring paste: {}", e);
            return Some(Cmd::Notice(Notice::NothingToPaste));
        }
    };

    let mut cmds = Vec::new();
    if outcome.row_count() > model.config.paste_processing_threshold {
        cmds.push(flag_processing(model));
    }
    cmds.push(adopt_and_emit(model, outcome.data));
    if outcome.columns_added > 0 {
        cmds.push(Cmd::EmitHeaderChange(Arc::clone(model.data.columns())));
    }

    let before = model.selection.revision();
    let bounds = model.bounds();
    if let Err(e) = model.selection.select_rect(outcome.rect, bounds) {
        tracing::warn!("Pasted range is outside the grid: {}", e);
    }
    cmds.push(selection_changed(model, before).into());
    cmds.push(Cmd::Redraw);
    Some(Cmd::batch(cmds))
}

/// Single-line drafts take the clipboard text with line breaks dropped
fn paste_into_draft(model: &mut GridModel, text: &str) -> Option<Cmd> {
    let filtered: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    let mut draft = model.edit.draft()?.to_string();
    draft.push_str(&filtered);
    model.edit.set_draft(draft).then(Cmd::redraw_editor)
}
