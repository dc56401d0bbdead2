//! Pointer handling: clicks, header picks and drag selection

use std::time::Instant;

use super::edit::{begin_cell, begin_header, commit_open};
use super::selection::selection_changed;
use crate::commands::Cmd;
use crate::edit::EditTarget;
use crate::error::Result;
use crate::messages::{HitTarget, Modifiers, PointerMsg, TimerId};
use crate::model::{CellPosition, GridModel};
use crate::selection::{DragSelect, SelectMode};

pub fn update_pointer(model: &mut GridModel, msg: PointerMsg) -> Option<Cmd> {
    match msg {
        PointerMsg::Down {
            target, modifiers, ..
        } => pointer_down(model, target, modifiers),
        PointerMsg::Enter {
            target,
            primary_held,
            at,
        } => pointer_enter(model, target, primary_held, at),
        PointerMsg::Up { at } => pointer_up(model, at),
        PointerMsg::DoubleClick { target } => double_click(model, target),
    }
}

fn header_mode(modifiers: Modifiers) -> SelectMode {
    if modifiers.shift {
        SelectMode::Range
    } else if modifiers.command() {
        SelectMode::Additive
    } else {
        SelectMode::Replace
    }
}

/// Whether a press lands on what the open session is editing
fn hits_open_edit(model: &GridModel, target: HitTarget) -> bool {
    match (model.edit.target(), target) {
        (Some(EditTarget::Cell(a)), HitTarget::Cell(b)) => a == b,
        (Some(EditTarget::Header(a)), HitTarget::ColumnHeader(b)) => a == b,
        _ => false,
    }
}

fn pointer_down(model: &mut GridModel, target: HitTarget, modifiers: Modifiers) -> Option<Cmd> {
    if hits_open_edit(model, target) {
        return None;
    }
    let commit = commit_open(model);
    model.drag = None;

    let before = model.selection.revision();
    let bounds = model.bounds();
    let repeat_click_deselects = model.config.repeat_click_deselects;
    let sel = &mut model.selection;

    let result: Result<()> = match target {
        HitTarget::Cell(pos) if modifiers.command() => sel.toggle(pos, bounds),
        HitTarget::Cell(pos) if modifiers.shift => match sel.anchor() {
            Some(anchor) => sel.select_range(anchor, pos, bounds),
            None => sel.select_single(pos, bounds),
        },
        HitTarget::Cell(pos) => {
            if repeat_click_deselects && sel.len() == 1 && sel.is_selected(pos) {
                sel.clear();
                Ok(())
            } else {
                let result = sel.select_single(pos, bounds);
                if result.is_ok() {
                    model.drag = Some(DragSelect::new(pos, model.config.drag_throttle()));
                }
                result
            }
        }
        HitTarget::RowNumber(row) => sel.select_row(row, header_mode(modifiers), bounds),
        HitTarget::ColumnHeader(col) => sel.select_column(col, header_mode(modifiers), bounds),
        HitTarget::Corner => {
            sel.select_all(bounds);
            Ok(())
        }
        HitTarget::Outside => Ok(()),
    };

    if let Err(e) = result {
        tracing::warn!("Ignoring pointer selection: {}", e);
    }
    let changed = selection_changed(model, before);
    Some(Cmd::batch(vec![commit.into(), changed.into()]))
}

fn pointer_enter(
    model: &mut GridModel,
    target: HitTarget,
    primary_held: bool,
    at: Instant,
) -> Option<Cmd> {
    if model.drag.is_none() {
        return None;
    }
    if !primary_held {
        // Button came up somewhere we never heard about
        return pointer_up(model, at);
    }
    let HitTarget::Cell(pos) = target else {
        return None;
    };
    if !model.bounds().contains(pos) {
        return None;
    }

    let drag = model.drag.as_mut()?;
    match drag.hover(pos, at) {
        Some(hovered) => {
            let anchor = drag.anchor();
            apply_drag(model, anchor, hovered)
        }
        None => drag
            .flush_delay(at)
            .map(|after| Cmd::timer(TimerId::DragFlush, after)),
    }
}

/// End the drag wherever the button was released. A hover still waiting on
/// the throttle is applied; the release position itself is not.
fn pointer_up(model: &mut GridModel, at: Instant) -> Option<Cmd> {
    let mut drag = model.drag.take()?;
    let pending = drag.flush(at)?;
    apply_drag(model, drag.anchor(), pending)
}

pub(super) fn drag_flush(model: &mut GridModel, at: Instant) -> Option<Cmd> {
    let drag = model.drag.as_mut()?;
    let pending = drag.flush(at)?;
    let anchor = drag.anchor();
    apply_drag(model, anchor, pending)
}

fn apply_drag(model: &mut GridModel, anchor: CellPosition, hovered: CellPosition) -> Option<Cmd> {
    let before = model.selection.revision();
    let bounds = model.bounds();
    if let Err(e) = model.selection.select_range(anchor, hovered, bounds) {
        tracing::warn!("Ignoring drag target: {}", e);
        return None;
    }
    selection_changed(model, before)
}

fn double_click(model: &mut GridModel, target: HitTarget) -> Option<Cmd> {
    // A double-click is preceded by a press; no drag should outlive it
    model.drag = None;
    match target {
        HitTarget::Cell(pos) => begin_cell(model, pos, None),
        HitTarget::ColumnHeader(col) => begin_header(model, col),
        HitTarget::RowNumber(_) | HitTarget::Corner | HitTarget::Outside => None,
    }
}
