//! Selection message handling and the processing flag

use crate::commands::Cmd;
use crate::error::Result;
use crate::messages::{SelectMsg, TimerId};
use crate::model::GridModel;

pub fn update_selection(model: &mut GridModel, msg: SelectMsg) -> Option<Cmd> {
    let before = model.selection.revision();
    let bounds = model.bounds();
    let sel = &mut model.selection;

    let result: Result<()> = match msg {
        SelectMsg::Single(pos) => sel.select_single(pos, bounds),
        SelectMsg::Toggle(pos) => sel.toggle(pos, bounds),
        SelectMsg::Range { from, to } => sel.select_range(from, to, bounds),
        SelectMsg::Row { row, mode } => sel.select_row(row, mode, bounds),
        SelectMsg::Column { col, mode } => sel.select_column(col, mode, bounds),
        SelectMsg::All => {
            sel.select_all(bounds);
            Ok(())
        }
        SelectMsg::Clear => {
            sel.clear();
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::warn!("Ignoring selection request: {}", e);
        return None;
    }
    selection_changed(model, before)
}

/// Tell the host about a changed selection, raising the processing flag for
/// large ones. `None` when the revision did not move.
pub(super) fn selection_changed(model: &mut GridModel, before: u64) -> Option<Cmd> {
    if model.selection.revision() == before {
        return None;
    }
    let mut cmds = vec![Cmd::EmitSelectionChange(model.selection.summary())];
    if model.selection.len() > model.config.selection_processing_threshold {
        cmds.push(flag_processing(model));
    }
    Some(Cmd::batch(cmds))
}

/// Raise the processing flag until the `ProcessingDone` timer fires
pub(super) fn flag_processing(model: &mut GridModel) -> Cmd {
    if model.processing {
        return Cmd::None;
    }
    model.processing = true;
    tracing::debug!("processing flag raised");
    Cmd::timer(TimerId::ProcessingDone, model.config.processing_feedback())
}

pub(super) fn processing_done(model: &mut GridModel) -> Option<Cmd> {
    if !model.processing {
        return None;
    }
    model.processing = false;
    Some(Cmd::redraw_body())
}
