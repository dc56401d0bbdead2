//! Snapshot and container updates

use crate::commands::Cmd;
use crate::model::{GridData, GridModel};

/// Host supplied a new snapshot
pub(super) fn set_data(model: &mut GridModel, data: GridData) -> Option<Cmd> {
    if data.ptr_eq(&model.data) {
        return None;
    }
    let change = model.adopt_data(data);
    tracing::debug!(
        rows = model.data.row_count(),
        cols = model.data.column_count(),
        ?change,
        "adopted host data"
    );

    let mut cmds = vec![Cmd::Redraw];
    if change.selection_cleared {
        cmds.push(Cmd::EmitSelectionChange(model.selection.summary()));
    }
    Some(Cmd::batch(cmds))
}

pub(super) fn resize(model: &mut GridModel, width: f32, height: f32) -> Option<Cmd> {
    model.resize(width, height);
    Some(Cmd::Redraw)
}

/// Adopt a snapshot the engine produced and hand it to the host
pub(super) fn adopt_and_emit(model: &mut GridModel, data: GridData) -> Cmd {
    let change = model.adopt_data(data.clone());
    let mut cmds = vec![Cmd::EmitDataChange(data)];
    if change.selection_cleared {
        cmds.push(Cmd::EmitSelectionChange(model.selection.summary()));
    }
    Cmd::batch(cmds)
}
