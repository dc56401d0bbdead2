//! Scroll message handling

use std::time::Instant;

use crate::commands::Cmd;
use crate::messages::{ScrollMsg, TimerId};
use crate::model::GridModel;
use crate::scroll::{ScrollOffsets, SettleOutcome};

pub fn update_scroll(model: &mut GridModel, msg: ScrollMsg) -> Option<Cmd> {
    match msg {
        ScrollMsg::Scrolled { offsets, at } => scrolled(model, offsets, at),
        ScrollMsg::ScrollToCell { row, col, smooth } => model.scroll_to_cell(row, col, smooth),
    }
}

/// Store and mirror offsets now; defer the window recompute to the next frame
fn scrolled(model: &mut GridModel, offsets: ScrollOffsets, at: Instant) -> Option<Cmd> {
    let max = model.max_scroll();
    let effects = model.scroll.on_scroll(offsets, max, at);

    let mut cmds = Vec::new();
    if effects.request_frame {
        cmds.push(Cmd::RequestAnimationFrame);
    }
    if let Some(after) = effects.schedule_settle {
        cmds.push(Cmd::timer(TimerId::ScrollSettle, after));
    }
    Some(Cmd::batch(cmds))
}

pub(super) fn animation_frame(model: &mut GridModel) -> Option<Cmd> {
    if !model.scroll.take_frame() {
        return None;
    }
    model.recompute_window().then(Cmd::redraw_body)
}

pub(super) fn settle(model: &mut GridModel, at: Instant) -> Option<Cmd> {
    match model.scroll.on_settle_timer(at) {
        SettleOutcome::Settled => {
            tracing::trace!("scrolling settled");
            // Cell content may have been skipped while scrolling
            Some(Cmd::redraw_body())
        }
        SettleOutcome::Reschedule(after) => Some(Cmd::timer(TimerId::ScrollSettle, after)),
        SettleOutcome::Idle => None,
    }
}
