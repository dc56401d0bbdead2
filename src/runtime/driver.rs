//! Command processing loop
//!
//! Feeds messages through `update` and turns the resulting commands into
//! host callbacks. Commands that answer with a message (clipboard reads) are
//! queued and processed in the same `dispatch` call.

use std::collections::VecDeque;
use std::time::Instant;

use super::clicks::ClickTracker;
use super::host::GridHost;
use crate::clipboard::ClipboardBackend;
use crate::commands::{Cmd, Damage, Notice};
use crate::messages::{GridMsg, HitTarget, Modifiers, PointerMsg};
use crate::model::GridModel;
use crate::update::update;

/// One grid instance wired to a host and a clipboard
pub struct GridRuntime<H: GridHost, C: ClipboardBackend> {
    model: GridModel,
    host: H,
    clipboard: C,
    clicks: ClickTracker,
}

impl<H: GridHost, C: ClipboardBackend> GridRuntime<H, C> {
    pub fn new(model: GridModel, host: H, clipboard: C) -> Self {
        Self {
            model,
            host,
            clipboard,
            clicks: ClickTracker::new(),
        }
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    pub fn into_parts(self) -> (GridModel, H, C) {
        (self.model, self.host, self.clipboard)
    }

    /// Process a message and everything it triggers. Returns what needs
    /// repainting.
    pub fn dispatch(&mut self, msg: GridMsg) -> Damage {
        let mut queue = VecDeque::from([msg]);
        let mut damage = Damage::None;
        while let Some(msg) = queue.pop_front() {
            let Some(cmd) = update(&mut self.model, msg) else {
                continue;
            };
            damage.merge(cmd.damage());
            self.process_cmd(cmd, &mut queue);
        }
        damage
    }

    /// Raw primary-button press. A second press on the same target within
    /// the double-click time also dispatches `DoubleClick`.
    pub fn pointer_down(&mut self, target: HitTarget, modifiers: Modifiers, at: Instant) -> Damage {
        let mut damage = self.dispatch(GridMsg::Pointer(PointerMsg::Down {
            target,
            modifiers,
            at,
        }));
        if self.clicks.track(target, at) == 2 {
            damage.merge(self.dispatch(GridMsg::Pointer(PointerMsg::DoubleClick { target })));
        }
        damage
    }

    fn process_cmd(&mut self, cmd: Cmd, queue: &mut VecDeque<GridMsg>) {
        match cmd {
            Cmd::None | Cmd::Redraw | Cmd::RedrawAreas(_) => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd, queue);
                }
            }
            Cmd::EmitDataChange(data) => self.host.on_data_change(&data),
            Cmd::EmitHeaderChange(columns) => self.host.on_header_change(&columns),
            Cmd::EmitSelectionChange(summary) => self.host.on_selection_change(&summary),
            Cmd::RequestAnimationFrame => self.host.request_animation_frame(),
            Cmd::ScheduleTimer { id, after } => self.host.schedule_timer(id, after),
            Cmd::ScrollTo { offsets, smooth } => self.host.scroll_to(offsets, smooth),
            Cmd::WriteClipboard(text) => {
                if let Err(e) = self.clipboard.set_text(&text) {
                    tracing::warn!("Clipboard write failed: {}", e);
                    self.host
                        .on_notice(&Notice::ClipboardUnavailable(e.to_string()));
                }
            }
            Cmd::ReadClipboard => {
                queue.push_back(GridMsg::PasteText(self.clipboard.get_text()));
            }
            Cmd::Notice(notice) => {
                tracing::info!(?notice, "grid notice");
                self.host.on_notice(&notice);
            }
        }
    }
}
