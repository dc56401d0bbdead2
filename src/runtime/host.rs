//! The embedding surface: callbacks a host implements

use std::time::Duration;

use crate::commands::Notice;
use crate::messages::TimerId;
use crate::model::{ColumnSpec, GridData};
use crate::scroll::ScrollOffsets;
use crate::selection::SelectionSummary;

/// Callbacks the runtime invokes while processing commands.
///
/// Every method defaults to doing nothing so a host only implements what it
/// renders or persists.
pub trait GridHost {
    /// The engine produced a new snapshot. It has already been adopted.
    fn on_data_change(&mut self, _data: &GridData) {}

    fn on_header_change(&mut self, _columns: &[ColumnSpec]) {}

    fn on_selection_change(&mut self, _summary: &SelectionSummary) {}

    fn on_notice(&mut self, _notice: &Notice) {}

    /// Dispatch `GridMsg::AnimationFrame` before the next paint
    fn request_animation_frame(&mut self) {}

    /// Dispatch `GridMsg::Timer { id, .. }` once `after` has elapsed. A later
    /// request for the same id replaces the earlier one.
    fn schedule_timer(&mut self, _id: TimerId, _after: Duration) {}

    /// Move the interactive pane to `offsets`
    fn scroll_to(&mut self, _offsets: ScrollOffsets, _smooth: bool) {}
}

/// One recorded host callback
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    DataChange { rows: usize, cols: usize },
    HeaderChange(Vec<String>),
    SelectionChange(SelectionSummary),
    Notice(Notice),
    AnimationFrame,
    Timer(TimerId, Duration),
    ScrollTo(ScrollOffsets, bool),
}

/// Host that records every callback, for headless drivers and tests
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    /// Last snapshot handed over by the engine
    pub last_data: Option<GridData>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded events
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    /// Timers requested since the last drain, latest request per id
    pub fn pending_timers(&self) -> Vec<(TimerId, Duration)> {
        let mut timers: Vec<(TimerId, Duration)> = Vec::new();
        for event in &self.events {
            if let HostEvent::Timer(id, after) = event {
                timers.retain(|(t, _)| t != id);
                timers.push((*id, *after));
            }
        }
        timers
    }
}

impl GridHost for RecordingHost {
    fn on_data_change(&mut self, data: &GridData) {
        self.events.push(HostEvent::DataChange {
            rows: data.row_count(),
            cols: data.column_count(),
        });
        self.last_data = Some(data.clone());
    }

    fn on_header_change(&mut self, columns: &[ColumnSpec]) {
        let headers = columns.iter().map(|c| c.header.clone()).collect();
        self.events.push(HostEvent::HeaderChange(headers));
    }

    fn on_selection_change(&mut self, summary: &SelectionSummary) {
        self.events.push(HostEvent::SelectionChange(*summary));
    }

    fn on_notice(&mut self, notice: &Notice) {
        self.events.push(HostEvent::Notice(notice.clone()));
    }

    fn request_animation_frame(&mut self) {
        self.events.push(HostEvent::AnimationFrame);
    }

    fn schedule_timer(&mut self, id: TimerId, after: Duration) {
        self.events.push(HostEvent::Timer(id, after));
    }

    fn scroll_to(&mut self, offsets: ScrollOffsets, smooth: bool) {
        self.events.push(HostEvent::ScrollTo(offsets, smooth));
    }
}
