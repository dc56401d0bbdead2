//! Scroll coordination
//!
//! The main pane is the only interactive scroll surface. Its offsets are
//! mirrored into the header pane (horizontal) and the frozen column pane
//! (vertical) inside the same call that stores them, so a reader never sees
//! the panes disagree. The viewport recompute is gated to one per animation
//! frame and `is_scrolling` clears after a quiet period.

use serde::Serialize;
use std::time::{Duration, Instant};

use crate::model::CellPosition;
use crate::schedule::{FrameGate, QuietPeriod};
use crate::viewport::{ContainerSize, GridGeometry};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScrollOffsets {
    pub top: f32,
    pub left: f32,
}

impl ScrollOffsets {
    pub fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }

    /// Clamp both axes into `[0, max]`
    pub fn clamped(self, max: ScrollOffsets) -> Self {
        Self {
            top: clamp_axis(self.top, max.top),
            left: clamp_axis(self.left, max.left),
        }
    }
}

fn clamp_axis(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max.max(0.0))
}

/// Offsets of all three scroll panes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PaneOffsets {
    pub main: ScrollOffsets,
    /// Header band follows the main pane horizontally
    pub header_left: f32,
    /// Frozen column pane follows the main pane vertically
    pub frozen_top: f32,
}

impl PaneOffsets {
    pub fn in_sync(&self) -> bool {
        self.header_left == self.main.left && self.frozen_top == self.main.top
    }
}

/// What the caller must ask the host for after a scroll event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollEffects {
    pub request_frame: bool,
    pub schedule_settle: Option<Duration>,
}

/// Result of a fired settle timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Scrolling stopped
    Settled,
    /// Scroll events arrived since the timer was armed; wait this much longer
    Reschedule(Duration),
    /// Nothing was scrolling
    Idle,
}

#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    panes: PaneOffsets,
    is_scrolling: bool,
    frame: FrameGate,
    settle: QuietPeriod,
    settle_armed: bool,
}

impl ScrollCoordinator {
    pub fn new(quiet: Duration) -> Self {
        Self {
            panes: PaneOffsets::default(),
            is_scrolling: false,
            frame: FrameGate::default(),
            settle: QuietPeriod::new(quiet),
            settle_armed: false,
        }
    }

    pub fn offsets(&self) -> ScrollOffsets {
        self.panes.main
    }

    pub fn panes(&self) -> PaneOffsets {
        self.panes
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn frame_pending(&self) -> bool {
        self.frame.is_pending()
    }

    /// Store new main-pane offsets and mirror them. Returns whether anything
    /// moved.
    pub fn set_offsets(&mut self, offsets: ScrollOffsets, max: ScrollOffsets) -> bool {
        let clamped = offsets.clamped(max);
        let changed = clamped != self.panes.main;
        self.panes = PaneOffsets {
            main: clamped,
            header_left: clamped.left,
            frozen_top: clamped.top,
        };
        changed
    }

    /// Handle a scroll event from the main pane
    pub fn on_scroll(
        &mut self,
        offsets: ScrollOffsets,
        max: ScrollOffsets,
        at: Instant,
    ) -> ScrollEffects {
        self.set_offsets(offsets, max);
        self.is_scrolling = true;
        self.settle.touch(at);

        let schedule_settle = if self.settle_armed {
            None
        } else {
            self.settle_armed = true;
            Some(self.settle.period())
        };

        ScrollEffects {
            request_frame: self.frame.request(),
            schedule_settle,
        }
    }

    /// Consume the pending frame request. True if a recompute is due.
    pub fn take_frame(&mut self) -> bool {
        self.frame.take()
    }

    pub fn on_settle_timer(&mut self, at: Instant) -> SettleOutcome {
        self.settle_armed = false;
        if !self.is_scrolling {
            return SettleOutcome::Idle;
        }
        match self.settle.remaining(at) {
            None => {
                self.is_scrolling = false;
                SettleOutcome::Settled
            }
            Some(wait) => {
                self.settle_armed = true;
                SettleOutcome::Reschedule(wait)
            }
        }
    }

    /// Cell content is skipped while a large dataset is actively scrolling
    pub fn should_render_cell_content(&self, row_count: usize, large_dataset_rows: usize) -> bool {
        !(self.is_scrolling && row_count > large_dataset_rows)
    }

    /// Re-clamp after the content or the container shrank
    pub fn clamp_to(&mut self, max: ScrollOffsets) -> bool {
        self.set_offsets(self.panes.main, max)
    }
}

/// Offsets that bring `target` fully into view, or `None` when it already is.
///
/// The header band occludes the top of the body and the frozen pane occludes
/// its left edge, so both are taken out of the container before testing.
/// Frozen columns are always horizontally visible and only move vertically.
pub fn reveal_offsets(
    current: ScrollOffsets,
    geometry: &GridGeometry,
    container: ContainerSize,
    target: CellPosition,
) -> Option<ScrollOffsets> {
    let body = geometry.body_size(container);
    let max = geometry.max_scroll(container);

    let cell_top = geometry.row_offset(target.row);
    let top = reveal_axis(current.top, cell_top, geometry.row_height, body.height);

    let left = if target.col < geometry.frozen_cols {
        current.left
    } else {
        let width = geometry.col_widths.get(target.col).copied().unwrap_or(0.0);
        reveal_axis(current.left, geometry.column_offset(target.col), width, body.width)
    };

    let next = ScrollOffsets::new(top, left).clamped(max);
    if next == current {
        None
    } else {
        Some(next)
    }
}

/// Minimal change of one scroll axis so `[start, start + size]` fits in
/// `[scroll, scroll + view]`. A span larger than the view aligns its start.
fn reveal_axis(scroll: f32, start: f32, size: f32, view: f32) -> f32 {
    let end = start + size;
    if start < scroll {
        start
    } else if end > scroll + view {
        (end - view).min(start)
    } else {
        scroll
    }
}
