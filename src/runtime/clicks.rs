//! Double-click detection for hosts whose input layer reports raw presses

use std::time::{Duration, Instant};

use crate::messages::HitTarget;

const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(300);

/// Click tracking state for double-click detection
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last_click: Option<(Instant, HitTarget)>,
    click_count: u8,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update click count based on timing and target
    ///
    /// Returns the new click count (1 or 2). A third rapid click starts over.
    pub fn track(&mut self, target: HitTarget, at: Instant) -> u8 {
        let is_repeat = self.last_click.is_some_and(|(time, last)| {
            last == target && at.saturating_duration_since(time) < DOUBLE_CLICK_TIME
        });

        self.click_count = if is_repeat && self.click_count == 1 {
            2
        } else {
            1
        };
        self.last_click = Some((at, target));
        self.click_count
    }

    pub fn reset(&mut self) {
        self.click_count = 0;
        self.last_click = None;
    }
}
