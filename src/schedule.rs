//! Scheduling policies for high-frequency input
//!
//! The engine never owns timers. Time arrives as an `Instant` inside
//! messages, and these helpers decide whether work runs now, on the next
//! animation frame, or after a quiet period. The host turns the resulting
//! `Cmd::RequestAnimationFrame` / `Cmd::ScheduleTimer` into real callbacks.

use std::time::{Duration, Instant};

/// Coalesces any number of requests into one callback per animation frame
#[derive(Debug, Clone, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// Mark work as pending. Returns true if the caller must ask the host for
    /// a frame (i.e. none was already requested).
    pub fn request(&mut self) -> bool {
        let newly = !self.pending;
        self.pending = true;
        newly
    }

    /// Consume the pending request when the frame fires
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Leading-edge throttle that remembers the latest dropped value
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_fire: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
            pending: None,
        }
    }

    /// Offer a value at `at`. Returns it back when it may be applied now;
    /// otherwise keeps it as the pending trailing value and returns `None`.
    pub fn offer(&mut self, value: T, at: Instant) -> Option<T> {
        let ready = match self.last_fire {
            None => true,
            Some(last) => at.saturating_duration_since(last) >= self.interval,
        };
        if ready {
            self.last_fire = Some(at);
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Time left until the next value may fire
    pub fn remaining(&self, at: Instant) -> Duration {
        match self.last_fire {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(at.saturating_duration_since(last)),
        }
    }

    /// Take the trailing value, if any, marking it as fired at `at`
    pub fn flush(&mut self, at: Instant) -> Option<T> {
        let value = self.pending.take()?;
        self.last_fire = Some(at);
        Some(value)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Tracks whether a stream of events has gone quiet
#[derive(Debug, Clone)]
pub struct QuietPeriod {
    period: Duration,
    last_activity: Option<Instant>,
}

impl QuietPeriod {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_activity: None,
        }
    }

    pub fn touch(&mut self, at: Instant) {
        self.last_activity = Some(at);
    }

    /// `None` once the period has elapsed, otherwise the time still to wait
    pub fn remaining(&self, at: Instant) -> Option<Duration> {
        let last = self.last_activity?;
        let elapsed = at.saturating_duration_since(last);
        if elapsed >= self.period {
            None
        } else {
            Some(self.period - elapsed)
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
