//! Virtual wall clock used to label destination visits.

use chrono::{NaiveTime, TimeDelta};

/// Format a time as a 12-hour label such as "9:00 AM" or "12:00 PM"
pub fn format_label(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Clock that advances through the day as destinations are scheduled.
///
/// Wraps past midnight rather than overflowing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayClock {
    now: NaiveTime,
}

impl DayClock {
    pub fn starting_at(now: NaiveTime) -> Self {
        Self { now }
    }

    pub fn now(&self) -> NaiveTime {
        self.now
    }

    pub fn label(&self) -> String {
        format_label(self.now)
    }

    /// Label for a point `offset` after the current time
    pub fn label_after(&self, offset: TimeDelta) -> String {
        format_label(self.now + offset)
    }

    pub fn advance(&mut self, by: TimeDelta) {
        self.now = self.now + by;
    }
}
