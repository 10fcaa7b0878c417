//! Tunable timings for the day plan.

use chrono::{NaiveTime, TimeDelta};

fn at_hour(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
}

/// Timing rules applied while sequencing.
///
/// The defaults describe a day that starts at 9 AM, spends an hour at each
/// destination, arrives at the next one 90 minutes after the last, and breaks
/// for lunch from 1 to 2 PM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequencerOptions {
    /// Arrival time at the first destination
    pub day_start: NaiveTime,
    /// Time between arrival and departure at a destination
    pub visit_duration: TimeDelta,
    /// Time between consecutive destination arrivals
    pub destination_spacing: TimeDelta,
    /// Fixed lunch window. Not derived from the destination clock.
    pub meal_arrival: NaiveTime,
    pub meal_departure: NaiveTime,
}

impl Default for SequencerOptions {
    fn default() -> Self {
        Self {
            day_start: at_hour(9),
            visit_duration: TimeDelta::hours(1),
            destination_spacing: TimeDelta::minutes(90),
            meal_arrival: at_hour(13),
            meal_departure: at_hour(14),
        }
    }
}
