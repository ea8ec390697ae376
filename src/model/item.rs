// File: ./src/model/item.rs
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hour values below this are read as "after midnight, same festival night".
/// An event starting at 01:30 is therefore placed after one ending at 23:45.
pub const WRAPAROUND_THRESHOLD: f64 = 4.0;

/// A single set on a single stage.
///
/// Two events are the same entry only when all four fields match; an act
/// playing twice shows up as two events with different `start` values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub stage: String,
    pub start: NaiveDateTime,
    /// Same calendar date as `start`, even when the set runs past midnight.
    pub end: NaiveDateTime,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        stage: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            stage: stage.into(),
            start,
            end,
        }
    }

    /// The festival day this event belongs to, taken from `start` only.
    pub fn day_key(&self) -> NaiveDate {
        self.start.date()
    }

    /// Start as fractional hours, with the after-midnight shift applied.
    pub fn start_hour(&self) -> f64 {
        festival_hour(&self.start)
    }

    /// End as fractional hours, with the after-midnight shift applied.
    pub fn end_hour(&self) -> f64 {
        festival_hour(&self.end)
    }

    /// `H:MM` label for the start time, hour not zero padded.
    pub fn start_label(&self) -> String {
        clock_label(&self.start)
    }

    pub fn end_label(&self) -> String {
        clock_label(&self.end)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}-{}, {})",
            self.name,
            self.start.format("%a %d.%m."),
            self.start_label(),
            self.end_label(),
            self.stage
        )
    }
}

/// Projects a timestamp to its date, dropping the time of day.
pub fn day_key(event: &Event) -> NaiveDate {
    event.day_key()
}

/// `hour + minute / 60`, plus 24 when the result is below
/// [`WRAPAROUND_THRESHOLD`].
pub fn festival_hour(t: &NaiveDateTime) -> f64 {
    let hour = t.hour() as f64 + t.minute() as f64 / 60.0;
    if hour < WRAPAROUND_THRESHOLD {
        hour + 24.0
    } else {
        hour
    }
}

fn clock_label(t: &NaiveDateTime) -> String {
    format!("{}:{:02}", t.hour(), t.minute())
}
