// File: ./src/model/conflict.rs
use crate::model::item::Event;
use crate::selection::Selection;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Returns every selected event that overlaps another selected event on the
/// same festival day.
///
/// Days are compared independently; an event is only checked against events
/// whose `start` falls on the same date. Touching sets (one ends exactly when
/// the next begins) do not clash. The result is always a subset of
/// `selection`.
pub fn find_conflicts(selection: &Selection) -> Selection {
    let mut by_day: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();
    for event in selection.iter() {
        by_day.entry(event.day_key()).or_default().push(event);
    }

    let mut clashing = Selection::new();
    for events in by_day.values() {
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                if overlaps(a, b) {
                    log::debug!("clash: {} / {}", a, b);
                    clashing.insert((*a).clone());
                    clashing.insert((*b).clone());
                }
            }
        }
    }
    clashing
}

/// Strict overlap test on after-midnight-normalized hours.
pub fn overlaps(a: &Event, b: &Event) -> bool {
    let (start_a, end_a) = (a.start_hour(), a.end_hour());
    let (start_b, end_b) = (b.start_hour(), b.end_hour());

    let inside = |t: f64, lo: f64, hi: f64| t > lo && t < hi;

    inside(start_a, start_b, end_b)
        || inside(end_a, start_b, end_b)
        || inside(start_b, start_a, end_a)
        || inside(end_b, start_a, end_a)
}
