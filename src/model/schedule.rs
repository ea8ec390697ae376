// File: ./src/model/schedule.rs
use crate::model::item::Event;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// The parsed line-up.
///
/// Built once per parse and never updated in place; loading a new file
/// produces a new `Schedule`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    stage_names: Vec<String>,
    days: BTreeMap<NaiveDate, Vec<Event>>,
    events: Vec<Event>,
}

impl Schedule {
    /// Builds a schedule from events in file order. Stage order is the order
    /// in which stages first appear.
    pub fn from_events(events: Vec<Event>) -> Self {
        let mut stage_names: Vec<String> = Vec::new();
        let mut days: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();

        for event in &events {
            if !stage_names.contains(&event.stage) {
                stage_names.push(event.stage.clone());
            }
            days.entry(event.day_key()).or_default().push(event.clone());
        }

        Self {
            stage_names,
            days,
            events,
        }
    }

    pub fn stage_names(&self) -> &[String] {
        &self.stage_names
    }

    /// Day buckets in chronological order.
    pub fn days(&self) -> &BTreeMap<NaiveDate, Vec<Event>> {
        &self.days
    }

    pub fn day(&self, date: NaiveDate) -> &[Event] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// All events in file order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.events.iter().any(|e| e.name == name)
    }

    /// First event in file order called `name`. With `start`, the first one
    /// that also starts at that exact time.
    pub fn lookup(&self, name: &str, start: Option<NaiveDateTime>) -> Option<&Event> {
        self.events
            .iter()
            .filter(|e| e.name == name)
            .find(|e| start.is_none_or(|s| e.start == s))
    }

    /// Exact identity match, used to check a selection still belongs to
    /// this line-up.
    pub fn contains_event(&self, event: &Event) -> bool {
        self.day(event.day_key()).contains(event)
    }

    /// Acts booked more than once, with every slot in file order.
    pub fn multi_booked(&self) -> BTreeMap<&str, Vec<&Event>> {
        let mut slots: BTreeMap<&str, Vec<&Event>> = BTreeMap::new();
        for event in &self.events {
            slots.entry(event.name.as_str()).or_default().push(event);
        }
        slots.retain(|_, v| v.len() > 1);
        slots
    }
}
