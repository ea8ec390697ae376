// File: ./src/selection.rs
// The user's personal pick of events, plus the .prot import/export format
use crate::error::{Error, Result};
use crate::model::parser::{DATE_FORMAT, TIME_FORMAT, parse_date};
use crate::model::{Event, Schedule};
use crate::storage::LocalStorage;
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::collections::btree_set;
use std::path::Path;

/// Set of chosen events, keyed by full event identity rather than name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    events: BTreeSet<Event>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the event was not selected before.
    pub fn insert(&mut self, event: Event) -> bool {
        self.events.insert(event)
    }

    /// Flips the event's membership and returns the new state.
    pub fn toggle(&mut self, event: &Event) -> bool {
        if self.events.remove(event) {
            false
        } else {
            self.events.insert(event.clone());
            true
        }
    }

    pub fn contains(&self, event: &Event) -> bool {
        self.events.contains(event)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_subset(&self, other: &Selection) -> bool {
        self.events.is_subset(&other.events)
    }

    /// Serializes the selection in the given `.prot` layout.
    pub fn to_text(&self, format: SelectionFormat) -> String {
        match format {
            SelectionFormat::Simple => {
                let mut names: Vec<&str> = Vec::new();
                for event in &self.events {
                    if !names.contains(&event.name.as_str()) {
                        names.push(&event.name);
                    }
                }
                names.join(",")
            }
            SelectionFormat::Extended => self
                .events
                .iter()
                .map(|e| {
                    format!(
                        "{},{},{}",
                        e.name,
                        e.start.format(DATE_FORMAT),
                        e.start.format(TIME_FORMAT)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn export_to<P: AsRef<Path>>(&self, path: P, format: SelectionFormat) -> Result<()> {
        let path = path.as_ref();
        LocalStorage::atomic_write(path, self.to_text(format))?;
        log::info!("exported {} events to {}", self.len(), path.display());
        Ok(())
    }

    /// Reads a `.prot` file and resolves it against `schedule`.
    pub fn import_from<P: AsRef<Path>>(path: P, schedule: &Schedule) -> Result<ImportReport> {
        let text = LocalStorage::read(path)?;
        Ok(Self::import(&text, schedule))
    }

    /// Resolves selection text against `schedule`. The layout is detected
    /// from the content. Names absent from the line-up are dropped and
    /// reported; everything else is applied.
    pub fn import(text: &str, schedule: &Schedule) -> ImportReport {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();

        let mut report = ImportReport::default();
        match SelectionFormat::detect(&lines) {
            SelectionFormat::Simple => {
                for name in lines.iter().flat_map(|l| l.split(',')).map(str::trim) {
                    if name.is_empty() {
                        continue;
                    }
                    match schedule.lookup(name, None) {
                        Some(event) => {
                            report.selection.insert(event.clone());
                        }
                        None => report.unknown.push(name.to_string()),
                    }
                }
            }
            SelectionFormat::Extended => {
                for line in lines {
                    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
                    let [name, date, time] = fields[..] else {
                        log::warn!("expected name,date,time in selection line: {}", line);
                        report.unresolved.push(line.to_string());
                        continue;
                    };
                    if !schedule.contains(name) {
                        report.unknown.push(name.to_string());
                        continue;
                    }
                    let found =
                        parse_start(date, time).and_then(|start| schedule.lookup(name, Some(start)));
                    match found {
                        Some(event) => {
                            report.selection.insert(event.clone());
                        }
                        None => {
                            log::warn!("could not find {} in the line-up", line);
                            report.unresolved.push(line.to_string());
                        }
                    }
                }
            }
        }

        if !report.unknown.is_empty() {
            log::warn!(
                "selection references {} unknown acts: {}",
                report.unknown.len(),
                report.unknown.join(", ")
            );
        }
        report
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a Event;
    type IntoIter = btree_set::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl FromIterator<Event> for Selection {
    fn from_iter<T: IntoIterator<Item = Event>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl Extend<Event> for Selection {
    fn extend<T: IntoIterator<Item = Event>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}

/// On-disk layout of a selection file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionFormat {
    /// One line of comma-separated act names.
    Simple,
    /// One `name,dd.mm.yyyy,HH:MM` line per event.
    #[default]
    Extended,
}

impl SelectionFormat {
    /// The simple layout is a single line of names. Anything spread over
    /// several lines, or a line shaped like `name,date,time`, is extended.
    fn detect(lines: &[&str]) -> Self {
        let extended = lines.len() > 1 || lines.iter().any(|line| looks_like_slot(line));
        if extended {
            SelectionFormat::Extended
        } else {
            SelectionFormat::Simple
        }
    }
}

fn looks_like_slot(line: &str) -> bool {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [_, date, time] = fields[..] else {
        return false;
    };
    let date_like = date.bytes().any(|b| b.is_ascii_digit())
        && date.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'/' | b'-'));
    let time_like = time.contains(':') && time.bytes().all(|b| b.is_ascii_digit() || b == b':');
    date_like && time_like
}

fn parse_start(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = parse_date(date)?;
    let time = NaiveTime::parse_from_str(time, TIME_FORMAT).ok()?;
    Some(date.and_time(time))
}

/// Outcome of resolving a selection file against a line-up.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub selection: Selection,
    /// Act names the line-up does not contain at all.
    pub unknown: Vec<String>,
    /// Lines naming a known act at a time it does not play.
    pub unresolved: Vec<String>,
}

impl ImportReport {
    /// Surfaces unknown acts as [`Error::UnknownEventInSelection`].
    pub fn check(&self) -> Result<()> {
        if self.unknown.is_empty() {
            Ok(())
        } else {
            Err(Error::UnknownEventInSelection {
                names: self.unknown.clone(),
            })
        }
    }
}
