// File: ./src/report.rs
// Plain-text / JSON summary for the non-interactive `check` command
use crate::model::Event;
use crate::session::Session;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub picked: Vec<Event>,
    pub clashes: Vec<Event>,
}

/// An act with more than one slot in the line-up.
#[derive(Debug, Serialize)]
pub struct MultiBooked {
    pub name: String,
    pub slots: Vec<Event>,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub stages: Vec<String>,
    pub events: usize,
    pub skipped_lines: Vec<usize>,
    pub multi_booked: Vec<MultiBooked>,
    pub days: Vec<DaySummary>,
}

impl CheckReport {
    pub fn from_session(session: &Session) -> Self {
        let conflicts = session.conflicts();
        let schedule = session.schedule();
        let days = schedule
            .days()
            .iter()
            .map(|(date, events)| DaySummary {
                date: *date,
                picked: events
                    .iter()
                    .filter(|e| session.selection().contains(e))
                    .cloned()
                    .collect(),
                clashes: events
                    .iter()
                    .filter(|e| conflicts.contains(e))
                    .cloned()
                    .collect(),
            })
            .collect();
        let multi_booked = schedule
            .multi_booked()
            .into_iter()
            .map(|(name, slots)| MultiBooked {
                name: name.to_string(),
                slots: slots.into_iter().cloned().collect(),
            })
            .collect();
        Self {
            stages: schedule.stage_names().to_vec(),
            events: schedule.len(),
            skipped_lines: session.skipped().iter().map(|s| s.line).collect(),
            multi_booked,
            days,
        }
    }

    pub fn has_clashes(&self) -> bool {
        self.days.iter().any(|d| !d.clashes.is_empty())
    }
}

fn slot_label(event: &Event) -> String {
    format!(
        "{:>5}-{:<5} {} @ {}",
        event.start_label(),
        event.end_label(),
        event.name,
        event.stage
    )
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} events on {} stages: {}",
            self.events,
            self.stages.len(),
            self.stages.join(", ")
        )?;
        if !self.skipped_lines.is_empty() {
            let lines: Vec<String> = self.skipped_lines.iter().map(|l| l.to_string()).collect();
            writeln!(f, "skipped lines: {}", lines.join(", "))?;
        }
        if !self.multi_booked.is_empty() {
            writeln!(f, "\nplaying more than once:")?;
            for act in &self.multi_booked {
                let slots: Vec<String> = act
                    .slots
                    .iter()
                    .map(|e| {
                        format!(
                            "{} {}-{} @ {}",
                            e.start.format("%a"),
                            e.start_label(),
                            e.end_label(),
                            e.stage
                        )
                    })
                    .collect();
                writeln!(f, "  {}: {}", act.name, slots.join("; "))?;
            }
        }
        for day in &self.days {
            writeln!(f, "\n{}", day.date.format("%a %d.%m.%Y"))?;
            if day.picked.is_empty() {
                writeln!(f, "  (nothing picked)")?;
            }
            for event in &day.picked {
                let mark = if day.clashes.contains(event) { "!" } else { " " };
                writeln!(f, " {} {}", mark, slot_label(event))?;
            }
        }
        Ok(())
    }
}
