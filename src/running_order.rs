// File: ./src/running_order.rs
// Lays out one chart per festival day: stage columns, hour rows, one block per set.
// Drawing is left to the front-end; everything here is plain data.
use crate::alias::AliasTable;
use crate::model::{Event, Schedule};
use crate::selection::Selection;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Used when every stage playing that day has been hidden.
const EMPTY_DAY_RANGE: (f64, f64) = (10.0, 26.0);
const TICK_STEP: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStatus {
    Unselected,
    Selected,
    Conflict,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    /// Index into [`DayChart::columns`].
    pub column: usize,
    /// Normalized start hour (after-midnight sets are past 24).
    pub top: f64,
    pub bottom: f64,
    pub label: String,
    pub start_label: String,
    pub end_label: String,
    pub status: BlockStatus,
    pub event: Event,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayChart {
    pub date: NaiveDate,
    pub columns: Vec<String>,
    pub blocks: Vec<Block>,
    /// Whole hours from the earliest start to the latest end.
    pub hour_range: (f64, f64),
}

impl DayChart {
    pub fn title(&self) -> String {
        self.date.format("%d.%m.%Y").to_string()
    }

    /// Axis labels every two hours, wrapped to a 24h clock.
    pub fn ticks(&self) -> Vec<(f64, String)> {
        let (lo, hi) = self.hour_range;
        let mut hour = lo.ceil() as u32;
        if hour % TICK_STEP != 0 {
            hour += 1;
        }
        let mut ticks = Vec::new();
        while (hour as f64) <= hi {
            ticks.push((hour as f64, format!("{}:00", hour % 24)));
            hour += TICK_STEP;
        }
        ticks
    }
}

/// Everything a renderer needs to draw the running order.
pub struct ChartInput<'a> {
    pub schedule: &'a Schedule,
    pub selection: &'a Selection,
    pub conflicts: &'a Selection,
    pub aliases: &'a AliasTable,
    pub disabled_stages: &'a BTreeSet<String>,
}

/// One chart per day, in date order. Sets on hidden stages are left out.
pub fn layout(input: &ChartInput<'_>) -> Vec<DayChart> {
    let columns: Vec<String> = input
        .schedule
        .stage_names()
        .iter()
        .filter(|s| !input.disabled_stages.contains(*s))
        .cloned()
        .collect();

    input
        .schedule
        .days()
        .iter()
        .map(|(date, events)| {
            let blocks: Vec<Block> = events
                .iter()
                .filter_map(|event| {
                    let column = columns.iter().position(|c| *c == event.stage)?;
                    Some(block_for(event, column, input))
                })
                .collect();
            let hour_range = hour_range(&blocks);
            DayChart {
                date: *date,
                columns: columns.clone(),
                blocks,
                hour_range,
            }
        })
        .collect()
}

fn block_for(event: &Event, column: usize, input: &ChartInput<'_>) -> Block {
    let status = if input.conflicts.contains(event) {
        BlockStatus::Conflict
    } else if input.selection.contains(event) {
        BlockStatus::Selected
    } else {
        BlockStatus::Unselected
    };
    Block {
        column,
        top: event.start_hour(),
        bottom: event.end_hour(),
        label: input.aliases.display_name(&event.name).to_string(),
        start_label: event.start_label(),
        end_label: event.end_label(),
        status,
        event: event.clone(),
    }
}

fn hour_range(blocks: &[Block]) -> (f64, f64) {
    if blocks.is_empty() {
        return EMPTY_DAY_RANGE;
    }
    let lo = blocks
        .iter()
        .map(|b| b.top.min(b.bottom))
        .fold(f64::INFINITY, f64::min);
    let hi = blocks
        .iter()
        .map(|b| b.top.max(b.bottom))
        .fold(f64::NEG_INFINITY, f64::max);
    (lo.floor(), hi.ceil())
}
