// File: ./src/model/parser.rs
// Turns line-up text into a Schedule
use crate::error::{Error, RecordFault, Result, SkippedRecord};
use crate::model::item::Event;
use crate::model::schedule::Schedule;
use crate::storage::LocalStorage;
use chrono::{NaiveDate, NaiveTime};
use std::path::Path;

pub const DATE_FORMAT: &str = "%d.%m.%Y";
pub const TIME_FORMAT: &str = "%H:%M";
const HEADER_TOKEN: &str = "Band";
const COMMENT_MARKER: char = '#';
const FIELD_COUNT: usize = 5;

/// Result of a successful parse: the schedule plus any lines that were
/// skipped along the way.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub schedule: Schedule,
    pub skipped: Vec<SkippedRecord>,
}

/// Reads and parses a line-up file. The file is closed before returning.
pub fn parse_lineup_file<P: AsRef<Path>>(path: P) -> Result<ParseReport> {
    let text = LocalStorage::read(path)?;
    parse_lineup(&text)
}

/// Parses `name,dd.mm.yyyy,HH:MM,HH:MM,stage` records.
///
/// A bad date anywhere aborts the parse with [`Error::MalformedDate`]. Any
/// other bad record is logged and skipped.
pub fn parse_lineup(text: &str) -> Result<ParseReport> {
    let mut events = Vec::new();
    let mut skipped = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw.trim_end_matches('\r');

        match parse_record(line, line_number) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            Err(RecordError::Fatal(e)) => return Err(e),
            Err(RecordError::Skip(fault)) => {
                let record = SkippedRecord {
                    line: line_number,
                    content: line.to_string(),
                    fault,
                };
                log::warn!("{}", record);
                skipped.push(record);
            }
        }
    }

    let schedule = Schedule::from_events(events);
    log::info!(
        "parsed {} events on {} stages over {} days ({} lines skipped)",
        schedule.len(),
        schedule.stage_names().len(),
        schedule.days().len(),
        skipped.len()
    );
    Ok(ParseReport { schedule, skipped })
}

enum RecordError {
    Fatal(Error),
    Skip(RecordFault),
}

/// Blank lines, `#` comments and the header row. The header is recognised by
/// its first field being exactly `Band`, so acts such as "Bandit" are kept.
fn is_ignored(line: &str) -> bool {
    if line.trim().is_empty() || line.starts_with(COMMENT_MARKER) {
        return true;
    }
    line.split(',').next().map(str::trim) == Some(HEADER_TOKEN)
}

fn parse_record(line: &str, line_number: usize) -> std::result::Result<Option<Event>, RecordError> {
    if is_ignored(line) {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < FIELD_COUNT {
        return Err(RecordError::Skip(RecordFault::MissingFields {
            found: fields.len(),
        }));
    }
    let (name, date, start, end, stage) = (fields[0], fields[1], fields[2], fields[3], fields[4]);

    let date = parse_date(date).ok_or_else(|| {
        RecordError::Fatal(Error::MalformedDate {
            line: line_number,
            content: line.to_string(),
        })
    })?;

    let (Ok(start), Ok(end)) = (
        NaiveTime::parse_from_str(start, TIME_FORMAT),
        NaiveTime::parse_from_str(end, TIME_FORMAT),
    ) else {
        return Err(RecordError::Skip(RecordFault::InvalidTime));
    };

    if name.is_empty() {
        return Err(RecordError::Skip(RecordFault::EmptyName));
    }
    if stage.is_empty() {
        return Err(RecordError::Skip(RecordFault::EmptyStage));
    }

    Ok(Some(Event::new(
        name,
        stage,
        date.and_time(start),
        date.and_time(end),
    )))
}

/// Parses a `dd.mm.yyyy` date. chrono's `%Y` takes any number of digits, so
/// the year is required to be exactly four digits first.
pub(crate) fn parse_date(field: &str) -> Option<NaiveDate> {
    let (_, year) = field.rsplit_once('.')?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(field, DATE_FORMAT).ok()
}
