// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod conflict;
pub mod item;
pub mod parser;
pub mod schedule;

pub use conflict::{find_conflicts, overlaps};
pub use item::{Event, WRAPAROUND_THRESHOLD, day_key, festival_hour};
pub use parser::{ParseReport, parse_lineup, parse_lineup_file};
pub use schedule::Schedule;
