// File: ./src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the line-up, selection and alias readers.
#[derive(Debug, Error)]
pub enum Error {
    /// A record's date field did not match `dd.mm.yyyy`. Fails the whole parse.
    #[error("could not parse date on line {line}\ninvalid line: {content}")]
    MalformedDate { line: usize, content: String },

    /// An imported selection names acts the current line-up does not know.
    #[error("selection contains acts that are not in the line-up: {}", .names.join(", "))]
    UnknownEventInSelection { names: Vec<String> },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a line-up record was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFault {
    MissingFields { found: usize },
    InvalidTime,
    EmptyName,
    EmptyStage,
}

impl std::fmt::Display for RecordFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordFault::MissingFields { found } => {
                write!(f, "expected 5 fields, found {}", found)
            }
            RecordFault::InvalidTime => write!(f, "times must be HH:MM"),
            RecordFault::EmptyName => write!(f, "empty band name"),
            RecordFault::EmptyStage => write!(f, "empty stage"),
        }
    }
}

/// A line-up line that could not be turned into an event. Parsing carries on
/// past these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not parse line {line} ({fault}): {content}")]
pub struct SkippedRecord {
    pub line: usize,
    pub content: String,
    pub fault: RecordFault,
}
