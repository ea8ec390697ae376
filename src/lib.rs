pub mod alias;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod running_order;
pub mod selection;
pub mod session;
pub mod storage;

#[cfg(feature = "tui")]
pub mod tui;

pub use error::{Error, Result};
pub use model::{Event, Schedule};
pub use selection::{Selection, SelectionFormat};
pub use session::Session;
