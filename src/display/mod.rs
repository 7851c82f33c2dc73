//! Display sinks
//!
//! The session pushes rows and status into a [`DisplaySink`] and never reads
//! anything back. [`MemorySink`] keeps the latest state for the web page;
//! [`TableSink`] prints a plain-text table for the command line.

mod memory;
mod table;

pub use memory::{DisplaySnapshot, MemorySink};
pub use table::TableSink;

use crate::results::CompanyRecord;
use serde::Serialize;

/// Search lifecycle state as shown to the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum DisplayStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

/// Write-only view the core renders into.
///
/// The session calls into the sink while holding its results lock, so a sink
/// must not call back into the session.
pub trait DisplaySink: Send + Sync {
    /// Replace every displayed row
    fn render(&self, rows: &[CompanyRecord]);

    /// Update the lifecycle state
    fn set_status(&self, status: DisplayStatus);
}

/// Counter text: "1 company", "3 companies"
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 company".to_string()
    } else {
        format!("{} companies", count)
    }
}

/// Table heading; carries the count once a search has produced rows
pub fn title(found: Option<usize>) -> String {
    match found {
        Some(count) => format!("Companies ({} found)", count),
        None => "Companies".to_string(),
    }
}
