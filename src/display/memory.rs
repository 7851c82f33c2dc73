//! In-memory sink holding the latest rendered state

use super::{count_label, DisplaySink, DisplayStatus};
use crate::results::CompanyRecord;
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Copy of everything currently on screen
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplaySnapshot {
    pub rows: Vec<CompanyRecord>,
    pub status: DisplayStatus,
    /// Number of `render` calls so far
    pub renders: u64,
    /// Every status set, oldest first
    pub history: Vec<DisplayStatus>,
}

impl DisplaySnapshot {
    pub fn count_label(&self) -> String {
        count_label(self.rows.len())
    }
}

/// Sink that remembers what it was told
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    state: Arc<RwLock<DisplaySnapshot>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl DisplaySink for MemorySink {
    fn render(&self, rows: &[CompanyRecord]) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.rows = rows.to_vec();
        state.renders += 1;
    }

    fn set_status(&self, status: DisplayStatus) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.history.push(status.clone());
        state.status = status;
    }
}
