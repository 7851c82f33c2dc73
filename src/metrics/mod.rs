//! Metrics collection module
//!
//! Tracks search volume, outcomes and response times for a session.

use crate::results::ErrorKind;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Number of response times kept for the rolling average
const RESPONSE_WINDOW: usize = 100;

/// Session metrics collector
#[derive(Debug, Default)]
pub struct SessionMetrics {
    /// Searches that were sent to the network
    issued: AtomicU64,
    /// Searches whose rows were displayed
    successes: AtomicU64,
    /// Responses dropped because a newer search was issued
    superseded: AtomicU64,
    /// Failures by kind
    failures: RwLock<HashMap<ErrorKind, u64>>,
    /// Recent response times in ms
    response_times: RwLock<VecDeque<u64>>,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_issued(&self) {
        self.issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_superseded(&self) {
        self.superseded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self, kind: ErrorKind) {
        let mut failures = self.failures.write().unwrap_or_else(|e| e.into_inner());
        *failures.entry(kind).or_insert(0) += 1;
    }

    /// Record a round-trip time
    pub fn record_response_time(&self, time_ms: u64) {
        let mut times = self
            .response_times
            .write()
            .unwrap_or_else(|e| e.into_inner());
        if times.len() >= RESPONSE_WINDOW {
            times.pop_front();
        }
        times.push_back(time_ms);
    }

    /// Average over the recent window
    pub fn avg_response_time(&self) -> Option<u64> {
        let times = self.response_times.read().unwrap_or_else(|e| e.into_inner());
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<u64>() / times.len() as u64)
        }
    }

    pub fn failures(&self, kind: ErrorKind) -> u64 {
        let failures = self.failures.read().unwrap_or_else(|e| e.into_inner());
        failures.get(&kind).copied().unwrap_or(0)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let failures = self
            .failures
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(kind, count)| (kind.as_str().to_string(), *count))
            .collect();

        MetricsSnapshot {
            issued: self.issued.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            superseded: self.superseded.load(Ordering::Relaxed),
            failures,
            avg_response_time_ms: self.avg_response_time(),
        }
    }
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub issued: u64,
    pub successes: u64,
    pub superseded: u64,
    pub failures: HashMap<String, u64>,
    pub avg_response_time_ms: Option<u64>,
}
