//! Search session owned by one widget instance
//!
//! Holds the configuration, the current result set and a monotonic request
//! counter. Each search takes the next sequence number; when its response
//! arrives and a newer search has been issued (or the results were cleared)
//! in the meantime, the response is dropped without touching the display.

mod submission;

pub use submission::Submission;

use crate::config::{ConfigLoader, Configuration, VariableNames, VariableProvider};
use crate::display::{DisplaySink, DisplayStatus};
use crate::metrics::SessionMetrics;
use crate::results::{CompanyRecord, SearchError};
use crate::search::{CompanySource, SearchQuery};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use std::time::Instant;
use tracing::{debug, info, warn};

/// What happened to a submitted search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Rows were rendered; carries exactly the rows this search produced
    Displayed(Vec<CompanyRecord>),
    /// The search failed and the error was shown
    Failed(SearchError),
    /// A newer search or a clear overtook this one; nothing was shown
    Superseded,
}

#[derive(Debug, Default)]
struct CurrentResults {
    term: Option<String>,
    rows: Vec<CompanyRecord>,
}

/// Widget-owned search state
pub struct SearchSession {
    config: RwLock<Configuration>,
    source: Arc<dyn CompanySource>,
    sink: Arc<dyn DisplaySink>,
    sequence: AtomicU64,
    current: RwLock<CurrentResults>,
    metrics: SessionMetrics,
}

impl SearchSession {
    pub fn new(
        config: Configuration,
        source: Arc<dyn CompanySource>,
        sink: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            config: RwLock::new(config),
            source,
            sink,
            sequence: AtomicU64::new(0),
            current: RwLock::new(CurrentResults::default()),
            metrics: SessionMetrics::new(),
        }
    }

    /// Copy of the active configuration
    pub fn configuration(&self) -> Configuration {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Set the access token directly, bypassing the host
    pub fn set_access_token(&self, token: impl Into<String>) {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        config.set_access_token(token);
        info!("Access token set, configured: {}", config.is_configured);
    }

    /// Re-read the configuration from host variables
    pub fn reload_configuration(&self, provider: &dyn VariableProvider, names: VariableNames) {
        let loaded = ConfigLoader::new(provider).with_names(names).load();
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = loaded;
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    /// Rows currently displayed
    pub fn results(&self) -> Vec<CompanyRecord> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .rows
            .clone()
    }

    /// Term that produced the displayed rows
    pub fn current_term(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .term
            .clone()
    }

    /// Run a search and push the outcome to the display sink
    pub async fn submit_search(&self, term: &str) -> SearchOutcome {
        let query = SearchQuery::new(term);
        let config = self.configuration();

        // Bad input and bad configuration never reach the Loading state, but
        // still count as the latest action.
        if let Err(err) = self.source.check(&query, &config) {
            warn!("Search rejected: {}", err);
            let _current = self.lock_current();
            self.sequence.fetch_add(1, Ordering::SeqCst);
            return self.fail(err);
        }

        let seq = {
            let _current = self.lock_current();
            let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
            self.sink.set_status(DisplayStatus::Loading);
            seq
        };
        self.metrics.record_issued();

        let mut guard = LoadingGuard {
            session: self,
            seq,
            armed: true,
        };
        let start = Instant::now();
        let result = self.source.search(&query, &config).await;
        guard.armed = false;

        // Check and commit under the results lock; clear and newer searches
        // take it too.
        let mut current = self.lock_current();
        if !self.is_latest(seq) {
            debug!("Discarding stale response for search #{} ('{}')", seq, query.term);
            self.metrics.record_superseded();
            return SearchOutcome::Superseded;
        }

        self.metrics
            .record_response_time(start.elapsed().as_millis() as u64);

        match result {
            Ok(rows) => {
                self.sink.render(&rows);
                current.term = Some(query.term);
                current.rows = rows.clone();
                self.sink.set_status(DisplayStatus::Idle);
                self.metrics.record_success();
                SearchOutcome::Displayed(rows)
            }
            Err(err) => {
                warn!("Search #{} failed: {}", seq, err);
                self.fail(err)
            }
        }
    }

    /// Drop the displayed rows; in-flight searches will be discarded
    pub fn clear(&self) {
        let mut current = self.lock_current();
        self.sequence.fetch_add(1, Ordering::SeqCst);
        *current = CurrentResults::default();
        self.sink.render(&[]);
        self.sink.set_status(DisplayStatus::Idle);
        debug!("Search results cleared");
    }

    /// Snapshot of the current results for hand-off to the host
    pub fn submission(&self) -> Submission {
        let current = self.current.read().unwrap_or_else(|e| e.into_inner());
        Submission::new(
            current.term.clone().unwrap_or_default(),
            current.rows.clone(),
        )
    }

    fn lock_current(&self) -> RwLockWriteGuard<'_, CurrentResults> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }

    fn fail(&self, err: SearchError) -> SearchOutcome {
        self.metrics.record_failure(err.kind());
        self.sink.set_status(DisplayStatus::Error(err.to_string()));
        SearchOutcome::Failed(err)
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == seq
    }
}

/// Puts the display back to Idle if a search future is dropped mid-flight
struct LoadingGuard<'a> {
    session: &'a SearchSession,
    seq: u64,
    armed: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let _current = self.session.lock_current();
        if self.session.is_latest(self.seq) {
            debug!("Search #{} abandoned, resetting display", self.seq);
            self.session.sink.set_status(DisplayStatus::Idle);
        }
    }
}
