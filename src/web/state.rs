//! Application state shared across handlers

use crate::config::{Configuration, Settings, VariableProvider};
use crate::display::MemorySink;
use crate::search::SearchClient;
use crate::session::SearchSession;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// The widget's search session
    pub session: Arc<SearchSession>,
    /// Client, kept for connectivity tests
    pub client: SearchClient,
    /// What the session last rendered
    pub display: MemorySink,
    /// Host variables, for submissions
    pub variables: Arc<dyn VariableProvider>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        settings: Settings,
        client: SearchClient,
        config: Configuration,
        variables: Arc<dyn VariableProvider>,
    ) -> anyhow::Result<Self> {
        let display = MemorySink::new();
        let session = Arc::new(SearchSession::new(
            config,
            Arc::new(client.clone()),
            Arc::new(display.clone()),
        ));

        Ok(Self {
            settings: Arc::new(settings),
            session,
            client,
            display,
            variables,
            templates: Arc::new(super::Templates::new()?),
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
