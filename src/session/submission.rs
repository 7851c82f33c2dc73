//! Hand-off of the current results to the host

use crate::config::VariableProvider;
use crate::results::CompanyRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// What the widget hands to the host when the user submits
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub search_term: String,
    pub companies: Vec<CompanyRecord>,
    pub total_records: usize,
    pub timestamp: DateTime<Utc>,
}

impl Submission {
    pub fn new(search_term: String, companies: Vec<CompanyRecord>) -> Self {
        Self {
            search_term,
            total_records: companies.len(),
            companies,
            timestamp: Utc::now(),
        }
    }

    /// Store the submission as JSON in a host variable
    pub fn publish(&self, provider: &dyn VariableProvider, variable: &str) -> bool {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize submission: {}", e);
                return false;
            }
        };

        let stored = provider.set(variable, &json);
        if stored {
            info!(
                "Submitted {} companies for '{}' to host variable {}",
                self.total_records, self.search_term, variable
            );
        }
        stored
    }
}
