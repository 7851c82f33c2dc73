//! Search client: one request per search, no retries

use super::models::{ProviderSearchBody, RelaySearchBody, SearchQuery};
use crate::config::{Configuration, CrmSettings};
use crate::network::{ApiRequest, ApiResponse, HttpClient};
use crate::results::{normalize, SearchError, SearchResult};
use crate::transport::{self, Operation, TransportMode};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Anything that can answer a company search
#[async_trait]
pub trait CompanySource: Send + Sync {
    /// Reject a search that cannot succeed, without side effects
    fn check(&self, query: &SearchQuery, config: &Configuration) -> Result<(), SearchError> {
        preflight(query, config)
    }

    async fn search(&self, query: &SearchQuery, config: &Configuration) -> SearchResult;
}

/// Input and configuration checks shared by every source
pub fn preflight(query: &SearchQuery, config: &Configuration) -> Result<(), SearchError> {
    if query.is_empty() {
        return Err(SearchError::validation(
            "Please enter a company name to search",
        ));
    }

    if !config.is_configured {
        return Err(SearchError::configuration(
            "API access token not found. Make sure the host provides the access token variable.",
        ));
    }

    Ok(())
}

/// Client for the CRM search endpoint (direct or relayed)
#[derive(Clone)]
pub struct SearchClient {
    http: HttpClient,
    crm: CrmSettings,
}

impl SearchClient {
    pub fn new(http: HttpClient, crm: CrmSettings) -> Self {
        Self { http, crm }
    }

    /// Validate and resolve the search request without sending it
    pub fn build_request(
        &self,
        query: &SearchQuery,
        config: &Configuration,
    ) -> Result<ApiRequest, SearchError> {
        preflight(query, config)?;

        let request = transport::select(config, Operation::Search, &self.crm)?;
        let properties = self.crm.properties.clone();
        let limit = self.crm.effective_limit();

        let body = match config.transport_mode {
            TransportMode::Direct => serde_json::to_value(ProviderSearchBody::name_contains(
                &query.term,
                properties,
                limit,
            )),
            TransportMode::Relayed => serde_json::to_value(RelaySearchBody {
                search_term: query.term.clone(),
                properties,
                limit,
            }),
        }
        .map_err(|e| SearchError::validation(format!("Could not encode search: {}", e)))?;

        Ok(request.json(body))
    }

    /// Check that the configured transport answers at all
    pub async fn test_connection(&self, config: &Configuration) -> Result<Value, SearchError> {
        let request = transport::select(config, Operation::ConnectivityTest, &self.crm)?;
        let response = self.send(request).await?;

        if !response.is_success() {
            warn!("Connection test failed with HTTP {}", response.status);
            return Err(SearchError::remote(response.status, response.reason));
        }

        response.json().map_err(|e| {
            SearchError::remote(response.status, format!("malformed response: {}", e))
        })
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SearchError> {
        let limit = self.http.timeout();
        match timeout(limit, self.http.execute(request)).await {
            Ok(result) => result,
            Err(_) => Err(SearchError::network(format!(
                "request timed out after {:?}",
                limit
            ))),
        }
    }

    fn parse_results(response: &ApiResponse) -> Result<Vec<Value>, SearchError> {
        let body: Value = response.json().map_err(|e| {
            SearchError::remote(response.status, format!("malformed response: {}", e))
        })?;

        match body.get("results") {
            Some(Value::Array(records)) => Ok(records.clone()),
            _ => Err(SearchError::remote(
                response.status,
                "malformed response: missing results array",
            )),
        }
    }
}

#[async_trait]
impl CompanySource for SearchClient {
    fn check(&self, query: &SearchQuery, config: &Configuration) -> Result<(), SearchError> {
        self.build_request(query, config).map(|_| ())
    }

    async fn search(&self, query: &SearchQuery, config: &Configuration) -> SearchResult {
        let request = self.build_request(query, config)?;
        let start = Instant::now();

        debug!(
            "Searching companies for '{}' via {}",
            query.term, config.transport_mode
        );
        let response = self.send(request).await?;

        if !response.is_success() {
            warn!(
                "Company search for '{}' failed with HTTP {} {}",
                query.term, response.status, response.reason
            );
            return Err(SearchError::remote(response.status, response.reason));
        }

        let records = Self::parse_results(&response)?;
        let rows = normalize(&records);

        info!(
            "Found {} companies matching '{}' in {:?}",
            rows.len(),
            query.term,
            start.elapsed()
        );
        Ok(rows)
    }
}
