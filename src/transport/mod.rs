//! Transport selection
//!
//! Decides where a request goes and how it authenticates. Direct requests hit
//! the CRM API with a bearer token; relayed requests hit an intermediary that
//! holds the real credentials and only wants our token in `X-API-Token`.

use crate::config::{Configuration, CrmSettings};
use crate::network::ApiRequest;
use crate::results::SearchError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;
use url::Url;

/// Header carrying the caller token to the relay
pub const RELAY_TOKEN_HEADER: &str = "X-API-Token";

/// How requests reach the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Straight to the provider API
    #[default]
    Direct,
    /// Through a relay that holds the provider credentials
    Relayed,
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "backend" | "relay" | "relayed" => Ok(Self::Relayed),
            other => Err(format!("unknown transport mode: {}", other)),
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Relayed => f.write_str("relayed"),
        }
    }
}

/// Logical operation being routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ConnectivityTest,
    Search,
}

/// Resolve the concrete request (method, url, headers) for an operation.
///
/// Fails with a configuration error before anything touches the network when
/// the selected transport is missing what it needs.
pub fn select(
    config: &Configuration,
    operation: Operation,
    crm: &CrmSettings,
) -> Result<ApiRequest, SearchError> {
    let request = match config.transport_mode {
        TransportMode::Direct => direct(config, operation, crm)?,
        TransportMode::Relayed => relayed(config, operation, crm)?,
    };

    debug!(
        "Routed {:?} via {} to {}",
        operation, config.transport_mode, request.url
    );
    Ok(request.header("Content-Type", "application/json"))
}

fn direct(
    config: &Configuration,
    operation: Operation,
    crm: &CrmSettings,
) -> Result<ApiRequest, SearchError> {
    if config.access_token.trim().is_empty() {
        return Err(SearchError::configuration(
            "Access token not configured for direct API calls",
        ));
    }

    let base = parse_url(&crm.api_url, "API URL")?;
    let request = match operation {
        Operation::ConnectivityTest => {
            let mut url = base;
            url.query_pairs_mut().append_pair("limit", "1");
            ApiRequest::get(url.as_str())
        }
        Operation::Search => {
            ApiRequest::post(format!("{}/search", base.as_str().trim_end_matches('/')))
        }
    };

    Ok(request.header(
        "Authorization",
        format!("Bearer {}", config.access_token.trim()),
    ))
}

fn relayed(
    config: &Configuration,
    operation: Operation,
    crm: &CrmSettings,
) -> Result<ApiRequest, SearchError> {
    let base = config
        .relay_base()
        .ok_or_else(|| SearchError::configuration("Backend server URL not configured"))?;
    parse_url(base, "relay URL")?;

    let base = base.trim_end_matches('/');
    let request = match operation {
        Operation::ConnectivityTest => {
            ApiRequest::get(format!("{}{}", base, crm.relay_paths.test))
        }
        Operation::Search => ApiRequest::post(format!("{}{}", base, crm.relay_paths.search)),
    };

    Ok(request.header(RELAY_TOKEN_HEADER, config.access_token.trim()))
}

fn parse_url(raw: &str, what: &str) -> Result<Url, SearchError> {
    Url::parse(raw.trim())
        .map_err(|e| SearchError::configuration(format!("Invalid {} '{}': {}", what, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HttpMethod;
    use crate::results::ErrorKind;

    fn crm() -> CrmSettings {
        CrmSettings::default()
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("direct".parse::<TransportMode>(), Ok(TransportMode::Direct));
        assert_eq!("Backend".parse::<TransportMode>(), Ok(TransportMode::Relayed));
        assert_eq!(" relayed ".parse::<TransportMode>(), Ok(TransportMode::Relayed));
        assert!("cors-proxy".parse::<TransportMode>().is_err());
    }

    #[test]
    fn test_direct_search_uses_bearer() {
        let config = Configuration::direct("pat-abc");
        let req = select(&config, Operation::Search, &crm()).unwrap();

        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.url,
            "https://api.hubapi.com/crm/v3/objects/companies/search"
        );
        assert_eq!(req.headers["Authorization"], "Bearer pat-abc");
        assert_eq!(req.headers["Content-Type"], "application/json");
        assert!(!req.headers.contains_key(RELAY_TOKEN_HEADER));
    }

    #[test]
    fn test_direct_connectivity_test() {
        let config = Configuration::direct("pat-abc");
        let req = select(&config, Operation::ConnectivityTest, &crm()).unwrap();

        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "https://api.hubapi.com/crm/v3/objects/companies?limit=1"
        );
    }

    #[test]
    fn test_direct_requires_token() {
        let config = Configuration::direct("");
        let err = select(&config, Operation::Search, &crm()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_relayed_paths_and_token_header() {
        let config = Configuration::relayed("https://relay.example.com/", "tok");

        let search = select(&config, Operation::Search, &crm()).unwrap();
        assert_eq!(
            search.url,
            "https://relay.example.com/hubspot/companies/search"
        );
        assert_eq!(search.method, HttpMethod::Post);
        assert_eq!(search.headers[RELAY_TOKEN_HEADER], "tok");
        assert!(!search.headers.contains_key("Authorization"));

        let test = select(&config, Operation::ConnectivityTest, &crm()).unwrap();
        assert_eq!(test.url, "https://relay.example.com/hubspot/test");
        assert_eq!(test.method, HttpMethod::Get);
    }

    #[test]
    fn test_relayed_without_base_is_configuration_error() {
        let mut config = Configuration::relayed("", "tok");
        let err = select(&config, Operation::Search, &crm()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "Backend server URL not configured");

        config.relay_base_url = None;
        assert!(select(&config, Operation::ConnectivityTest, &crm()).is_err());
    }

    #[test]
    fn test_relayed_rejects_garbage_url() {
        let config = Configuration::relayed("not a url", "tok");
        let err = select(&config, Operation::Search, &crm()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
