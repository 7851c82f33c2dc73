#![allow(dead_code)]

use crm_company_search::config::{OutgoingSettings, Settings};
use crm_company_search::network::HttpClient;
use crm_company_search::search::SearchClient;
use crm_company_search::SearchOutcome;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const API_PATH: &str = "/crm/v3/objects/companies";

/// Settings pointing the provider API at the mock server
pub fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.crm.api_url = format!("{}{}", server.uri(), API_PATH);
    settings.outgoing = OutgoingSettings {
        request_timeout: 2.0,
        ..Default::default()
    };
    settings.host.startup_delay_ms = 0;
    settings
}

pub fn client_for(settings: &Settings) -> SearchClient {
    let http = HttpClient::with_settings(&settings.outgoing).expect("http client");
    SearchClient::new(http, settings.crm.clone())
}

/// Provider-shaped record
pub fn company(id: &str, props: Value) -> Value {
    json!({ "id": id, "properties": props })
}

/// The two-company answer used across tests; the second has no phone
pub fn acme_results() -> Value {
    json!({
        "total": 2,
        "results": [
            company("101", json!({
                "name": "Acme Inc",
                "domain": "acme.com",
                "phone": "+1 555 0100",
                "city": "Springfield",
                "industry": "MANUFACTURING"
            })),
            company("102", json!({
                "name": "Acme Corp",
                "domain": "acmecorp.com",
                "city": "Shelbyville",
                "industry": "RETAIL"
            }))
        ]
    })
}

/// Whether the recorded request carried a header, compared case-insensitively
pub fn has_header(request: &wiremock::Request, name: &str) -> bool {
    request
        .headers
        .keys()
        .any(|key| key.as_str().eq_ignore_ascii_case(name))
}

/// Row count of a displayed outcome
pub fn shown(outcome: &SearchOutcome) -> Option<usize> {
    match outcome {
        SearchOutcome::Displayed(rows) => Some(rows.len()),
        _ => None,
    }
}
