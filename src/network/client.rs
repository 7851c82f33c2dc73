//! HTTP client for calling the CRM API or the relay

use super::request::{ApiRequest, ApiResponse, HttpMethod, RequestBody};
use crate::config::OutgoingSettings;
use crate::results::SearchError;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// HTTP client wrapper with a request timeout always applied
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> anyhow::Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> anyhow::Result<Self> {
        let timeout = Duration::try_from_secs_f64(settings.request_timeout.max(0.1))
            .map_err(|e| {
                anyhow::anyhow!(
                    "Invalid request timeout {}: {}",
                    settings.request_timeout,
                    e
                )
            })?;
        let mut builder = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        Ok(Self {
            client: builder.build()?,
            timeout,
            user_agent: format!("crm-company-search/{}", crate::VERSION),
        })
    }

    /// Configured request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute a request; any transport failure becomes a network error
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, SearchError> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        req_builder = req_builder
            .timeout(self.timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = request.data {
            req_builder = match body {
                RequestBody::Json(json) => req_builder.json(&json),
            };
        }

        debug!("{:?} {}", request.method, request.url);
        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: Response) -> Result<ApiResponse, SearchError> {
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
        let text = response.text().await?;

        Ok(ApiResponse {
            status: status.as_u16(),
            reason,
            text,
        })
    }
}
