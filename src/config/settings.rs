//! Settings structures for crm-company-search configuration

use crate::{DEFAULT_TIMEOUT, MAX_PAGE_LIMIT};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub crm: CrmSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub host: HostSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (CRM_SEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("CRM_SEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("CRM_SEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("CRM_SEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("CRM_SEARCH_API_URL") {
            self.crm.api_url = val;
        }
        if let Ok(val) = std::env::var("CRM_SEARCH_REQUEST_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.outgoing.request_timeout = secs;
            }
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name displayed in the widget header
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Company Search".to_string(),
        }
    }
}

/// CRM provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmSettings {
    /// Companies object endpoint of the provider API
    pub api_url: String,
    /// Records requested per search
    pub page_limit: u32,
    /// Properties requested for each record
    pub properties: Vec<String>,
    /// Relay sub-paths
    pub relay_paths: RelayPaths,
}

impl CrmSettings {
    /// Page size actually sent, never above the provider ceiling
    pub fn effective_limit(&self) -> u32 {
        self.page_limit.clamp(1, MAX_PAGE_LIMIT)
    }
}

impl Default for CrmSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.hubapi.com/crm/v3/objects/companies".to_string(),
            page_limit: MAX_PAGE_LIMIT,
            properties: ["name", "domain", "phone", "city", "industry", "website"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            relay_paths: RelayPaths::default(),
        }
    }
}

/// Relay endpoints, appended to the relay base URL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayPaths {
    pub test: String,
    pub search: String,
}

impl Default for RelayPaths {
    fn default() -> Self {
        Self {
            test: "/hubspot/test".to_string(),
            search: "/hubspot/companies/search".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8890,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_TIMEOUT,
            pool_maxsize: 10,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Host variable settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    /// Delay before reading host variables, giving the host time to initialize
    pub startup_delay_ms: u64,
    /// Names of the host variables to read
    pub variable_names: VariableNames,
    /// Inline variables, consulted after the process environment
    pub variables: HashMap<String, String>,
    /// Host variable that receives submissions, if any
    pub submission_variable: Option<String>,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            startup_delay_ms: 100,
            variable_names: VariableNames::default(),
            variables: HashMap::new(),
            submission_variable: None,
        }
    }
}

/// Host variable names for the three configuration keys
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableNames {
    pub access_token: String,
    pub relay_url: String,
    pub transport_mode: String,
}

impl Default for VariableNames {
    fn default() -> Self {
        Self {
            access_token: "HubSpotAPIToken".to_string(),
            relay_url: "HubSpotBackendURL".to_string(),
            transport_mode: "HubSpotCORSOption".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8890);
        assert!(!settings.general.debug);
        assert_eq!(settings.crm.page_limit, 100);
        assert_eq!(settings.crm.properties.len(), 6);
        assert_eq!(settings.host.startup_delay_ms, 100);
        assert_eq!(settings.host.variable_names.access_token, "HubSpotAPIToken");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
crm:
  page_limit: 500
host:
  variables:
    HubSpotAPIToken: "pat-123"
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.crm.effective_limit(), 100);
        assert_eq!(settings.crm.relay_paths.search, "/hubspot/companies/search");
        assert_eq!(
            settings.host.variables.get("HubSpotAPIToken").map(String::as_str),
            Some("pat-123")
        );
        assert_eq!(settings.outgoing.request_timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_effective_limit_lower_bound() {
        let crm = CrmSettings {
            page_limit: 0,
            ..Default::default()
        };
        assert_eq!(crm.effective_limit(), 1);
    }
}
