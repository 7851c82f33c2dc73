//! Runtime configuration read from host variables

use super::settings::VariableNames;
use super::variables::VariableProvider;
use crate::transport::TransportMode;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Credentials and transport choice for issuing requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub transport_mode: TransportMode,
    pub relay_base_url: Option<String>,
    #[serde(skip_serializing)]
    pub access_token: String,
    pub is_configured: bool,
}

impl Configuration {
    /// Direct transport with the given token
    pub fn direct(token: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.set_access_token(token);
        config
    }

    /// Relayed transport through `relay_base_url`
    pub fn relayed(relay_base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut config = Self::direct(token);
        config.transport_mode = TransportMode::Relayed;
        config.relay_base_url = Some(relay_base_url.into());
        config
    }

    /// Replace the token; an empty token leaves the configuration unconfigured
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = token.into().trim().to_string();
        self.is_configured = !self.access_token.is_empty();
    }

    /// Relay base URL if one is set and non-blank
    pub fn relay_base(&self) -> Option<&str> {
        self.relay_base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Reads a [`Configuration`] out of a host variable provider
pub struct ConfigLoader<'a> {
    provider: &'a dyn VariableProvider,
    names: VariableNames,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(provider: &'a dyn VariableProvider) -> Self {
        Self {
            provider,
            names: VariableNames::default(),
        }
    }

    /// Use non-default variable names
    pub fn with_names(mut self, names: VariableNames) -> Self {
        self.names = names;
        self
    }

    /// Read the three configuration keys; missing keys fall back to defaults
    pub fn load(&self) -> Configuration {
        let mut config = Configuration::default();

        match self.read(&self.names.access_token) {
            Some(token) => {
                config.set_access_token(token);
                info!("Access token loaded from host variable");
            }
            None => warn!(
                "Access token not found in host variable: {}",
                self.names.access_token
            ),
        }

        config.relay_base_url = self.read(&self.names.relay_url);
        if config.relay_base_url.is_some() {
            info!("Relay base URL loaded from host variable");
        }

        config.transport_mode = self
            .read(&self.names.transport_mode)
            .and_then(|raw| raw.parse::<TransportMode>().ok())
            .unwrap_or_else(|| {
                debug!("Transport mode not set, detecting from relay URL");
                if config.relay_base_url.is_some() {
                    TransportMode::Relayed
                } else {
                    TransportMode::Direct
                }
            });

        info!("Transport mode: {}", config.transport_mode);
        config
    }

    /// Wait for the host to settle, then load
    pub async fn load_deferred(&self, delay: Duration) -> Configuration {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.load()
    }

    fn read(&self, name: &str) -> Option<String> {
        self.provider
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
