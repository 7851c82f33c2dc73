//! Configuration module for crm-company-search
//!
//! Two layers: [`Settings`] is the operator's settings.yml (endpoints,
//! timeouts, server), and [`Configuration`] is what the host hands the widget
//! at startup (token, relay URL, transport mode).

mod runtime;
mod settings;
mod variables;

pub use runtime::{ConfigLoader, Configuration};
pub use settings::*;
pub use variables::{EnvVariables, LayeredVariables, MapVariables, VariableProvider};

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "CRM_SEARCH_SETTINGS_PATH";

/// First settings file that exists, in lookup order
pub fn settings_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("crm-company-search/settings.yml"));
    }

    paths.into_iter().find(|p| p.exists())
}

/// Read settings from `path`, or use defaults, then apply env overrides
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    Ok(settings)
}

/// Host variables as the binary sees them: process environment first, then
/// the inline `host.variables` map from settings
pub fn host_variables(settings: &Settings) -> LayeredVariables {
    LayeredVariables::new()
        .layer(EnvVariables::new())
        .layer(MapVariables::from(settings.host.variables.clone()))
}
