//! Application configuration.
//!
//! Settings come from a TOML file plus `SEERGATE__SECTION__KEY` environment
//! overrides, built into one struct at startup and injected into every
//! component. A missing required option fails startup.

use crate::availability::LookupFailurePolicy;
use crate::error::SeergateError;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "seergate.toml";
const CONFIG_PATH_ENV: &str = "SEERGATE_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Timeout in seconds for every outbound API call
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub server: ServerSettings,
    pub tmdb: TmdbSettings,
    pub jellyseerr: JellyseerrSettings,
    #[serde(default)]
    pub jellyfin: Option<JellyfinSettings>,
    pub providers: ProviderSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSettings {
    #[serde(default = "default_tmdb_url_base")]
    pub url_base: String,
    pub api_key: String,
    /// Region whose watch providers decide availability
    #[serde(default = "default_watch_region")]
    pub watch_region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JellyseerrSettings {
    pub url_base: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JellyfinSettings {
    pub url_base: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    /// Allow-listed streaming provider names, compared verbatim against the
    /// upstream provider names
    pub allowlist: Vec<String>,
    #[serde(default)]
    pub on_lookup_failure: LookupFailurePolicy,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Settings {
    /// Load settings from the configured path (`SEERGATE_CONFIG`, default
    /// `seergate.toml`) and the environment.
    pub fn load() -> Result<Self, SeergateError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load settings from an explicit file path plus environment overrides.
    /// The file itself is optional; required keys may come from either
    /// source.
    pub fn load_from(path: &str) -> Result<Self, SeergateError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("SEERGATE").separator("__"))
            .build()
            .map_err(|e| SeergateError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SeergateError::Config(e.to_string()))
    }

    #[must_use]
    pub const fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

fn default_tmdb_url_base() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_watch_region() -> String {
    "US".to_string()
}
