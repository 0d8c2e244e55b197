//! Configuration model loaded from external sources.

use std::collections::HashMap;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::profile::{FULL_PROFILE, FormProfile};
use crate::domain::types::SiteId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api.base_url must not be empty")]
    EmptyBaseUrl,
    #[error("api.site_id is not a positive integer: {0}")]
    InvalidSiteId(String),
    #[error("unknown form profile: {0}")]
    UnknownProfile(String),
}

#[derive(Clone, Debug, Deserialize)]
/// Backend connection settings. Editable after deployment; read once at start.
pub struct ApiConfig {
    pub base_url: String,
    /// Kept as text so a quoted value in YAML or an env var both work.
    pub site_id: String,
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, Deserialize)]
/// Third-party form relay used by the contact page.
pub struct ContactConfig {
    pub endpoint: String,
    pub access_key: String,
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    pub api: ApiConfig,
    #[serde(default = "default_profile_name")]
    pub form_profile: String,
    /// Extra or overriding profiles keyed by name.
    #[serde(default)]
    pub profiles: HashMap<String, FormProfile>,
    #[serde(default = "default_settings_cache_ttl_secs")]
    pub settings_cache_ttl_secs: u64,
    #[serde(default)]
    pub contact: Option<ContactConfig>,
}

fn default_settings_path() -> String {
    "/site-settings/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_profile_name() -> String {
    FULL_PROFILE.to_string()
}

fn default_settings_cache_ttl_secs() -> u64 {
    6 * 60 * 60
}

impl ServerConfig {
    /// Layers `config/default.yaml`, the optional `config/{app_env}.yaml` and
    /// `APP_*` environment variables (`__` separates nested keys, e.g.
    /// `APP_API__BASE_URL`).
    pub fn load(app_env: &str) -> Result<Self, config::ConfigError> {
        Config::builder()
            // Add `./config/default.yaml`
            .add_source(File::with_name("config/default"))
            // Add environment-specific overrides
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            // Add settings from the environment (with a prefix of APP)
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Resolves the backend location.
    pub fn site_env(&self) -> Result<SiteEnv, ConfigError> {
        SiteEnv::new(&self.api.base_url, &self.api.site_id)
    }

    /// Resolves the active form profile. Configured profiles win over
    /// built-ins with the same name.
    pub fn active_profile(&self) -> Result<FormProfile, ConfigError> {
        let name = self.form_profile.trim();
        if let Some(profile) = self.profiles.get(name) {
            let mut profile = profile.clone();
            profile.name = name.to_string();
            return Ok(profile);
        }
        FormProfile::builtin(name).ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }
}

/// Backend base URL and tenant id, resolved once at start and read-only
/// afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteEnv {
    base_url: String,
    site_id: SiteId,
}

impl SiteEnv {
    pub fn new(base_url: &str, site_id: &str) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        let site_id = site_id
            .parse::<SiteId>()
            .map_err(|_| ConfigError::InvalidSiteId(site_id.to_string()))?;

        Ok(Self {
            base_url: base_url.to_string(),
            site_id,
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn site_id(&self) -> SiteId {
        self.site_id
    }

    /// Joins `path` (starting with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
