//! Application configuration
//!
//! Configuration loaded from .counter-xblock.toml file.

use ns_store::Mode;
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable overriding the CSRF token
pub const CSRF_TOKEN_ENV_VAR: &str = "XBLOCK_CSRF_TOKEN";

/// Application configuration loaded from .counter-xblock.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// `development` makes invalid store lookups fail loudly
    #[serde(default)]
    pub environment: Mode,

    /// Base URL of the hosting LMS (or workbench)
    #[serde(default = "default_lms_url")]
    pub lms_url: String,

    /// Usage id of the block element, used when building handler URLs
    #[serde(default = "default_usage_id")]
    pub usage_id: String,

    /// Value of the `csrftoken` cookie issued by the host
    #[serde(default)]
    pub csrf_token: Option<String>,

    /// Count the block starts with before the first increment
    #[serde(default)]
    pub initial_count: i64,
}

fn default_lms_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_usage_id() -> String {
    "webpack_xblock.counter".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Mode::default(),
            lms_url: default_lms_url(),
            usage_id: default_usage_id(),
            csrf_token: None,
            initial_count: 0,
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults.
    /// Environment variables override file values.
    pub fn load() -> Self {
        let mut config = Self::from_file().unwrap_or_else(|| {
            log::debug!("Using default app config");
            Self::default()
        });
        config.apply_env_overrides(|name| env::var(name).ok());
        config
    }

    fn from_file() -> Option<Self> {
        let content = crate::load_config_file()?;
        match toml::from_str(&content) {
            Ok(config) => {
                log::info!("Loaded app config from file");
                Some(config)
            }
            Err(e) => {
                log::warn!("Failed to parse config file: {}", e);
                None
            }
        }
    }

    /// Apply `XBLOCK_ENV` and `XBLOCK_CSRF_TOKEN` from the given lookup
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(mode) = Mode::from_env_with(&lookup) {
            self.environment = mode;
        }
        if let Some(token) = lookup(CSRF_TOKEN_ENV_VAR).filter(|t| !t.is_empty()) {
            self.csrf_token = Some(token);
        }
    }
}
