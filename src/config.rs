use std::time::Duration;

use serde::Deserialize;

use crate::error::Error;

pub const DEFAULT_API_URL: &str = "https://api.hosting.ionos.com/dns/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Versioned REST root, e.g. https://api.hosting.ionos.com/dns/v1
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout, covering connect through body read
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Config {
    /// Parse from environment variables (IONOS_API_URL, IONOS_TIMEOUT_SECS)
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(std::env::vars())
    }

    pub(crate) fn from_vars<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("IONOS_")
            .from_iter(vars)
            .map_err(|e| Error::ConfigError(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

fn default_timeout_secs() -> u64 {
    30
}
