//! Store coordinates and credentials.
//!
//! # Design
//! A `StoreConfig` is passed explicitly into the repository constructor; the
//! crate never reads ambient configuration on its own. `from_env` is a
//! convenience for binaries, and `from_lookup` keeps the parsing testable
//! without touching the process environment.

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://api.airtable.com";

pub const ENV_API_KEY: &str = "AIRTABLE_API_KEY";
pub const ENV_BASE_ID: &str = "AIRTABLE_BASE_ID";
pub const ENV_TABLE_ID: &str = "AIRTABLE_TABLE_ID";
pub const ENV_ENDPOINT: &str = "AIRTABLE_ENDPOINT_URL";

/// Where the guest table lives and how to authenticate against it.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub api_key: String,
    pub base_id: String,
    pub table_id: String,
    pub endpoint: String,
}

impl StoreConfig {
    pub fn new(
        api_key: impl Into<String>,
        base_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_id: base_id.into(),
            table_id: table_id.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different host, e.g. a local mock store.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any key/value source. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let config = Self {
            api_key: required(ENV_API_KEY)?,
            base_id: required(ENV_BASE_ID)?,
            table_id: required(ENV_TABLE_ID)?,
            endpoint: lookup(ENV_ENDPOINT)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::Missing(ENV_API_KEY));
        }
        if !self.api_key.chars().all(|c| c.is_ascii_graphic()) {
            return Err(ConfigError::Malformed {
                field: ENV_API_KEY,
                reason: "must be printable ASCII without whitespace".to_string(),
            });
        }
        check_segment(ENV_BASE_ID, &self.base_id)?;
        check_segment(ENV_TABLE_ID, &self.table_id)?;
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::Malformed {
                field: ENV_ENDPOINT,
                reason: format!("{:?} is not an http(s) URL", self.endpoint),
            });
        }
        Ok(())
    }
}

// The API key stays out of logs.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("api_key", &"<redacted>")
            .field("base_id", &self.base_id)
            .field("table_id", &self.table_id)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// True when `value` can be placed in a URL path without escaping.
pub(crate) fn is_path_segment(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn check_segment(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Missing(field));
    }
    if !is_path_segment(value) {
        return Err(ConfigError::Malformed {
            field,
            reason: format!("{value:?} may only contain ASCII letters, digits, '-' and '_'"),
        });
    }
    Ok(())
}
