//! Store configuration loaded from TOML or the process environment.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the database URL.
pub const DATABASE_URL_ENV: &str = "TICKBOX_DATABASE_URL";

/// Fallback environment variable holding the database URL.
pub const FALLBACK_DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable overriding the pool size.
pub const POOL_MAX_SIZE_ENV: &str = "TICKBOX_POOL_MAX_SIZE";

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("unable to read config: {0}")]
    Read(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`StoreConfig`].
    #[error("unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// No database URL was provided.
    #[error("database URL is not set; export TICKBOX_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,

    /// A numeric setting could not be parsed.
    #[error("invalid value '{value}' for {key}")]
    InvalidNumber {
        /// Setting name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Connection settings for the task store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    database_url: String,
    #[serde(default = "default_pool_max_size")]
    pool_max_size: u32,
    #[serde(default = "default_connection_timeout_secs")]
    connection_timeout_secs: u64,
}

const fn default_pool_max_size() -> u32 {
    8
}

const fn default_connection_timeout_secs() -> u64 {
    30
}

impl StoreConfig {
    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_max_size: default_pool_max_size(),
            connection_timeout_secs: default_connection_timeout_secs(),
        }
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_pool_max_size(mut self, pool_max_size: u32) -> Self {
        self.pool_max_size = pool_max_size;
        self
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not a valid config.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when neither URL variable
    /// is set, or [`ConfigError::InvalidNumber`] for a malformed pool size.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`StoreConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|url| !url.trim().is_empty());
        let database_url = non_blank(DATABASE_URL_ENV)
            .or_else(|| non_blank(FALLBACK_DATABASE_URL_ENV))
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let mut config = Self::new(database_url);
        if let Some(raw) = lookup(POOL_MAX_SIZE_ENV) {
            let pool_max_size = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidNumber {
                    key: POOL_MAX_SIZE_ENV,
                    value: raw,
                })?;
            config = config.with_pool_max_size(pool_max_size);
        }
        Ok(config)
    }

    /// Returns the database URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    /// Returns the connection checkout timeout in seconds.
    #[must_use]
    pub const fn connection_timeout_secs(&self) -> u64 {
        self.connection_timeout_secs
    }
}
