//! Configuration types for lta-datamall

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default DataMall service root; every catalog path is resolved against it
pub const DEFAULT_BASE_URL: &str = "https://datamall2.mytransport.sg/ltaodataservice/";

/// Environment variable holding the DataMall account key
pub const ENV_ACCOUNT_KEY: &str = "LTA_ACCOUNT_KEY";
/// Environment variable overriding [`Config::base_url`]
pub const ENV_BASE_URL: &str = "LTA_BASE_URL";
/// Environment variable overriding [`Config::timeout`] (whole seconds)
pub const ENV_TIMEOUT_SECS: &str = "LTA_TIMEOUT_SECS";

/// Main configuration for [`DataMallClient`](crate::DataMallClient)
///
/// All fields have sensible defaults, so `Config::default()` produces a client
/// that talks to the production DataMall host. The API key may be supplied here
/// or later through [`DataMallClient::configure`](crate::DataMallClient::configure).
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// DataMall account key, sent as the `AccountKey` header
    #[serde(default)]
    pub api_key: Option<String>,

    /// Service root the endpoint catalog is resolved against
    /// (default: "https://datamall2.mytransport.sg/ltaodataservice/")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request transport timeout (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Backoff policy for [`with_retry`](crate::retry::with_retry)
    ///
    /// The client never retries on its own; this is only read by callers
    /// that opt into the retry helper.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            retry: RetryConfig::default(),
        }
    }
}

// The account key must never end up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Config {
    /// Build a configuration from `LTA_ACCOUNT_KEY`, `LTA_BASE_URL` and
    /// `LTA_TIMEOUT_SECS`, falling back to defaults for unset variables.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if a variable is set but invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(key) = lookup(ENV_ACCOUNT_KEY) {
            let key = key.trim().to_string();
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::config(
                    format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {secs:?}"),
                    "timeout",
                )
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can produce working requests
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url).map_err(|e| {
            Error::config(format!("invalid base_url {:?}: {e}", self.base_url), "base_url")
        })?;
        if url.cannot_be_a_base() {
            return Err(Error::config(
                format!("base_url {:?} cannot be used as a base", self.base_url),
                "base_url",
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero", "timeout"));
        }
        Ok(())
    }

    /// Parsed service root, always ending in `/` so relative paths append
    pub(crate) fn base(&self) -> Result<url::Url> {
        let mut base = self.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        url::Url::parse(&base).map_err(Error::from)
    }
}

/// Retry configuration for the opt-in retry helper
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 2 seconds)
    #[serde(default = "default_initial_delay", with = "duration_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 60 seconds)
    #[serde(default = "default_max_delay", with = "duration_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// File collision handling strategy when saving datasets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCollisionAction {
    /// Append (1), (2), etc. to filename (default)
    #[default]
    Rename,
    /// Overwrite existing file
    Overwrite,
    /// Refuse to write, keep existing
    Skip,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("lta-datamall/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(60)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
