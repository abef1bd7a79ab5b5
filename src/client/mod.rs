//! DataMall client (decomposed into focused submodules)
//!
//! [`DataMallClient`] owns the session configuration (the account key) and the
//! request pipeline every endpoint call goes through:
//!
//! 1. `request` - authenticated request builder, response validator and the
//!    typed fetch-and-decode choke point
//! 2. `pagination` - the `$skip` paging loop for list endpoints
//! 3. `bulk` - the two-hop "resolve signed link, then download" protocol
//!
//! Endpoint-specific calls live in `bus`, `train`, `traffic`, `parking` and
//! `passenger_volume`; each is a thin adapter over the generic operations.

use crate::config::Config;
use crate::error::{Error, Result};
use std::sync::{Arc, OnceLock};
use tokio::sync::RwLock;
use url::Url;

mod bulk;
mod bus;
mod pagination;
mod parking;
mod passenger_volume;
mod request;
mod traffic;
mod train;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use pagination::PAGE_SIZE;
pub use parking::DEFAULT_BICYCLE_PARKING_RADIUS_KM;
pub(crate) use request::AccountKey;

/// Header DataMall reads the account key from
pub const API_KEY_HEADER: &str = "AccountKey";

/// Status DataMall uses to signal rate limiting
///
/// DataMall overloads 500 for throttling instead of using 429.
pub const RATE_LIMIT_STATUS: u16 = 500;

/// Query parameter carrying the pagination offset
pub const SKIP_PARAM: &str = "$skip";

/// Async client for the DataMall API
///
/// Cloning is cheap; clones share the HTTP connection pool and the configured
/// account key. Every public operation may be called concurrently from many
/// tasks. The account key is the only shared mutable state and sits behind a
/// read/write lock that is held only while the key is read or replaced, never
/// across network I/O.
///
/// # Example
///
/// ```no_run
/// use lta_datamall::{Config, DataMallClient};
///
/// # async fn example() -> lta_datamall::Result<()> {
/// let client = DataMallClient::new(Config::default())?;
/// client.configure("my-account-key").await;
///
/// let stops = client.bus_stops().await?;
/// println!("{} bus stops", stops.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DataMallClient {
    /// HTTP transport (connection pool, timeout, user agent)
    http: reqwest::Client,

    /// Service root every endpoint path is resolved against
    base: Url,

    /// Configuration the client was built from
    config: Arc<Config>,

    /// Session configuration: the account key, unset until configured
    api_key: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for DataMallClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataMallClient")
            .field("base", &self.base.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DataMallClient {
    /// Create a client from configuration
    ///
    /// If `config.api_key` is set the client starts out configured.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the configuration is invalid or the HTTP
    /// client cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {e}"),
                key: None,
            })?;

        Self::with_http_client(config, http)
    }

    /// Create a client around a caller-supplied `reqwest::Client`
    ///
    /// Use this to control proxies, TLS or connection pooling. The
    /// `timeout` and `user_agent` settings of `config` are not applied.
    pub fn with_http_client(config: Config, http: reqwest::Client) -> Result<Self> {
        config.validate()?;
        let base = config.base()?;
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty());

        tracing::debug!(base = %base, configured = api_key.is_some(), "created DataMall client");

        Ok(Self {
            http,
            base,
            config: Arc::new(config),
            api_key: Arc::new(RwLock::new(api_key)),
        })
    }

    /// Create a client from `LTA_*` environment variables
    ///
    /// See [`Config::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Process-wide default client
    ///
    /// Lazily created from `Config::default()` on first use and unconfigured
    /// until [`configure`](Self::configure) is called on it. Explicitly
    /// constructed clients are independent of this one.
    pub fn shared() -> Result<&'static DataMallClient> {
        static SHARED: OnceLock<DataMallClient> = OnceLock::new();

        if let Some(client) = SHARED.get() {
            return Ok(client);
        }
        let client = DataMallClient::new(Config::default())?;
        Ok(SHARED.get_or_init(|| client))
    }

    /// Set the account key used by every subsequent request
    ///
    /// Calling again replaces the key. An empty key leaves the client
    /// effectively unconfigured: data calls fail with [`Error::NoApiKey`].
    /// Calls already in flight keep the key they started with.
    pub async fn configure(&self, api_key: impl Into<String>) {
        let api_key = api_key.into();
        let configured = !api_key.is_empty();
        *self.api_key.write().await = Some(api_key);
        tracing::info!(configured, "DataMall account key updated");
    }

    /// Whether a non-empty account key is configured
    pub async fn is_configured(&self) -> bool {
        self.api_key
            .read()
            .await
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }

    /// Configuration the client was built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Service root endpoint paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base
    }
}
