//! Test configuration helpers for loading .env credentials and creating test clients

use lta_datamall::config::ENV_ACCOUNT_KEY;
use lta_datamall::{Config, DataMallClient};
use std::time::Duration;
use wiremock::MockServer;

/// Error type for test configuration
#[derive(Debug)]
pub struct ConfigError(pub String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Config error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Load the DataMall account key from the environment (or `.env`)
///
/// Required environment variables:
/// - `LTA_ACCOUNT_KEY` - DataMall account key
pub fn load_account_key() -> Result<String, ConfigError> {
    dotenvy::dotenv().ok();

    std::env::var(ENV_ACCOUNT_KEY)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ConfigError(format!("{ENV_ACCOUNT_KEY} not set in environment")))
}

/// Check if live credentials are available
pub fn has_live_credentials() -> bool {
    load_account_key().is_ok()
}

/// Create a client for the real DataMall service
pub async fn create_live_client() -> Result<DataMallClient, ConfigError> {
    let key = load_account_key()?;
    let client = DataMallClient::new(Config {
        timeout: Duration::from_secs(60),
        ..Default::default()
    })
    .map_err(|e| ConfigError(e.to_string()))?;
    client.configure(key).await;
    Ok(client)
}

/// Create a client pointed at a mock server, configured with `key` if given
pub async fn create_mock_client(server: &MockServer, key: Option<&str>) -> DataMallClient {
    let client = DataMallClient::new(Config {
        base_url: format!("{}/ltaodataservice/", server.uri()),
        timeout: Duration::from_secs(5),
        ..Default::default()
    })
    .unwrap();
    if let Some(key) = key {
        client.configure(key).await;
    }
    client
}

/// Skip test if credentials are not available
#[macro_export]
macro_rules! skip_if_no_credentials {
    () => {
        if !$crate::common::has_live_credentials() {
            eprintln!("Skipping test: LTA_ACCOUNT_KEY not found in .env");
            return;
        }
    };
}
