//! Authenticated request builder, response validator and typed fetch-and-decode
//!
//! Every DataMall call, paginated and bulk ones included, funnels through
//! [`DataMallClient::execute`] so that error classification is identical
//! everywhere.

use super::{API_KEY_HEADER, DataMallClient, RATE_LIMIT_STATUS};
use crate::endpoint::Endpoint;
use crate::error::{Error, Result, error_body_message};
use crate::models::ValueEnvelope;
use reqwest::StatusCode;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Account key snapshot taken once at the start of a public call
///
/// A call keeps using its snapshot for every request it issues (all pages,
/// both bulk hops), so a concurrent `configure` never changes the key halfway
/// through a call.
#[derive(Clone)]
pub(crate) struct AccountKey(String);

impl std::fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccountKey(<redacted>)")
    }
}

/// Classify a completed response by status
///
/// Runs before any decoding so a throttled response with an arbitrary body is
/// reported as [`Error::RateLimited`] and never as a decode failure.
pub(crate) fn check_status(status: StatusCode, body: &[u8]) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    if status.as_u16() == RATE_LIMIT_STATUS {
        warn!(status = status.as_u16(), "DataMall rate limit hit");
        return Err(Error::RateLimited);
    }
    Err(Error::Http {
        status: status.as_u16(),
        message: error_body_message(body),
    })
}

impl DataMallClient {
    /// Read the configured key, failing with [`Error::NoApiKey`] if it is
    /// absent or empty
    ///
    /// A key that cannot travel as a header value (control characters, a
    /// trailing newline) is [`Error::InvalidUrl`].
    pub(crate) async fn account_key(&self) -> Result<AccountKey> {
        let guard = self.api_key.read().await;
        match guard.as_deref() {
            Some(key) if !key.is_empty() => {
                HeaderValue::from_str(key).map_err(|_| {
                    Error::InvalidUrl("account key is not a valid header value".to_string())
                })?;
                Ok(AccountKey(key.to_string()))
            }
            _ => Err(Error::NoApiKey),
        }
    }

    /// Build a GET request for `url` carrying the account key header
    pub(crate) fn authenticated_request(
        &self,
        key: &AccountKey,
        url: Url,
    ) -> reqwest::RequestBuilder {
        self.http.get(url).header(API_KEY_HEADER, key.0.as_str())
    }

    /// Send a request and return the validated body bytes
    ///
    /// Exactly one round trip; transport failures become [`Error::Network`],
    /// non-2xx statuses go through [`check_status`]. A request that cannot be
    /// built never leaves the process and is [`Error::InvalidUrl`].
    pub(crate) async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(status = status.as_u16(), bytes = body.len(), "received response");
        check_status(status, &body)?;
        Ok(body.to_vec())
    }

    /// Typed fetch-and-decode: one authenticated GET, decoded as `T`
    pub(crate) async fn execute<T>(&self, key: &AccountKey, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!(url = %redact_query(&url), "GET");
        let body = self.send(self.authenticated_request(key, url)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Resolve `endpoint` under the configured service root
    pub(crate) fn endpoint_url(&self, endpoint: Endpoint, query: &[(&str, String)]) -> Result<Url> {
        endpoint.url(&self.base, query)
    }

    /// Fetch a single response from `endpoint`, decoded as `T`
    ///
    /// This is the generic single-shot operation; `T` is the whole response
    /// body (use [`ValueEnvelope`] for wrapped payloads).
    ///
    /// # Errors
    /// [`Error::NoApiKey`] before any I/O if no key is configured, then
    /// [`Error::Network`], [`Error::RateLimited`], [`Error::Http`] or
    /// [`Error::DecodingFailed`].
    pub async fn fetch<T>(&self, endpoint: Endpoint, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let key = self.account_key().await?;
        self.fetch_with_key(&key, endpoint, query).await
    }

    /// Fetch a `{"value": [...]}` list from `endpoint` without paging
    pub async fn fetch_list<T>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let key = self.account_key().await?;
        self.fetch_list_with_key(&key, endpoint, query).await
    }

    pub(crate) async fn fetch_with_key<T>(
        &self,
        key: &AccountKey,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint, query)?;
        self.execute(key, url).await
    }

    /// List fetch for callers that already hold a key snapshot
    pub(crate) async fn fetch_list_with_key<T>(
        &self,
        key: &AccountKey,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let envelope: ValueEnvelope<Vec<T>> = self.fetch_with_key(key, endpoint, query).await?;
        debug!(%endpoint, items = envelope.value.len(), "fetched list");
        Ok(envelope.value)
    }
}

/// Builder failures happen before any I/O, everything else is transport
fn transport_error(e: reqwest::Error) -> Error {
    if e.is_builder() {
        Error::InvalidUrl(e.to_string())
    } else {
        Error::Network(e)
    }
}

/// URL for logging with query values dropped; signed links carry credentials
pub(crate) fn redact_query(url: &Url) -> String {
    let mut redacted = url.clone();
    if url.query().is_some() {
        let keys: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        redacted.set_query(None);
        let mut pairs = redacted.query_pairs_mut();
        for key in &keys {
            pairs.append_pair(key, "..");
        }
    }
    redacted.to_string()
}
