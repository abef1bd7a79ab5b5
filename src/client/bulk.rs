//! Two-hop bulk dataset protocol
//!
//! Bulk endpoints answer the authenticated request with a signed,
//! time-limited link instead of data. The second hop fetches that link as a
//! plain GET: the link is self-authorizing, so the account key is not sent to
//! the third-party host that serves it.

use super::{AccountKey, DataMallClient};
use super::request::redact_query;
use crate::dataset::DatasetFile;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::models::{DownloadLink, ValueEnvelope};
use crate::utils::filename_from_url;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

/// Pick the download link out of a bulk metadata response
///
/// Only the first entry is used. An empty list, an empty link and a link that
/// is not an absolute http(s) URL are all [`Error::MissingDownloadLink`].
pub(crate) fn first_download_link(links: &[DownloadLink]) -> Result<Url> {
    let link = links
        .first()
        .map(|entry| entry.link.trim())
        .filter(|link| !link.is_empty())
        .ok_or(Error::MissingDownloadLink)?;

    let url = Url::parse(link).map_err(|_| Error::MissingDownloadLink)?;
    if !matches!(url.scheme(), "http" | "https") || url.host().is_none() {
        return Err(Error::MissingDownloadLink);
    }
    Ok(url)
}

impl DataMallClient {
    /// First hop only: resolve the signed link for a bulk `endpoint`
    ///
    /// Useful when the caller wants to hand the link to another downloader.
    /// The link expires a few minutes after it is issued.
    pub async fn resolve_download_link(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> Result<Url> {
        let key = self.account_key().await?;
        self.download_link(&key, endpoint, query).await
    }

    /// Resolve the signed link of a bulk `endpoint` and download its payload
    ///
    /// # Errors
    /// [`Error::InvalidUrl`] before any I/O if `endpoint` is not a bulk
    /// endpoint. [`Error::MissingDownloadLink`] if the metadata has no usable
    /// link; no second request is made in that case. Either hop may fail with
    /// the usual network and status errors.
    pub async fn download_dataset(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> Result<DatasetFile> {
        let key = self.account_key().await?;
        self.download_dataset_with_key(&key, endpoint, query).await
    }

    pub(crate) async fn download_dataset_with_key(
        &self,
        key: &AccountKey,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> Result<DatasetFile> {
        let link = self.download_link(key, endpoint, query).await?;
        let filename = filename_from_url(&link);
        let bytes = self.fetch_link(link).await?;

        info!(%endpoint, filename = %filename, bytes = bytes.len(), "downloaded dataset");
        Ok(DatasetFile::new(filename, bytes))
    }

    /// Resolve the signed link of a bulk `endpoint` and decode the payload as
    /// JSON
    ///
    /// For bulk endpoints whose payload is a JSON document rather than a ZIP
    /// archive (traffic flow).
    pub async fn download_dataset_json<T>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let file = self.download_dataset(endpoint, query).await?;
        Ok(serde_json::from_slice(&file.bytes)?)
    }

    async fn download_link(
        &self,
        key: &AccountKey,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> Result<Url> {
        if !endpoint.is_bulk() {
            return Err(Error::InvalidUrl(format!("{endpoint} is not a bulk dataset endpoint")));
        }
        let url = self.endpoint_url(endpoint, query)?;
        let metadata: ValueEnvelope<Vec<DownloadLink>> = self.execute(key, url).await?;
        let link = first_download_link(&metadata.value)?;

        debug!(%endpoint, link = %redact_query(&link), "resolved download link");
        Ok(link)
    }

    /// Second hop: unauthenticated GET of a signed link
    async fn fetch_link(&self, link: Url) -> Result<Vec<u8>> {
        debug!(link = %redact_query(&link), "GET");
        self.send(self.http.get(link)).await
    }
}
