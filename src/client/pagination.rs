//! `$skip` pagination for list endpoints

use super::{AccountKey, DataMallClient, SKIP_PARAM};
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::models::ValueEnvelope;
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{debug, info};

/// Records per page DataMall returns for paginated endpoints
///
/// A page shorter than this is the last one.
pub const PAGE_SIZE: usize = 500;

/// Fetch pages at offsets 0, `page_size`, 2 * `page_size`, ... until a page
/// comes back short, concatenating them in order
///
/// Stops on the first error without issuing further requests. Exactly
/// `floor(total / page_size) + 1` pages are requested, so a total that is an
/// exact multiple of the page size ends with one empty page.
pub(crate) async fn collect_pages<T, F, Fut>(page_size: usize, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut skip = 0;

    loop {
        let page = fetch_page(skip).await?;
        let count = page.len();
        items.extend(page);

        debug!(skip, count, total = items.len(), "fetched page");

        if count < page_size {
            return Ok(items);
        }
        skip += page_size;
    }
}

impl DataMallClient {
    /// Fetch every record of a paginated `endpoint`
    ///
    /// One account key snapshot is used for all pages. `query` is sent with
    /// every page alongside `$skip`.
    ///
    /// # Errors
    /// [`Error::InvalidUrl`] before any I/O if `endpoint` is not paginated.
    /// The first failing page aborts the whole call; records from earlier
    /// pages are discarded.
    pub async fn fetch_all<T>(&self, endpoint: Endpoint, query: &[(&str, String)]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let key = self.account_key().await?;
        if !endpoint.is_paginated() {
            return Err(Error::InvalidUrl(format!("{endpoint} is not paginated")));
        }
        let items = self.fetch_pages(&key, endpoint, query).await?;
        info!(%endpoint, items = items.len(), "fetched all pages");
        Ok(items)
    }

    async fn fetch_pages<T>(
        &self,
        key: &AccountKey,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        collect_pages(PAGE_SIZE, |skip| async move {
            let mut params = query.to_vec();
            params.push((SKIP_PARAM, skip.to_string()));
            let url = self.endpoint_url(endpoint, &params)?;

            debug!(%endpoint, skip, "requesting page");
            let page: ValueEnvelope<Vec<T>> = self.execute(key, url).await?;
            Ok(page.value)
        })
        .await
    }
}
