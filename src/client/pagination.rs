//! Paging through collections and attaching tags

use super::client::JcClient;
use super::transport::Op;
use crate::errors::Result;
use crate::models::codec::{self, Page};
use crate::models::{Resource, Taggable, attach_tags};
use serde::de::DeserializeOwned;
use tracing::debug;

impl JcClient {
    /// Fetch pages until one comes back short.
    ///
    /// `page_path` builds the request path from `(skip, limit)`. Requests are
    /// strictly sequential because each one depends on the size of the last.
    /// A collection whose size is an exact multiple of the page size costs
    /// one extra, empty request.
    pub(crate) async fn collect_pages<T, F>(
        &self,
        resource: &'static str,
        page_path: F,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        F: Fn(usize, usize) -> String,
    {
        let limit = self.config.settings.page_size;
        let mut skip = 0;
        let mut records = Vec::new();

        loop {
            let body = self.execute(Op::Read, &page_path(skip, limit), None).await?;
            let page: Page<T> = codec::decode_page(resource, &body)?;

            debug!(resource, skip, received = page.received, "page fetched");

            records.extend(page.records);
            skip += limit;

            // An oversized page also ends the loop: the service is not
            // honoring the limit and further skips would repeat records.
            if page.received != limit {
                break;
            }
        }

        Ok(records)
    }

    /// Every record of `T`, in the service's sort order
    pub(crate) async fn list_all<T: Resource>(&self) -> Result<Vec<T>> {
        self.collect_pages(T::KIND, |skip, limit| {
            format!(
                "{}?sort={}&skip={}&limit={}",
                T::PATH,
                T::SORT_KEY,
                skip,
                limit
            )
        })
        .await
    }

    /// Fetch all tags once and attach them to `records`
    pub(crate) async fn enrich<T: Taggable>(&self, records: &mut [T]) -> Result<()> {
        let tags = self.list_tags().await?;
        attach_tags(records, &tags);
        Ok(())
    }

    /// [`list_all`](Self::list_all), optionally enriched with tags
    pub(crate) async fn list_tagged<T: Resource + Taggable>(&self, with_tags: bool) -> Result<Vec<T>> {
        let mut records = self.list_all::<T>().await?;
        if with_tags {
            self.enrich(&mut records).await?;
        }
        Ok(records)
    }
}
