use crate::core::catalog::{CatalogSource, Product, Supplier};
use crate::core::error::{Error, Result};
use crate::providers::http::{build_client, get_json, parse_base_url};
use async_trait::async_trait;
use futures::{Stream, TryStreamExt, stream};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

pub const PRODUCTS: &str = "Products";
pub const SUPPLIERS: &str = "Suppliers";

/// Client for an OData service that pages entity sets with continuation links.
pub struct ODataClient {
    service_url: Url,
    client: Client,
}

impl ODataClient {
    pub fn new(service_url: &str) -> Result<Self> {
        Ok(ODataClient {
            service_url: parse_base_url(service_url)?,
            client: build_client()?,
        })
    }

    fn entity_set_url(&self, entity_set: &str) -> Result<Url> {
        self.service_url.join(entity_set).map_err(|e| {
            Error::Config(format!(
                "Cannot address entity set '{entity_set}' under {}: {e}",
                self.service_url
            ))
        })
    }

    // Links may be absolute or relative to the service root
    fn resolve_link(&self, link: &str) -> Result<Url> {
        self.service_url.join(link).map_err(|e| Error::InvalidLink {
            link: link.to_string(),
            reason: e.to_string(),
        })
    }

    /// Lazily pages through an entity set.
    ///
    /// Nothing is requested until the stream is polled, and each continuation
    /// link is only followed when the next page is asked for. Pages arrive in
    /// server order. The stream yields the first error it hits and then ends.
    pub fn pages<T: DeserializeOwned>(
        &self,
        entity_set: &str,
    ) -> impl Stream<Item = Result<Vec<T>>> + '_ {
        let entity_set = entity_set.to_string();
        stream::try_unfold(Cursor::Start, move |cursor| {
            let entity_set = entity_set.clone();
            async move {
                let url = match cursor {
                    Cursor::Start => self.entity_set_url(&entity_set)?,
                    Cursor::Next(url) => url,
                    Cursor::Done => return Ok(None),
                };

                let page: Page<T> = get_json(&self.client, url).await?;
                let next = match page.next_link {
                    Some(link) => Cursor::Next(self.resolve_link(&link)?),
                    None => Cursor::Done,
                };
                debug!(
                    entity_set = %entity_set,
                    rows = page.value.len(),
                    more = matches!(next, Cursor::Next(_)),
                    "Received page"
                );
                Ok(Some((page.value, next)))
            }
        })
    }

    /// Fetches every page of an entity set and concatenates them.
    #[instrument(name = "ODataFetchAll", skip(self), fields(entity_set = %entity_set))]
    pub async fn fetch_all<T: DeserializeOwned>(&self, entity_set: &str) -> Result<Vec<T>> {
        let mut pages = std::pin::pin!(self.pages::<T>(entity_set));
        let mut items = Vec::new();
        let mut page_count = 0usize;

        while let Some(page) = pages.try_next().await? {
            page_count += 1;
            items.extend(page);
        }

        debug!(
            pages = page_count,
            items = items.len(),
            "Fetched complete collection"
        );
        Ok(items)
    }
}

enum Cursor {
    Start,
    Next(Url),
    Done,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    value: Vec<T>,
    #[serde(rename = "odata.nextLink", alias = "@odata.nextLink")]
    next_link: Option<String>,
}

#[async_trait]
impl CatalogSource for ODataClient {
    async fn products(&self) -> Result<Vec<Product>> {
        self.fetch_all(PRODUCTS).await
    }

    async fn suppliers(&self) -> Result<Vec<Supplier>> {
        self.fetch_all(SUPPLIERS).await
    }
}
