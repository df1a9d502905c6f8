use crate::core::cache::QuoteCache;
use crate::core::currency::{CurrencyRateProvider, ExchangeQuote};
use crate::core::error::{Error, Result};
use crate::providers::http::{build_client, get_json, parse_base_url, redacted};
use async_trait::async_trait;
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Exchange rates from a currencylayer style `live` endpoint.
///
/// Only the first successfully fetched snapshot is ever used. Later lookups,
/// whatever pair they ask for, are answered from it and never refetch; a pair
/// that snapshot cannot answer is a lookup miss.
pub struct CurrencyLayerProvider {
    base_url: Url,
    access_key: String,
    client: Client,
    cache: Arc<QuoteCache>,
}

impl CurrencyLayerProvider {
    pub fn new(base_url: &str, access_key: &str, cache: Arc<QuoteCache>) -> Result<Self> {
        if access_key.trim().is_empty() {
            return Err(Error::Config(
                "Exchange rate access key is missing or blank".to_string(),
            ));
        }
        Ok(CurrencyLayerProvider {
            base_url: parse_base_url(base_url)?,
            access_key: access_key.to_string(),
            client: build_client()?,
            cache,
        })
    }

    fn live_url(&self, source: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join("live")
            .map_err(|e| Error::Config(format!("Invalid exchange rate URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("access_key", &self.access_key)
            .append_pair("source", source);
        Ok(url)
    }

    async fn fetch_quote(&self, source: &str) -> Result<ExchangeQuote> {
        let url = self.live_url(source)?;
        let display_url = redacted(&url);
        let response: LiveResponse = get_json(&self.client, url).await?;

        if response.success == Some(false) || response.error.is_some() {
            let error = response.error.unwrap_or_default();
            warn!(code = error.code, "Exchange rate service rejected request");
            return Err(Error::Service {
                code: error.code,
                info: error.info,
            });
        }

        // A reply without quotes is malformed and must not become the snapshot
        let quotes = response.quotes.ok_or_else(|| Error::Parse {
            url: display_url,
            source: serde::de::Error::missing_field("quotes"),
        })?;

        let base = response.source.unwrap_or_else(|| source.to_string());
        debug!(base = %base, quotes = quotes.len(), "Fetched quote snapshot");
        Ok(ExchangeQuote { base, quotes })
    }
}

#[derive(Debug, Deserialize)]
struct LiveResponse {
    success: Option<bool>,
    source: Option<String>,
    quotes: Option<HashMap<String, Decimal>>,
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    info: String,
}

#[async_trait]
impl CurrencyRateProvider for CurrencyLayerProvider {
    #[instrument(name = "ExchangeRateLookup", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<Decimal> {
        let snapshot = self.cache.get_or_fetch(|| self.fetch_quote(from)).await?;

        if snapshot.base != from {
            debug!(
                "Requested base {} differs from retained {} snapshot",
                from, snapshot.base
            );
        }

        snapshot.rate(from, to).ok_or_else(|| Error::RateNotFound {
            pair: ExchangeQuote::pair_key(from, to),
            base: snapshot.base.clone(),
        })
    }
}
