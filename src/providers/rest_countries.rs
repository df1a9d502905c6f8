use crate::core::currency::{CountryCurrencyProvider, LocalCurrency};
use crate::core::error::{Error, Result};
use crate::providers::http::{build_client, get_json, parse_base_url};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

// RestCountriesProvider implementation for CountryCurrencyProvider
pub struct RestCountriesProvider {
    base_url: Url,
    client: Client,
}

impl RestCountriesProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(RestCountriesProvider {
            base_url: parse_base_url(base_url)?,
            client: build_client()?,
        })
    }

    fn country_url(&self, country: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Cannot use {} as a base URL", self.base_url)))?
            .pop_if_empty()
            .push("name")
            .push(country);
        url.query_pairs_mut().append_pair("fullText", "true");
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct CountryInfo {
    name: String,
    #[serde(default)]
    currencies: Vec<CurrencyInfo>,
}

#[derive(Debug, Deserialize)]
struct CurrencyInfo {
    code: String,
    symbol: Option<String>,
}

#[async_trait]
impl CountryCurrencyProvider for RestCountriesProvider {
    #[instrument(name = "CountryCurrencyLookup", skip(self), fields(country = %country))]
    async fn local_currency(&self, country: &str) -> Result<LocalCurrency> {
        if country.trim().is_empty() {
            return Err(Error::CountryNotFound(country.to_string()));
        }

        let url = self.country_url(country)?;
        let countries: Vec<CountryInfo> = match get_json(&self.client, url).await {
            Ok(countries) => countries,
            // The directory answers an unknown name with 404 rather than []
            Err(Error::Status { status, .. }) if status == StatusCode::NOT_FOUND => Vec::new(),
            Err(e) => return Err(e),
        };

        let info = countries
            .into_iter()
            .next()
            .ok_or_else(|| Error::CountryNotFound(country.to_string()))?;

        let currency = info
            .currencies
            .into_iter()
            .next()
            .ok_or_else(|| Error::CurrencyNotFound(info.name.clone()))?;

        debug!(
            "Resolved {} to {} ({})",
            country, currency.code, info.name
        );
        Ok(LocalCurrency {
            country_name: info.name,
            currency_symbol: currency.symbol.unwrap_or_else(|| currency.code.clone()),
            currency_code: currency.code,
        })
    }
}
