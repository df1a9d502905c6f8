//! Currency lookup abstractions

use crate::core::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Currency used in a country, as reported by the country directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCurrency {
    pub country_name: String,
    pub currency_code: String,
    pub currency_symbol: String,
}

/// Snapshot of quotes for a single base currency, keyed by concatenated pair
/// code such as `USDEUR`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeQuote {
    pub base: String,
    pub quotes: HashMap<String, Decimal>,
}

impl ExchangeQuote {
    pub fn pair_key(from: &str, to: &str) -> String {
        format!("{from}{to}")
    }

    pub fn rate(&self, from: &str, to: &str) -> Option<Decimal> {
        if from != self.base {
            return None;
        }
        self.quotes.get(&Self::pair_key(from, to)).copied()
    }
}

#[async_trait]
pub trait CountryCurrencyProvider: Send + Sync {
    async fn local_currency(&self, country: &str) -> Result<LocalCurrency>;
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: &str, to: &str) -> Result<Decimal>;
}
