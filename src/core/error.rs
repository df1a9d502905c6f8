//! Error taxonomy for catalog retrieval, currency lookups and report assembly.

use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request error: {source} for URL: {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {status} for URL: {url}")]
    Status { url: String, status: StatusCode },

    #[error("Failed to parse JSON response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid continuation link '{link}': {reason}")]
    InvalidLink { link: String, reason: String },

    #[error("Exchange rate service error {code}: {info}")]
    Service { code: i64, info: String },

    #[error("No country found matching: {0}")]
    CountryNotFound(String),

    #[error("No currency declared for country: {0}")]
    CurrencyNotFound(String),

    #[error("No rate found for currency pair {pair} in {base} quote snapshot")]
    RateNotFound { pair: String, base: String },

    #[error("Supplier {supplier_id:?} of product '{product}' not found")]
    SupplierNotFound {
        product: String,
        supplier_id: Option<i32>,
    },
}

impl Error {
    /// True for lookup misses and failed supplier joins.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::CountryNotFound(_)
                | Error::CurrencyNotFound(_)
                | Error::RateNotFound { .. }
                | Error::SupplierNotFound { .. }
        )
    }

    /// True when a remote call did not complete or returned unusable data.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Client(_)
                | Error::Request { .. }
                | Error::Status { .. }
                | Error::Parse { .. }
                | Error::InvalidLink { .. }
                | Error::Service { .. }
        )
    }
}
