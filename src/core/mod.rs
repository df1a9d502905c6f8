//! Core business logic abstractions

pub mod cache;
pub mod catalog;
pub mod config;
pub mod currency;
pub mod engine;
pub mod error;
pub mod log;
pub mod queries;
pub mod report;

// Re-export main types for cleaner imports
pub use catalog::{CatalogSource, Product, Supplier};
pub use currency::{CountryCurrencyProvider, CurrencyRateProvider, ExchangeQuote, LocalCurrency};
pub use engine::ProductReportEngine;
pub use error::{Error, Result};
pub use report::{ProductLocalPrice, ProductPrice, Report};
