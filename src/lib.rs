pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::report::{self, OutputFormat};
use crate::core::cache::QuoteCache;
use crate::core::config::{ACCESS_KEY_ENV, AppConfig};
use crate::core::{Error, ProductReportEngine};
use crate::providers::currency_layer::CurrencyLayerProvider;
use crate::providers::odata::ODataClient;
use crate::providers::rest_countries::RestCountriesProvider;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    CurrentProducts,
    MostExpensive { count: usize },
    PriceBelow { limit: Decimal },
    PriceBetween { lower: Decimal, upper: Decimal },
    AboveAverage,
    StockDeficit,
    LocalPrices { access_key: Option<String> },
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    info!("Catalog report starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let output = render_command(command, &config, format).await?;
    println!("{output}");
    Ok(())
}

/// Runs a report against the configured services and renders it.
pub async fn render_command(
    command: AppCommand,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<String> {
    // Checked before the catalog is touched so a missing key costs no requests
    let exchange_key = match &command {
        AppCommand::LocalPrices { access_key } => Some(
            config
                .resolve_access_key(access_key.as_deref())
                .ok_or_else(|| {
                    Error::Config(format!(
                        "An exchange rate access key is required: pass --access-key, set {ACCESS_KEY_ENV} or add providers.exchange.access_key to the config"
                    ))
                })?,
        ),
        _ => None,
    };

    let catalog = ODataClient::new(&config.providers.catalog.base_url)
        .context("Invalid catalog provider configuration")?;
    let engine = ProductReportEngine::new(catalog).with_base_currency(&config.base_currency);

    match command {
        AppCommand::CurrentProducts => {
            let report = engine.current_products().await?;
            report::render_prices("current products", &report, format)
        }
        AppCommand::MostExpensive { count } => {
            let report = engine.most_expensive(count).await?;
            report::render_prices(&format!("{count} most expensive products"), &report, format)
        }
        AppCommand::PriceBelow { limit } => {
            let report = engine.price_below(limit).await?;
            report::render_prices(
                &format!("products with price less than {limit}"),
                &report,
                format,
            )
        }
        AppCommand::PriceBetween { lower, upper } => {
            let report = engine.price_between(lower, upper).await?;
            report::render_prices(
                &format!("products with price between {lower} and {upper}"),
                &report,
                format,
            )
        }
        AppCommand::AboveAverage => {
            let report = engine.price_above_average().await?;
            report::render_prices("products with price above average", &report, format)
        }
        AppCommand::StockDeficit => {
            let report = engine.units_in_stock_deficit().await?;
            report::render_prices("products in deficit", &report, format)
        }
        AppCommand::LocalPrices { .. } => {
            let access_key = exchange_key.unwrap_or_default();
            let countries = RestCountriesProvider::new(&config.providers.countries.base_url)
                .context("Invalid country provider configuration")?;
            let rates = CurrencyLayerProvider::new(
                &config.providers.exchange.base_url,
                &access_key,
                Arc::new(QuoteCache::new()),
            )
            .context("Invalid exchange rate provider configuration")?;

            let report = report::fetch_local_prices(&engine, &countries, &rates).await?;
            report::render_local_prices(
                "products with local prices",
                &report,
                format,
                engine.base_currency(),
            )
        }
    }
}
