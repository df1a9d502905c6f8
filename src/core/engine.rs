//! Builds product reports from catalog snapshots, optionally enriched with
//! prices in each supplier country's currency.
use crate::core::catalog::{CatalogSource, Product, Supplier};
use crate::core::currency::{CountryCurrencyProvider, CurrencyRateProvider};
use crate::core::error::{Error, Result};
use crate::core::queries;
use crate::core::report::{PendingLocalPrice, ProductLocalPrice, ProductPrice, Report};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, info};

pub const DEFAULT_BASE_CURRENCY: &str = "USD";

pub struct ProductReportEngine<C: CatalogSource> {
    catalog: C,
    base_currency: String,
}

impl<C: CatalogSource> ProductReportEngine<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
        }
    }

    /// Currency the catalog prices are quoted in.
    pub fn with_base_currency(mut self, base_currency: &str) -> Self {
        self.base_currency = base_currency.to_string();
        self
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    async fn product_snapshot(&self) -> Result<Vec<Product>> {
        let products = self.catalog.products().await?;
        debug!("Loaded {} products", products.len());
        Ok(products)
    }

    pub async fn current_products(&self) -> Result<Report<ProductPrice>> {
        let products = self.product_snapshot().await?;
        Ok(queries::current_products(&products).into())
    }

    pub async fn most_expensive(&self, count: usize) -> Result<Report<ProductPrice>> {
        let products = self.product_snapshot().await?;
        Ok(queries::most_expensive(&products, count).into())
    }

    pub async fn price_below(&self, limit: Decimal) -> Result<Report<ProductPrice>> {
        let products = self.product_snapshot().await?;
        Ok(queries::price_below(&products, limit).into())
    }

    pub async fn price_between(
        &self,
        lower: Decimal,
        upper: Decimal,
    ) -> Result<Report<ProductPrice>> {
        let products = self.product_snapshot().await?;
        Ok(queries::price_between(&products, lower, upper).into())
    }

    pub async fn price_above_average(&self) -> Result<Report<ProductPrice>> {
        let products = self.product_snapshot().await?;
        if let Some(average) = queries::average_price(&products) {
            debug!("Average product price is {}", average);
        }
        Ok(queries::price_above_average(&products).into())
    }

    pub async fn units_in_stock_deficit(&self) -> Result<Report<ProductPrice>> {
        let products = self.product_snapshot().await?;
        Ok(queries::units_in_stock_deficit(&products).into())
    }

    /// Prices every product in its supplier country's currency.
    ///
    /// Rows are enriched one at a time in catalog order: the country lookup
    /// and then the rate lookup for a row finish before the next row starts.
    /// The first failing lookup aborts the whole report. `update_callback`
    /// runs after each completed row.
    pub async fn current_products_with_local_currency(
        &self,
        countries: &dyn CountryCurrencyProvider,
        rates: &dyn CurrencyRateProvider,
        update_callback: &(dyn Fn() + Sync),
    ) -> Result<Report<ProductLocalPrice>> {
        let products = self.product_snapshot().await?;
        let suppliers = self.catalog.suppliers().await?;
        debug!("Loaded {} suppliers", suppliers.len());

        let pending = join_supplier_countries(products, &suppliers)?;

        let mut rows = Vec::with_capacity(pending.len());
        for row in pending {
            let currency = countries.local_currency(&row.supplier_country).await?;
            let rate = rates
                .get_rate(&self.base_currency, &currency.currency_code)
                .await?;
            debug!(
                "{}: {} {} at {} {}/{}",
                row.name,
                row.price,
                self.base_currency,
                rate,
                currency.currency_code,
                self.base_currency
            );
            rows.push(row.complete(&currency, rate));
            update_callback();
        }

        info!("Localized prices for {} products", rows.len());
        Ok(rows.into())
    }
}

/// Pairs each product with its supplier's country.
///
/// Suppliers are indexed once by id; when ids repeat the first supplier wins.
/// A product without a supplier, with an unknown supplier, or whose supplier
/// has no country is a join failure.
fn join_supplier_countries(
    products: Vec<Product>,
    suppliers: &[Supplier],
) -> Result<Vec<PendingLocalPrice>> {
    let mut countries: HashMap<i32, Option<&str>> = HashMap::with_capacity(suppliers.len());
    for supplier in suppliers {
        countries
            .entry(supplier.id)
            .or_insert(supplier.country.as_deref());
    }

    products
        .into_iter()
        .map(|product| {
            let country = product
                .supplier_id
                .and_then(|id| countries.get(&id).copied().flatten())
                .ok_or_else(|| Error::SupplierNotFound {
                    product: product.name.clone(),
                    supplier_id: product.supplier_id,
                })?;
            Ok(PendingLocalPrice {
                price: product.price_or_zero(),
                name: product.name,
                supplier_country: country.to_string(),
            })
        })
        .collect()
}
