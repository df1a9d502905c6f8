//! Catalog entities and the source they are fetched from

use crate::core::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Product {
    #[serde(rename = "ProductID")]
    pub id: i32,
    #[serde(rename = "ProductName")]
    pub name: String,
    #[serde(rename = "SupplierID")]
    pub supplier_id: Option<i32>,
    #[serde(rename = "UnitPrice")]
    pub unit_price: Option<Decimal>,
    #[serde(rename = "UnitsInStock")]
    pub units_in_stock: Option<i32>,
    #[serde(rename = "UnitsOnOrder")]
    pub units_on_order: Option<i32>,
    #[serde(rename = "Discontinued")]
    pub discontinued: bool,
}

impl Product {
    /// Price used for display and averaging, missing prices count as zero.
    pub fn price_or_zero(&self) -> Decimal {
        self.unit_price.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Supplier {
    #[serde(rename = "SupplierID")]
    pub id: i32,
    #[serde(rename = "Country")]
    pub country: Option<String>,
}

/// A remote catalog that can hand out complete product and supplier snapshots.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn products(&self) -> Result<Vec<Product>>;
    async fn suppliers(&self) -> Result<Vec<Supplier>>;
}
