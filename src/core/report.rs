//! Report rows and the ordered report container

use crate::core::currency::LocalCurrency;
use rust_decimal::Decimal;
use serde::Serialize;

/// An ordered, read-only sequence of report rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report<T> {
    rows: Vec<T>,
}

impl<T> Report<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T> From<Vec<T>> for Report<T> {
    fn from(rows: Vec<T>) -> Self {
        Self::new(rows)
    }
}

impl<T> IntoIterator for Report<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Report<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPrice {
    pub name: String,
    pub price: Decimal,
}

/// A product price converted into the currency of its supplier's country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductLocalPrice {
    pub name: String,
    pub price: Decimal,
    pub country: String,
    pub local_price: Decimal,
    pub currency_symbol: String,
}

/// A localized row joined to its supplier country but not yet enriched.
///
/// Only [`PendingLocalPrice::complete`] turns it into a [`ProductLocalPrice`],
/// so a report never holds a row with some enrichment fields unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLocalPrice {
    pub name: String,
    pub price: Decimal,
    pub supplier_country: String,
}

impl PendingLocalPrice {
    pub fn complete(self, currency: &LocalCurrency, rate: Decimal) -> ProductLocalPrice {
        ProductLocalPrice {
            local_price: self.price * rate,
            name: self.name,
            price: self.price,
            country: currency.country_name.clone(),
            currency_symbol: currency.currency_symbol.clone(),
        }
    }
}
