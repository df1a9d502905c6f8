//! In-memory report queries over a product snapshot.
//!
//! Every function here is pure: it takes the complete snapshot and returns the
//! rows in report order. Sorting is stable, so products comparing equal keep
//! their catalog order. A product without a price never satisfies a price
//! comparison and is shown with a price of zero.

use crate::core::catalog::Product;
use crate::core::report::ProductPrice;
use rust_decimal::Decimal;
use std::cmp::Reverse;

fn to_row(product: &Product) -> ProductPrice {
    ProductPrice {
        name: product.name.clone(),
        price: product.price_or_zero(),
    }
}

fn sorted_by_price(mut products: Vec<&Product>) -> Vec<ProductPrice> {
    products.sort_by_key(|p| p.unit_price);
    products.into_iter().map(to_row).collect()
}

/// Products that are not discontinued, by name.
pub fn current_products(products: &[Product]) -> Vec<ProductPrice> {
    let mut current: Vec<&Product> = products.iter().filter(|p| !p.discontinued).collect();
    current.sort_by(|a, b| a.name.cmp(&b.name));
    current.into_iter().map(to_row).collect()
}

/// The `count` highest priced products, most expensive first.
pub fn most_expensive(products: &[Product], count: usize) -> Vec<ProductPrice> {
    let mut priced: Vec<&Product> = products.iter().filter(|p| p.unit_price.is_some()).collect();
    priced.sort_by_key(|p| Reverse(p.unit_price));
    priced.into_iter().take(count).map(to_row).collect()
}

pub fn price_below(products: &[Product], limit: Decimal) -> Vec<ProductPrice> {
    sorted_by_price(
        products
            .iter()
            .filter(|p| p.unit_price.is_some_and(|price| price < limit))
            .collect(),
    )
}

/// Products priced strictly between the two bounds.
pub fn price_between(products: &[Product], lower: Decimal, upper: Decimal) -> Vec<ProductPrice> {
    sorted_by_price(
        products
            .iter()
            .filter(|p| {
                p.unit_price
                    .is_some_and(|price| lower < price && price < upper)
            })
            .collect(),
    )
}

/// Mean price of the snapshot with missing prices counted as zero.
///
/// Returns `None` for an empty snapshot.
pub fn average_price(products: &[Product]) -> Option<Decimal> {
    if products.is_empty() {
        return None;
    }
    let total: Decimal = products.iter().map(Product::price_or_zero).sum();
    Some(total / Decimal::from(products.len()))
}

pub fn price_above_average(products: &[Product]) -> Vec<ProductPrice> {
    let Some(average) = average_price(products) else {
        return Vec::new();
    };
    sorted_by_price(
        products
            .iter()
            .filter(|p| p.unit_price.is_some_and(|price| price > average))
            .collect(),
    )
}

/// Products with fewer units in stock than on order. Both counts must be known.
pub fn units_in_stock_deficit(products: &[Product]) -> Vec<ProductPrice> {
    sorted_by_price(
        products
            .iter()
            .filter(|p| match (p.units_in_stock, p.units_on_order) {
                (Some(in_stock), Some(on_order)) => in_stock < on_order,
                _ => false,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn product(id: i32, name: &str, price: Option<&str>) -> Product {
        Product {
            id,
            name: name.to_string(),
            supplier_id: Some(1),
            unit_price: price.map(dec),
            units_in_stock: Some(10),
            units_on_order: Some(0),
            discontinued: false,
        }
    }

    fn names(rows: &[ProductPrice]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    fn catalog() -> Vec<Product> {
        let mut products = vec![
            product(1, "Chai", Some("18.00")),
            product(2, "Chang", Some("19.00")),
            product(3, "Aniseed Syrup", Some("10.00")),
            product(4, "Mishi Kobe Niku", Some("97.00")),
            product(5, "Konbu", None),
            product(6, "Côte de Blaye", Some("263.50")),
            product(7, "Tofu", Some("23.25")),
        ];
        products[3].discontinued = true;
        products[1].units_in_stock = Some(17);
        products[1].units_on_order = Some(40);
        products[4].units_in_stock = Some(0);
        products[4].units_on_order = Some(10);
        products[6].units_in_stock = None;
        products[6].units_on_order = Some(10);
        products
    }

    #[test]
    fn test_current_products() {
        let rows = current_products(&catalog());
        assert_eq!(
            names(&rows),
            vec!["Aniseed Syrup", "Chai", "Chang", "Côte de Blaye", "Konbu", "Tofu"]
        );
        // Missing price is shown as zero
        let konbu = rows.iter().find(|r| r.name == "Konbu").unwrap();
        assert_eq!(konbu.price, Decimal::ZERO);
        assert!(!rows.iter().any(|r| r.name == "Mishi Kobe Niku"));
    }

    #[test]
    fn test_current_products_holds_exactly_non_discontinued() {
        let products = catalog();
        let rows = current_products(&products);
        let expected = products.iter().filter(|p| !p.discontinued).count();
        assert_eq!(rows.len(), expected);
        assert!(rows.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[test]
    fn test_most_expensive() {
        let rows = most_expensive(&catalog(), 3);
        assert_eq!(names(&rows), vec!["Côte de Blaye", "Mishi Kobe Niku", "Tofu"]);
        assert_eq!(rows[0].price, dec("263.50"));
    }

    #[test]
    fn test_most_expensive_is_true_top_n() {
        let products = catalog();
        for count in 0..=products.len() + 1 {
            let rows = most_expensive(&products, count);
            let priced = products.iter().filter(|p| p.unit_price.is_some()).count();
            assert_eq!(rows.len(), count.min(priced));
            assert!(rows.windows(2).all(|w| w[0].price >= w[1].price));

            // No excluded priced product outranks the cheapest included row
            if let Some(last) = rows.last() {
                let excluded_max = products
                    .iter()
                    .filter(|p| !rows.iter().any(|r| r.name == p.name))
                    .filter_map(|p| p.unit_price)
                    .max();
                if let Some(excluded_max) = excluded_max {
                    assert!(excluded_max <= last.price);
                }
            }
        }
    }

    #[test]
    fn test_most_expensive_zero_count() {
        assert!(most_expensive(&catalog(), 0).is_empty());
    }

    #[test]
    fn test_price_below() {
        let rows = price_below(&catalog(), dec("19.00"));
        assert_eq!(names(&rows), vec!["Aniseed Syrup", "Chai"]);
    }

    #[test]
    fn test_price_between_is_exclusive() {
        let rows = price_between(&catalog(), dec("18.00"), dec("97.00"));
        assert_eq!(names(&rows), vec!["Chang", "Tofu"]);

        assert!(price_between(&catalog(), dec("50"), dec("10")).is_empty());
    }

    #[test]
    fn test_average_counts_missing_prices_as_zero() {
        let products = vec![
            product(1, "A", Some("10")),
            product(2, "B", Some("20")),
            product(3, "C", None),
        ];
        assert_eq!(average_price(&products), Some(dec("10")));
        assert_eq!(average_price(&[]), None);
    }

    #[test]
    fn test_price_above_average() {
        let products = vec![
            product(1, "A", Some("10")),
            product(2, "B", Some("20")),
            product(3, "C", None),
            product(4, "D", Some("11")),
        ];
        // Mean is 41 / 4 = 10.25
        let rows = price_above_average(&products);
        assert_eq!(names(&rows), vec!["D", "B"]);
    }

    #[test]
    fn test_price_above_average_is_strict() {
        let products = vec![product(1, "A", Some("10")), product(2, "B", Some("10"))];
        assert!(price_above_average(&products).is_empty());
        assert!(price_above_average(&[]).is_empty());
    }

    #[test]
    fn test_units_in_stock_deficit() {
        let rows = units_in_stock_deficit(&catalog());
        // Konbu has no price so it sorts first and shows as zero
        assert_eq!(names(&rows), vec!["Konbu", "Chang"]);
        assert_eq!(rows[0].price, Decimal::ZERO);
    }
}
