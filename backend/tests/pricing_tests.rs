//! Order pricing tests
//!
//! Tests for selection pricing including:
//! - Line item snapshots and subtotal arithmetic
//! - Default quantity handling
//! - Missing products reported together
//! - Empty selection semantics on create vs update

use std::collections::HashMap;

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::Product;
use shared::pricing::{self, ItemSelection, PricingError, PricingMode, SelectedItem};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn product(name: &str, sale_price: Option<&str>) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        ingredients: Vec::new(),
        total_cost: Decimal::ZERO,
        margin_percent: dec("20"),
        suggested_price: Decimal::ZERO,
        sale_price: sale_price.map(dec),
        available_stock: 10,
        in_stock: true,
        category: None,
        updated_at: Utc::now(),
    }
}

fn product_map(products: Vec<Product>) -> HashMap<Uuid, Product> {
    products.into_iter().map(|p| (p.id, p)).collect()
}

fn select(entries: Vec<(Uuid, Option<i64>)>) -> ItemSelection {
    entries
        .into_iter()
        .map(|(id, quantity)| (id, SelectedItem { quantity }))
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_prices_selection() {
        let pizza = product("Pizza Muzzarella", Some("15"));
        let empanada = product("Empanada", Some("2.50"));
        let selection = select(vec![(pizza.id, Some(3)), (empanada.id, Some(6))]);
        let products = product_map(vec![pizza, empanada]);

        let priced = pricing::price_items(&selection, &products, PricingMode::Create).unwrap();

        assert_eq!(priced.items.len(), 2);
        assert_eq!(priced.total, dec("60"));
        for item in &priced.items {
            assert_eq!(item.subtotal, Decimal::from(item.quantity) * item.unit_price);
        }
    }

    /// A missing quantity counts as one unit
    #[test]
    fn test_missing_quantity_defaults_to_one() {
        let pizza = product("Pizza Muzzarella", Some("15"));
        let selection = select(vec![(pizza.id, None)]);
        let products = product_map(vec![pizza]);

        let priced = pricing::price_items(&selection, &products, PricingMode::Create).unwrap();

        assert_eq!(priced.items[0].quantity, 1);
        assert_eq!(priced.total, dec("15"));
    }

    #[test]
    fn test_line_items_snapshot_product_fields() {
        let pizza = product("Pizza Muzzarella", Some("15"));
        let selection = select(vec![(pizza.id, Some(2))]);
        let products = product_map(vec![pizza]);

        let priced = pricing::price_items(&selection, &products, PricingMode::Create).unwrap();

        assert_eq!(priced.items[0].name, "Pizza Muzzarella");
        assert_eq!(priced.items[0].unit_price, dec("15"));
        assert_eq!(priced.items[0].subtotal, dec("30"));
    }

    /// Every unknown id is reported, not just the first
    #[test]
    fn test_missing_products_reported_together() {
        let pizza = product("Pizza Muzzarella", Some("15"));
        let ghost_a = Uuid::new_v4();
        let ghost_b = Uuid::new_v4();
        let selection = select(vec![
            (pizza.id, Some(1)),
            (ghost_a, Some(1)),
            (ghost_b, Some(2)),
        ]);
        let products = product_map(vec![pizza]);

        let err = pricing::price_items(&selection, &products, PricingMode::Create).unwrap_err();

        match err {
            PricingError::ProductsNotFound(missing) => {
                assert_eq!(missing.len(), 2);
                assert!(missing.contains(&ghost_a));
                assert!(missing.contains(&ghost_b));
            }
            other => panic!("expected ProductsNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let pizza = product("Pizza Muzzarella", Some("15"));
        let selection = select(vec![(pizza.id, Some(0))]);
        let products = product_map(vec![pizza]);

        let err = pricing::price_items(&selection, &products, PricingMode::Create).unwrap_err();
        assert!(matches!(err, PricingError::InvalidQuantity { .. }));

        let selection = select(vec![(selection.keys().next().copied().unwrap(), Some(-3))]);
        let err = pricing::price_items(&selection, &products, PricingMode::Create).unwrap_err();
        assert!(matches!(err, PricingError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_unpriced_product_rejected() {
        let draft = product("Producto Borrador", None);
        let selection = select(vec![(draft.id, Some(1))]);
        let name = draft.name.clone();
        let id = draft.id;
        let products = product_map(vec![draft]);

        let err = pricing::price_items(&selection, &products, PricingMode::Create).unwrap_err();
        assert_eq!(
            err,
            PricingError::InvalidPrice {
                product_id: id,
                name,
            }
        );
    }

    /// Creating an order requires at least one item
    #[test]
    fn test_empty_selection_rejected_on_create() {
        let err = pricing::price_items(
            &ItemSelection::new(),
            &HashMap::new(),
            PricingMode::Create,
        )
        .unwrap_err();

        assert_eq!(err, PricingError::EmptySelection);
    }

    /// Updating with an empty selection clears the order instead
    #[test]
    fn test_empty_selection_clears_on_update() {
        let priced = pricing::price_items(
            &ItemSelection::new(),
            &HashMap::new(),
            PricingMode::Update,
        )
        .unwrap();

        assert!(priced.items.is_empty());
        assert_eq!(priced.total, Decimal::ZERO);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..100_000).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Total always equals the sum of line subtotals
        #[test]
        fn prop_total_is_sum_of_subtotals(
            lines in prop::collection::vec((price_strategy(), 1i64..20), 1..8)
        ) {
            let products: Vec<Product> = lines
                .iter()
                .enumerate()
                .map(|(i, (price, _))| product(&format!("Producto {i}"), Some(&price.to_string())))
                .collect();
            let selection = select(
                products
                    .iter()
                    .zip(&lines)
                    .map(|(p, (_, quantity))| (p.id, Some(*quantity)))
                    .collect(),
            );
            let products = product_map(products);

            let priced = pricing::price_items(&selection, &products, PricingMode::Create).unwrap();

            let expected: Decimal = priced.items.iter().map(|i| i.subtotal).sum();
            prop_assert_eq!(priced.total, expected);
            prop_assert_eq!(priced.items.len(), selection.len());
        }

        /// Pricing the same selection twice yields identical results
        #[test]
        fn prop_pricing_is_deterministic(
            price in price_strategy(),
            quantity in 1i64..50
        ) {
            let p = product("Producto", Some(&price.to_string()));
            let selection = select(vec![(p.id, Some(quantity))]);
            let products = product_map(vec![p]);

            let first = pricing::price_items(&selection, &products, PricingMode::Create).unwrap();
            let second = pricing::price_items(&selection, &products, PricingMode::Create).unwrap();

            prop_assert_eq!(first, second);
        }
    }
}
