//! Product costing tests
//!
//! Tests for recipe composition including:
//! - Ingredient cost accumulation with unit conversion
//! - Suggested price from margin
//! - Sale price resolution on create vs update
//! - Producible-unit counts bounded by the scarcest ingredient

use std::collections::HashMap;

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::costing::{
    self, CompositionMode, CostingError, IngredientRequest,
};
use shared::models::{Supply, SupplyStatus};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn supply(name: &str, stock: &str, unit: &str, unit_price: &str) -> Supply {
    let stock = dec(stock);
    Supply {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: "general".to_string(),
        stock,
        min_stock: dec("5"),
        unit: unit.to_string(),
        supplier: None,
        unit_price: dec(unit_price),
        status: SupplyStatus::derive(stock, dec("5")),
        updated_at: Utc::now(),
    }
}

fn supply_map(supplies: Vec<Supply>) -> HashMap<Uuid, Supply> {
    supplies.into_iter().map(|s| (s.id, s)).collect()
}

fn request(supply: &Supply, quantity: &str, unit: Option<&str>) -> IngredientRequest {
    IngredientRequest {
        supply_id: supply.id,
        quantity: dec(quantity),
        unit: unit.map(|u| u.to_string()),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// 2 kg of flour at 10/kg plus 1 L of oil at 5/L, 20% margin
    #[test]
    fn test_cost_and_suggested_price() {
        let flour = supply("Harina", "10", "kg", "10");
        let oil = supply("Aceite", "4", "litros", "5");
        let requests = vec![request(&flour, "2", None), request(&oil, "1", None)];
        let supplies = supply_map(vec![flour, oil]);

        let quote = costing::compose_product(
            &requests,
            dec("20"),
            None,
            CompositionMode::Create,
            &supplies,
        )
        .unwrap();

        assert_eq!(quote.total_cost, dec("25"));
        assert_eq!(quote.suggested_price, dec("30"));
        // No sale price requested on create falls back to the suggestion
        assert_eq!(quote.sale_price, dec("30"));
        assert_eq!(quote.ingredients.len(), 2);
    }

    /// Recipe in grams against a supply priced per kilogram
    #[test]
    fn test_recipe_unit_differs_from_supply_unit() {
        let flour = supply("Harina", "10", "kg", "10");
        let requests = vec![request(&flour, "500", Some("g"))];
        let supplies = supply_map(vec![flour]);

        let quote = costing::compose_product(
            &requests,
            dec("0"),
            None,
            CompositionMode::Create,
            &supplies,
        )
        .unwrap();

        assert_eq!(quote.total_cost, dec("5.000"));
        assert_eq!(quote.ingredients[0].unit, "g");
        assert_eq!(quote.ingredients[0].quantity, dec("500"));
    }

    #[test]
    fn test_unknown_supply_rejected() {
        let missing = Uuid::new_v4();
        let requests = vec![IngredientRequest {
            supply_id: missing,
            quantity: dec("1"),
            unit: None,
        }];

        let err = costing::compose_product(
            &requests,
            dec("20"),
            None,
            CompositionMode::Create,
            &HashMap::new(),
        )
        .unwrap_err();

        assert_eq!(err, CostingError::SupplyNotFound(missing));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let flour = supply("Harina", "10", "kg", "10");
        let requests = vec![request(&flour, "0", None)];
        let supplies = supply_map(vec![flour]);

        let err = costing::compose_product(
            &requests,
            dec("20"),
            None,
            CompositionMode::Create,
            &supplies,
        )
        .unwrap_err();

        assert!(matches!(err, CostingError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_incompatible_recipe_unit_rejected() {
        let flour = supply("Harina", "10", "kg", "10");
        let requests = vec![request(&flour, "1", Some("litros"))];
        let supplies = supply_map(vec![flour]);

        let err = costing::compose_product(
            &requests,
            dec("20"),
            None,
            CompositionMode::Create,
            &supplies,
        )
        .unwrap_err();

        assert_eq!(
            err,
            CostingError::UnitMismatch {
                requested: "litros".to_string(),
                supply_unit: "kg".to_string(),
            }
        );
    }

    /// On create a below-cost request is silently replaced by the suggestion
    #[test]
    fn test_create_falls_back_on_below_cost_price() {
        let flour = supply("Harina", "10", "kg", "10");
        let requests = vec![request(&flour, "2", None)];
        let supplies = supply_map(vec![flour]);

        let quote = costing::compose_product(
            &requests,
            dec("50"),
            Some(dec("1")),
            CompositionMode::Create,
            &supplies,
        )
        .unwrap();

        assert_eq!(quote.total_cost, dec("20"));
        assert_eq!(quote.sale_price, dec("30"));
    }

    /// On update the same request is an error instead
    #[test]
    fn test_update_rejects_below_cost_price() {
        let flour = supply("Harina", "10", "kg", "10");
        let requests = vec![request(&flour, "2", None)];
        let supplies = supply_map(vec![flour]);

        let err = costing::compose_product(
            &requests,
            dec("50"),
            Some(dec("1")),
            CompositionMode::Update,
            &supplies,
        )
        .unwrap_err();

        assert_eq!(
            err,
            CostingError::SalePriceBelowCost {
                price: dec("1"),
                cost: dec("20"),
            }
        );
    }

    #[test]
    fn test_valid_requested_price_is_kept() {
        let flour = supply("Harina", "10", "kg", "10");
        let requests = vec![request(&flour, "2", None)];
        let supplies = supply_map(vec![flour]);

        for mode in [CompositionMode::Create, CompositionMode::Update] {
            let quote = costing::compose_product(
                &requests,
                dec("20"),
                Some(dec("99.90")),
                mode,
                &supplies,
            )
            .unwrap();
            assert_eq!(quote.sale_price, dec("99.90"));
        }
    }

    /// Scarcest ingredient bounds the producible units
    #[test]
    fn test_available_stock_takes_minimum() {
        let flour = supply("Harina", "10", "kg", "10");
        let oil = supply("Aceite", "2", "litros", "5");
        // 10 kg / 2 kg = 5 units, 2 L / 1 L = 2 units
        let requests = vec![request(&flour, "2", None), request(&oil, "1", None)];
        let supplies = supply_map(vec![flour, oil]);

        let quote = costing::compose_product(
            &requests,
            dec("20"),
            None,
            CompositionMode::Create,
            &supplies,
        )
        .unwrap();

        assert_eq!(quote.available_stock, 2);
        assert!(quote.in_stock);
    }

    /// Fractional leftovers are floored away
    #[test]
    fn test_available_stock_floors() {
        let flour = supply("Harina", "5", "kg", "10");
        let requests = vec![request(&flour, "2", None)];
        let supplies = supply_map(vec![flour]);

        let quote = costing::compose_product(
            &requests,
            dec("20"),
            None,
            CompositionMode::Create,
            &supplies,
        )
        .unwrap();

        assert_eq!(quote.available_stock, 2);
    }

    #[test]
    fn test_exhausted_ingredient_makes_product_unavailable() {
        let flour = supply("Harina", "10", "kg", "10");
        let oil = supply("Aceite", "0", "litros", "5");
        let requests = vec![request(&flour, "2", None), request(&oil, "1", None)];
        let supplies = supply_map(vec![flour, oil]);

        let quote = costing::compose_product(
            &requests,
            dec("20"),
            None,
            CompositionMode::Create,
            &supplies,
        )
        .unwrap();

        assert_eq!(quote.available_stock, 0);
        assert!(!quote.in_stock);
    }

    #[test]
    fn test_empty_recipe_has_no_stock() {
        let quote = costing::compose_product(
            &[],
            dec("20"),
            None,
            CompositionMode::Create,
            &HashMap::new(),
        )
        .unwrap();

        assert_eq!(quote.total_cost, Decimal::ZERO);
        assert_eq!(quote.available_stock, 0);
        assert!(!quote.in_stock);
    }

    /// Stock in kg producing a recipe measured in grams
    #[test]
    fn test_available_stock_converts_units() {
        let flour = supply("Harina", "1", "kg", "10");
        let requests = vec![request(&flour, "300", Some("g"))];
        let supplies = supply_map(vec![flour]);

        let quote = costing::compose_product(
            &requests,
            dec("20"),
            None,
            CompositionMode::Create,
            &supplies,
        )
        .unwrap();

        // 1000 g / 300 g = 3 units
        assert_eq!(quote.available_stock, 3);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..10_000).prop_map(|n| Decimal::new(n, 2))
    }

    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..100_000).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Suggested price applies the margin exactly
        #[test]
        fn prop_suggested_price_from_margin(
            quantity in quantity_strategy(),
            unit_price in price_strategy(),
            margin in 0i64..200
        ) {
            let s = supply("Insumo", "100", "kg", &unit_price.to_string());
            let requests = vec![request(&s, &quantity.to_string(), None)];
            let supplies = supply_map(vec![s]);

            let margin = Decimal::from(margin);
            let quote = costing::compose_product(
                &requests,
                margin,
                None,
                CompositionMode::Create,
                &supplies,
            )
            .unwrap();

            let expected_cost = quantity * unit_price;
            prop_assert_eq!(quote.total_cost, expected_cost);
            prop_assert_eq!(
                quote.suggested_price,
                expected_cost + expected_cost * margin / Decimal::from(100)
            );
        }

        /// Composition never yields a sale price below cost
        #[test]
        fn prop_sale_price_never_below_cost(
            quantity in quantity_strategy(),
            unit_price in price_strategy(),
            requested in proptest::option::of(price_strategy())
        ) {
            let s = supply("Insumo", "100", "kg", &unit_price.to_string());
            let requests = vec![request(&s, &quantity.to_string(), None)];
            let supplies = supply_map(vec![s]);

            let quote = costing::compose_product(
                &requests,
                dec("20"),
                requested,
                CompositionMode::Create,
                &supplies,
            )
            .unwrap();

            prop_assert!(quote.sale_price >= quote.total_cost);
        }

        /// available_stock is consistent with its in_stock flag
        #[test]
        fn prop_in_stock_matches_available(
            stock in 0i64..100,
            quantity in quantity_strategy()
        ) {
            let s = supply("Insumo", &stock.to_string(), "kg", "10");
            let requests = vec![request(&s, &quantity.to_string(), None)];
            let supplies = supply_map(vec![s]);

            let quote = costing::compose_product(
                &requests,
                dec("20"),
                None,
                CompositionMode::Create,
                &supplies,
            )
            .unwrap();

            prop_assert!(quote.available_stock >= 0);
            prop_assert_eq!(quote.in_stock, quote.available_stock > 0);
        }
    }
}
