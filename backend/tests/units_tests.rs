//! Unit conversion tests
//!
//! Tests for the unit-of-measure vocabulary including:
//! - Conversion within a dimension (kg/g, litros/ml)
//! - Identity conversion, including unknown codes
//! - Rejection of cross-dimension and unknown conversions
//! - Compatible-unit listing

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::units::{self, ConversionError, Dimension, Unit};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_kg_to_grams() {
        assert_eq!(units::convert(dec("2"), "kg", "g").unwrap(), dec("2000"));
    }

    #[test]
    fn test_grams_to_kg() {
        assert_eq!(units::convert(dec("500"), "g", "kg").unwrap(), dec("0.500"));
    }

    #[test]
    fn test_liters_to_ml() {
        assert_eq!(
            units::convert(dec("1.5"), "litros", "ml").unwrap(),
            dec("1500")
        );
    }

    #[test]
    fn test_ml_to_liters() {
        assert_eq!(
            units::convert(dec("250"), "ml", "litros").unwrap(),
            dec("0.250")
        );
    }

    /// Equal codes never fail, even for codes outside the vocabulary
    #[test]
    fn test_identity_conversion() {
        assert_eq!(units::convert(dec("7"), "kg", "kg").unwrap(), dec("7"));
        assert_eq!(
            units::convert(dec("3"), "cajas", "cajas").unwrap(),
            dec("3")
        );
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let err = units::convert(dec("1"), "oz", "kg").unwrap_err();
        assert_eq!(err, ConversionError::UnknownUnit("oz".to_string()));

        let err = units::convert(dec("1"), "kg", "lb").unwrap_err();
        assert_eq!(err, ConversionError::UnknownUnit("lb".to_string()));
    }

    #[test]
    fn test_cross_dimension_rejected() {
        let err = units::convert(dec("1"), "kg", "litros").unwrap_err();
        assert_eq!(
            err,
            ConversionError::IncompatibleUnits {
                from: "kg".to_string(),
                to: "litros".to_string(),
            }
        );

        assert!(units::convert(dec("1"), "unidades", "g").is_err());
    }

    #[test]
    fn test_unit_dimensions() {
        assert_eq!(Unit::Kilograms.dimension(), Dimension::Mass);
        assert_eq!(Unit::Grams.dimension(), Dimension::Mass);
        assert_eq!(Unit::Liters.dimension(), Dimension::Volume);
        assert_eq!(Unit::Milliliters.dimension(), Dimension::Volume);
        assert_eq!(Unit::Pieces.dimension(), Dimension::Count);
    }

    #[test]
    fn test_parse_round_trips_codes() {
        for unit in Unit::ALL {
            assert_eq!(Unit::parse(unit.code()), Some(unit));
        }
        assert_eq!(Unit::parse("gramos"), None);
    }

    #[test]
    fn test_compatible_units_mass() {
        let units = units::compatible_units("g");
        assert_eq!(units, vec![Unit::Kilograms, Unit::Grams]);
    }

    #[test]
    fn test_compatible_units_count_is_alone() {
        assert_eq!(units::compatible_units("unidades"), vec![Unit::Pieces]);
    }

    #[test]
    fn test_compatible_units_unknown_code() {
        assert!(units::compatible_units("oz").is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..1_000_000).prop_map(|n| Decimal::new(n, 3))
    }

    fn unit_strategy() -> impl Strategy<Value = Unit> {
        prop::sample::select(Unit::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Converting there and back returns the original quantity
        #[test]
        fn prop_conversion_round_trip(
            quantity in quantity_strategy(),
            from in unit_strategy(),
            to in unit_strategy()
        ) {
            if from.dimension() == to.dimension() {
                let converted = units::convert(quantity, from.code(), to.code()).unwrap();
                let back = units::convert(converted, to.code(), from.code()).unwrap();
                prop_assert_eq!(back.normalize(), quantity.normalize());
            }
        }

        /// Conversion scales linearly with quantity
        #[test]
        fn prop_conversion_is_linear(
            quantity in quantity_strategy(),
            from in unit_strategy(),
            to in unit_strategy()
        ) {
            if from.dimension() == to.dimension() {
                let single = units::convert(quantity, from.code(), to.code()).unwrap();
                let double =
                    units::convert(quantity * Decimal::from(2), from.code(), to.code()).unwrap();
                prop_assert_eq!(double, single * Decimal::from(2));
            }
        }

        /// Cross-dimension pairs always fail, same-dimension pairs never do
        #[test]
        fn prop_dimension_gates_conversion(
            quantity in quantity_strategy(),
            from in unit_strategy(),
            to in unit_strategy()
        ) {
            let result = units::convert(quantity, from.code(), to.code());
            prop_assert_eq!(result.is_ok(), from.dimension() == to.dimension());
        }

        /// Identity conversion holds for any code whatsoever
        #[test]
        fn prop_identity_for_any_code(
            quantity in quantity_strategy(),
            code in "[a-z]{1,12}"
        ) {
            prop_assert_eq!(units::convert(quantity, &code, &code).unwrap(), quantity);
        }
    }
}
