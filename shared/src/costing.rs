//! Product costing engine
//!
//! Turns a requested bill-of-ingredients into priced, stock-aware product
//! fields: per-ingredient audit snapshots, total cost, suggested price,
//! resolved sale price and how many units the current supply stock can
//! produce. Operates over an already-fetched supply map; the caller owns
//! all persistence.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Ingredient, Supply};
use crate::units;

/// Costing failures. All of them abort the whole composition; a partially
/// composed product is never produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CostingError {
    #[error("supply not found: {0}")]
    SupplyNotFound(Uuid),

    #[error("ingredient quantity must be positive, got {quantity}")]
    InvalidQuantity { supply_id: Uuid, quantity: Decimal },

    #[error("cannot convert from {requested} to {supply_unit}")]
    UnitMismatch {
        requested: String,
        supply_unit: String,
    },

    #[error("sale price {price} is below total cost {cost}")]
    SalePriceBelowCost { price: Decimal, cost: Decimal },
}

/// One requested ingredient line. When `unit` is absent the supply's own
/// unit is used.
#[derive(Debug, Clone)]
pub struct IngredientRequest {
    pub supply_id: Uuid,
    pub quantity: Decimal,
    pub unit: Option<String>,
}

/// Whether the composition is creating a new product or updating one.
///
/// Creation silently falls back to the suggested price when the requested
/// sale price is absent or below cost; update rejects an explicit
/// below-cost price instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionMode {
    Create,
    Update,
}

/// Result of a successful composition
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuote {
    pub ingredients: Vec<Ingredient>,
    pub total_cost: Decimal,
    pub margin_percent: Decimal,
    pub suggested_price: Decimal,
    pub sale_price: Decimal,
    pub available_stock: i64,
    pub in_stock: bool,
}

/// Compose a product from ingredient requests against the given supplies.
///
/// Idempotent: identical inputs over unchanged supplies yield an identical
/// quote. Each request is evaluated independently; referencing the same
/// supply twice is allowed and no deduplication is performed.
pub fn compose_product(
    requests: &[IngredientRequest],
    margin_percent: Decimal,
    requested_sale_price: Option<Decimal>,
    mode: CompositionMode,
    supplies: &HashMap<Uuid, Supply>,
) -> Result<ProductQuote, CostingError> {
    let mut ingredients = Vec::with_capacity(requests.len());
    let mut total_cost = Decimal::ZERO;

    for request in requests {
        let supply = supplies
            .get(&request.supply_id)
            .ok_or(CostingError::SupplyNotFound(request.supply_id))?;

        if request.quantity <= Decimal::ZERO {
            return Err(CostingError::InvalidQuantity {
                supply_id: request.supply_id,
                quantity: request.quantity,
            });
        }

        let unit = request.unit.as_deref().unwrap_or(&supply.unit);

        // The supply price is per its own unit, so cost the converted amount.
        let quantity_in_supply_unit =
            units::convert(request.quantity, unit, &supply.unit).map_err(|_| {
                CostingError::UnitMismatch {
                    requested: unit.to_string(),
                    supply_unit: supply.unit.clone(),
                }
            })?;

        total_cost += quantity_in_supply_unit * supply.unit_price;

        ingredients.push(Ingredient {
            supply_id: supply.id,
            supply_name: supply.name.clone(),
            quantity: request.quantity,
            unit: unit.to_string(),
            unit_price: supply.unit_price,
        });
    }

    let suggested_price = total_cost + total_cost * margin_percent / Decimal::from(100);

    let sale_price = match (mode, requested_sale_price) {
        (CompositionMode::Create, Some(price)) if price >= total_cost => price,
        (CompositionMode::Create, _) => suggested_price,
        (CompositionMode::Update, Some(price)) if price < total_cost => {
            return Err(CostingError::SalePriceBelowCost {
                price,
                cost: total_cost,
            });
        }
        (CompositionMode::Update, Some(price)) => price,
        (CompositionMode::Update, None) => suggested_price,
    };

    let available_stock = available_units(&ingredients, supplies);

    Ok(ProductQuote {
        ingredients,
        total_cost,
        margin_percent,
        suggested_price,
        sale_price,
        available_stock,
        in_stock: available_stock > 0,
    })
}

/// How many product units the current supply stocks can produce.
///
/// Per ingredient: convert the supply's stock into the recipe unit and take
/// floor(stock / quantity). A missing or empty supply, a conversion failure
/// or any per-ingredient count of zero makes the whole product unavailable;
/// otherwise the scarcest ingredient bounds the result.
pub fn available_units(ingredients: &[Ingredient], supplies: &HashMap<Uuid, Supply>) -> i64 {
    if ingredients.is_empty() {
        return 0;
    }

    let mut minimum: Option<i64> = None;

    for ingredient in ingredients {
        let supply = match supplies.get(&ingredient.supply_id) {
            Some(s) if s.stock > Decimal::ZERO => s,
            _ => return 0,
        };

        let stock_in_recipe_unit = match units::convert(supply.stock, &supply.unit, &ingredient.unit)
        {
            Ok(stock) => stock,
            Err(_) => return 0,
        };

        let units_available = (stock_in_recipe_unit / ingredient.quantity)
            .floor()
            .to_i64()
            .unwrap_or(0);

        if units_available == 0 {
            return 0;
        }

        minimum = Some(match minimum {
            Some(current) => current.min(units_available),
            None => units_available,
        });
    }

    minimum.unwrap_or(0)
}
