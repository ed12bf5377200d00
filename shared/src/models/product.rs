//! Product (producto) models: sellable items composed from supplies

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of a product's bill-of-ingredients.
///
/// `supply_name` and `unit_price` are audit snapshots taken when the
/// product was composed; later edits to the supply do not rewrite them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub supply_id: Uuid,
    pub supply_name: String,
    /// Quantity as requested, in `unit`
    pub quantity: Decimal,
    /// Recipe unit code, possibly different from the supply's own unit
    pub unit: String,
    /// Supply price per its own unit at composition time
    pub unit_price: Decimal,
}

/// A sellable product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    /// Sum of ingredient costs, derived
    pub total_cost: Decimal,
    /// Profit margin percentage applied on top of cost
    pub margin_percent: Decimal,
    /// total_cost * (1 + margin/100), derived
    pub suggested_price: Decimal,
    /// Final editable price; never below total_cost
    pub sale_price: Option<Decimal>,
    /// How many units the current supply stock can produce, derived
    pub available_stock: i64,
    /// available_stock > 0
    pub in_stock: bool,
    pub category: Option<String>,
    pub updated_at: DateTime<Utc>,
}
