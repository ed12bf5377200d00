//! Supply (insumo) models: raw inventory items consumed by products

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supply {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    /// Quantity on hand, expressed in `unit`
    pub stock: Decimal,
    /// Reorder threshold, expressed in `unit`
    pub min_stock: Decimal,
    /// Unit code from the fixed vocabulary (kg, g, litros, ml, unidades)
    pub unit: String,
    pub supplier: Option<String>,
    /// Price per one `unit`
    pub unit_price: Decimal,
    pub status: SupplyStatus,
    pub updated_at: DateTime<Utc>,
}

/// Derived availability status of a supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyStatus {
    #[serde(rename = "disponible")]
    Available,
    #[serde(rename = "bajo_stock")]
    LowStock,
    #[serde(rename = "sin_stock")]
    OutOfStock,
}

impl SupplyStatus {
    /// Status is always a pure function of (stock, min_stock); recompute it
    /// together with any change to either figure.
    pub fn derive(stock: Decimal, min_stock: Decimal) -> SupplyStatus {
        if stock <= Decimal::ZERO {
            SupplyStatus::OutOfStock
        } else if stock <= min_stock {
            SupplyStatus::LowStock
        } else {
            SupplyStatus::Available
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyStatus::Available => "disponible",
            SupplyStatus::LowStock => "bajo_stock",
            SupplyStatus::OutOfStock => "sin_stock",
        }
    }

    pub fn parse(s: &str) -> Option<SupplyStatus> {
        match s {
            "disponible" => Some(SupplyStatus::Available),
            "bajo_stock" => Some(SupplyStatus::LowStock),
            "sin_stock" => Some(SupplyStatus::OutOfStock),
            _ => None,
        }
    }
}
