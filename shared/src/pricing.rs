//! Order pricing engine
//!
//! Resolves a client-submitted product selection into priced order line
//! items and an order total. Line items snapshot the product name and sale
//! price at resolution time, so later product edits never rewrite an
//! existing order.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{OrderItem, Product};

/// Pricing failures. All of them abort the operation; no partial order is
/// ever produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("products not found: {0:?}")]
    ProductsNotFound(Vec<Uuid>),

    #[error("item quantity must be a positive integer, got {quantity}")]
    InvalidQuantity { product_id: Uuid, quantity: i64 },

    #[error("product \"{name}\" has no valid price")]
    InvalidPrice { product_id: Uuid, name: String },

    #[error("at least one product must be selected")]
    EmptySelection,
}

/// One selected product in the submitted form. A missing quantity counts
/// as a single unit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectedItem {
    #[serde(rename = "cantidad", default)]
    pub quantity: Option<i64>,
}

/// Client-submitted selection, keyed by product id
pub type ItemSelection = BTreeMap<Uuid, SelectedItem>;

/// Whether the pricing run creates a new order or re-prices an existing
/// one. Creation rejects an empty selection; update treats it as a
/// legitimate "remove all items".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingMode {
    Create,
    Update,
}

/// Result of a successful pricing run
#[derive(Debug, Clone, PartialEq)]
pub struct PricedItems {
    pub items: Vec<OrderItem>,
    pub total: Decimal,
}

/// Price a selection against the resolved products.
///
/// Every referenced product must be present in `products`; missing ids are
/// reported together in a single `ProductsNotFound`.
pub fn price_items(
    selection: &ItemSelection,
    products: &HashMap<Uuid, Product>,
    mode: PricingMode,
) -> Result<PricedItems, PricingError> {
    if selection.is_empty() {
        return match mode {
            PricingMode::Create => Err(PricingError::EmptySelection),
            PricingMode::Update => Ok(PricedItems {
                items: Vec::new(),
                total: Decimal::ZERO,
            }),
        };
    }

    let missing: Vec<Uuid> = selection
        .keys()
        .filter(|id| !products.contains_key(id))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(PricingError::ProductsNotFound(missing));
    }

    let mut items = Vec::with_capacity(selection.len());
    let mut total = Decimal::ZERO;

    for (product_id, selected) in selection {
        let product = &products[product_id];

        let quantity = selected.quantity.unwrap_or(1);
        if quantity <= 0 {
            return Err(PricingError::InvalidQuantity {
                product_id: *product_id,
                quantity,
            });
        }

        let unit_price = product.sale_price.ok_or_else(|| PricingError::InvalidPrice {
            product_id: *product_id,
            name: product.name.clone(),
        })?;

        let subtotal = Decimal::from(quantity) * unit_price;
        total += subtotal;

        items.push(OrderItem {
            name: product.name.clone(),
            quantity,
            unit_price,
            subtotal,
        });
    }

    Ok(PricedItems { items, total })
}
