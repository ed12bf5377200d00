//! Order (pedido) models: customer transactions built from priced items

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where the order is consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "presencial")]
    DineIn,
    #[serde(rename = "delivery")]
    Delivery,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::DineIn => "presencial",
            OrderType::Delivery => "delivery",
        }
    }

    pub fn parse(s: &str) -> Option<OrderType> {
        match s {
            "presencial" => Some(OrderType::DineIn),
            "delivery" => Some(OrderType::Delivery),
            _ => None,
        }
    }
}

/// Sales channel the order came through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Rappi,
    Pedidosya,
    Propia,
    Local,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Rappi => "rappi",
            Platform::Pedidosya => "pedidosya",
            Platform::Propia => "propia",
            Platform::Local => "local",
        }
    }

    pub fn parse(s: &str) -> Option<Platform> {
        match s {
            "rappi" => Some(Platform::Rappi),
            "pedidosya" => Some(Platform::Pedidosya),
            "propia" => Some(Platform::Propia),
            "local" => Some(Platform::Local),
            _ => None,
        }
    }
}

/// Workflow status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "en_preparacion")]
    InPreparation,
    #[serde(rename = "listo")]
    Ready,
    #[serde(rename = "en_camino")]
    OnTheWay,
    #[serde(rename = "entregado")]
    Delivered,
    #[serde(rename = "finalizado")]
    Finished,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pendiente",
            OrderStatus::InPreparation => "en_preparacion",
            OrderStatus::Ready => "listo",
            OrderStatus::OnTheWay => "en_camino",
            OrderStatus::Delivered => "entregado",
            OrderStatus::Finished => "finalizado",
        }
    }

    pub fn parse(s: &str) -> Option<OrderStatus> {
        match s {
            "pendiente" => Some(OrderStatus::Pending),
            "en_preparacion" => Some(OrderStatus::InPreparation),
            "listo" => Some(OrderStatus::Ready),
            "en_camino" => Some(OrderStatus::OnTheWay),
            "entregado" => Some(OrderStatus::Delivered),
            "finalizado" => Some(OrderStatus::Finished),
            _ => None,
        }
    }
}

/// Delivery client details, required for delivery orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// A priced order line.
///
/// Name and unit price are snapshots of the product at pricing time; the
/// subtotal always equals quantity * unit_price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// A customer order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// Unique, strictly increasing, assigned once at creation
    pub order_number: i64,
    pub order_type: OrderType,
    pub platform: Platform,
    pub client: Option<Client>,
    pub items: Vec<OrderItem>,
    /// Sum of item subtotals
    pub total: Decimal,
    pub status: OrderStatus,
    /// Estimated preparation time in minutes
    pub estimated_minutes: Option<i32>,
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
}
