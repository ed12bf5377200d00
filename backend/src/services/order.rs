//! Order (pedido) service: CRUD over the pricing engine
//!
//! Order numbers come from a single-row counter incremented inside the
//! creation transaction, so two concurrent creations can never be handed
//! the same number.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Client, Ingredient, Order, OrderItem, OrderStatus, OrderType, Platform, Product,
};
use shared::pricing::{self, ItemSelection, PricingMode};

/// Order service for managing customer orders
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

/// Database row for an order
#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    order_number: i64,
    order_type: String,
    platform: String,
    client: Option<Json<Client>>,
    items: Json<Vec<OrderItem>>,
    total: Decimal,
    status: String,
    estimated_minutes: Option<i32>,
    observations: Option<String>,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> AppResult<Order> {
        let order_type = OrderType::parse(&self.order_type)
            .ok_or_else(|| AppError::Internal(format!("bad order type: {}", self.order_type)))?;
        let platform = Platform::parse(&self.platform)
            .ok_or_else(|| AppError::Internal(format!("bad platform: {}", self.platform)))?;
        let status = OrderStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("bad order status: {}", self.status)))?;

        Ok(Order {
            id: self.id,
            order_number: self.order_number,
            order_type,
            platform,
            client: self.client.map(|c| c.0),
            items: self.items.0,
            total: self.total,
            status,
            estimated_minutes: self.estimated_minutes,
            observations: self.observations,
            created_at: self.created_at,
        })
    }
}

/// Input for creating an order
#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    pub order_type: OrderType,
    pub platform: Platform,
    /// Selected products keyed by product id
    #[serde(default)]
    pub items: ItemSelection,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub estimated_minutes: Option<i32>,
    pub observations: Option<String>,
}

/// Input for updating an order. An absent `items` map clears the order's
/// items; the order number is never touched. `estimated_minutes` and
/// `observations` can be changed but not cleared; absent values keep
/// whatever is stored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderInput {
    pub order_type: Option<OrderType>,
    pub platform: Option<Platform>,
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub items: ItemSelection,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub estimated_minutes: Option<i32>,
    pub observations: Option<String>,
}

const ORDER_COLUMNS: &str = "id, order_number, order_type, platform, client, items, total, \
     status, estimated_minutes, observations, created_at";

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all orders, newest order number first
    pub async fn list(&self) -> AppResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {} FROM orders ORDER BY order_number DESC",
            ORDER_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Get an order by id
    pub async fn get(&self, id: Uuid) -> AppResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {} FROM orders WHERE id = $1",
            ORDER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Pedido".to_string()))?;

        row.into_order()
    }

    /// Create an order: price the selection, take the next order number
    /// and insert, all in one transaction
    pub async fn create(&self, input: CreateOrderInput) -> AppResult<Order> {
        let client = resolve_client(
            input.order_type,
            None,
            input.client_name,
            input.client_phone,
            input.client_address,
        )?;

        let products = self.fetch_products(&input.items).await?;
        let priced = pricing::price_items(&input.items, &products, PricingMode::Create)?;

        let mut tx = self.db.begin().await?;

        let order_number = sqlx::query_scalar::<_, i64>(
            "UPDATE order_counter SET value = value + 1 WHERE id = 1 RETURNING value",
        )
        .fetch_one(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            INSERT INTO orders (order_number, order_type, platform, client, items, total,
                                status, estimated_minutes, observations)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(order_number)
        .bind(input.order_type.as_str())
        .bind(input.platform.as_str())
        .bind(client.as_ref().map(Json))
        .bind(Json(&priced.items))
        .bind(priced.total)
        .bind(OrderStatus::Pending.as_str())
        .bind(input.estimated_minutes)
        .bind(&input.observations)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(order_number, total = %priced.total, "order created");

        row.into_order()
    }

    /// Update an order, re-pricing its items. An empty selection is a
    /// legitimate "remove all items" here, unlike on creation.
    pub async fn update(&self, id: Uuid, input: UpdateOrderInput) -> AppResult<Order> {
        let existing = self.get(id).await?;

        let order_type = input.order_type.unwrap_or(existing.order_type);
        let platform = input.platform.unwrap_or(existing.platform);
        let status = input.status.unwrap_or(existing.status);

        let client = resolve_client(
            order_type,
            existing.client,
            input.client_name,
            input.client_phone,
            input.client_address,
        )?;

        let products = self.fetch_products(&input.items).await?;
        let priced = pricing::price_items(&input.items, &products, PricingMode::Update)?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            UPDATE orders
            SET order_type = $2,
                platform = $3,
                client = $4,
                items = $5,
                total = $6,
                status = $7,
                estimated_minutes = COALESCE($8, estimated_minutes),
                observations = COALESCE($9, observations)
            WHERE id = $1
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(id)
        .bind(order_type.as_str())
        .bind(platform.as_str())
        .bind(client.as_ref().map(Json))
        .bind(Json(&priced.items))
        .bind(priced.total)
        .bind(status.as_str())
        .bind(input.estimated_minutes)
        .bind(&input.observations)
        .fetch_one(&self.db)
        .await?;

        row.into_order()
    }

    /// Delete an order
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pedido".to_string()));
        }

        Ok(())
    }

    /// Batch-fetch the products referenced by the selection, keyed by id.
    /// Missing ids are reported together by the pricing engine.
    async fn fetch_products(&self, selection: &ItemSelection) -> AppResult<HashMap<Uuid, Product>> {
        if selection.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<Uuid> = selection.keys().copied().collect();

        let rows = sqlx::query_as::<_, ProductLookupRow>(
            r#"
            SELECT id, name, ingredients, total_cost, margin_percent, suggested_price,
                   sale_price, available_stock, in_stock, category, updated_at
            FROM products
            WHERE id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.id, row.into()))
            .collect())
    }
}

/// Lookup row for pricing
#[derive(Debug, FromRow)]
struct ProductLookupRow {
    id: Uuid,
    name: String,
    ingredients: Json<Vec<Ingredient>>,
    total_cost: Decimal,
    margin_percent: Decimal,
    suggested_price: Decimal,
    sale_price: Option<Decimal>,
    available_stock: i64,
    in_stock: bool,
    category: Option<String>,
    updated_at: DateTime<Utc>,
}

impl From<ProductLookupRow> for Product {
    fn from(row: ProductLookupRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            ingredients: row.ingredients.0,
            total_cost: row.total_cost,
            margin_percent: row.margin_percent,
            suggested_price: row.suggested_price,
            sale_price: row.sale_price,
            available_stock: row.available_stock,
            in_stock: row.in_stock,
            category: row.category,
            updated_at: row.updated_at,
        }
    }
}

/// Delivery orders require full client details; dine-in orders carry none.
/// On update the existing client fields act as fallbacks.
fn resolve_client(
    order_type: OrderType,
    existing: Option<Client>,
    name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
) -> AppResult<Option<Client>> {
    if order_type != OrderType::Delivery {
        return Ok(None);
    }

    let existing = existing.unwrap_or_else(|| Client {
        name: String::new(),
        phone: String::new(),
        address: String::new(),
    });

    let client = Client {
        name: name.unwrap_or(existing.name),
        phone: phone.unwrap_or(existing.phone),
        address: address.unwrap_or(existing.address),
    };

    if client.name.trim().is_empty()
        || client.phone.trim().is_empty()
        || client.address.trim().is_empty()
    {
        return Err(AppError::Validation {
            field: "client".to_string(),
            message: "Name, phone and address are required for delivery orders".to_string(),
            message_es: "Nombre, teléfono y dirección son requeridos para delivery".to_string(),
        });
    }

    Ok(Some(client))
}
