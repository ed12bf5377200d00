//! HTTP handlers for order (pedido) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::order::{CreateOrderInput, OrderService, UpdateOrderInput};
use crate::AppState;
use crate::models::Order;

/// List all orders, newest first
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    let service = OrderService::new(state.db);
    let orders = service.list().await?;
    Ok(Json(orders))
}

/// Get an order by id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db);
    let order = service.get(id).await?;
    Ok(Json(order))
}

/// Create a new order
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let service = OrderService::new(state.db);
    let order = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Update an order
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateOrderInput>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db);
    let order = service.update(id, input).await?;
    Ok(Json(order))
}

/// Delete an order
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = OrderService::new(state.db);
    service.delete(id).await?;
    Ok(Json(()))
}
