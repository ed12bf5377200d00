//! HTTP handlers for product endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::product::{
    CreateProductInput, ProductService, SupplyOption, UpdateProductInput,
};
use crate::AppState;
use crate::models::Product;

/// List all products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    let products = service.list().await?;
    Ok(Json(products))
}

/// Get a product by id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.get(id).await?;
    Ok(Json(product))
}

/// Create a new product from its bill-of-ingredients
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let service = ProductService::new(state.db);
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.update(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ProductService::new(state.db);
    service.delete(id).await?;
    Ok(Json(()))
}

/// Query string for the supply search
#[derive(Debug, Deserialize)]
pub struct SupplySearchQuery {
    pub q: Option<String>,
}

/// Search supplies by name for the recipe form
pub async fn search_available_supplies(
    State(state): State<AppState>,
    Query(query): Query<SupplySearchQuery>,
) -> AppResult<Json<Vec<SupplyOption>>> {
    let service = ProductService::new(state.db);
    let options = service.supply_options(query.q.as_deref()).await?;
    Ok(Json(options))
}
