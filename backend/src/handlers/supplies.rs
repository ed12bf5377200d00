//! HTTP handlers for supply (insumo) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::supply::{
    AdjustStockInput, CreateSupplyInput, StockAlert, SupplyService, UnitChoice, UpdateSupplyInput,
};
use crate::AppState;
use crate::models::Supply;

/// List all supplies
pub async fn list_supplies(State(state): State<AppState>) -> AppResult<Json<Vec<Supply>>> {
    let service = SupplyService::new(state.db);
    let supplies = service.list().await?;
    Ok(Json(supplies))
}

/// Get a supply by id
pub async fn get_supply(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Supply>> {
    let service = SupplyService::new(state.db);
    let supply = service.get(id).await?;
    Ok(Json(supply))
}

/// Create a new supply
pub async fn create_supply(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplyInput>,
) -> AppResult<(StatusCode, Json<Supply>)> {
    let service = SupplyService::new(state.db);
    let supply = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(supply)))
}

/// Update a supply
pub async fn update_supply(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateSupplyInput>,
) -> AppResult<Json<Supply>> {
    let service = SupplyService::new(state.db);
    let supply = service.update(id, input).await?;
    Ok(Json(supply))
}

/// Adjust a supply's stock directly
pub async fn adjust_supply_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AdjustStockInput>,
) -> AppResult<Json<Supply>> {
    let service = SupplyService::new(state.db);
    let supply = service.adjust_stock(id, input).await?;
    Ok(Json(supply))
}

/// Delete a supply
pub async fn delete_supply(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = SupplyService::new(state.db);
    service.delete(id).await?;
    Ok(Json(()))
}

/// Query string for the supply name search
#[derive(Debug, Deserialize)]
pub struct SupplyNameQuery {
    pub q: Option<String>,
}

/// Search supplies by name
pub async fn search_supplies(
    State(state): State<AppState>,
    Query(query): Query<SupplyNameQuery>,
) -> AppResult<Json<Vec<Supply>>> {
    let service = SupplyService::new(state.db);
    let supplies = service.search(query.q.as_deref()).await?;
    Ok(Json(supplies))
}

/// List distinct supplier names
pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let service = SupplyService::new(state.db);
    let suppliers = service.suppliers().await?;
    Ok(Json(suppliers))
}

/// List supplies at or below their reorder threshold
pub async fn list_low_stock(State(state): State<AppState>) -> AppResult<Json<Vec<Supply>>> {
    let service = SupplyService::new(state.db);
    let supplies = service.list_low_stock().await?;
    Ok(Json(supplies))
}

/// List low-stock alerts
pub async fn list_stock_alerts(State(state): State<AppState>) -> AppResult<Json<Vec<StockAlert>>> {
    let service = SupplyService::new(state.db);
    let alerts = service.list_alerts().await?;
    Ok(Json(alerts))
}

/// List units compatible with the supply's own unit
pub async fn list_compatible_units(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<UnitChoice>>> {
    let service = SupplyService::new(state.db);
    let units = service.compatible_units(id).await?;
    Ok(Json(units))
}
