//! Supply (insumo) service: inventory CRUD, stock adjustments and alerts
//!
//! The derived availability status is recomputed inside the same UPDATE
//! statement as any stock or threshold change, so a row can never be
//! observed with a stale status.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Supply, SupplyStatus};
use shared::units::{self, Unit};
use shared::validation;

/// Supply service for managing raw inventory items
#[derive(Clone)]
pub struct SupplyService {
    db: PgPool,
}

/// Database row for a supply
#[derive(Debug, FromRow)]
struct SupplyRow {
    id: Uuid,
    name: String,
    category: String,
    stock: Decimal,
    min_stock: Decimal,
    unit: String,
    supplier: Option<String>,
    unit_price: Decimal,
    status: String,
    updated_at: DateTime<Utc>,
}

impl SupplyRow {
    fn into_supply(self) -> AppResult<Supply> {
        let status = SupplyStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("bad supply status: {}", self.status)))?;
        Ok(Supply {
            id: self.id,
            name: self.name,
            category: self.category,
            stock: self.stock,
            min_stock: self.min_stock,
            unit: self.unit,
            supplier: self.supplier,
            unit_price: self.unit_price,
            status,
            updated_at: self.updated_at,
        })
    }
}

/// Input for creating a supply
#[derive(Debug, Deserialize)]
pub struct CreateSupplyInput {
    pub name: String,
    pub category: String,
    pub stock: Decimal,
    pub min_stock: Option<Decimal>,
    pub unit: String,
    pub supplier: Option<String>,
    pub unit_price: Option<Decimal>,
}

/// Input for updating a supply; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSupplyInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub stock: Option<Decimal>,
    pub min_stock: Option<Decimal>,
    pub unit: Option<String>,
    pub supplier: Option<String>,
    pub unit_price: Option<Decimal>,
}

/// Input for a direct stock adjustment
#[derive(Debug, Deserialize)]
pub struct AdjustStockInput {
    pub stock: Decimal,
}

/// Low-stock alert view of a supply
#[derive(Debug, Serialize)]
pub struct StockAlert {
    pub id: Uuid,
    pub name: String,
    pub current_stock: Decimal,
    pub min_stock: Decimal,
    pub status: SupplyStatus,
    pub supplier: Option<String>,
}

/// Unit choice for unit-selection UIs
#[derive(Debug, Serialize)]
pub struct UnitChoice {
    pub code: &'static str,
    pub label: &'static str,
    pub abbreviation: &'static str,
}

const SUPPLY_COLUMNS: &str =
    "id, name, category, stock, min_stock, unit, supplier, unit_price, status, updated_at";

impl SupplyService {
    /// Create a new SupplyService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all supplies
    pub async fn list(&self) -> AppResult<Vec<Supply>> {
        let rows = sqlx::query_as::<_, SupplyRow>(&format!(
            "SELECT {} FROM supplies ORDER BY name",
            SUPPLY_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(SupplyRow::into_supply).collect()
    }

    /// Get a supply by id
    pub async fn get(&self, id: Uuid) -> AppResult<Supply> {
        let row = sqlx::query_as::<_, SupplyRow>(&format!(
            "SELECT {} FROM supplies WHERE id = $1",
            SUPPLY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Insumo".to_string()))?;

        row.into_supply()
    }

    /// Create a new supply
    pub async fn create(&self, input: CreateSupplyInput) -> AppResult<Supply> {
        Self::validate_unit(&input.unit)?;
        Self::validate_figures(Some(input.stock), input.min_stock, input.unit_price)?;

        let min_stock = input.min_stock.unwrap_or_else(|| Decimal::from(5));
        let unit_price = input.unit_price.unwrap_or(Decimal::ZERO);

        let row = sqlx::query_as::<_, SupplyRow>(&format!(
            r#"
            INSERT INTO supplies (name, category, stock, min_stock, unit, supplier, unit_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            SUPPLY_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.stock)
        .bind(min_stock)
        .bind(&input.unit)
        .bind(&input.supplier)
        .bind(unit_price)
        .bind(SupplyStatus::derive(input.stock, min_stock).as_str())
        .fetch_one(&self.db)
        .await?;

        row.into_supply()
    }

    /// Update a supply. The status column is recomputed in the same
    /// statement from the resulting stock and threshold.
    pub async fn update(&self, id: Uuid, input: UpdateSupplyInput) -> AppResult<Supply> {
        if let Some(unit) = &input.unit {
            Self::validate_unit(unit)?;
        }
        Self::validate_figures(input.stock, input.min_stock, input.unit_price)?;

        let row = sqlx::query_as::<_, SupplyRow>(&format!(
            r#"
            UPDATE supplies
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                stock = COALESCE($4, stock),
                min_stock = COALESCE($5, min_stock),
                unit = COALESCE($6, unit),
                supplier = COALESCE($7, supplier),
                unit_price = COALESCE($8, unit_price),
                status = CASE WHEN COALESCE($4, stock) <= 0 THEN 'sin_stock'
                              WHEN COALESCE($4, stock) <= COALESCE($5, min_stock) THEN 'bajo_stock'
                              ELSE 'disponible' END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SUPPLY_COLUMNS
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.stock)
        .bind(input.min_stock)
        .bind(&input.unit)
        .bind(&input.supplier)
        .bind(input.unit_price)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Insumo".to_string()))?;

        row.into_supply()
    }

    /// Adjust stock directly, recomputing the status atomically
    pub async fn adjust_stock(&self, id: Uuid, input: AdjustStockInput) -> AppResult<Supply> {
        Self::validate_figures(Some(input.stock), None, None)?;

        let row = sqlx::query_as::<_, SupplyRow>(&format!(
            r#"
            UPDATE supplies
            SET stock = $2,
                status = CASE WHEN $2 <= 0 THEN 'sin_stock'
                              WHEN $2 <= min_stock THEN 'bajo_stock'
                              ELSE 'disponible' END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SUPPLY_COLUMNS
        ))
        .bind(id)
        .bind(input.stock)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Insumo".to_string()))?;

        row.into_supply()
    }

    /// Delete a supply
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM supplies WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Insumo".to_string()));
        }

        Ok(())
    }

    /// Search supplies by name, for autocomplete fields
    pub async fn search(&self, query: Option<&str>) -> AppResult<Vec<Supply>> {
        let pattern = format!("%{}%", query.unwrap_or(""));

        let rows = sqlx::query_as::<_, SupplyRow>(&format!(
            "SELECT {} FROM supplies WHERE name ILIKE $1 ORDER BY name LIMIT 20",
            SUPPLY_COLUMNS
        ))
        .bind(pattern)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(SupplyRow::into_supply).collect()
    }

    /// Distinct supplier names, for the supplier picker
    pub async fn suppliers(&self) -> AppResult<Vec<String>> {
        let suppliers = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT supplier FROM supplies WHERE supplier IS NOT NULL ORDER BY supplier",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(suppliers)
    }

    /// List supplies at or below their reorder threshold
    pub async fn list_low_stock(&self) -> AppResult<Vec<Supply>> {
        let rows = sqlx::query_as::<_, SupplyRow>(&format!(
            "SELECT {} FROM supplies WHERE stock <= min_stock ORDER BY name",
            SUPPLY_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(SupplyRow::into_supply).collect()
    }

    /// Alert view over the low-stock supplies
    pub async fn list_alerts(&self) -> AppResult<Vec<StockAlert>> {
        let supplies = self.list_low_stock().await?;

        Ok(supplies
            .into_iter()
            .map(|s| StockAlert {
                id: s.id,
                name: s.name,
                current_stock: s.stock,
                min_stock: s.min_stock,
                status: s.status,
                supplier: s.supplier,
            })
            .collect())
    }

    /// Units sharing the dimension of the supply's own unit
    pub async fn compatible_units(&self, id: Uuid) -> AppResult<Vec<UnitChoice>> {
        let supply = self.get(id).await?;

        Ok(units::compatible_units(&supply.unit)
            .into_iter()
            .map(UnitChoice::from)
            .collect())
    }

    fn validate_unit(unit: &str) -> AppResult<()> {
        validation::validate_unit_code(unit).map_err(|msg| AppError::Validation {
            field: "unit".to_string(),
            message: msg.to_string(),
            message_es: "Unidad de medida inválida. Debe ser: kg, g, litros, ml o unidades"
                .to_string(),
        })
    }

    fn validate_figures(
        stock: Option<Decimal>,
        min_stock: Option<Decimal>,
        unit_price: Option<Decimal>,
    ) -> AppResult<()> {
        for (field, value) in [
            ("stock", stock),
            ("min_stock", min_stock),
            ("unit_price", unit_price),
        ] {
            if let Some(value) = value {
                validation::validate_non_negative(value).map_err(|msg| AppError::Validation {
                    field: field.to_string(),
                    message: msg.to_string(),
                    message_es: "El valor no puede ser negativo".to_string(),
                })?;
            }
        }
        Ok(())
    }
}

impl From<Unit> for UnitChoice {
    fn from(unit: Unit) -> Self {
        UnitChoice {
            code: unit.code(),
            label: unit.label(),
            abbreviation: unit.abbreviation(),
        }
    }
}
