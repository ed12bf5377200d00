//! Product (producto) service: CRUD over the costing engine
//!
//! Every create or update re-runs the full composition: ingredient audit
//! snapshots, total cost, suggested price, sale price and available stock
//! are always written together. A failed composition writes nothing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::costing::{self, CompositionMode, IngredientRequest, ProductQuote};
use crate::models::{Ingredient, Product, Supply, SupplyStatus};

/// Product service for managing sellable products
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Database row for a product
#[derive(Debug, FromRow)]
struct ProductRow {
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

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
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

/// One requested ingredient line in a create/update payload
#[derive(Debug, Deserialize)]
pub struct IngredientInput {
    pub supply_id: Uuid,
    pub quantity: Decimal,
    pub unit: Option<String>,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub ingredients: Vec<IngredientInput>,
    pub margin_percent: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub category: Option<String>,
}

/// Input for updating a product; absent fields keep their current value
/// (the derived figures are still recomputed)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub ingredients: Option<Vec<IngredientInput>>,
    pub margin_percent: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub category: Option<String>,
}

/// Supply option for the recipe form search
#[derive(Debug, Serialize, FromRow)]
pub struct SupplyOption {
    pub id: Uuid,
    pub name: String,
    pub unit: String,
    pub stock: Decimal,
    pub unit_price: Decimal,
}

const PRODUCT_COLUMNS: &str = "id, name, ingredients, total_cost, margin_percent, \
     suggested_price, sale_price, available_stock, in_stock, category, updated_at";

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all products
    pub async fn list(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products ORDER BY name",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by id
    pub async fn get(&self, id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Producto".to_string()))?;

        Ok(row.into())
    }

    /// Create a product from its bill-of-ingredients
    pub async fn create(&self, input: CreateProductInput) -> AppResult<Product> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_es: "El nombre es obligatorio".to_string(),
            });
        }
        if input.ingredients.is_empty() {
            return Err(AppError::Validation {
                field: "ingredients".to_string(),
                message: "At least one ingredient is required".to_string(),
                message_es: "Debe agregar al menos un ingrediente".to_string(),
            });
        }

        let requests = to_requests(&input.ingredients);
        let supplies = self.fetch_supplies(&requests).await?;
        let margin = input.margin_percent.unwrap_or(Decimal::ZERO);

        let quote = costing::compose_product(
            &requests,
            margin,
            input.sale_price,
            CompositionMode::Create,
            &supplies,
        )?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (name, ingredients, total_cost, margin_percent,
                                  suggested_price, sale_price, available_stock, in_stock, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(&input.name)
        .bind(Json(&quote.ingredients))
        .bind(quote.total_cost)
        .bind(quote.margin_percent)
        .bind(quote.suggested_price)
        .bind(quote.sale_price)
        .bind(quote.available_stock)
        .bind(quote.in_stock)
        .bind(&input.category)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a product, re-running the whole composition. An explicit
    /// sale price below the recomputed cost is rejected here, unlike on
    /// creation where it falls back to the suggested price.
    pub async fn update(&self, id: Uuid, input: UpdateProductInput) -> AppResult<Product> {
        let existing = self.get(id).await?;

        let requests = match &input.ingredients {
            Some(lines) => to_requests(lines),
            None => existing
                .ingredients
                .iter()
                .map(|line| IngredientRequest {
                    supply_id: line.supply_id,
                    quantity: line.quantity,
                    unit: Some(line.unit.clone()),
                })
                .collect(),
        };
        if requests.is_empty() {
            return Err(AppError::Validation {
                field: "ingredients".to_string(),
                message: "At least one ingredient is required".to_string(),
                message_es: "Debe agregar al menos un ingrediente".to_string(),
            });
        }

        let supplies = self.fetch_supplies(&requests).await?;
        let margin = input.margin_percent.unwrap_or(existing.margin_percent);

        let quote: ProductQuote = costing::compose_product(
            &requests,
            margin,
            input.sale_price,
            CompositionMode::Update,
            &supplies,
        )?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                ingredients = $3,
                total_cost = $4,
                margin_percent = $5,
                suggested_price = $6,
                sale_price = $7,
                available_stock = $8,
                in_stock = $9,
                category = COALESCE($10, category),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .bind(&input.name)
        .bind(Json(&quote.ingredients))
        .bind(quote.total_cost)
        .bind(quote.margin_percent)
        .bind(quote.suggested_price)
        .bind(quote.sale_price)
        .bind(quote.available_stock)
        .bind(quote.in_stock)
        .bind(&input.category)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a product
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Producto".to_string()));
        }

        Ok(())
    }

    /// Search supplies by name for the recipe form
    pub async fn supply_options(&self, query: Option<&str>) -> AppResult<Vec<SupplyOption>> {
        let pattern = format!("%{}%", query.unwrap_or(""));

        let options = sqlx::query_as::<_, SupplyOption>(
            r#"
            SELECT id, name, unit, stock, unit_price
            FROM supplies
            WHERE name ILIKE $1
            ORDER BY name
            LIMIT 50
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.db)
        .await?;

        Ok(options)
    }

    /// Batch-fetch the supplies referenced by the requests, keyed by id.
    /// Missing ids are not an error here; the costing engine reports the
    /// first one as SupplyNotFound.
    async fn fetch_supplies(
        &self,
        requests: &[IngredientRequest],
    ) -> AppResult<HashMap<Uuid, Supply>> {
        let ids: Vec<Uuid> = requests.iter().map(|r| r.supply_id).collect();

        let rows = sqlx::query_as::<_, SupplyLookupRow>(
            r#"
            SELECT id, name, category, stock, min_stock, unit, supplier, unit_price, status, updated_at
            FROM supplies
            WHERE id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.db)
        .await?;

        let mut supplies = HashMap::with_capacity(rows.len());
        for row in rows {
            supplies.insert(row.id, row.try_into()?);
        }
        Ok(supplies)
    }
}

/// Lookup row shared by the costing paths
#[derive(Debug, FromRow)]
struct SupplyLookupRow {
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

impl TryFrom<SupplyLookupRow> for Supply {
    type Error = AppError;

    fn try_from(row: SupplyLookupRow) -> Result<Self, Self::Error> {
        let status = SupplyStatus::parse(&row.status)
            .ok_or_else(|| AppError::Internal(format!("bad supply status: {}", row.status)))?;
        Ok(Supply {
            id: row.id,
            name: row.name,
            category: row.category,
            stock: row.stock,
            min_stock: row.min_stock,
            unit: row.unit,
            supplier: row.supplier,
            unit_price: row.unit_price,
            status,
            updated_at: row.updated_at,
        })
    }
}

fn to_requests(lines: &[IngredientInput]) -> Vec<IngredientRequest> {
    lines
        .iter()
        .map(|line| IngredientRequest {
            supply_id: line.supply_id,
            quantity: line.quantity,
            unit: line.unit.clone(),
        })
        .collect()
}
