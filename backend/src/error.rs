//! Error handling for the Resto Back-Office Platform
//!
//! Provides consistent error responses in English and Spanish

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use shared::costing::CostingError;
use shared::pricing::PricingError;
use shared::units::ConversionError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Unit conversion errors
    #[error("Unknown unit of measure: {0}")]
    UnknownUnit(String),

    #[error("Incompatible units: {from} and {to}")]
    IncompatibleUnits { from: String, to: String },

    #[error("Cannot convert from {requested} to {supply_unit}")]
    UnitMismatch {
        requested: String,
        supply_unit: String,
    },

    // Costing and pricing errors
    #[error("Supply not found: {0}")]
    SupplyNotFound(Uuid),

    #[error("Products not found")]
    ProductsNotFound(Vec<Uuid>),

    #[error("Invalid quantity")]
    InvalidQuantity(String),

    #[error("Invalid price for product: {0}")]
    InvalidPrice(String),

    #[error("Sale price {price} is below total cost {cost}")]
    SalePriceBelowCost { price: String, cost: String },

    #[error("At least one product must be selected")]
    EmptySelection,

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownUnit(unit) => AppError::UnknownUnit(unit),
            ConversionError::IncompatibleUnits { from, to } => {
                AppError::IncompatibleUnits { from, to }
            }
        }
    }
}

impl From<CostingError> for AppError {
    fn from(err: CostingError) -> Self {
        match err {
            CostingError::SupplyNotFound(id) => AppError::SupplyNotFound(id),
            CostingError::InvalidQuantity { quantity, .. } => {
                AppError::InvalidQuantity(quantity.to_string())
            }
            CostingError::UnitMismatch {
                requested,
                supply_unit,
            } => AppError::UnitMismatch {
                requested,
                supply_unit,
            },
            CostingError::SalePriceBelowCost { price, cost } => AppError::SalePriceBelowCost {
                price: price.to_string(),
                cost: cost.to_string(),
            },
        }
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::ProductsNotFound(ids) => AppError::ProductsNotFound(ids),
            PricingError::InvalidQuantity { quantity, .. } => {
                AppError::InvalidQuantity(quantity.to_string())
            }
            PricingError::InvalidPrice { name, .. } => AppError::InvalidPrice(name),
            PricingError::EmptySelection => AppError::EmptySelection,
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_CREDENTIALS".to_string(),
                    message_en: "Invalid username or password".to_string(),
                    message_es: "Usuario o contraseña incorrectos".to_string(),
                    field: None,
                },
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "TOKEN_EXPIRED".to_string(),
                    message_en: "Token has expired".to_string(),
                    message_es: "El token ha expirado".to_string(),
                    field: None,
                },
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_TOKEN".to_string(),
                    message_en: "Invalid token".to_string(),
                    message_es: "Token inválido".to_string(),
                    field: None,
                },
            ),
            AppError::Validation {
                field,
                message,
                message_es,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_es: message_es.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::DuplicateEntry(field) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    message_en: format!("A record with this {} already exists", field),
                    message_es: format!("Ya existe un registro con este {}", field),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_es: format!("{} no encontrado", resource),
                    field: None,
                },
            ),
            AppError::UnknownUnit(unit) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "UNKNOWN_UNIT".to_string(),
                    message_en: format!("Unknown unit of measure: {}", unit),
                    message_es: format!("Unidad de medida desconocida: {}", unit),
                    field: Some("unit".to_string()),
                },
            ),
            AppError::IncompatibleUnits { from, to } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INCOMPATIBLE_UNITS".to_string(),
                    message_en: format!("Cannot convert between {} and {}", from, to),
                    message_es: format!("No se puede convertir entre {} y {}", from, to),
                    field: None,
                },
            ),
            AppError::UnitMismatch {
                requested,
                supply_unit,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "UNIT_MISMATCH".to_string(),
                    message_en: format!("Cannot convert from {} to {}", requested, supply_unit),
                    message_es: format!(
                        "No se puede convertir de {} a {}",
                        requested, supply_unit
                    ),
                    field: None,
                },
            ),
            AppError::SupplyNotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "SUPPLY_NOT_FOUND".to_string(),
                    message_en: format!("Supply not found: {}", id),
                    message_es: format!("Insumo no encontrado: {}", id),
                    field: None,
                },
            ),
            AppError::ProductsNotFound(ids) => {
                let listed = ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorDetail {
                        code: "PRODUCTS_NOT_FOUND".to_string(),
                        message_en: format!("Products not found: {}", listed),
                        message_es: format!("No se encontraron los productos: {}", listed),
                        field: None,
                    },
                )
            }
            AppError::InvalidQuantity(quantity) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_QUANTITY".to_string(),
                    message_en: format!("Quantities must be positive numbers, got {}", quantity),
                    message_es: format!(
                        "Las cantidades deben ser números positivos, se recibió {}",
                        quantity
                    ),
                    field: None,
                },
            ),
            AppError::InvalidPrice(name) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_PRICE".to_string(),
                    message_en: format!("Product \"{}\" has no valid price", name),
                    message_es: format!("El producto \"{}\" no tiene un precio válido", name),
                    field: None,
                },
            ),
            AppError::SalePriceBelowCost { price, cost } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "SALE_PRICE_BELOW_COST".to_string(),
                    message_en: format!(
                        "Sale price ({}) cannot be below total cost ({})",
                        price, cost
                    ),
                    message_es: format!(
                        "El precio de venta ({}) no puede ser menor al costo ({})",
                        price, cost
                    ),
                    field: Some("sale_price".to_string()),
                },
            ),
            AppError::EmptySelection => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "EMPTY_SELECTION".to_string(),
                    message_en: "At least one product must be selected".to_string(),
                    message_es: "Debe seleccionar al menos un producto".to_string(),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message_en: "A database error occurred".to_string(),
                    message_es: "Ocurrió un error de base de datos".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_es: "Error interno del servidor".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_es: "Error interno del servidor".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
