//! Units of measure and conversion between them
//!
//! Supplies and recipes express quantities in a small fixed vocabulary of
//! units (kg, g, litros, ml, unidades), partitioned into dimensions.
//! Conversion is only defined within a dimension, through each unit's
//! multiplier to the dimension's base unit (kg, litros, unidades).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conversion failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("unknown unit of measure: {0}")]
    UnknownUnit(String),

    #[error("cannot convert between {from} and {to}")]
    IncompatibleUnits { from: String, to: String },
}

/// Dimensional families; units convert only inside their own family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Mass,
    Volume,
    Count,
}

/// The fixed unit vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "litros")]
    Liters,
    #[serde(rename = "ml")]
    Milliliters,
    #[serde(rename = "unidades")]
    Pieces,
}

impl Unit {
    pub const ALL: [Unit; 5] = [
        Unit::Kilograms,
        Unit::Grams,
        Unit::Liters,
        Unit::Milliliters,
        Unit::Pieces,
    ];

    /// Parse a unit code from the wire vocabulary
    pub fn parse(code: &str) -> Option<Unit> {
        match code {
            "kg" => Some(Unit::Kilograms),
            "g" => Some(Unit::Grams),
            "litros" => Some(Unit::Liters),
            "ml" => Some(Unit::Milliliters),
            "unidades" => Some(Unit::Pieces),
            _ => None,
        }
    }

    /// Wire code for this unit
    pub fn code(&self) -> &'static str {
        match self {
            Unit::Kilograms => "kg",
            Unit::Grams => "g",
            Unit::Liters => "litros",
            Unit::Milliliters => "ml",
            Unit::Pieces => "unidades",
        }
    }

    /// Display name shown in forms
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Kilograms => "Kilogramos",
            Unit::Grams => "Gramos",
            Unit::Liters => "Litros",
            Unit::Milliliters => "Mililitros",
            Unit::Pieces => "Unidades",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Unit::Kilograms => "kg",
            Unit::Grams => "g",
            Unit::Liters => "L",
            Unit::Milliliters => "ml",
            Unit::Pieces => "u",
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Kilograms | Unit::Grams => Dimension::Mass,
            Unit::Liters | Unit::Milliliters => Dimension::Volume,
            Unit::Pieces => Dimension::Count,
        }
    }

    /// Multiplier to the base unit of this unit's dimension
    pub fn base_multiplier(&self) -> Decimal {
        match self {
            Unit::Kilograms | Unit::Liters | Unit::Pieces => Decimal::ONE,
            Unit::Grams | Unit::Milliliters => Decimal::new(1, 3),
        }
    }
}

/// Convert a quantity between two unit codes.
///
/// Equal codes are an identity conversion and never fail, even for codes
/// outside the vocabulary. Otherwise both codes must parse and share a
/// dimension.
pub fn convert(quantity: Decimal, from: &str, to: &str) -> Result<Decimal, ConversionError> {
    if from == to {
        return Ok(quantity);
    }

    let from_unit =
        Unit::parse(from).ok_or_else(|| ConversionError::UnknownUnit(from.to_string()))?;
    let to_unit = Unit::parse(to).ok_or_else(|| ConversionError::UnknownUnit(to.to_string()))?;

    if from_unit.dimension() != to_unit.dimension() {
        return Err(ConversionError::IncompatibleUnits {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    Ok(quantity * from_unit.base_multiplier() / to_unit.base_multiplier())
}

/// Units sharing the dimension of `code`, for unit-choice UIs.
///
/// Unknown codes yield an empty list.
pub fn compatible_units(code: &str) -> Vec<Unit> {
    match Unit::parse(code) {
        Some(unit) => Unit::ALL
            .into_iter()
            .filter(|u| u.dimension() == unit.dimension())
            .collect(),
        None => Vec::new(),
    }
}
