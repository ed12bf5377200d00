//! Validation utilities for the Resto Back-Office Platform

use rust_decimal::Decimal;

use crate::units::Unit;

/// Validate that a unit code belongs to the fixed vocabulary
pub fn validate_unit_code(code: &str) -> Result<(), &'static str> {
    if Unit::parse(code).is_some() {
        Ok(())
    } else {
        Err("Unknown unit of measure; expected kg, g, litros, ml or unidades")
    }
}

/// Validate that a monetary or quantity figure is not negative
pub fn validate_non_negative(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO {
        return Err("Value cannot be negative");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate a username: 3-30 chars, lowercase alphanumerics plus . _ -
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 || username.len() > 30 {
        return Err("Username must be 3-30 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
    {
        return Err("Username may only contain lowercase letters, digits, . _ -");
    }
    Ok(())
}
