//! Shared types and calculation core for the Resto Back-Office Platform
//!
//! This crate contains the domain models plus the pure pricing, costing and
//! unit-conversion logic shared between the backend and its tests. Nothing
//! in here performs I/O; the backend fetches records and hands them to
//! these functions.

pub mod costing;
pub mod models;
pub mod pricing;
pub mod units;
pub mod validation;

pub use models::*;
