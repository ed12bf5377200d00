//! Database models for the Resto Back-Office Platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
