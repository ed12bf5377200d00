//! HTTP handlers for the Resto Back-Office Platform

pub mod auth;
pub mod employees;
pub mod health;
pub mod orders;
pub mod products;
pub mod supplies;
pub mod tasks;

pub use auth::*;
pub use employees::*;
pub use health::*;
pub use orders::*;
pub use products::*;
pub use supplies::*;
pub use tasks::*;
