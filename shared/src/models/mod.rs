//! Domain models for the Resto Back-Office Platform

pub mod employee;
pub mod order;
pub mod product;
pub mod supply;
pub mod task;
pub mod user;

pub use employee::*;
pub use order::*;
pub use product::*;
pub use supply::*;
pub use task::*;
pub use user::*;
