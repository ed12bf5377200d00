//! Business logic services for the Resto Back-Office Platform

pub mod auth;
pub mod employee;
pub mod order;
pub mod product;
pub mod supply;
pub mod task;

pub use auth::AuthService;
pub use employee::EmployeeService;
pub use order::OrderService;
pub use product::ProductService;
pub use supply::SupplyService;
pub use task::TaskService;
