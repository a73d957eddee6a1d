//! Orders

pub mod errors;
pub mod models;
mod records;
pub mod repository;
pub mod service;

pub use errors::{CheckoutDetailsError, OrdersServiceError};
pub use repository::*;
pub use service::*;
