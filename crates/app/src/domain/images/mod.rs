//! Images

pub mod errors;
pub mod service;

pub use errors::ImageHostError;
pub use service::*;
