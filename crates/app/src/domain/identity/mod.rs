//! Identity

pub mod service;

pub use service::*;
