//! # Velora Service
//!
//! Business logic service layer for the Velora commerce backend, including
//! the caching core every entity service reads and writes through.

pub mod cache;
pub mod cart_service;
pub mod category_service;
pub mod dto;
pub mod order_service;
pub mod product_service;
pub mod r#impl;

pub use cache::*;
pub use cart_service::*;
pub use category_service::*;
pub use dto::*;
pub use order_service::*;
pub use product_service::*;
pub use r#impl::*;
