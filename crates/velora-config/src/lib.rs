//! # Velora Config
//!
//! Layered configuration for the Velora commerce backend.

pub mod app_config;
pub mod loader;

pub use app_config::*;
pub use loader::*;
