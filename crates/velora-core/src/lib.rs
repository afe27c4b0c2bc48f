//! # Velora Core
//!
//! Core types, domain entities, and error definitions for the Velora
//! commerce backend. This crate provides the foundational abstractions
//! used across all layers.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
