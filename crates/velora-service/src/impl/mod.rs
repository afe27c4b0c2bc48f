//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `product_service.rs`);
//! this module holds the concrete components wired through Shaku.

pub mod cart_service_impl;
pub mod category_service_impl;
pub mod order_service_impl;
pub mod product_service_impl;

pub use cart_service_impl::{CartServiceComponent, CartServiceComponentParameters};
pub use category_service_impl::{CategoryServiceComponent, CategoryServiceComponentParameters};
pub use order_service_impl::{OrderServiceComponent, OrderServiceComponentParameters};
pub use product_service_impl::{ProductServiceComponent, ProductServiceComponentParameters};
