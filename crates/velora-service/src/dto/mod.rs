//! Data transfer objects for the service layer.

pub mod cart_dto;
pub mod category_dto;
pub mod order_dto;
pub mod product_dto;

pub use cart_dto::*;
pub use category_dto::*;
pub use order_dto::*;
pub use product_dto::*;
