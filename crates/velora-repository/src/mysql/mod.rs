//! MySQL repository implementations.

mod cart_repository;
mod category_repository;
mod order_repository;
mod product_repository;

pub use cart_repository::MySqlCartRepository;
pub use category_repository::MySqlCategoryRepository;
pub use order_repository::MySqlOrderRepository;
pub use product_repository::MySqlProductRepository;
