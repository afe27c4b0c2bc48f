//! Repository trait definitions.
//!
//! Repositories own all SQL construction; callers see only domain types.

use async_trait::async_trait;
use velora_core::{
    Cart, CartItem, Category, CategoryId, Interface, Order, OrderId, OrderStatus, Page, Product,
    ProductFilter, ProductId, UserId, VeloraResult,
};

/// Product repository trait.
#[async_trait]
pub trait ProductRepository: Interface + Send + Sync {
    /// Finds a product by ID.
    async fn find_by_id(&self, id: ProductId) -> VeloraResult<Option<Product>>;

    /// Finds products matching a filter, paginated.
    async fn find_all(&self, filter: &ProductFilter) -> VeloraResult<Page<Product>>;

    /// Saves a new product.
    async fn save(&self, product: &Product) -> VeloraResult<Product>;

    /// Updates an existing product.
    async fn update(&self, product: &Product) -> VeloraResult<Product>;

    /// Soft-deletes a product by ID.
    async fn delete(&self, id: ProductId) -> VeloraResult<bool>;
}

/// Category repository trait.
#[async_trait]
pub trait CategoryRepository: Interface + Send + Sync {
    /// Finds a category by ID.
    async fn find_by_id(&self, id: CategoryId) -> VeloraResult<Option<Category>>;

    /// Lists all categories.
    async fn find_all(&self) -> VeloraResult<Vec<Category>>;

    /// Saves a new category.
    async fn save(&self, category: &Category) -> VeloraResult<Category>;

    /// Updates an existing category.
    async fn update(&self, category: &Category) -> VeloraResult<Category>;

    /// Deletes a category by ID.
    async fn delete(&self, id: CategoryId) -> VeloraResult<bool>;

    /// Counts active products in a category.
    async fn count_products(&self, id: CategoryId) -> VeloraResult<u64>;
}

/// Cart repository trait.
#[async_trait]
pub trait CartRepository: Interface + Send + Sync {
    /// Finds a user's cart. Returns `None` when the user has no cart rows.
    async fn find_by_user(&self, user_id: UserId) -> VeloraResult<Option<Cart>>;

    /// Inserts or merges a cart line for a user.
    async fn upsert_item(&self, user_id: UserId, item: &CartItem) -> VeloraResult<()>;

    /// Removes a cart line. Returns `true` if the line existed.
    async fn remove_item(&self, user_id: UserId, product_id: ProductId) -> VeloraResult<bool>;

    /// Removes all cart lines for a user.
    async fn clear(&self, user_id: UserId) -> VeloraResult<()>;
}

/// Order repository trait.
#[async_trait]
pub trait OrderRepository: Interface + Send + Sync {
    /// Finds an order by ID.
    async fn find_by_id(&self, id: OrderId) -> VeloraResult<Option<Order>>;

    /// Lists a user's orders, most recent first.
    async fn find_by_user(&self, user_id: UserId) -> VeloraResult<Vec<Order>>;

    /// Saves a new order with its lines.
    async fn save(&self, order: &Order) -> VeloraResult<Order>;

    /// Updates an order's status.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> VeloraResult<bool>;
}
