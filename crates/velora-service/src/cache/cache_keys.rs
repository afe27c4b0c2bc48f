//! Cache key generators for consistent key naming.
//!
//! Call sites never hand-assemble key strings; every namespace has a helper
//! here, so exact-key and pattern invalidation always agree on spelling.

use velora_core::{CategoryId, OrderId, ProductFilter, ProductId, UserId};

/// Generate a cache key for a product by ID.
#[must_use]
pub fn product(id: ProductId) -> String {
    format!("product:{}", id)
}

/// Generate a cache key for a filtered product list.
///
/// Canonical fingerprint rule: present filter fields are rendered as
/// `name=value` pairs, sorted lexicographically by field name, and joined
/// with `&`. Absent fields are skipped. The same logical query therefore
/// always produces the same key, no matter how the caller ordered its
/// parameters. An empty filter fingerprints as `all`.
#[must_use]
pub fn products(filter: &ProductFilter) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    if let Some(category) = filter.category {
        pairs.push(("category", category.to_string()));
    }
    pairs.push(("limit", filter.limit.to_string()));
    if let Some(max) = filter.max_price_cents {
        pairs.push(("max_price", max.to_string()));
    }
    if let Some(min) = filter.min_price_cents {
        pairs.push(("min_price", min.to_string()));
    }
    pairs.push(("page", filter.page.to_string()));
    if let Some(search) = &filter.search {
        pairs.push(("search", search.to_lowercase()));
    }
    if let Some(sort) = &filter.sort {
        pairs.push(("sort", sort.clone()));
    }

    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let fingerprint = pairs
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&");

    if fingerprint.is_empty() {
        "products:all".to_string()
    } else {
        format!("products:{}", fingerprint)
    }
}

/// Generate a cache key for a user snapshot.
#[must_use]
pub fn user(id: UserId) -> String {
    format!("user:{}", id)
}

/// Generate a cache key for a user's cart.
#[must_use]
pub fn cart(user_id: UserId) -> String {
    format!("cart:{}", user_id)
}

/// Generate a cache key for a user's order list.
#[must_use]
pub fn orders(user_id: UserId) -> String {
    format!("orders:{}", user_id)
}

/// Generate a cache key for a single order.
#[must_use]
pub fn order(id: OrderId) -> String {
    format!("order:{}", id)
}

/// Generate a cache key for a user's wishlist.
#[must_use]
pub fn wishlist(user_id: UserId) -> String {
    format!("wishlist:{}", user_id)
}

/// Generate the cache key for the category tree.
#[must_use]
pub fn categories() -> String {
    "categories".to_string()
}

/// Generate a cache key for banners by placement (empty placement means all).
#[must_use]
pub fn banners(placement: &str) -> String {
    format!("banners:{}", placement)
}

/// Generate the cache key for the active coupon list.
#[must_use]
pub fn coupons() -> String {
    "coupons".to_string()
}

/// Generate a cache key for a product's aggregated review rating.
#[must_use]
pub fn product_rating(id: ProductId) -> String {
    format!("product:{}:rating", id)
}

/// Generate a cache key for a category's active product count.
#[must_use]
pub fn category_product_count(id: CategoryId) -> String {
    format!("category:{}:count", id)
}

/// Generate a cache key for the trending-products list.
#[must_use]
pub fn trending_products(limit: usize) -> String {
    format!("products:trending:{}", limit)
}

/// Generate a cache key for the popular-products list.
#[must_use]
pub fn popular_products(limit: usize) -> String {
    format!("products:popular:{}", limit)
}

/// Pattern matching every product list cache (filtered, trending, popular).
#[must_use]
pub fn products_pattern() -> String {
    "products:*".to_string()
}

/// Pattern matching a product's derived keys (rating and other aggregates).
#[must_use]
pub fn product_detail_pattern(id: ProductId) -> String {
    format!("product:{}:*", id)
}
