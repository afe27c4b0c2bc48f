//! Per-namespace TTL policy.
//!
//! TTLs follow expected write frequency and staleness tolerance: carts and
//! wishlists mutate often and get short TTLs, categories and banners rarely
//! change and get long ones. The TTL is also the worst-case staleness bound
//! when explicit invalidation cannot reach the backend.

use std::time::Duration;

/// Products and product lists: 1 hour.
pub const PRODUCTS: Duration = Duration::from_secs(3600);

/// User snapshots: 30 minutes.
pub const USER: Duration = Duration::from_secs(1800);

/// Carts: 15 minutes.
pub const CART: Duration = Duration::from_secs(900);

/// Orders and order lists: 30 minutes.
pub const ORDERS: Duration = Duration::from_secs(1800);

/// Wishlists: 15 minutes.
pub const WISHLIST: Duration = Duration::from_secs(900);

/// Banners: 2 hours.
pub const BANNERS: Duration = Duration::from_secs(7200);

/// Coupons: 1 hour.
pub const COUPONS: Duration = Duration::from_secs(3600);

/// Category tree: 2 hours.
pub const CATEGORIES: Duration = Duration::from_secs(7200);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_table() {
        assert_eq!(PRODUCTS.as_secs(), 3600);
        assert_eq!(USER.as_secs(), 1800);
        assert_eq!(CART.as_secs(), 900);
        assert_eq!(ORDERS.as_secs(), 1800);
        assert_eq!(WISHLIST.as_secs(), 900);
        assert_eq!(BANNERS.as_secs(), 7200);
        assert_eq!(COUPONS.as_secs(), 3600);
        assert_eq!(CATEGORIES.as_secs(), 7200);
    }

    #[test]
    fn test_volatile_namespaces_expire_before_stable_ones() {
        assert!(CART < ORDERS);
        assert!(ORDERS < PRODUCTS);
        assert!(PRODUCTS < CATEGORIES);
        assert_eq!(WISHLIST, CART);
    }
}
