//! # Cart Types
//!
//! The running cart of a cashdesk session and the payment transaction that
//! closes it. The cart holds state; it computes nothing.

use crate::product::{Pricing, Product};
use crate::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product+pricing entry in a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// The scanned product
    pub product: Product,

    /// The pricing chosen for it; always one of `product.pricings`
    pub pricing: Pricing,
}

/// A cashdesk cart: ordered line items plus an optional customer.
///
/// Re-scanning the same product adds a second line; resolving a new user
/// replaces the previous one. The identity is absent until the backend
/// persists the cart for the first time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Backend-assigned identity; absent until first persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Line items in insertion order, duplicates allowed
    #[serde(default)]
    pub line_items: Vec<CartLineItem>,

    /// Associated customer; at most one, last resolved wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Cart {
    /// Create a fresh empty cart with no identity
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line item for `product` with the chosen `pricing`.
    ///
    /// The pricing must be one of the product's declared pricings; a foreign
    /// pricing is a programming error, never coerced.
    pub fn add_to_cart(&mut self, product: Product, pricing: Pricing) {
        assert!(
            product.has_pricing(&pricing),
            "pricing {} does not belong to product {}",
            pricing.id,
            product.id
        );
        self.line_items.push(CartLineItem { product, pricing });
    }

    /// Associate a customer, replacing any existing one
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Check if the cart has no line items
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Get line item count
    pub fn item_count(&self) -> usize {
        self.line_items.len()
    }
}

/// Result of a successful checkout; opaque beyond marking success
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTransaction {
    /// Backend-assigned transaction identity
    pub id: u64,

    /// The cart this transaction settled
    pub cart_id: u64,

    /// When the backend recorded the payment
    pub created_at: DateTime<Utc>,
}

impl PaymentTransaction {
    /// Create a transaction marker (used by tests and mocks)
    pub fn new(id: u64, cart_id: u64) -> Self {
        Self {
            id,
            cart_id,
            created_at: Utc::now(),
        }
    }
}
