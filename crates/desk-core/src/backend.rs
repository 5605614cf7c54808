//! # Backend Trait
//!
//! The abstract collaborator the cashdesk talks to: catalog lookups, cart
//! persistence, and payment submission. Implementations live in their own
//! crates (the JSON-over-HTTP client in `desk-backend`); the terminal only
//! sees this trait.

use crate::cart::{Cart, PaymentTransaction};
use crate::error::DeskResult;
use crate::product::Product;
use crate::user::User;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Anything an identifier can resolve to.
///
/// The variant is decided by the `type` discriminator carried in the
/// backend response, never by client-side heuristics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Identifiable {
    Product(Product),
    User(User),
}

impl Identifiable {
    /// Display name of the resolved entity
    pub fn name(&self) -> &str {
        match self {
            Identifiable::Product(product) => &product.name,
            Identifiable::User(user) => &user.name,
        }
    }
}

/// Core trait for cashdesk backends.
///
/// Covers identifier resolution, product and user access, cart persistence,
/// and payment submission. All calls are asynchronous; the cashdesk session
/// never blocks on them.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Resolve an identifier to a catalog entity.
    ///
    /// # Errors
    /// `DeskError::IdentifierNotFound` when the identifier has no match;
    /// transport and backend failures map to their respective variants.
    async fn resolve_identifier(&self, identifier: &str) -> DeskResult<Identifiable>;

    /// Fetch all products
    async fn get_products(&self) -> DeskResult<Vec<Product>>;

    /// Fetch a single product by id
    async fn get_product(&self, id: u64) -> DeskResult<Product>;

    /// Persist product changes (the tag edit flow)
    async fn save_product(&self, product: &Product) -> DeskResult<Product>;

    /// Fetch all users
    async fn get_users(&self) -> DeskResult<Vec<User>>;

    /// Fetch a single user by id
    async fn get_user(&self, id: u64) -> DeskResult<User>;

    /// Persist a user; creates when it has no identity yet, updates otherwise
    async fn save_user(&self, user: &User) -> DeskResult<User>;

    /// Persist a cart; creates when it has no identity yet, updates otherwise.
    /// Returns the cart as stored, identity included.
    async fn create_or_update_cart(&self, cart: &Cart) -> DeskResult<Cart>;

    /// Submit a cart for payment
    async fn pay_cart(&self, cart: &Cart) -> DeskResult<PaymentTransaction>;
}

/// Type alias for a shared backend handle (dynamic dispatch)
pub type BoxedBackend = Arc<dyn Backend>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Pricing;

    #[test]
    fn test_identifiable_product_discriminator() {
        let json = r#"{
            "type": "product",
            "id": 7,
            "name": "Club-Mate",
            "tags": ["drink"],
            "pricings": [{"id": 1, "name": "Member", "amount": 150}]
        }"#;

        let item: Identifiable = serde_json::from_str(json).unwrap();
        match item {
            Identifiable::Product(product) => {
                assert_eq!(product.id, 7);
                assert_eq!(product.default_pricing(), Some(&Pricing::new(1, "Member", 150)));
            }
            Identifiable::User(_) => panic!("discriminator picked the wrong variant"),
        }
    }

    #[test]
    fn test_identifiable_user_discriminator() {
        let json = r#"{
            "type": "user",
            "id": 3,
            "name": "Ada",
            "active": true,
            "identifiers": ["U9"]
        }"#;

        let item: Identifiable = serde_json::from_str(json).unwrap();
        assert_eq!(item.name(), "Ada");
        match item {
            Identifiable::User(user) => assert_eq!(user.id, Some(3)),
            Identifiable::Product(_) => panic!("discriminator picked the wrong variant"),
        }
    }

    #[test]
    fn test_identifiable_serializes_with_tag() {
        let item = Identifiable::User(User::new("Ada").with_id(3).with_identifier("U9"));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json.get("type").and_then(|v| v.as_str()), Some("user"));
        assert_eq!(json.get("name").and_then(|v| v.as_str()), Some("Ada"));
    }
}
