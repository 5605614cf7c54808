//! # Product Types
//!
//! Catalog product types for cashdesk-rs.
//! Products carry an ordered list of pricings; the cashdesk picks the first.

use serde::{Deserialize, Serialize};

/// One purchasable price option of a product.
///
/// Amounts are kept in the smallest currency unit (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    /// Unique pricing identifier
    pub id: u64,

    /// Display name (e.g., "Member", "Guest")
    pub name: String,

    /// Amount in smallest currency unit (cents)
    pub amount: i64,
}

impl Pricing {
    /// Create a new pricing
    pub fn new(id: u64, name: impl Into<String>, amount: i64) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
        }
    }

    /// Format for display (e.g., "1.50")
    pub fn display(&self) -> String {
        format!("{}.{:02}", self.amount / 100, (self.amount % 100).abs())
    }
}

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: u64,

    /// Display name
    pub name: String,

    /// Free-form tags (grown in the edit flow)
    #[serde(default)]
    pub tags: Vec<String>,

    /// Ordered list of available price options
    #[serde(default)]
    pub pricings: Vec<Pricing>,
}

impl Product {
    /// Create a new product without tags or pricings
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tags: Vec::new(),
            pricings: Vec::new(),
        }
    }

    /// Builder: add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Builder: add a pricing
    pub fn with_pricing(mut self, pricing: Pricing) -> Self {
        self.pricings.push(pricing);
        self
    }

    /// Append a tag (edit flow)
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }

    /// The pricing the cashdesk selects when a product is scanned:
    /// the first available one.
    pub fn default_pricing(&self) -> Option<&Pricing> {
        self.pricings.first()
    }

    /// Check whether a pricing is one of this product's declared pricings
    pub fn has_pricing(&self, pricing: &Pricing) -> bool {
        self.pricings.iter().any(|p| p == pricing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_display() {
        assert_eq!(Pricing::new(1, "Member", 150).display(), "1.50");
        assert_eq!(Pricing::new(2, "Guest", 5).display(), "0.05");
        assert_eq!(Pricing::new(3, "Bulk", 1000).display(), "10.00");
    }

    #[test]
    fn test_product_builder() {
        let product = Product::new(7, "Club-Mate")
            .with_tag("drink")
            .with_pricing(Pricing::new(1, "Member", 150))
            .with_pricing(Pricing::new(2, "Guest", 200));

        assert_eq!(product.id, 7);
        assert_eq!(product.tags, vec!["drink".to_string()]);
        assert_eq!(product.pricings.len(), 2);
    }

    #[test]
    fn test_default_pricing_is_first() {
        let member = Pricing::new(1, "Member", 150);
        let guest = Pricing::new(2, "Guest", 200);
        let product = Product::new(7, "Club-Mate")
            .with_pricing(member.clone())
            .with_pricing(guest.clone());

        assert_eq!(product.default_pricing(), Some(&member));
        assert!(product.has_pricing(&guest));
        assert!(!product.has_pricing(&Pricing::new(9, "Foreign", 100)));
    }

    #[test]
    fn test_product_without_pricings() {
        let product = Product::new(8, "Misconfigured");
        assert!(product.default_pricing().is_none());
    }

    #[test]
    fn test_tag_growth() {
        let mut product = Product::new(7, "Club-Mate");
        product.add_tag("drink");
        product.add_tag("caffeine");
        assert_eq!(product.tags.len(), 2);
    }
}
