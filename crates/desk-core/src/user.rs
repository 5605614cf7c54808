//! # User Types
//!
//! Customer accounts for cashdesk-rs.
//! One account may own several identifiers (barcodes, cards).

use serde::{Deserialize, Serialize};

/// A customer account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend-assigned identity; absent until first persisted
    /// (the CSV import flow builds unsaved users)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Display name
    pub name: String,

    /// Whether the account may be charged
    #[serde(default = "default_true")]
    pub active: bool,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Identifier strings owned by this account; never empty for
    /// catalog-resolved users
    #[serde(default)]
    pub identifiers: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Create a new unsaved active user
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            active: true,
            tags: Vec::new(),
            identifiers: Vec::new(),
        }
    }

    /// Builder: set the backend identity
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Builder: add an identifier
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifiers.push(identifier.into());
        self
    }

    /// Builder: add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Builder: set the activity flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Whether the backend has assigned an identity yet
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Case-insensitive substring match over name and identifiers,
    /// used by the user list filter.
    pub fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        if self.name.to_lowercase().contains(&needle) {
            return true;
        }
        self.identifiers
            .iter()
            .any(|identifier| identifier.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_unsaved() {
        let user = User::new("Ada");
        assert!(!user.is_persisted());
        assert!(user.active);
        assert!(user.identifiers.is_empty());
    }

    #[test]
    fn test_filter_matches_name() {
        let user = User::new("Ada Lovelace").with_id(1).with_identifier("U9");
        assert!(user.matches_filter("lovelace"));
        assert!(user.matches_filter("ADA"));
        assert!(!user.matches_filter("babbage"));
    }

    #[test]
    fn test_filter_matches_identifier() {
        let user = User::new("Ada")
            .with_id(1)
            .with_identifier("U9")
            .with_identifier("CARD-0042");
        assert!(user.matches_filter("u9"));
        assert!(user.matches_filter("card"));
        assert!(!user.matches_filter("u8"));
    }
}
