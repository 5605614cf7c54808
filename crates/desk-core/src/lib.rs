//! # desk-core
//!
//! Core types and traits for the cashdesk-rs checkout terminal.
//!
//! This crate provides:
//! - `Backend` trait for catalog resolution, cart persistence, and payment
//! - `Product`, `Pricing`, and `User` catalog types
//! - `Cart`, `CartLineItem`, and `PaymentTransaction` for the checkout flow
//! - `Identifiable` tagged result of identifier resolution
//! - `KeyMap` for the fixed keyboard surface
//! - `DeskError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use desk_core::{Cart, Identifiable};
//!
//! // Resolve a scanned identifier
//! let item = backend.resolve_identifier("A1").await?;
//!
//! // Mutate the running cart
//! match item {
//!     Identifiable::Product(product) => {
//!         let pricing = product.default_pricing().cloned().unwrap();
//!         cart.add_to_cart(product, pricing);
//!     }
//!     Identifiable::User(user) => cart.set_user(user),
//! }
//!
//! // Submit for payment
//! let transaction = backend.pay_cart(&cart).await?;
//! ```

pub mod backend;
pub mod cart;
pub mod error;
pub mod keymap;
pub mod product;
pub mod user;

// Re-exports for convenience
pub use backend::{Backend, BoxedBackend, Identifiable};
pub use cart::{Cart, CartLineItem, PaymentTransaction};
pub use error::{DeskError, DeskResult};
pub use keymap::KeyMap;
pub use product::{Pricing, Product};
pub use user::User;
