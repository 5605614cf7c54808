//! # desk-backend
//!
//! JSON-over-HTTP backend client for cashdesk-rs.
//!
//! The kiosk server exposes a small REST surface; this crate implements the
//! `desk_core::Backend` trait against it:
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/identifiers/{id}.json` | resolve identifier (tagged result) |
//! | GET | `/products.json`, `/products/{id}.json` | product catalog |
//! | PATCH | `/products/{id}.json` | save product |
//! | GET | `/users.json`, `/users/{id}.json` | user directory |
//! | POST/PATCH | `/users.json`, `/users/{id}.json` | save user |
//! | POST/PATCH | `/carts.json`, `/carts/{id}.json` | persist cart |
//! | POST | `/carts/{id}/pay.json` | submit payment |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use desk_backend::HttpBackend;
//! use desk_core::Backend;
//!
//! // Reads CASHDESK_API_URL and CASHDESK_API_TOKEN
//! let backend = HttpBackend::from_env()?;
//!
//! let item = backend.resolve_identifier("A1").await?;
//! ```

pub mod config;
pub mod http;

// Re-exports
pub use config::BackendConfig;
pub use http::HttpBackend;
