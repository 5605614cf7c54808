//! # desk-terminal
//!
//! The cashdesk terminal application for cashdesk-rs.
//!
//! This crate provides:
//! - The identifier input buffer fed by raw key events
//! - The cashdesk session state machine (resolve, cart, checkout)
//! - Product/user list views and the CSV user import
//!
//! The binary (`cashdesk`) wires a keyboard event loop to a
//! [`session::CashdeskSession`] over the HTTP backend.

pub mod import;
pub mod input;
pub mod session;
pub mod views;

pub use input::{BufferAction, InputBuffer};
pub use session::{CashdeskSession, SessionEvent};
