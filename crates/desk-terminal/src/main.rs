//! # Cashdesk
//!
//! Terminal checkout for the kiosk backend.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export CASHDESK_API_URL=https://kiosk.example.org/api
//! export CASHDESK_API_TOKEN=...
//!
//! # Run the terminal
//! cashdesk
//! ```
//!
//! Scan or type an identifier and press ENTER to add it to the cart;
//! press ENTER on an empty input to pay; ESC aborts the cart.

use desk_backend::HttpBackend;
use desk_core::{keymap, BoxedBackend, KeyMap};
use desk_terminal::session::{CashdeskSession, SessionEvent};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let keymap = Arc::new(load_keymap());
    let backend: BoxedBackend = Arc::new(HttpBackend::from_env()?);

    let (mut session, mut events) = CashdeskSession::new(backend, Arc::clone(&keymap));
    let keys = session.events();

    // Feed raw stdin bytes into the session as key events
    tokio::spawn(async move {
        let mut stdin = tokio::io::stdin();
        let mut buf = [0u8; 1];
        loop {
            match stdin.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if let Some(event) = key_event_for_byte(buf[0]) {
                        if keys.send(event).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });

    info!("Cashdesk ready: scan an identifier, ENTER on empty input pays, ESC aborts");

    while let Some(event) = events.recv().await {
        session.handle_event(event);
        render_status(&session);
    }

    Ok(())
}

/// Map one terminal byte to the session's key-event surface.
///
/// Alphanumeric bytes become their raw key codes (digits 48-57,
/// uppercased letters 65-90, matching the built-in key map), newline
/// becomes ENTER, delete/backspace becomes BACKSPACE, ESC aborts.
fn key_event_for_byte(byte: u8) -> Option<SessionEvent> {
    match byte {
        b'\r' | b'\n' => Some(SessionEvent::Key(keymap::ENTER)),
        0x08 | 0x7f => Some(SessionEvent::Key(keymap::BACKSPACE)),
        0x1b => Some(SessionEvent::Abort),
        _ => {
            let upper = byte.to_ascii_uppercase();
            upper
                .is_ascii_alphanumeric()
                .then(|| SessionEvent::Key(upper as u32))
        }
    }
}

/// One status line after every processed event
fn render_status(session: &CashdeskSession) {
    let cart = session.cart();
    let mut status = format!("[{} items]", cart.item_count());
    if let Some(user) = &cart.user {
        status.push_str(&format!(" customer: {}", user.name));
    }
    if !session.buffer().is_empty() {
        status.push_str(&format!(" input: {}", session.buffer()));
    }
    if session.waiting() {
        status.push_str(" ...");
    }
    if session.identifier_not_found() {
        status.push_str(" !! identifier not found");
    }
    if session.payment_failed() {
        status.push_str(" !! payment failed");
    }
    println!("{}", status);
}

/// Load the key map from config, falling back to the built-in table
fn load_keymap() -> KeyMap {
    let config_paths = [
        "config/keymap.toml",
        "../config/keymap.toml",
        "../../config/keymap.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            match KeyMap::from_toml(&content) {
                Ok(map) => {
                    info!("Loaded {} key mappings from {}", map.len(), path);
                    return map;
                }
                Err(e) => {
                    warn!("Ignoring {}: {}", path, e);
                }
            }
        }
    }

    KeyMap::builtin()
}

fn print_banner() {
    println!(
        r#"
  Cashdesk RS
  ━━━━━━━━━━━
  Checkout terminal
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
