//! # Input Buffer
//!
//! Accumulates raw key events into a candidate identifier string.
//! Pure state, no I/O; the session decides what to do with the actions.

use desk_core::keymap::{self, KeyMap};
use std::sync::Arc;

/// What a key event did to the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferAction {
    /// A printable literal was appended
    Appended(char),
    /// The last character was removed
    DeletedLast,
    /// Submit with a non-empty buffer: resolve this identifier.
    /// The buffer is already cleared when this action is returned.
    Resolve(String),
    /// Submit with an empty buffer: start checkout
    Checkout,
    /// Unmapped key, or backspace on an empty buffer
    Ignored,
}

/// The identifier input buffer of a cashdesk session
#[derive(Debug)]
pub struct InputBuffer {
    keymap: Arc<KeyMap>,
    buffer: String,
}

impl InputBuffer {
    /// Create an empty buffer over the process-wide key map
    pub fn new(keymap: Arc<KeyMap>) -> Self {
        Self {
            keymap,
            buffer: String::new(),
        }
    }

    /// Feed one raw key code into the buffer.
    ///
    /// The buffer is cleared the moment a `Resolve` action is produced, so
    /// new input is accepted while the resolution is still in flight.
    pub fn on_key(&mut self, code: u32) -> BufferAction {
        if let Some(literal) = self.keymap.get_literal(code) {
            self.buffer.push(literal);
            return BufferAction::Appended(literal);
        }

        match code {
            keymap::ENTER => {
                if self.buffer.is_empty() {
                    BufferAction::Checkout
                } else {
                    BufferAction::Resolve(std::mem::take(&mut self.buffer))
                }
            }
            keymap::BACKSPACE => {
                if self.buffer.pop().is_some() {
                    BufferAction::DeletedLast
                } else {
                    BufferAction::Ignored
                }
            }
            _ => BufferAction::Ignored,
        }
    }

    /// Current buffer contents
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
