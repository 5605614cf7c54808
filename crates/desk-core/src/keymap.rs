//! # Keyboard Mapping
//!
//! The fixed keycode-to-literal table of the cashdesk keyboard surface.
//! Built once at startup, read-only thereafter, passed by reference to the
//! input buffer. Optionally overridden from `config/keymap.toml`.

use crate::error::{DeskError, DeskResult};
use serde::Deserialize;
use std::collections::HashMap;

/// Submit key (ENTER)
pub const ENTER: u32 = 13;

/// Delete-last key (BACKSPACE)
pub const BACKSPACE: u32 = 8;

/// Abort command key (ESC); handled by the terminal, not the buffer
pub const ESCAPE: u32 = 27;

/// Immutable map from raw key codes to input literals
#[derive(Debug, Clone)]
pub struct KeyMap {
    literals: HashMap<u32, char>,
}

#[derive(Debug, Deserialize)]
struct KeyMapFile {
    literals: HashMap<String, String>,
}

impl KeyMap {
    /// The built-in map: digit row, letters, and the numpad digits
    /// barcode scanners emit.
    pub fn builtin() -> Self {
        let mut literals = HashMap::new();
        for (code, literal) in (48..=57).zip('0'..='9') {
            literals.insert(code, literal);
        }
        for (code, literal) in (65..=90).zip('A'..='Z') {
            literals.insert(code, literal);
        }
        for (code, literal) in (96..=105).zip('0'..='9') {
            literals.insert(code, literal);
        }
        Self { literals }
    }

    /// Look up the literal for a raw key code
    pub fn get_literal(&self, code: u32) -> Option<char> {
        self.literals.get(&code).copied()
    }

    /// Parse a keymap from TOML:
    ///
    /// ```toml
    /// [literals]
    /// 48 = "0"
    /// 65 = "A"
    /// ```
    pub fn from_toml(toml_str: &str) -> DeskResult<Self> {
        let file: KeyMapFile = toml::from_str(toml_str)
            .map_err(|e| DeskError::Configuration(format!("Invalid keymap file: {}", e)))?;

        let mut literals = HashMap::new();
        for (code, literal) in file.literals {
            let code: u32 = code.parse().map_err(|_| {
                DeskError::Configuration(format!("Invalid key code in keymap: {}", code))
            })?;
            let mut chars = literal.chars();
            let literal = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(DeskError::Configuration(format!(
                        "Literal for key code {} must be a single character",
                        code
                    )))
                }
            };
            literals.insert(code, literal);
        }

        Ok(Self { literals })
    }

    /// Number of mapped keys
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Check if no keys are mapped
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::builtin()
    }
}
