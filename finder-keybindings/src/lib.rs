//! Command table and keybinding system for finder.
//!
//! Features:
//! - The ordered table of finder commands with their public names
//! - Default key sequences, bound only inside buffers of the pane file type
//! - Rendering of the host keymap script (`<Plug>` mappings plus a
//!   `FileType` autocommand group)

mod command;
pub mod parser;

pub use command::{Command, lower_hyphens};
pub use parser::{KeySequence, KeyStroke, ParseError, parse_key_sequence};

use std::collections::HashMap;
use std::fmt::Write as _;

/// Registry of key sequences mapped to commands for one pane file type.
#[derive(Debug, Default)]
pub struct KeybindingRegistry {
    /// File-type tag the bindings are scoped to
    file_type: String,
    /// Map of parsed key sequences to commands
    bindings: HashMap<KeySequence, Command>,
}

impl KeybindingRegistry {
    /// Create a new empty registry scoped to `file_type`.
    pub fn new(file_type: impl Into<String>) -> Self {
        Self {
            file_type: file_type.into(),
            bindings: HashMap::new(),
        }
    }

    /// Build a registry holding every default binding.
    ///
    /// Invalid key strings are logged and skipped.
    pub fn with_defaults(file_type: impl Into<String>) -> Self {
        let mut registry = Self::new(file_type);
        for command in Command::ALL {
            for key in command.default_keys() {
                if let Err(e) = registry.bind(key, command) {
                    log::warn!("Invalid default key '{}' for {}: {}", key, command, e);
                }
            }
        }
        log::info!(
            "Keybinding registry initialized with {} bindings for file type '{}'",
            registry.bindings.len(),
            registry.file_type
        );
        registry
    }

    /// Bind `keys` to `command`, replacing any previous binding.
    pub fn bind(&mut self, keys: &str, command: Command) -> Result<(), ParseError> {
        let seq = parse_key_sequence(keys)?;
        self.bindings.insert(seq, command);
        Ok(())
    }

    /// Look up the command bound to `keys` in a buffer of `file_type`.
    ///
    /// Bindings are only active in buffers carrying this registry's tag.
    pub fn lookup(&self, file_type: &str, keys: &str) -> Option<Command> {
        if file_type != self.file_type {
            return None;
        }
        let seq = parse_key_sequence(keys).ok()?;
        self.bindings.get(&seq).copied()
    }

    /// File-type tag the bindings are scoped to.
    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    /// Check if the registry has any bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Get the number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

/// Render the host keymap script.
///
/// Every command gets a `<Plug>` mapping calling its host function; default
/// keys are bound buffer-locally through a `FileType` autocommand so they
/// only apply to pane buffers. With `with_default_keys == false` only the
/// `<Plug>` mappings are emitted.
pub fn render_keymap_script(file_type: &str, with_default_keys: bool) -> String {
    let mut b = String::new();

    for command in Command::ALL {
        let _ = writeln!(
            b,
            "noremap <Plug>({}) :<C-u>call {}()<CR>",
            command.plug_name(),
            command.function_name()
        );
    }
    b.push('\n');

    if !with_default_keys {
        return b;
    }

    let _ = writeln!(b, "augroup finder");
    let _ = writeln!(b, "  autocmd!");
    for command in Command::ALL {
        for key in command.default_keys() {
            let _ = writeln!(
                b,
                "  autocmd FileType {} nnoremap <buffer> {} <Plug>({})<CR>",
                file_type,
                key,
                command.plug_name()
            );
        }
    }
    let _ = writeln!(b, "augroup END");
    b
}
