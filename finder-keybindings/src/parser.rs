//! Key sequence parser.
//!
//! Parses editor key notation like `l`, `<CR>`, `<Space>` or `<C-w>h` into
//! a sequence of `KeyStroke`s so default bindings can be validated and
//! rendered back in canonical form.

use std::fmt;

/// Error type for key parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// A named (non-printable or reserved) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Space,
    Tab,
    Escape,
    Backspace,
    LessThan,
    Bar,
    Backslash,
}

impl NamedKey {
    fn notation(self) -> &'static str {
        match self {
            NamedKey::Enter => "CR",
            NamedKey::Space => "Space",
            NamedKey::Tab => "Tab",
            NamedKey::Escape => "Esc",
            NamedKey::Backspace => "BS",
            NamedKey::LessThan => "lt",
            NamedKey::Bar => "Bar",
            NamedKey::Backslash => "Bslash",
        }
    }
}

/// A single key press, optionally with modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    pub ctrl: bool,
    pub alt: bool,
    pub key: ParsedKey,
}

/// The actual key (either a character or a named key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParsedKey {
    /// A printable character (case-sensitive: `t` and `T` differ)
    Character(char),
    /// A named key (`<CR>`, `<Space>`, ...)
    Named(NamedKey),
}

impl KeyStroke {
    fn plain(key: ParsedKey) -> Self {
        Self {
            ctrl: false,
            alt: false,
            key,
        }
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.ctrl && !self.alt {
            return match &self.key {
                ParsedKey::Character(c) => write!(f, "{c}"),
                ParsedKey::Named(n) => write!(f, "<{}>", n.notation()),
            };
        }
        let mut inner = String::new();
        if self.ctrl {
            inner.push_str("C-");
        }
        if self.alt {
            inner.push_str("M-");
        }
        match &self.key {
            ParsedKey::Character(c) => inner.push(*c),
            ParsedKey::Named(n) => inner.push_str(n.notation()),
        }
        write!(f, "<{inner}>")
    }
}

/// A parsed key sequence (one or more strokes typed in order).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySequence(pub Vec<KeyStroke>);

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stroke in &self.0 {
            write!(f, "{stroke}")?;
        }
        Ok(())
    }
}

/// Parse a key sequence in editor notation.
///
/// Supported forms:
/// - Printable characters: `l`, `T`, `~`, `\`
/// - Named keys in angle brackets (case-insensitive): `<CR>`, `<Enter>`,
///   `<Space>`, `<Tab>`, `<Esc>`, `<BS>`, `<lt>`, `<Bar>`, `<Bslash>`
/// - Modifiers: `<C-x>` (Ctrl), `<M-x>` / `<A-x>` (Alt), combinable
pub fn parse_key_sequence(s: &str) -> Result<KeySequence, ParseError> {
    if s.is_empty() {
        return Err(ParseError("Empty key sequence".to_string()));
    }

    let mut strokes = Vec::new();
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        if c == '<'
            && let Some(end) = rest.find('>')
            && end > 1
        {
            strokes.push(parse_bracketed(&rest[1..end])?);
            rest = &rest[end + 1..];
            continue;
        }
        if c.is_control() {
            return Err(ParseError(format!(
                "Control character {:?} must be written in <> notation",
                c
            )));
        }
        strokes.push(KeyStroke::plain(ParsedKey::Character(c)));
        rest = &rest[c.len_utf8()..];
    }

    Ok(KeySequence(strokes))
}

/// Parse the inside of a `<...>` group.
fn parse_bracketed(inner: &str) -> Result<KeyStroke, ParseError> {
    let mut stroke = KeyStroke::plain(ParsedKey::Character(' '));
    let mut key = inner;

    // Modifier prefixes are single letters followed by '-'; a trailing
    // '-' (as in `<C-->`) is the key itself.
    while key.len() > 2 && key.as_bytes()[1] == b'-' {
        match key.as_bytes()[0].to_ascii_lowercase() {
            b'c' => stroke.ctrl = true,
            b'm' | b'a' => stroke.alt = true,
            _ => {
                return Err(ParseError(format!(
                    "Unknown modifier in '<{}>'",
                    inner
                )));
            }
        }
        key = &key[2..];
    }

    if let Some(named) = parse_named_key(key) {
        stroke.key = ParsedKey::Named(named);
        return Ok(stroke);
    }

    let chars: Vec<char> = key.chars().collect();
    if chars.len() == 1 && (stroke.ctrl || stroke.alt) {
        let c = if stroke.ctrl {
            chars[0].to_ascii_lowercase()
        } else {
            chars[0]
        };
        stroke.key = ParsedKey::Character(c);
        return Ok(stroke);
    }

    Err(ParseError(format!("Unknown key: '<{}>'", inner)))
}

fn parse_named_key(s: &str) -> Option<NamedKey> {
    match s.to_lowercase().as_str() {
        "cr" | "enter" | "return" => Some(NamedKey::Enter),
        "space" => Some(NamedKey::Space),
        "tab" => Some(NamedKey::Tab),
        "esc" | "escape" => Some(NamedKey::Escape),
        "bs" | "backspace" => Some(NamedKey::Backspace),
        "lt" => Some(NamedKey::LessThan),
        "bar" => Some(NamedKey::Bar),
        "bslash" => Some(NamedKey::Backslash),
        _ => None,
    }
}
