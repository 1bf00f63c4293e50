//! Logical key events produced by the input decoder and consumed by the
//! translator, the line prompt and incremental search.

use std::fmt;

/// Named keys recognised from multi-byte escape sequences (plus the two
/// single-byte specials, Backspace and a lone Escape).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Backspace,
    Escape,
}

/// One decoded keystroke: either a literal input byte (printable or control)
/// or a named key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Byte(u8),
    Named(NamedKey),
}

/// Carriage return as delivered by a raw-mode terminal for Enter.
pub const ENTER: u8 = b'\r';
/// DEL, sent by most terminals for the Backspace key.
pub const BACKSPACE_BYTE: u8 = 0x7f;
pub const ESCAPE_BYTE: u8 = 0x1b;

/// Byte produced by holding Ctrl with `c` (strips the upper three bits).
pub const fn ctrl(c: u8) -> u8 {
    c & 0x1f
}

impl Key {
    pub const fn ctrl(c: u8) -> Self {
        Key::Byte(ctrl(c))
    }

    pub fn is_enter(&self) -> bool {
        matches!(self, Key::Byte(ENTER))
    }

    pub fn is_escape(&self) -> bool {
        matches!(self, Key::Named(NamedKey::Escape))
    }

    /// Printable ASCII (space through tilde).
    pub fn printable(&self) -> Option<u8> {
        match *self {
            Key::Byte(b) if (0x20..0x7f).contains(&b) => Some(b),
            _ => None,
        }
    }
}

impl From<NamedKey> for Key {
    fn from(k: NamedKey) -> Self {
        Key::Named(k)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Byte(b) if (0x20..0x7f).contains(b) => write!(f, "{}", *b as char),
            Key::Byte(b) if *b < 0x20 => write!(f, "<C-{}>", (b | 0x60) as char),
            Key::Byte(b) => write!(f, "<0x{b:02x}>"),
            Key::Named(n) => write!(f, "<{n:?}>"),
        }
    }
}
