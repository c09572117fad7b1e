//! Key Event Model
//!
//! Host-independent keyboard events. A host translates its native key
//! events into [`KeyEvent`] values and hands them to the widget; handlers
//! call [`KeyEvent::prevent_default`] to stop the input control from
//! applying its default editing behaviour.

use std::fmt;

/// Logical key identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    /// Printable character
    Char(char),
    /// Anything the widget has no special meaning for
    Other(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Enter => write!(f, "Enter"),
            Key::Tab => write!(f, "Tab"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Delete => write!(f, "Delete"),
            Key::Escape => write!(f, "Escape"),
            Key::ArrowUp => write!(f, "ArrowUp"),
            Key::ArrowDown => write!(f, "ArrowDown"),
            Key::ArrowLeft => write!(f, "ArrowLeft"),
            Key::ArrowRight => write!(f, "ArrowRight"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::Char(ch) => write!(f, "{}", ch),
            Key::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Modifier keys held during a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Only shift held
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };
}

/// A single keydown event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl KeyEvent {
    /// Create a key event with explicit modifiers
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            default_prevented: false,
        }
    }

    /// Create a key event with no modifiers
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Create a key event with shift held
    pub fn shifted(key: Key) -> Self {
        Self::new(key, Modifiers::SHIFT)
    }

    /// Stop the input control from applying its default behaviour
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler suppressed the default behaviour
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is(&self, key: &Key) -> bool {
        &self.key == key
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        KeyEvent::plain(key)
    }
}

impl From<char> for KeyEvent {
    fn from(ch: char) -> Self {
        KeyEvent::plain(Key::Char(ch))
    }
}
