//! Modifier-key chords for clipboard and history.
//!
//! Holding Ctrl+Z or Ctrl+Y walks the history one step per key event,
//! auto-repeat included. Copy and paste ignore auto-repeat, so holding
//! Ctrl+V pastes exactly once.

use serde::{Deserialize, Serialize};

/// Key name reported when the modifier itself is pressed or released.
pub const MODIFIER_KEY: &str = "Control";

/// A key event as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    /// Key value (`"z"`, `"Control"`, ...).
    pub key: String,
    /// Whether the modifier key is held.
    pub ctrl: bool,
    /// Whether this event is an auto-repeat of a held key.
    #[serde(default)]
    pub repeat: bool,
}

impl KeyInput {
    /// A fresh (non-repeat) key press.
    #[must_use]
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
            repeat: false,
        }
    }

    /// Mark this event as an auto-repeat.
    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// Editor command bound to a modifier chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shortcut {
    /// Ctrl+C: copy the selected panel.
    Copy,
    /// Ctrl+V: paste the copied panel.
    Paste,
    /// Ctrl+Z: undo.
    Undo,
    /// Ctrl+Y: redo.
    Redo,
}

impl Shortcut {
    /// Command bound to `key`, if any. Only the unshifted letters match, so
    /// Ctrl+Shift+Z is not undo.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "c" => Some(Self::Copy),
            "v" => Some(Self::Paste),
            "z" => Some(Self::Undo),
            "y" => Some(Self::Redo),
            _ => None,
        }
    }

    /// Whether auto-repeat events trigger this command again.
    #[must_use]
    pub const fn fires_on_repeat(self) -> bool {
        matches!(self, Self::Undo | Self::Redo)
    }

    /// Resolve a key event to the command it should run.
    #[must_use]
    pub fn resolve(input: &KeyInput) -> Option<Self> {
        if !input.ctrl {
            return None;
        }
        let shortcut = Self::from_key(&input.key)?;
        if input.repeat && !shortcut.fires_on_repeat() {
            return None;
        }
        Some(shortcut)
    }
}
