//! Normalized key events fed into the engine.
//!
//! The engine never reads platform input APIs; the embedding frontend
//! translates whatever it receives (DOM events, terminal bytes, ...) into
//! this shape first.

/// Key identity after platform normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character key (letter, digit, punctuation).
    Char(char),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Backspace,
    Delete,
    Enter,
    Tab,
    CapsLock,
    /// Anything the frontend could not classify. Always a no-op.
    Other,
}

/// A key press with the modifier state captured at event time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    pub caps_lock: bool,
    /// True for auto-repeat events while the key is held.
    pub repeat: bool,
}

impl KeyEvent {
    /// A plain press with no modifiers.
    pub fn press(key: Key) -> Self {
        Self {
            key,
            shift: false,
            caps_lock: false,
            repeat: false,
        }
    }

    /// A plain letter press, convenience for tests and simple frontends.
    pub fn letter(ch: char) -> Self {
        Self::press(Key::Char(ch))
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_caps_lock(mut self) -> Self {
        self.caps_lock = true;
        self
    }

    pub fn with_repeat(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// The standalone display text for this key, if it has one.
    ///
    /// Letters are cased by caps-lock XOR shift, digits pass through
    /// unchanged, arrow keys display as their direction labels. Keys with
    /// no display text (space, enter, modifiers, unclassified) yield None.
    pub fn display_text(&self) -> Option<String> {
        match self.key {
            Key::Char(ch) if ch.is_ascii_alphabetic() => {
                let upper = self.caps_lock != self.shift;
                Some(if upper {
                    ch.to_ascii_uppercase().to_string()
                } else {
                    ch.to_ascii_lowercase().to_string()
                })
            }
            Key::Char(ch) if ch.is_ascii_digit() => Some(ch.to_string()),
            Key::ArrowUp => Some("UP".to_string()),
            Key::ArrowDown => Some("DOWN".to_string()),
            Key::ArrowLeft => Some("LEFT".to_string()),
            Key::ArrowRight => Some("RIGHT".to_string()),
            _ => None,
        }
    }

    /// True when this event carries an ASCII letter.
    pub fn is_letter(&self) -> bool {
        matches!(self.key, Key::Char(ch) if ch.is_ascii_alphabetic())
    }
}

/// Result of handing a key event to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// The engine consumed the key and updated its context.
    Handled,
    /// The key produced no state change.
    NotHandled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_case_is_caps_xor_shift() {
        assert_eq!(KeyEvent::letter('a').display_text().unwrap(), "a");
        assert_eq!(
            KeyEvent::letter('a').with_shift().display_text().unwrap(),
            "A"
        );
        assert_eq!(
            KeyEvent::letter('a').with_caps_lock().display_text().unwrap(),
            "A"
        );
        assert_eq!(
            KeyEvent::letter('a')
                .with_shift()
                .with_caps_lock()
                .display_text()
                .unwrap(),
            "a"
        );
    }

    #[test]
    fn test_digits_and_arrows_display() {
        assert_eq!(
            KeyEvent::press(Key::Char('7')).display_text().unwrap(),
            "7"
        );
        assert_eq!(
            KeyEvent::press(Key::ArrowLeft).display_text().unwrap(),
            "LEFT"
        );
    }

    #[test]
    fn test_keys_without_display_text() {
        assert!(KeyEvent::press(Key::Space).display_text().is_none());
        assert!(KeyEvent::press(Key::Enter).display_text().is_none());
        assert!(KeyEvent::press(Key::Other).display_text().is_none());
    }
}
