//! Normalized keyboard input for the foundation

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key identity after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    ArrowUp,
    ArrowDown,
    Escape,
    Tab,
    /// A single printable character other than space
    Character(char),
    Other,
}

impl Key {
    pub fn from_char(c: char) -> Self {
        if c == ' ' {
            Key::Space
        } else if c.is_control() {
            Key::Other
        } else {
            Key::Character(c)
        }
    }
}

/// Key press delivered to the anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    default_prevented: bool,
}

impl KeyboardEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            default_prevented: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn has_modifier(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Marks the event as consumed by the control
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl From<KeyEvent> for KeyboardEvent {
    fn from(event: KeyEvent) -> Self {
        let key = if event.kind == KeyEventKind::Release {
            Key::Other
        } else {
            match event.code {
                KeyCode::Enter => Key::Enter,
                KeyCode::Up => Key::ArrowUp,
                KeyCode::Down => Key::ArrowDown,
                KeyCode::Esc => Key::Escape,
                KeyCode::Tab | KeyCode::BackTab => Key::Tab,
                KeyCode::Char(c) => Key::from_char(c),
                _ => Key::Other,
            }
        };

        Self {
            key,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            meta: event.modifiers.contains(KeyModifiers::SUPER)
                || event.modifiers.contains(KeyModifiers::META),
            default_prevented: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_crossterm() {
        let event: KeyboardEvent = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL).into();
        assert_eq!(event.key, Key::Character('x'));
        assert!(event.has_modifier());

        let event: KeyboardEvent = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE).into();
        assert_eq!(event.key, Key::Space);
        assert!(!event.has_modifier());

        let event: KeyboardEvent = KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE).into();
        assert_eq!(event.key, Key::Other);
    }

    #[test]
    fn test_prevent_default() {
        let mut event = KeyboardEvent::new(Key::Enter);
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
