//! Event handling module
//!
//! Uses crossterm for terminal event handling.

use crossterm::{
    ExecutableCommand,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
};
use std::time::Duration;

/// Event poll interval (milliseconds)
const TICK_RATE: u64 = 50;

/// Event type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Key press forwarded to the control
    Key(KeyEvent),
    /// Tab / Shift+Tab moves focus in or out of the control
    Tab,
    /// Left button press at a terminal cell
    Click { column: u16, row: u16 },
    /// Ctrl+C exit
    CtrlC,
    /// Window resize
    Resize(u16, u16),
    /// No event (timeout)
    None,
}

impl From<Event> for TuiEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key_event) => key_event.into(),
            Event::Mouse(mouse_event) => mouse_event.into(),
            Event::Resize(width, height) => TuiEvent::Resize(width, height),
            Event::FocusGained => TuiEvent::None,
            Event::FocusLost => TuiEvent::None,
            Event::Paste(_) => TuiEvent::None,
        }
    }
}

impl From<KeyEvent> for TuiEvent {
    fn from(key: KeyEvent) -> Self {
        // Ignore non-press events
        if key.kind != KeyEventKind::Press {
            return TuiEvent::None;
        }

        // Handle Ctrl+C and Ctrl+D exit
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
        {
            return TuiEvent::CtrlC;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => TuiEvent::Tab,
            KeyCode::Null => TuiEvent::None,
            _ => TuiEvent::Key(key),
        }
    }
}

impl From<MouseEvent> for TuiEvent {
    fn from(mouse: MouseEvent) -> Self {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => TuiEvent::Click {
                column: mouse.column,
                row: mouse.row,
            },
            _ => TuiEvent::None,
        }
    }
}

/// Event poller
#[derive(Debug)]
pub struct EventPoll {
    tick_rate: Duration,
}

impl EventPoll {
    /// Create new event poller
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Poll next event, waiting at most one tick
    pub fn next(&self) -> TuiEvent {
        self.next_within(self.tick_rate)
    }

    /// Poll next event, waiting at most `timeout` (capped at one tick)
    pub fn next_within(&self, timeout: Duration) -> TuiEvent {
        if event::poll(timeout.min(self.tick_rate)).unwrap_or(false) {
            event::read()
                .unwrap_or_else(|_| Event::Key(KeyEvent::new(KeyCode::Null, KeyModifiers::empty())))
                .into()
        } else {
            TuiEvent::None
        }
    }
}

impl Default for EventPoll {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE))
    }
}

/// Enable mouse capture so clicks reach the control
pub fn enable_mouse_capture() -> std::io::Result<()> {
    std::io::stdout().execute(EnableMouseCapture)?;
    Ok(())
}

/// Disable mouse capture
pub fn disable_mouse_capture() -> std::io::Result<()> {
    std::io::stdout().execute(DisableMouseCapture)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn test_ctrl_c_exits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(TuiEvent::from(key), TuiEvent::CtrlC);
    }

    #[test]
    fn test_release_ignored() {
        let key = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Release,
            state: KeyEventState::empty(),
        };
        assert_eq!(TuiEvent::from(key), TuiEvent::None);
    }

    #[test]
    fn test_left_click() {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 7,
            row: 4,
            modifiers: KeyModifiers::empty(),
        };
        assert_eq!(TuiEvent::from(mouse), TuiEvent::Click { column: 7, row: 4 });

        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..mouse
        };
        assert_eq!(TuiEvent::from(scroll), TuiEvent::None);
    }

    #[test]
    fn test_tab_variants() {
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::empty());
        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(TuiEvent::from(tab), TuiEvent::Tab);
        assert_eq!(TuiEvent::from(back_tab), TuiEvent::Tab);
    }
}
