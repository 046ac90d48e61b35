//! TUI application main module
//!
//! Drives a [`MultiSelect`] from terminal events and redraws it.

use crate::adapter::ChangeDetail;
use crate::keyboard::KeyboardEvent;
use crate::tui::components::menu_item_at;
use crate::tui::event::{EventPoll, TuiEvent, disable_mouse_capture, enable_mouse_capture};
use crate::tui::ui::{HitAreas, render};
use crate::widget::MultiSelect;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::DefaultTerminal;
use ratatui::layout::Position;
use std::time::Instant;
use tracing::{debug, info};

/// TUI application
#[derive(Debug)]
pub struct TuiApp {
    /// Terminal
    pub terminal: DefaultTerminal,
    /// Event poller
    pub event_poll: EventPoll,
    /// Control being driven
    pub widget: MultiSelect,
    /// Title shown in the header
    title: String,
    /// Clickable areas of the last frame
    areas: HitAreas,
}

impl TuiApp {
    /// Create new TUI application
    pub fn new(widget: MultiSelect, title: impl Into<String>) -> std::io::Result<Self> {
        let terminal = ratatui::init();
        enable_mouse_capture()?;

        Ok(Self {
            terminal,
            event_poll: EventPoll::default(),
            widget,
            title: title.into(),
            areas: HitAreas::default(),
        })
    }

    /// Run application until the user exits; returns the final selection
    pub fn run(&mut self) -> std::io::Result<ChangeDetail> {
        let result = self.event_loop();

        let _ = disable_mouse_capture();
        ratatui::restore();
        result?;

        self.widget.destroy();
        Ok(ChangeDetail {
            value: self.widget.value(),
            index: self.widget.selected_index(),
        })
    }

    fn event_loop(&mut self) -> std::io::Result<()> {
        self.redraw()?;

        loop {
            self.widget.poll_timers();

            // Wake up in time for the click debounce deadline
            let timeout = match self.widget.next_deadline() {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => self.event_poll.tick_rate(),
            };

            match self.event_poll.next_within(timeout) {
                TuiEvent::None => continue,
                TuiEvent::CtrlC => break,
                TuiEvent::Resize(_, _) => {}
                event => {
                    if self.handle_event(event) {
                        break;
                    }
                }
            }

            for change in self.widget.take_changes() {
                info!(index = ?change.index, value = ?change.value, "Selection changed");
            }
            self.redraw()?;
        }

        Ok(())
    }

    fn redraw(&mut self) -> std::io::Result<()> {
        self.areas = render(&mut self.terminal, &self.title, &self.widget)?;
        Ok(())
    }

    /// Handle event; returns true when the app should exit
    fn handle_event(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::Tab => self.toggle_focus(),
            TuiEvent::Click { column, row } => self.handle_click(column, row),
            TuiEvent::Key(key) => return self.handle_key(key),
            _ => {}
        }
        false
    }

    /// Tab moves focus onto the anchor or away from the control
    fn toggle_focus(&mut self) {
        let model = self.widget.model();
        if model.anchor_focused || model.menu.open {
            self.widget.close_menu();
            self.widget.blur();
            debug!("Focus left the control");
        } else {
            self.widget.focus();
            debug!("Focus moved to the anchor");
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        let position = Position::new(column, row);

        if let Some(menu) = self.areas.menu {
            let item_count = self.widget.model().menu.items.len();
            let offset = self.areas.menu_offset;
            if let Some(index) = menu_item_at(menu, offset, item_count, column, row) {
                self.widget.activate_item(index);
                return;
            }
            if menu.contains(position) {
                return;
            }
        }

        if self.areas.anchor.contains(position) {
            let x = f32::from(column - self.areas.anchor.x);
            self.widget.click(x);
            return;
        }

        // Click outside: the menu surface closes and focus leaves
        if self.widget.model().menu.open {
            self.widget.close_menu();
        }
        if self.widget.model().anchor_focused {
            self.widget.blur();
        }
    }

    /// Keys go to the open menu, or to the anchor while it has focus
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.widget.model().menu.open {
            match key.code {
                KeyCode::Up => self.widget.move_item_focus(false),
                KeyCode::Down => self.widget.move_item_focus(true),
                KeyCode::Enter | KeyCode::Char(' ') => self.widget.activate_focused_item(),
                KeyCode::Esc => self.widget.close_menu(),
                _ => {}
            }
            return false;
        }

        if key.code == KeyCode::Esc {
            return true;
        }

        let mut event = KeyboardEvent::from(key);
        self.widget.keydown(&mut event);
        if event.default_prevented() {
            debug!(key = ?event.key, "Key handled by the control");
        }
        false
    }
}
