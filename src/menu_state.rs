//! Lifecycle of the option menu
//!
//! The menu surface reports its own progress (opened, closing, closed), so
//! the control cannot treat "open" as a single flag flipped by its own
//! calls. Blur handling in particular must keep treating the menu as open
//! while it is still animating closed.

use tracing::trace;

/// Phase of the option menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuPhase {
    #[default]
    Closed,
    /// Open was requested; the surface has not reported it yet
    Opening,
    Open,
    /// The surface started closing but is still visible
    Closing,
}

/// Input driving [`MenuPhase`] transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The control asked the surface to open
    OpenRequested,
    /// The surface finished opening
    Opened,
    /// The surface began closing
    Closing,
    /// The surface is fully closed
    Closed,
}

impl MenuPhase {
    /// Next phase after `event`
    ///
    /// Out-of-order reports are tolerated: the surface is the source of
    /// truth, so `Opened` always lands in `Open` unless a close is underway
    /// and `Closed` always lands in `Closed`.
    pub fn transition(self, event: MenuEvent) -> MenuPhase {
        let next = match (self, event) {
            (_, MenuEvent::Closed) => MenuPhase::Closed,
            (MenuPhase::Closed | MenuPhase::Closing, MenuEvent::OpenRequested) => MenuPhase::Opening,
            (phase, MenuEvent::OpenRequested) => phase,
            (MenuPhase::Closing, MenuEvent::Opened) => MenuPhase::Closing,
            (_, MenuEvent::Opened) => MenuPhase::Open,
            (MenuPhase::Closed, MenuEvent::Closing) => MenuPhase::Closed,
            (_, MenuEvent::Closing) => MenuPhase::Closing,
        };
        trace!(from = ?self, ?event, to = ?next, "Menu phase transition");
        next
    }

    /// True from the open request until the surface reports fully closed
    pub fn is_open(&self) -> bool {
        !matches!(self, MenuPhase::Closed)
    }

    /// Blur is deferred while focus may be inside the menu
    pub fn suppresses_blur(&self) -> bool {
        self.is_open()
    }
}
