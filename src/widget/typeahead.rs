//! Typeahead matching over menu item texts

use crate::debounce::Clock;
use std::time::{Duration, Instant};

/// Idle time after which the typed prefix is discarded
pub const TYPEAHEAD_BUFFER_CLEAR_TIMEOUT_MS: u64 = 300;

/// Prefix typed so far and when it was last extended
#[derive(Debug, Clone, Default)]
pub struct TypeaheadBuffer {
    buffer: String,
    last_input: Option<Instant>,
}

impl TypeaheadBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn timeout() -> Duration {
        Duration::from_millis(TYPEAHEAD_BUFFER_CLEAR_TIMEOUT_MS)
    }

    pub fn in_progress(&self, clock: &dyn Clock) -> bool {
        match self.last_input {
            Some(at) => !self.buffer.is_empty() && clock.now() < at + Self::timeout(),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.last_input = None;
    }

    /// Extends the prefix with `next_char` and returns the next matching item
    ///
    /// Repeating the same first letter cycles through the items starting
    /// with it, beginning after `starting_index`. A longer prefix matches
    /// from `starting_index` onwards, wrapping around.
    pub fn match_item(
        &mut self,
        texts: &[String],
        next_char: char,
        starting_index: Option<usize>,
        clock: &dyn Clock,
    ) -> Option<usize> {
        if !self.in_progress(clock) {
            self.buffer.clear();
        }
        self.buffer.extend(next_char.to_lowercase());
        self.last_input = Some(clock.now());

        if texts.is_empty() {
            return None;
        }

        let normalized: Vec<String> = texts.iter().map(|t| t.trim().to_lowercase()).collect();
        let count = normalized.len();

        let mut chars = self.buffer.chars();
        let first = chars.next()?;
        let single_letter = chars.all(|c| c == first);

        let (start, prefix) = if single_letter {
            let start = starting_index.map_or(0, |i| i + 1);
            (start, first.to_string())
        } else {
            (starting_index.unwrap_or(0), self.buffer.clone())
        };

        (0..count)
            .map(|offset| (start + offset) % count)
            .find(|&i| normalized[i].starts_with(&prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::ManualClock;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_letter_cycles() {
        let clock = ManualClock::new();
        let items = texts(&["Apple", "Banana", "Blueberry", "Cherry"]);
        let mut buffer = TypeaheadBuffer::new();

        assert_eq!(buffer.match_item(&items, 'b', None, &clock), Some(1));
        assert_eq!(buffer.match_item(&items, 'b', Some(1), &clock), Some(2));
        assert_eq!(buffer.match_item(&items, 'b', Some(2), &clock), Some(1));
    }

    #[test]
    fn test_prefix_match() {
        let clock = ManualClock::new();
        let items = texts(&["Apple", "Banana", "Blueberry"]);
        let mut buffer = TypeaheadBuffer::new();

        assert_eq!(buffer.match_item(&items, 'B', None, &clock), Some(1));
        assert_eq!(buffer.match_item(&items, 'l', Some(1), &clock), Some(2));
        assert!(buffer.in_progress(&clock));
    }

    #[test]
    fn test_buffer_expires() {
        let clock = ManualClock::new();
        let items = texts(&["Apple", "Banana"]);
        let mut buffer = TypeaheadBuffer::new();

        buffer.match_item(&items, 'a', None, &clock);
        clock.advance(Duration::from_millis(TYPEAHEAD_BUFFER_CLEAR_TIMEOUT_MS));
        assert!(!buffer.in_progress(&clock));
        assert_eq!(buffer.match_item(&items, 'b', None, &clock), Some(1));
    }

    #[test]
    fn test_no_match() {
        let clock = ManualClock::new();
        let items = texts(&["Apple"]);
        let mut buffer = TypeaheadBuffer::new();
        assert_eq!(buffer.match_item(&items, 'z', None, &clock), None);
        assert_eq!(buffer.match_item(&[], 'a', None, &clock), None);
    }
}
