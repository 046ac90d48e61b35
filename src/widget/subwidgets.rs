//! Leading icon and helper text models
//!
//! Both are cheap shared handles: one clone goes into the foundation map,
//! another stays with the host for rendering.

use crate::subfoundation::{HelperTextFoundation, IconFoundation};
use std::cell::RefCell;
use std::rc::Rc;

/// Observable state of the leading icon
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadingIconState {
    pub content: String,
    pub aria_label: Option<String>,
    pub disabled: bool,
}

/// Shared handle to a leading icon
#[derive(Debug, Clone, Default)]
pub struct LeadingIcon(Rc<RefCell<LeadingIconState>>);

impl LeadingIcon {
    pub fn new(content: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(LeadingIconState {
            content: content.into(),
            ..Default::default()
        })))
    }

    pub fn snapshot(&self) -> LeadingIconState {
        self.0.borrow().clone()
    }
}

impl IconFoundation for LeadingIcon {
    fn set_disabled(&mut self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn set_aria_label(&mut self, label: &str) {
        self.0.borrow_mut().aria_label = Some(label.to_string());
    }

    fn set_content(&mut self, content: &str) {
        self.0.borrow_mut().content = content.to_string();
    }
}

/// Observable state of the helper text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelperTextState {
    pub id: String,
    pub content: String,
    pub persistent: bool,
    pub validation_msg: bool,
    /// Mirrors `aria-hidden != "true"`
    pub visible: bool,
    /// Announced as an alert (invalid validation message)
    pub alert: bool,
}

/// Shared handle to a helper text
#[derive(Debug, Clone, Default)]
pub struct HelperText(Rc<RefCell<HelperTextState>>);

impl HelperText {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(HelperTextState {
            id: id.into(),
            content: content.into(),
            visible: true,
            ..Default::default()
        })))
    }

    pub fn persistent(self, persistent: bool) -> Self {
        self.0.borrow_mut().persistent = persistent;
        self
    }

    pub fn validation_msg(self, validation_msg: bool) -> Self {
        self.0.borrow_mut().validation_msg = validation_msg;
        self
    }

    pub fn snapshot(&self) -> HelperTextState {
        self.0.borrow().clone()
    }
}

impl HelperTextFoundation for HelperText {
    fn set_content(&mut self, content: &str) {
        self.0.borrow_mut().content = content.to_string();
    }

    fn set_validity(&mut self, is_valid: bool) {
        let mut state = self.0.borrow_mut();
        // Plain helper text is always shown
        if !state.validation_msg {
            return;
        }

        let should_display = !is_valid || state.persistent;
        state.visible = should_display;
        state.alert = should_display && !is_valid;
    }

    fn is_visible(&self) -> bool {
        self.0.borrow().visible
    }

    fn id(&self) -> Option<String> {
        let id = self.0.borrow().id.clone();
        if id.is_empty() { None } else { Some(id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_helper_text_always_visible() {
        let mut helper = HelperText::new("h", "Hint");
        helper.set_validity(false);
        assert!(helper.is_visible());
        assert!(!helper.snapshot().alert);
    }

    #[test]
    fn test_validation_message_visibility() {
        let mut helper = HelperText::new("h", "Required").validation_msg(true);
        helper.set_validity(true);
        assert!(!helper.is_visible());

        helper.set_validity(false);
        assert!(helper.is_visible());
        assert!(helper.snapshot().alert);
    }

    #[test]
    fn test_persistent_validation_message() {
        let mut helper = HelperText::new("h", "Required")
            .validation_msg(true)
            .persistent(true);
        helper.set_validity(true);
        assert!(helper.is_visible());
        assert!(!helper.snapshot().alert);
    }

    #[test]
    fn test_empty_id() {
        let helper = HelperText::new("", "x");
        assert_eq!(helper.id(), None);
    }

    #[test]
    fn test_icon_handle_is_shared() {
        let icon = LeadingIcon::new("*");
        let mut handle = icon.clone();
        handle.set_disabled(true);
        handle.set_aria_label("Star");
        assert!(icon.snapshot().disabled);
        assert_eq!(icon.snapshot().aria_label.as_deref(), Some("Star"));
    }
}
