//! Optional collaborators owned by the foundation
//!
//! The leading icon and the helper text are separate widgets with their own
//! state. The foundation only needs a narrow slice of their behaviour, so
//! each is reached through a small trait and held as an optional box.

/// Leading icon as seen from the multi-select
pub trait IconFoundation {
    fn set_disabled(&mut self, disabled: bool);
    fn set_aria_label(&mut self, label: &str);
    fn set_content(&mut self, content: &str);
}

/// Helper text as seen from the multi-select
pub trait HelperTextFoundation {
    fn set_content(&mut self, content: &str);
    /// Updates the helper text for the control's current validity
    fn set_validity(&mut self, is_valid: bool);
    /// Whether the helper text is currently exposed to assistive tech
    fn is_visible(&self) -> bool;
    /// Element id referenced from `aria-describedby`
    fn id(&self) -> Option<String>;
}

/// Sub-foundations handed to the foundation at construction
#[derive(Default)]
pub struct FoundationMap {
    pub leading_icon: Option<Box<dyn IconFoundation>>,
    pub helper_text: Option<Box<dyn HelperTextFoundation>>,
}

impl FoundationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leading_icon(mut self, icon: Box<dyn IconFoundation>) -> Self {
        self.leading_icon = Some(icon);
        self
    }

    pub fn with_helper_text(mut self, helper_text: Box<dyn HelperTextFoundation>) -> Self {
        self.helper_text = Some(helper_text);
        self
    }
}

impl std::fmt::Debug for FoundationMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoundationMap")
            .field("leading_icon", &self.leading_icon.is_some())
            .field("helper_text", &self.helper_text.is_some())
            .finish()
    }
}
