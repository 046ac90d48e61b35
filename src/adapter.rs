//! Capability boundary between the foundation and a rendering surface
//!
//! The foundation never touches elements directly. Every query and mutation
//! of the outside world (root classes, anchor attributes, label, outline,
//! line ripple and the option menu) goes through [`MultiSelectAdapter`].
//! Each method has a no-op default so that a host only implements what its
//! surface actually has; [`NoopAdapter`] is the all-defaults implementation.

use crate::constants::Corner;
use serde::{Deserialize, Serialize};

/// Payload of the change notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDetail {
    /// Values of the selected items, in selection order
    pub value: Vec<String>,
    /// Selected item indices, in selection order
    pub index: Vec<usize>,
}

/// Operations the foundation needs from its host
#[allow(unused_variables)]
pub trait MultiSelectAdapter {
    // Root element

    /// Adds a class to the root element
    fn add_class(&mut self, class_name: &str) {}

    /// Removes a class from the root element
    fn remove_class(&mut self, class_name: &str) {}

    /// Whether the root element carries the class
    fn has_class(&self, class_name: &str) -> bool {
        false
    }

    // Line ripple

    /// Shows the focused state of the bottom line
    fn activate_bottom_line(&mut self) {}

    /// Hides the focused state of the bottom line
    fn deactivate_bottom_line(&mut self) {}

    /// Moves the line ripple transform origin
    fn set_ripple_center(&mut self, normalized_x: f32) {}

    // Floating label

    fn has_label(&self) -> bool {
        false
    }

    fn float_label(&mut self, should_float: bool) {}

    /// Label width in surface units, 0 when there is no label
    fn label_width(&self) -> f32 {
        0.0
    }

    fn set_label_required(&mut self, is_required: bool) {}

    // Notched outline

    fn has_outline(&self) -> bool {
        false
    }

    /// Opens the outline notch to the given width
    fn notch_outline(&mut self, label_width: f32) {}

    fn close_outline(&mut self) {}

    // Anchor

    /// Emits the change event
    fn notify_change(&mut self, detail: &ChangeDetail) {}

    /// Replaces the text shown inside the anchor
    fn set_selected_text(&mut self, text: &str) {}

    fn is_select_anchor_focused(&self) -> bool {
        false
    }

    fn select_anchor_attr(&self, attr: &str) -> Option<String> {
        None
    }

    fn set_select_anchor_attr(&mut self, attr: &str, value: &str) {}

    fn remove_select_anchor_attr(&mut self, attr: &str) {}

    // Menu

    fn add_menu_class(&mut self, class_name: &str) {}

    fn remove_menu_class(&mut self, class_name: &str) {}

    fn open_menu(&mut self) {}

    fn close_menu(&mut self) {}

    /// Identifier of the anchor element, if the surface has one
    fn anchor_element(&self) -> Option<String> {
        None
    }

    fn set_menu_anchor_element(&mut self, anchor_id: &str) {}

    fn set_menu_anchor_corner(&mut self, corner: Corner) {}

    fn set_menu_wrap_focus(&mut self, wrap_focus: bool) {}

    fn focus_menu_item_at_index(&mut self, index: usize) {}

    fn menu_item_count(&self) -> usize {
        0
    }

    /// Value attribute of every menu item, in menu order
    fn menu_item_values(&self) -> Vec<String> {
        Vec::new()
    }

    /// Primary text of the item at `index`
    fn menu_item_text_at_index(&self, index: usize) -> String {
        String::new()
    }

    /// Indices currently marked selected in the menu
    fn selected_index(&self) -> Vec<usize> {
        Vec::new()
    }

    fn set_selected_index(&mut self, index: &[usize]) {}

    fn is_typeahead_in_progress(&self) -> bool {
        false
    }

    /// Appends `next_char` to the typeahead buffer and returns the next
    /// matching item after `starting_index`
    fn typeahead_match_item(
        &mut self,
        next_char: char,
        starting_index: Option<usize>,
    ) -> Option<usize> {
        None
    }
}

/// Adapter with every capability left at its no-op default
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAdapter;

impl MultiSelectAdapter for NoopAdapter {}
