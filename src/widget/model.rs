//! Retained element model implementing the adapter
//!
//! Stands in for the rendered elements: the foundation mutates it through
//! [`MultiSelectAdapter`] and a renderer reads it back. Menu surface
//! progress is not reported synchronously; it is queued as
//! [`SurfaceSignal`]s for the owner to dispatch.

use crate::adapter::{ChangeDetail, MultiSelectAdapter};
use crate::constants::{Corner, strings};
use crate::debounce::{Clock, SystemClock};
use crate::widget::typeahead::TypeaheadBuffer;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::{debug, trace};
use unicode_width::UnicodeWidthStr;

/// Event raised by the menu surface or the focus system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceSignal {
    MenuOpened,
    MenuClosing,
    MenuClosed,
    /// Focus moved from the anchor into the menu
    AnchorBlurred,
    /// Focus returned from the menu to the anchor
    AnchorFocusRestored,
}

/// One menu option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemModel {
    pub text: String,
    pub value: String,
}

impl MenuItemModel {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelModel {
    pub text: String,
    pub floated: bool,
    pub required: bool,
}

impl LabelModel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Width in terminal cells
    pub fn width(&self) -> f32 {
        self.text.width() as f32
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineModel {
    /// Notch width while notched
    pub notch_width: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineRippleModel {
    pub active: bool,
    pub center: Option<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct MenuModel {
    pub items: Vec<MenuItemModel>,
    pub selected: Vec<usize>,
    pub open: bool,
    pub focused_item: Option<usize>,
    pub anchor_id: Option<String>,
    pub anchor_corner: Corner,
    pub wrap_focus: bool,
    pub classes: BTreeSet<String>,
}

/// In-memory stand-in for the multi-select elements
#[derive(Debug)]
pub struct MultiSelectModel {
    pub root_classes: BTreeSet<String>,
    pub anchor_id: Option<String>,
    pub anchor_attrs: BTreeMap<String, String>,
    pub anchor_focused: bool,
    pub selected_text: String,
    pub label: Option<LabelModel>,
    pub outline: Option<OutlineModel>,
    pub line_ripple: Option<LineRippleModel>,
    pub menu: MenuModel,
    typeahead: TypeaheadBuffer,
    signals: VecDeque<SurfaceSignal>,
    changes: Vec<ChangeDetail>,
    clock: Box<dyn Clock>,
}

impl Default for MultiSelectModel {
    fn default() -> Self {
        Self {
            root_classes: BTreeSet::new(),
            anchor_id: None,
            anchor_attrs: BTreeMap::new(),
            anchor_focused: false,
            selected_text: String::new(),
            label: None,
            outline: None,
            line_ripple: None,
            menu: MenuModel::default(),
            typeahead: TypeaheadBuffer::new(),
            signals: VecDeque::new(),
            changes: Vec::new(),
            clock: Box::new(SystemClock),
        }
    }
}

impl MultiSelectModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_items(mut self, items: Vec<MenuItemModel>) -> Self {
        self.menu.items = items;
        self
    }

    /// Swaps the menu options; item focus is clamped and typeahead restarts
    pub fn replace_items(&mut self, items: Vec<MenuItemModel>) {
        let count = items.len();
        self.menu.items = items;
        self.menu.focused_item = self
            .menu
            .focused_item
            .and_then(|i| count.checked_sub(1).map(|last| i.min(last)));
        self.typeahead.clear();
    }

    /// Next queued surface signal
    pub fn pop_signal(&mut self) -> Option<SurfaceSignal> {
        self.signals.pop_front()
    }

    /// Change events emitted since the last call
    pub fn take_changes(&mut self) -> Vec<ChangeDetail> {
        std::mem::take(&mut self.changes)
    }

    /// Moves focus between menu items; stops at the ends unless wrapping
    pub fn move_item_focus(&mut self, forward: bool) {
        let count = self.menu.items.len();
        if count == 0 {
            return;
        }

        let next = match (self.menu.focused_item, forward) {
            (None, _) => 0,
            (Some(i), true) if i + 1 < count => i + 1,
            (Some(_), true) if self.menu.wrap_focus => 0,
            (Some(i), true) => i,
            (Some(0), false) if self.menu.wrap_focus => count - 1,
            (Some(i), false) => i.saturating_sub(1),
        };
        self.focus_menu_item_at_index(next);
    }
}

impl MultiSelectAdapter for MultiSelectModel {
    fn add_class(&mut self, class_name: &str) {
        self.root_classes.insert(class_name.to_string());
    }

    fn remove_class(&mut self, class_name: &str) {
        self.root_classes.remove(class_name);
    }

    fn has_class(&self, class_name: &str) -> bool {
        self.root_classes.contains(class_name)
    }

    fn activate_bottom_line(&mut self) {
        if let Some(ripple) = self.line_ripple.as_mut() {
            ripple.active = true;
        }
    }

    fn deactivate_bottom_line(&mut self) {
        if let Some(ripple) = self.line_ripple.as_mut() {
            ripple.active = false;
        }
    }

    fn set_ripple_center(&mut self, normalized_x: f32) {
        if let Some(ripple) = self.line_ripple.as_mut() {
            ripple.center = Some(normalized_x);
        }
    }

    fn has_label(&self) -> bool {
        self.label.is_some()
    }

    fn float_label(&mut self, should_float: bool) {
        if let Some(label) = self.label.as_mut() {
            label.floated = should_float;
        }
    }

    fn label_width(&self) -> f32 {
        self.label.as_ref().map_or(0.0, LabelModel::width)
    }

    fn set_label_required(&mut self, is_required: bool) {
        if let Some(label) = self.label.as_mut() {
            label.required = is_required;
        }
    }

    fn has_outline(&self) -> bool {
        self.outline.is_some()
    }

    fn notch_outline(&mut self, label_width: f32) {
        if let Some(outline) = self.outline.as_mut() {
            outline.notch_width = Some(label_width);
        }
    }

    fn close_outline(&mut self) {
        if let Some(outline) = self.outline.as_mut() {
            outline.notch_width = None;
        }
    }

    fn notify_change(&mut self, detail: &ChangeDetail) {
        debug!(
            event = strings::CHANGE_EVENT,
            index = ?detail.index,
            value = ?detail.value,
            "Emitting change event"
        );
        self.changes.push(detail.clone());
    }

    fn set_selected_text(&mut self, text: &str) {
        self.selected_text = text.to_string();
    }

    fn is_select_anchor_focused(&self) -> bool {
        self.anchor_focused
    }

    fn select_anchor_attr(&self, attr: &str) -> Option<String> {
        self.anchor_attrs.get(attr).cloned()
    }

    fn set_select_anchor_attr(&mut self, attr: &str, value: &str) {
        self.anchor_attrs.insert(attr.to_string(), value.to_string());
    }

    fn remove_select_anchor_attr(&mut self, attr: &str) {
        self.anchor_attrs.remove(attr);
    }

    fn add_menu_class(&mut self, class_name: &str) {
        self.menu.classes.insert(class_name.to_string());
    }

    fn remove_menu_class(&mut self, class_name: &str) {
        self.menu.classes.remove(class_name);
    }

    fn open_menu(&mut self) {
        if self.menu.open {
            return;
        }
        self.menu.open = true;
        self.signals.push_back(SurfaceSignal::MenuOpened);
    }

    fn close_menu(&mut self) {
        if !self.menu.open {
            return;
        }
        self.menu.open = false;
        self.signals.push_back(SurfaceSignal::MenuClosing);
        // Focus inside the menu goes back to the anchor before it is gone
        if self.menu.focused_item.take().is_some() {
            self.anchor_focused = true;
            self.signals.push_back(SurfaceSignal::AnchorFocusRestored);
        }
        self.signals.push_back(SurfaceSignal::MenuClosed);
    }

    fn anchor_element(&self) -> Option<String> {
        self.anchor_id.clone()
    }

    fn set_menu_anchor_element(&mut self, anchor_id: &str) {
        self.menu.anchor_id = Some(anchor_id.to_string());
    }

    fn set_menu_anchor_corner(&mut self, corner: Corner) {
        self.menu.anchor_corner = corner;
    }

    fn set_menu_wrap_focus(&mut self, wrap_focus: bool) {
        self.menu.wrap_focus = wrap_focus;
    }

    fn focus_menu_item_at_index(&mut self, index: usize) {
        if index >= self.menu.items.len() {
            return;
        }
        trace!(index, "Focusing menu item");
        self.menu.focused_item = Some(index);
        if self.anchor_focused {
            self.anchor_focused = false;
            self.signals.push_back(SurfaceSignal::AnchorBlurred);
        }
    }

    fn menu_item_count(&self) -> usize {
        self.menu.items.len()
    }

    fn menu_item_values(&self) -> Vec<String> {
        self.menu.items.iter().map(|item| item.value.clone()).collect()
    }

    fn menu_item_text_at_index(&self, index: usize) -> String {
        self.menu
            .items
            .get(index)
            .map(|item| item.text.clone())
            .unwrap_or_default()
    }

    fn selected_index(&self) -> Vec<usize> {
        self.menu.selected.clone()
    }

    fn set_selected_index(&mut self, index: &[usize]) {
        self.menu.selected = index.to_vec();
    }

    fn is_typeahead_in_progress(&self) -> bool {
        self.typeahead.in_progress(self.clock.as_ref())
    }

    fn typeahead_match_item(
        &mut self,
        next_char: char,
        starting_index: Option<usize>,
    ) -> Option<usize> {
        let texts: Vec<String> = self.menu.items.iter().map(|item| item.text.clone()).collect();
        self.typeahead
            .match_item(&texts, next_char, starting_index, self.clock.as_ref())
    }
}
