//! Multi-select foundation
//!
//! Platform independent behaviour of the control: which items are selected,
//! when the menu opens and closes, how the label and outline react, and
//! whether the control is valid. The foundation holds only the state that
//! has no home on the rendering surface; everything else is read back from
//! the adapter on demand.

use crate::adapter::{ChangeDetail, MultiSelectAdapter};
use crate::constants::{Corner, css_classes, numbers, strings};
use crate::debounce::{Clock, DebounceTimer, SystemClock};
use crate::keyboard::{Key, KeyboardEvent};
use crate::menu_state::{MenuEvent, MenuPhase};
use crate::subfoundation::{FoundationMap, HelperTextFoundation, IconFoundation};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// State machine behind a multi-select control
pub struct MultiSelectFoundation<A: MultiSelectAdapter> {
    adapter: A,
    leading_icon: Option<Box<dyn IconFoundation>>,
    helper_text: Option<Box<dyn HelperTextFoundation>>,
    disabled: bool,
    menu_phase: MenuPhase,
    /// Required-but-empty is invalid unless validity is managed externally
    use_default_validation: bool,
    custom_validity: bool,
    last_selected_index: Vec<usize>,
    recently_clicked: bool,
    click_debounce: DebounceTimer,
    clock: Box<dyn Clock>,
}

impl<A: MultiSelectAdapter> MultiSelectFoundation<A> {
    pub fn new(adapter: A) -> Self {
        Self::with_foundation_map(adapter, FoundationMap::default())
    }

    pub fn with_foundation_map(adapter: A, foundation_map: FoundationMap) -> Self {
        Self {
            adapter,
            leading_icon: foundation_map.leading_icon,
            helper_text: foundation_map.helper_text,
            disabled: false,
            menu_phase: MenuPhase::Closed,
            use_default_validation: true,
            custom_validity: true,
            last_selected_index: Vec::new(),
            recently_clicked: false,
            click_debounce: DebounceTimer::new(Duration::from_millis(
                numbers::CLICK_DEBOUNCE_TIMEOUT_MS,
            )),
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the time source used by the click debounce
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Wires the menu to the anchor and syncs state from the surface
    pub fn init(&mut self) {
        if let Some(anchor_id) = self.adapter.anchor_element() {
            self.adapter.set_menu_anchor_element(&anchor_id);
            self.adapter.set_menu_anchor_corner(Corner::BottomStart);
        }
        self.adapter.set_menu_wrap_focus(false);

        let disabled = self.adapter.has_class(css_classes::DISABLED);
        self.set_disabled(disabled);
        let valid = !self.adapter.has_class(css_classes::INVALID);
        self.sync_helper_text_validity(valid);
        self.layout();
        self.layout_options();
        debug!(disabled, valid, "Multi-select foundation initialized");
    }

    /// Cancels the pending click debounce
    pub fn destroy(&mut self) {
        self.click_debounce.cancel();
        self.recently_clicked = false;
    }

    // Selection

    pub fn selected_index(&self) -> Vec<usize> {
        self.adapter.selected_index()
    }

    /// Replaces the selection with `index`, in the given order
    ///
    /// The whole call is ignored when any index is out of range.
    pub fn set_selected_index(&mut self, index: &[usize], close_menu: bool, skip_notify: bool) {
        let count = self.adapter.menu_item_count();
        if let Some(bad) = index.iter().find(|&&i| i >= count) {
            debug!(index = *bad, count, "Rejected out-of-range selection");
            return;
        }

        let text = index
            .iter()
            .map(|&i| self.adapter.menu_item_text_at_index(i).trim().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.adapter.set_selected_text(&text);
        self.adapter.set_selected_index(index);

        if close_menu {
            self.adapter.close_menu();
        }

        if !skip_notify && self.last_selected_index != index {
            self.handle_change();
        }

        trace!(?index, close_menu, skip_notify, "Selection committed");
        self.last_selected_index = index.to_vec();
    }

    /// Selects the first item matching each value; unknown values are dropped
    pub fn set_value(&mut self, value: &[String], skip_notify: bool) {
        let menu_item_values = self.adapter.menu_item_values();
        let index: Vec<usize> = value
            .iter()
            .filter_map(|v| menu_item_values.iter().position(|item| item == v))
            .collect();

        if index.len() != value.len() {
            debug!(
                requested = value.len(),
                matched = index.len(),
                "Dropped values without a matching item"
            );
        }
        self.set_selected_index(&index, false, skip_notify);
    }

    /// Values of the selected items, in selection order
    pub fn value(&self) -> Vec<String> {
        let menu_item_values = self.adapter.menu_item_values();
        self.adapter
            .selected_index()
            .into_iter()
            .filter_map(|i| menu_item_values.get(i).cloned())
            .collect()
    }

    // Disabled / required

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.adapter.add_class(css_classes::DISABLED);
            self.adapter.close_menu();
        } else {
            self.adapter.remove_class(css_classes::DISABLED);
        }

        if let Some(icon) = self.leading_icon.as_mut() {
            icon.set_disabled(disabled);
        }

        // Screen readers can still click a pointer-events: none anchor.
        if disabled {
            self.adapter.remove_select_anchor_attr(strings::TABINDEX);
        } else {
            self.adapter.set_select_anchor_attr(strings::TABINDEX, "0");
        }

        self.adapter
            .set_select_anchor_attr(strings::ARIA_DISABLED, bool_attr(disabled));
        debug!(disabled, "Disabled state changed");
    }

    pub fn required(&self) -> bool {
        self.adapter.select_anchor_attr(strings::ARIA_REQUIRED).as_deref() == Some("true")
    }

    pub fn set_required(&mut self, required: bool) {
        if required {
            self.adapter.add_class(css_classes::REQUIRED);
        } else {
            self.adapter.remove_class(css_classes::REQUIRED);
        }
        self.adapter
            .set_select_anchor_attr(strings::ARIA_REQUIRED, bool_attr(required));
        self.adapter.set_label_required(required);
    }

    // Menu lifecycle

    pub fn menu_phase(&self) -> MenuPhase {
        self.menu_phase
    }

    /// True from `open_menu` until the surface reports it fully closed
    pub fn is_menu_open(&self) -> bool {
        self.menu_phase.is_open()
    }

    pub fn open_menu(&mut self) {
        self.adapter.add_class(css_classes::ACTIVATED);
        self.adapter.open_menu();
        self.advance_menu(MenuEvent::OpenRequested);
        self.adapter.set_select_anchor_attr(strings::ARIA_EXPANDED, "true");
    }

    /// Focuses the last selected item, or the first item
    pub fn handle_menu_opened(&mut self) {
        self.advance_menu(MenuEvent::Opened);
        if self.adapter.menu_item_values().is_empty() {
            return;
        }

        let focus_index = self.adapter.selected_index().into_iter().max().unwrap_or(0);
        self.adapter.focus_menu_item_at_index(focus_index);
    }

    pub fn handle_menu_closing(&mut self) {
        self.advance_menu(MenuEvent::Closing);
        self.adapter.set_select_anchor_attr(strings::ARIA_EXPANDED, "false");
    }

    pub fn handle_menu_closed(&mut self) {
        self.adapter.remove_class(css_classes::ACTIVATED);
        self.advance_menu(MenuEvent::Closed);

        // Closed without focus coming back to the anchor: finish the blur
        // that handle_blur deferred.
        if !self.adapter.is_select_anchor_focused() {
            self.blur();
        }
    }

    /// Toggles `index` in the selection and closes the menu
    pub fn handle_menu_item_action(&mut self, index: usize) {
        let mut selected: Vec<usize> = Vec::new();
        for i in self.adapter.selected_index() {
            if !selected.contains(&i) {
                selected.push(i);
            }
        }

        match selected.iter().position(|&i| i == index) {
            Some(pos) => {
                selected.remove(pos);
            }
            None => selected.push(index),
        }

        self.set_selected_index(&selected, true, false);
    }

    // Focus, click, keyboard

    pub fn handle_focus(&mut self) {
        self.adapter.add_class(css_classes::FOCUSED);
        self.layout();
        self.adapter.activate_bottom_line();
    }

    pub fn handle_blur(&mut self) {
        if self.menu_phase.suppresses_blur() {
            trace!(phase = ?self.menu_phase, "Blur deferred until the menu closes");
            return;
        }
        self.blur();
    }

    /// Opens the menu, or closes it when already open
    ///
    /// `normalized_x` is the click position relative to the anchor and
    /// becomes the line ripple origin.
    pub fn handle_click(&mut self, normalized_x: f32) {
        self.poll_timers();
        if self.disabled || self.recently_clicked {
            trace!(disabled = self.disabled, "Click ignored");
            return;
        }

        self.set_click_debounce_timeout();

        if self.menu_phase.is_open() {
            self.adapter.close_menu();
            return;
        }

        self.adapter.set_ripple_center(normalized_x);
        self.open_menu();
    }

    /// Typeahead selection or menu opening from the anchor
    pub fn handle_keydown(&mut self, event: &mut KeyboardEvent) {
        if self.menu_phase.is_open() || !self.adapter.has_class(css_classes::FOCUSED) {
            return;
        }

        let is_space = event.key == Key::Space;
        let typeahead_char = match event.key {
            Key::Character(c) => Some(c),
            Key::Space if self.adapter.is_typeahead_in_progress() => Some(' '),
            _ => None,
        };

        if let Some(c) = typeahead_char.filter(|_| !event.has_modifier()) {
            let selected = self.adapter.selected_index();
            let starting_index = selected.iter().max().copied();
            let next = self.adapter.typeahead_match_item(c, starting_index);
            trace!(key = %c, ?starting_index, ?next, "Typeahead");

            match next {
                Some(next) if !selected.contains(&next) => {
                    let mut index = selected;
                    index.push(next);
                    self.set_selected_index(&index, false, false);
                }
                _ => {}
            }
            event.prevent_default();
            return;
        }

        let opens_menu = matches!(event.key, Key::Enter | Key::ArrowUp | Key::ArrowDown) || is_space;
        if !opens_menu {
            return;
        }

        self.open_menu();
        event.prevent_default();
    }

    // Layout

    /// Floats the label and notches the outline for the current state
    pub fn layout(&mut self) {
        if !self.adapter.has_label() {
            return;
        }

        let has_value = !self.value().is_empty();
        let is_focused = self.adapter.has_class(css_classes::FOCUSED);
        let should_float_and_notch = has_value || is_focused;
        let is_required = self.adapter.has_class(css_classes::REQUIRED);

        self.notch_outline(should_float_and_notch);
        self.adapter.float_label(should_float_and_notch);
        self.adapter.set_label_required(is_required);
    }

    /// Drops selected indices that no longer exist in the menu
    ///
    /// Call after the menu items change.
    pub fn layout_options(&mut self) {
        let item_count = self.adapter.menu_item_values().len();
        let selected: Vec<usize> = self
            .adapter
            .selected_index()
            .into_iter()
            .filter(|&i| i < item_count)
            .collect();
        self.set_selected_index(&selected, false, true);
    }

    pub fn notch_outline(&mut self, open_notch: bool) {
        if !self.adapter.has_outline() {
            return;
        }

        if open_notch {
            let label_width = self.adapter.label_width() * numbers::LABEL_SCALE;
            self.adapter.notch_outline(label_width);
        } else if !self.adapter.has_class(css_classes::FOCUSED) {
            self.adapter.close_outline();
        }
    }

    // Leading icon and helper text

    pub fn set_leading_icon_aria_label(&mut self, label: &str) {
        if let Some(icon) = self.leading_icon.as_mut() {
            icon.set_aria_label(label);
        }
    }

    pub fn set_leading_icon_content(&mut self, content: &str) {
        if let Some(icon) = self.leading_icon.as_mut() {
            icon.set_content(content);
        }
    }

    pub fn set_helper_text_content(&mut self, content: &str) {
        if let Some(helper_text) = self.helper_text.as_mut() {
            helper_text.set_content(content);
        }
    }

    // Validity

    pub fn use_default_validation(&self) -> bool {
        self.use_default_validation
    }

    pub fn set_use_default_validation(&mut self, use_default_validation: bool) {
        self.use_default_validation = use_default_validation;
    }

    pub fn set_valid(&mut self, is_valid: bool) {
        if !self.use_default_validation {
            self.custom_validity = is_valid;
        }

        self.adapter
            .set_select_anchor_attr(strings::ARIA_INVALID, bool_attr(!is_valid));
        if is_valid {
            self.adapter.remove_class(css_classes::INVALID);
            self.adapter.remove_menu_class(css_classes::MENU_INVALID);
        } else {
            self.adapter.add_class(css_classes::INVALID);
            self.adapter.add_menu_class(css_classes::MENU_INVALID);
        }

        self.sync_helper_text_validity(is_valid);
        debug!(is_valid, "Validity updated");
    }

    pub fn is_valid(&self) -> bool {
        if self.use_default_validation
            && self.adapter.has_class(css_classes::REQUIRED)
            && !self.adapter.has_class(css_classes::DISABLED)
        {
            // Invalid when nothing is selected or every selected item has an
            // empty value.
            let selected = self.adapter.selected_index();
            if selected.is_empty() {
                return false;
            }

            let menu_item_values = self.adapter.menu_item_values();
            return selected
                .iter()
                .any(|&i| menu_item_values.get(i).is_some_and(|v| !v.is_empty()));
        }

        self.custom_validity
    }

    // Timers

    /// Fires the click debounce if its deadline has passed
    pub fn poll_timers(&mut self) {
        if self.click_debounce.fire_if_due(self.clock.now()) {
            self.recently_clicked = false;
        }
    }

    /// When `poll_timers` next has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.click_debounce.next_deadline()
    }

    // Internals

    fn handle_change(&mut self) {
        self.layout();

        let detail = ChangeDetail {
            value: self.value(),
            index: self.adapter.selected_index(),
        };
        debug!(index = ?detail.index, value = ?detail.value, "Selection changed");
        self.adapter.notify_change(&detail);

        self.revalidate_if_required();
    }

    fn blur(&mut self) {
        self.adapter.remove_class(css_classes::FOCUSED);
        self.layout();
        self.adapter.deactivate_bottom_line();
        self.revalidate_if_required();
    }

    fn revalidate_if_required(&mut self) {
        if self.adapter.has_class(css_classes::REQUIRED) && self.use_default_validation {
            let valid = self.is_valid();
            self.set_valid(valid);
        }
    }

    fn sync_helper_text_validity(&mut self, is_valid: bool) {
        let Some(helper_text) = self.helper_text.as_mut() else {
            return;
        };

        helper_text.set_validity(is_valid);

        // Screen readers announce describedby targets even when hidden.
        match helper_text.id() {
            Some(id) if helper_text.is_visible() && !id.is_empty() => {
                self.adapter.set_select_anchor_attr(strings::ARIA_DESCRIBEDBY, &id);
            }
            _ => self.adapter.remove_select_anchor_attr(strings::ARIA_DESCRIBEDBY),
        }
    }

    fn set_click_debounce_timeout(&mut self) {
        self.click_debounce.arm(self.clock.now());
        self.recently_clicked = true;
    }

    fn advance_menu(&mut self, event: MenuEvent) {
        self.menu_phase = self.menu_phase.transition(event);
    }
}

impl<A: MultiSelectAdapter + std::fmt::Debug> std::fmt::Debug for MultiSelectFoundation<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiSelectFoundation")
            .field("adapter", &self.adapter)
            .field("disabled", &self.disabled)
            .field("menu_phase", &self.menu_phase)
            .field("use_default_validation", &self.use_default_validation)
            .field("custom_validity", &self.custom_validity)
            .field("last_selected_index", &self.last_selected_index)
            .field("recently_clicked", &self.recently_clicked)
            .finish_non_exhaustive()
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
