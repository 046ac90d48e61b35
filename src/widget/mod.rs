//! Headless multi-select widget
//!
//! Pairs the foundation with [`MultiSelectModel`] and plays the role of the
//! event wiring a rendering host would do: surface signals queued by the
//! model are dispatched back into the foundation after every call.

pub mod model;
pub mod subwidgets;
pub mod typeahead;

pub use model::{
    LabelModel, LineRippleModel, MenuItemModel, MenuModel, MultiSelectModel, OutlineModel,
    SurfaceSignal,
};
pub use subwidgets::{HelperText, HelperTextState, LeadingIcon, LeadingIconState};
pub use typeahead::TypeaheadBuffer;

use crate::adapter::{ChangeDetail, MultiSelectAdapter};
use crate::config::{ItemConfig, WidgetConfig};
use crate::constants::{css_classes, strings};
use crate::debounce::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::foundation::MultiSelectFoundation;
use crate::keyboard::KeyboardEvent;
use crate::menu_state::MenuPhase;
use crate::subfoundation::FoundationMap;
use std::time::Instant;
use tracing::{debug, info};

/// A multi-select control backed by an in-memory element model
#[derive(Debug)]
pub struct MultiSelect {
    foundation: MultiSelectFoundation<MultiSelectModel>,
    leading_icon: Option<LeadingIcon>,
    helper_text: Option<HelperText>,
}

impl MultiSelect {
    /// Builds the control described by `config`
    pub fn attach(config: &WidgetConfig) -> Result<Self> {
        Self::attach_with_clock(config, SystemClock)
    }

    /// Builds the control with an explicit time source
    pub fn attach_with_clock<C: Clock + Clone + 'static>(
        config: &WidgetConfig,
        clock: C,
    ) -> Result<Self> {
        let anchor_id = config
            .anchor_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::MissingElement {
                element: "select anchor".to_string(),
            })?
            .to_string();

        let mut model = MultiSelectModel::new()
            .with_clock(Box::new(clock.clone()))
            .with_items(menu_items(&config.items));
        model.anchor_id = Some(anchor_id);
        model.root_classes.insert(css_classes::ROOT.to_string());
        if config.disabled {
            model.root_classes.insert(css_classes::DISABLED.to_string());
        }
        model.label = config.label.as_ref().map(LabelModel::new);
        if config.outlined {
            model.root_classes.insert(css_classes::OUTLINED.to_string());
            model.outline = Some(OutlineModel::default());
        } else {
            model.line_ripple = Some(LineRippleModel::default());
        }

        let mut foundation_map = FoundationMap::new();

        let leading_icon = config.leading_icon.as_ref().map(|icon_config| {
            model
                .root_classes
                .insert(css_classes::WITH_LEADING_ICON.to_string());
            LeadingIcon::new(icon_config.content.clone())
        });
        if let Some(icon) = &leading_icon {
            foundation_map = foundation_map.with_leading_icon(Box::new(icon.clone()));
        }

        // Helper text is found through the anchor's aria-controls
        let helper_text = config.helper_text.as_ref().map(|helper_config| {
            model.anchor_attrs.insert(
                strings::ARIA_CONTROLS.to_string(),
                helper_config.id.clone(),
            );
            HelperText::new(helper_config.id.clone(), helper_config.content.clone())
                .persistent(helper_config.persistent)
                .validation_msg(helper_config.validation_msg)
        });
        if let Some(helper) = &helper_text {
            foundation_map = foundation_map.with_helper_text(Box::new(helper.clone()));
        }

        let foundation = MultiSelectFoundation::with_foundation_map(model, foundation_map)
            .with_clock(Box::new(clock));

        let mut widget = Self {
            foundation,
            leading_icon,
            helper_text,
        };

        widget.foundation.init();
        widget.foundation.set_required(config.required);
        widget
            .foundation
            .set_use_default_validation(config.use_default_validation);
        if let Some(label) = config
            .leading_icon
            .as_ref()
            .and_then(|icon| icon.aria_label.as_deref())
        {
            widget.foundation.set_leading_icon_aria_label(label);
        }
        if !config.initial_value.is_empty() {
            widget.foundation.set_value(&config.initial_value, true);
            widget.foundation.layout();
        }
        widget.dispatch_signals();

        info!(
            items = config.items.len(),
            required = config.required,
            outlined = config.outlined,
            "Multi-select attached"
        );
        Ok(widget)
    }

    pub fn model(&self) -> &MultiSelectModel {
        self.foundation.adapter()
    }

    pub fn foundation(&self) -> &MultiSelectFoundation<MultiSelectModel> {
        &self.foundation
    }

    pub fn leading_icon(&self) -> Option<LeadingIconState> {
        self.leading_icon.as_ref().map(LeadingIcon::snapshot)
    }

    pub fn helper_text(&self) -> Option<HelperTextState> {
        self.helper_text.as_ref().map(HelperText::snapshot)
    }

    /// Change events emitted since the last call
    pub fn take_changes(&mut self) -> Vec<ChangeDetail> {
        self.foundation.adapter_mut().take_changes()
    }

    // Properties

    pub fn value(&self) -> Vec<String> {
        self.foundation.value()
    }

    pub fn set_value(&mut self, value: &[String], skip_notify: bool) {
        self.foundation.set_value(value, skip_notify);
        self.dispatch_signals();
    }

    pub fn selected_index(&self) -> Vec<usize> {
        self.foundation.selected_index()
    }

    /// Replaces the selection and closes the menu
    pub fn set_selected_index(&mut self, index: &[usize], skip_notify: bool) {
        self.foundation.set_selected_index(index, true, skip_notify);
        self.dispatch_signals();
    }

    pub fn disabled(&self) -> bool {
        self.foundation.disabled()
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.foundation.set_disabled(disabled);
        self.dispatch_signals();
    }

    pub fn required(&self) -> bool {
        self.foundation.required()
    }

    pub fn set_required(&mut self, required: bool) {
        self.foundation.set_required(required);
    }

    pub fn valid(&self) -> bool {
        self.foundation.is_valid()
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.foundation.set_valid(valid);
    }

    pub fn set_use_default_validation(&mut self, use_default_validation: bool) {
        self.foundation
            .set_use_default_validation(use_default_validation);
    }

    pub fn set_leading_icon_aria_label(&mut self, label: &str) {
        self.foundation.set_leading_icon_aria_label(label);
    }

    pub fn set_leading_icon_content(&mut self, content: &str) {
        self.foundation.set_leading_icon_content(content);
    }

    pub fn set_helper_text_content(&mut self, content: &str) {
        self.foundation.set_helper_text_content(content);
    }

    pub fn layout(&mut self) {
        self.foundation.layout();
    }

    pub fn layout_options(&mut self) {
        self.foundation.layout_options();
    }

    /// Replaces the menu options and drops selections that no longer exist
    pub fn set_items(&mut self, items: &[ItemConfig]) {
        self.foundation.adapter_mut().replace_items(menu_items(items));
        self.foundation.layout_options();
        debug!(count = items.len(), "Menu items replaced");
    }

    pub fn menu_phase(&self) -> MenuPhase {
        self.foundation.menu_phase()
    }

    // Input

    /// Anchor gained focus
    pub fn focus(&mut self) {
        self.foundation.adapter_mut().anchor_focused = true;
        self.foundation.handle_focus();
        self.dispatch_signals();
    }

    /// Anchor or menu lost focus to something outside the control
    pub fn blur(&mut self) {
        let model = self.foundation.adapter_mut();
        model.anchor_focused = false;
        model.menu.focused_item = None;
        self.foundation.handle_blur();
        self.dispatch_signals();
    }

    /// Pointer activation of the anchor at `x` cells from its left edge
    pub fn click(&mut self, x: f32) {
        if !self.foundation.adapter().anchor_focused && !self.foundation.disabled() {
            self.focus();
        }
        self.foundation.handle_click(x);
        self.dispatch_signals();
    }

    pub fn keydown(&mut self, event: &mut KeyboardEvent) {
        self.foundation.handle_keydown(event);
        self.dispatch_signals();
    }

    /// Moves focus inside the open menu
    pub fn move_item_focus(&mut self, forward: bool) {
        if !self.foundation.adapter().menu.open {
            return;
        }
        self.foundation.adapter_mut().move_item_focus(forward);
        self.dispatch_signals();
    }

    /// Toggles the focused menu item
    pub fn activate_focused_item(&mut self) {
        let menu = &self.foundation.adapter().menu;
        let focused_item = if menu.open { menu.focused_item } else { None };
        if let Some(index) = focused_item {
            self.foundation.handle_menu_item_action(index);
            self.dispatch_signals();
        }
    }

    /// Toggles the item at `index` as if it was picked in the menu
    pub fn activate_item(&mut self, index: usize) {
        self.foundation.handle_menu_item_action(index);
        self.dispatch_signals();
    }

    /// Dismisses the menu without changing the selection
    pub fn close_menu(&mut self) {
        self.foundation.adapter_mut().close_menu();
        self.dispatch_signals();
    }

    // Timers and teardown

    pub fn poll_timers(&mut self) {
        self.foundation.poll_timers();
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.foundation.next_deadline()
    }

    pub fn destroy(&mut self) {
        self.foundation.destroy();
        debug!("Multi-select destroyed");
    }

    /// Feeds queued surface signals back into the foundation
    fn dispatch_signals(&mut self) {
        while let Some(signal) = self.foundation.adapter_mut().pop_signal() {
            match signal {
                SurfaceSignal::MenuOpened => self.foundation.handle_menu_opened(),
                SurfaceSignal::MenuClosing => self.foundation.handle_menu_closing(),
                SurfaceSignal::MenuClosed => self.foundation.handle_menu_closed(),
                SurfaceSignal::AnchorBlurred => self.foundation.handle_blur(),
                SurfaceSignal::AnchorFocusRestored => self.foundation.handle_focus(),
            }
        }
    }
}

impl Drop for MultiSelect {
    fn drop(&mut self) {
        self.foundation.destroy();
    }
}

fn menu_items(items: &[ItemConfig]) -> Vec<MenuItemModel> {
    items
        .iter()
        .map(|item| MenuItemModel::new(item.text.clone(), item.value()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HelperTextConfig, LeadingIconConfig};
    use crate::debounce::ManualClock;
    use crate::keyboard::Key;
    use std::time::Duration;

    fn fruit_config() -> WidgetConfig {
        WidgetConfig {
            anchor_id: Some("fruit".into()),
            label: Some("Fruits".into()),
            outlined: true,
            items: vec![
                ItemConfig::with_value("None", ""),
                ItemConfig::with_value("Apple", "apple"),
                ItemConfig::with_value("Banana", "banana"),
                ItemConfig::with_value("Blueberry", "blueberry"),
                ItemConfig::with_value("Cherry", "cherry"),
            ],
            ..Default::default()
        }
    }

    fn attach(config: &WidgetConfig) -> (MultiSelect, ManualClock) {
        let clock = ManualClock::new();
        let widget = MultiSelect::attach_with_clock(config, clock.clone()).unwrap();
        (widget, clock)
    }

    #[test]
    fn test_missing_anchor_fails() {
        let config = WidgetConfig {
            anchor_id: None,
            ..fruit_config()
        };
        let err = MultiSelect::attach(&config).unwrap_err();
        assert!(matches!(err, Error::MissingElement { .. }));

        let config = WidgetConfig {
            anchor_id: Some(String::new()),
            ..fruit_config()
        };
        assert!(MultiSelect::attach(&config).is_err());
    }

    #[test]
    fn test_attach_initial_state() {
        let config = WidgetConfig {
            initial_value: vec!["banana".into(), "kiwi".into()],
            ..fruit_config()
        };
        let (mut widget, _) = attach(&config);

        assert_eq!(widget.selected_index(), vec![2]);
        assert_eq!(widget.model().selected_text, "Banana");
        assert_eq!(widget.model().menu.anchor_id.as_deref(), Some("fruit"));
        assert!(!widget.model().menu.wrap_focus);
        assert!(widget.model().label.as_ref().unwrap().floated);
        assert_eq!(widget.model().outline.as_ref().unwrap().notch_width, Some(4.5));
        assert!(widget.take_changes().is_empty());
    }

    #[test]
    fn test_click_toggle_flow() {
        let (mut widget, clock) = attach(&fruit_config());

        widget.click(3.0);
        assert_eq!(widget.menu_phase(), MenuPhase::Open);
        assert!(widget.model().menu.open);
        // Nothing selected: first item focused, anchor blur deferred
        assert_eq!(widget.model().menu.focused_item, Some(0));
        assert!(widget.model().has_class(css_classes::FOCUSED));

        widget.move_item_focus(true);
        widget.activate_focused_item();
        assert_eq!(widget.selected_index(), vec![1]);
        assert_eq!(widget.menu_phase(), MenuPhase::Closed);
        assert!(widget.model().anchor_focused);
        assert!(widget.model().has_class(css_classes::FOCUSED));

        clock.advance(Duration::from_millis(400));
        widget.click(3.0);
        assert_eq!(widget.model().menu.focused_item, Some(1));
        widget.move_item_focus(true);
        widget.move_item_focus(true);
        widget.activate_focused_item();
        assert_eq!(widget.selected_index(), vec![1, 3]);
        assert_eq!(widget.value(), vec!["apple".to_string(), "blueberry".to_string()]);
        assert_eq!(widget.model().selected_text, "Apple, Blueberry");

        let changes = widget.take_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[1].index, vec![1, 3]);
    }

    #[test]
    fn test_rapid_clicks_are_debounced() {
        let (mut widget, clock) = attach(&fruit_config());
        widget.click(0.0);
        assert!(widget.model().menu.open);
        clock.advance(Duration::from_millis(50));
        widget.click(0.0);
        assert!(widget.model().menu.open);
        assert_eq!(widget.menu_phase(), MenuPhase::Open);
    }

    #[test]
    fn test_escape_then_blur_validates() {
        let config = WidgetConfig {
            required: true,
            ..fruit_config()
        };
        let (mut widget, _) = attach(&config);
        assert!(widget.required());

        widget.click(0.0);
        // Focus leaves the control while the menu is still open
        widget.blur();
        assert!(widget.model().has_class(css_classes::FOCUSED));
        assert!(!widget.model().has_class(css_classes::INVALID));

        widget.close_menu();
        assert!(!widget.model().has_class(css_classes::FOCUSED));
        assert!(widget.model().has_class(css_classes::INVALID));
        assert!(!widget.valid());
    }

    #[test]
    fn test_keyboard_typeahead() {
        let (mut widget, _) = attach(&fruit_config());
        widget.focus();

        let mut event = KeyboardEvent::new(Key::Character('b'));
        widget.keydown(&mut event);
        assert!(event.default_prevented());
        assert_eq!(widget.selected_index(), vec![2]);

        let mut event = KeyboardEvent::new(Key::Character('b'));
        widget.keydown(&mut event);
        assert_eq!(widget.selected_index(), vec![2, 3]);
        assert!(!widget.model().menu.open);

        let mut event = KeyboardEvent::new(Key::Enter);
        widget.keydown(&mut event);
        assert!(widget.model().menu.open);
        assert_eq!(widget.model().menu.focused_item, Some(3));
    }

    #[test]
    fn test_set_items_drops_stale_selection() {
        let (mut widget, _) = attach(&fruit_config());
        widget.set_selected_index(&[0, 3, 4], false);
        assert_eq!(widget.take_changes().len(), 1);

        widget.set_items(&[ItemConfig::new("Kiwi"), ItemConfig::new("Lime")]);
        assert_eq!(widget.selected_index(), vec![0]);
        assert_eq!(widget.value(), vec!["Kiwi".to_string()]);
        assert!(widget.take_changes().is_empty());
    }

    #[test]
    fn test_set_items_while_menu_open() {
        let (mut widget, _) = attach(&fruit_config());
        widget.click(0.0);
        widget.move_item_focus(true);
        widget.move_item_focus(true);
        widget.move_item_focus(true);
        widget.move_item_focus(true);
        assert_eq!(widget.model().menu.focused_item, Some(4));

        widget.set_items(&[ItemConfig::new("Kiwi"), ItemConfig::new("Lime")]);
        assert_eq!(widget.model().menu.focused_item, Some(1));

        widget.activate_focused_item();
        assert_eq!(widget.selected_index(), vec![1]);
        assert_eq!(widget.value(), vec!["Lime".to_string()]);
        assert_eq!(widget.menu_phase(), MenuPhase::Closed);
    }

    #[test]
    fn test_disabled_blocks_click() {
        let config = WidgetConfig {
            disabled: true,
            ..fruit_config()
        };
        let (mut widget, _) = attach(&config);
        assert!(widget.disabled());
        assert!(!widget.model().anchor_attrs.contains_key(strings::TABINDEX));

        widget.click(0.0);
        assert!(!widget.model().menu.open);

        widget.set_disabled(false);
        widget.click(0.0);
        assert!(widget.model().menu.open);
    }

    #[test]
    fn test_helper_text_and_icon() {
        let config = WidgetConfig {
            required: true,
            leading_icon: Some(LeadingIconConfig {
                content: "*".into(),
                aria_label: Some("Fruit".into()),
            }),
            helper_text: Some(HelperTextConfig {
                id: "fruit-help".into(),
                content: "Pick one".into(),
                persistent: false,
                validation_msg: true,
            }),
            ..fruit_config()
        };
        let (mut widget, _) = attach(&config);

        assert_eq!(
            widget.model().anchor_attrs.get(strings::ARIA_CONTROLS).map(String::as_str),
            Some("fruit-help")
        );
        assert!(widget.model().has_class(css_classes::WITH_LEADING_ICON));
        assert_eq!(widget.leading_icon().unwrap().aria_label.as_deref(), Some("Fruit"));

        // Valid at init: the validation message is hidden
        assert!(!widget.helper_text().unwrap().visible);
        assert!(!widget.model().anchor_attrs.contains_key(strings::ARIA_DESCRIBEDBY));

        widget.set_value(&["".to_string()], false);
        assert!(!widget.valid());
        assert!(widget.helper_text().unwrap().visible);
        assert_eq!(
            widget.model().anchor_attrs.get(strings::ARIA_DESCRIBEDBY).map(String::as_str),
            Some("fruit-help")
        );

        widget.set_helper_text_content("At least one fruit");
        widget.set_leading_icon_content("+");
        assert_eq!(widget.helper_text().unwrap().content, "At least one fruit");
        assert_eq!(widget.leading_icon().unwrap().content, "+");

        widget.set_disabled(true);
        assert!(widget.leading_icon().unwrap().disabled);
    }

    #[test]
    fn test_custom_validation() {
        let config = WidgetConfig {
            required: true,
            use_default_validation: false,
            ..fruit_config()
        };
        let (mut widget, _) = attach(&config);
        assert!(widget.valid());
        widget.set_valid(false);
        widget.activate_item(1);
        assert!(!widget.valid());
    }

    #[test]
    fn test_destroy_cancels_timer() {
        let (mut widget, _) = attach(&fruit_config());
        widget.click(0.0);
        assert!(widget.next_deadline().is_some());
        widget.destroy();
        assert!(widget.next_deadline().is_none());
    }
}
