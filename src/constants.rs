//! Class names, attribute names and numeric constants shared by the
//! foundation and its hosts

/// CSS-style class names toggled on the root and menu elements
pub mod css_classes {
    pub const ACTIVATED: &str = "mdc-multi-select--activated";
    pub const DISABLED: &str = "mdc-multi-select--disabled";
    pub const FOCUSED: &str = "mdc-multi-select--focused";
    pub const INVALID: &str = "mdc-multi-select--invalid";
    pub const MENU_INVALID: &str = "mdc-multi-select__menu--invalid";
    pub const OUTLINED: &str = "mdc-multi-select--outlined";
    pub const REQUIRED: &str = "mdc-multi-select--required";
    pub const ROOT: &str = "mdc-multi-select";
    pub const WITH_LEADING_ICON: &str = "mdc-multi-select--with-leading-icon";
}

/// Attribute and event names
pub mod strings {
    pub const ARIA_CONTROLS: &str = "aria-controls";
    pub const ARIA_DESCRIBEDBY: &str = "aria-describedby";
    pub const ARIA_DISABLED: &str = "aria-disabled";
    pub const ARIA_EXPANDED: &str = "aria-expanded";
    pub const ARIA_INVALID: &str = "aria-invalid";
    pub const ARIA_REQUIRED: &str = "aria-required";
    pub const TABINDEX: &str = "tabindex";
    pub const CHANGE_EVENT: &str = "MDCMultiSelect:change";
}

/// Numeric tuning values
pub mod numbers {
    /// Scale applied to the label width when carving the outline notch
    pub const LABEL_SCALE: f32 = 0.75;
    /// Window during which a repeated click on the anchor is ignored
    pub const CLICK_DEBOUNCE_TIMEOUT_MS: u64 = 330;
}

/// Corner of the anchor element the menu surface attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopStart,
    TopEnd,
    #[default]
    BottomStart,
    BottomEnd,
}
