//! Multi-select - A headless multi-select form control
//!
//! This library provides the platform independent state machine behind a
//! multi-select dropdown with support for:
//! - Multiple selection with ordered indices and values
//! - Menu open/close lifecycle with deferred blur
//! - Floating label, notched outline and line ripple coordination
//! - Required validation and helper text
//! - Typeahead selection and click debouncing
//! - A retained element model and a ratatui terminal host

pub mod adapter;
pub mod cli;
pub mod config;
pub mod constants;
pub mod debounce;
pub mod error;
pub mod foundation;
pub mod keyboard;
pub mod menu_state;
pub mod subfoundation;
pub mod tui;
pub mod widget;

pub use adapter::{ChangeDetail, MultiSelectAdapter, NoopAdapter};
pub use cli::Cli;
pub use config::{ConfigError, HelperTextConfig, ItemConfig, LeadingIconConfig, WidgetConfig};
pub use debounce::{Clock, DebounceTimer, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use foundation::MultiSelectFoundation;
pub use keyboard::{Key, KeyboardEvent};
pub use menu_state::{MenuEvent, MenuPhase};
pub use subfoundation::{FoundationMap, HelperTextFoundation, IconFoundation};
pub use tui::TuiApp;
pub use widget::{MultiSelect, MultiSelectModel};
