//! Ratatui 终端 UI 模块
//!
//! 在终端中渲染多选控件，并把键盘、鼠标事件转交给控件。

pub mod app;
pub mod components;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::TuiApp;
pub use event::{EventPoll, TuiEvent};
pub use theme::{Theme, theme};
pub use ui::{HitAreas, draw, render};
