//! 主题模块
//!
//! 多选控件各状态的统一配色。

use ratatui::style::{Color, Modifier, Style};

/// 主题颜色配置
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// 背景色（深色主题）
    pub bg: Color,
    /// 前景色（白色）
    pub fg: Color,
    /// 强调色（青色），用于聚焦和激活状态
    pub accent: Color,
    /// 聚焦菜单项背景色
    pub selected_bg: Color,
    /// 聚焦菜单项前景色
    pub selected_fg: Color,
    /// 勾选标记颜色（绿色）
    pub checked: Color,
    /// 错误色（红色），用于无效状态
    pub error: Color,
    /// 提示/次要文字色（灰色）
    pub hint: Color,
    /// 禁用文字色
    pub disabled: Color,
    /// 标题颜色
    pub title: Color,
}

impl Default for Theme {
    fn default() -> Self {
        THEME
    }
}

impl Theme {
    /// 普通文本样式
    pub fn normal(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    /// 标题样式
    pub fn title(&self) -> Style {
        Style::new()
            .fg(self.title)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 聚焦菜单项样式
    pub fn selected(&self) -> Style {
        Style::new()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 聚焦或激活时的边框样式
    pub fn active(&self) -> Style {
        Style::new().fg(self.accent).bg(self.bg)
    }

    /// 勾选标记样式
    pub fn checked(&self) -> Style {
        Style::new()
            .fg(self.checked)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 提示文本样式
    pub fn hint(&self) -> Style {
        Style::new().fg(self.hint).bg(self.bg)
    }

    /// 错误样式
    pub fn error(&self) -> Style {
        Style::new().fg(self.error).bg(self.bg)
    }

    /// 禁用样式
    pub fn disabled(&self) -> Style {
        Style::new()
            .fg(self.disabled)
            .bg(self.bg)
            .add_modifier(Modifier::DIM)
    }
}

/// 全局主题实例
pub static THEME: Theme = Theme {
    bg: Color::Black,
    fg: Color::White,
    accent: Color::Cyan,
    selected_bg: Color::Cyan,
    selected_fg: Color::Black,
    checked: Color::Green,
    error: Color::Red,
    hint: Color::Gray,
    disabled: Color::DarkGray,
    title: Color::Cyan,
};

/// 获取全局主题引用
pub fn theme() -> &'static Theme {
    &THEME
}
