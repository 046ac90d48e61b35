//! Common UI components module
//!
//! Layout helpers shared by rendering and mouse hit testing.

use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::theme;

/// Maximum anchor width in cells
const ANCHOR_MAX_WIDTH: u16 = 48;
/// Anchor height including borders
const ANCHOR_HEIGHT: u16 = 3;

/// Three-panel layout: header, body, footer
pub fn three_panel_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(area)
}

/// Anchor, helper text line and status line inside the body
pub fn control_layout(body: Rect) -> [Rect; 3] {
    let width = body.width.min(ANCHOR_MAX_WIDTH);
    let column = Rect::new(body.x + body.width.saturating_sub(width) / 2, body.y, width, body.height);
    let [anchor, helper, status] = Layout::vertical([
        Constraint::Length(ANCHOR_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(column);
    [anchor, helper, status]
}

/// Menu popup placed under the anchor, clipped to `bounds`
pub fn menu_area(anchor: Rect, item_count: usize, bounds: Rect) -> Rect {
    let top = anchor.bottom();
    let available = bounds.bottom().saturating_sub(top);
    let wanted = u16::try_from(item_count).unwrap_or(u16::MAX).saturating_add(2);
    Rect::new(anchor.x, top, anchor.width, wanted.min(available))
}

/// Index of the menu item rendered at `row`, if any
///
/// `offset` is the index of the item in the first visible row of a
/// scrolled list.
pub fn menu_item_at(
    menu: Rect,
    offset: usize,
    item_count: usize,
    column: u16,
    row: u16,
) -> Option<usize> {
    if !menu.contains(Position::new(column, row)) {
        return None;
    }
    let first_row = menu.y + 1;
    let last_row = menu.bottom().saturating_sub(1);
    if row < first_row || row >= last_row {
        return None;
    }
    let index = offset + usize::from(row - first_row);
    (index < item_count).then_some(index)
}

/// Render a centered title block with border
pub fn render_title_block(title: &str, frame: &mut ratatui::prelude::Frame, area: Rect) {
    let title_line = Line::from(format!(" {} ", title))
        .centered()
        .style(theme().title());

    let block = Block::bordered()
        .title(title_line)
        .border_type(BorderType::Rounded)
        .border_style(theme().active())
        .style(theme().normal());

    frame.render_widget(block, area);
}

/// Render bottom hint text
pub fn render_hint(hint: &str, frame: &mut ratatui::prelude::Frame, area: Rect) {
    let hint_widget = Paragraph::new(hint)
        .style(theme().hint())
        .alignment(ratatui::prelude::Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(hint_widget, area);
}

/// 按显示宽度截断文本，避免 UTF-8 边界问题
pub fn truncate_value(value: &str, max_width: usize) -> String {
    if value.width() <= max_width {
        return value.to_string();
    }

    let target_width = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut output = String::new();

    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        output.push(ch);
        current_width += ch_width;
    }

    output.push_str("...");
    output
}
