//! UI 渲染模块
//!
//! 将 `MultiSelectModel` 绘制为终端中的多选下拉框。

use crate::constants::css_classes;
use crate::tui::components::{
    control_layout, menu_area, render_hint, render_title_block, three_panel_layout,
    truncate_value,
};
use crate::tui::theme::theme;
use crate::widget::{HelperTextState, LeadingIconState, MultiSelect, MultiSelectModel};
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};

/// 底部操作提示
const HINT: &str = "Tab 聚焦/离开 · Enter/Space/↑↓ 打开菜单 · 字母键快速选择 · Esc 关闭 · Ctrl+C 退出";

/// 上一帧中可点击区域的位置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitAreas {
    /// 锚点（下拉框本体）
    pub anchor: Rect,
    /// 菜单弹层，菜单关闭时为空
    pub menu: Option<Rect>,
    /// 菜单滚动后首个可见项的索引
    pub menu_offset: usize,
}

/// 设置全局背景
fn set_background(area: Rect, buf: &mut Buffer) {
    let style = Style::new().bg(theme().bg);
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut(Position { x, y }) {
                cell.set_style(style);
            }
        }
    }
}

/// 渲染整个应用，返回本帧的可点击区域
pub fn render(
    terminal: &mut DefaultTerminal,
    title: &str,
    widget: &MultiSelect,
) -> std::io::Result<HitAreas> {
    let mut areas = HitAreas::default();
    terminal.draw(|frame| {
        areas = draw(frame, frame.area(), title, widget);
    })?;
    Ok(areas)
}

/// 主渲染函数
pub fn draw(frame: &mut Frame, area: Rect, title: &str, widget: &MultiSelect) -> HitAreas {
    set_background(area, frame.buffer_mut());

    let [header, body, footer] = three_panel_layout(area);
    render_title_block(title, frame, header);
    render_hint(HINT, frame, footer);

    let model = widget.model();
    let [anchor, helper, status] = control_layout(body);

    draw_anchor(frame, anchor, model, widget.leading_icon().as_ref());
    if let Some(helper_text) = widget.helper_text() {
        draw_helper_text(frame, helper, &helper_text);
    }
    draw_status(frame, status, widget);

    let mut areas = HitAreas {
        anchor,
        ..Default::default()
    };
    if model.menu.open {
        let popup = menu_area(anchor, model.menu.items.len(), body);
        areas.menu_offset = draw_menu(frame, popup, model);
        areas.menu = Some(popup);
    }
    areas
}

/// 锚点边框与文字样式
fn anchor_style(model: &MultiSelectModel) -> (Style, Style) {
    let has = |class: &str| model.root_classes.contains(class);
    if has(css_classes::DISABLED) {
        (theme().disabled(), theme().disabled())
    } else if has(css_classes::INVALID) {
        (theme().error(), theme().error())
    } else if has(css_classes::FOCUSED) || has(css_classes::ACTIVATED) {
        (theme().active(), theme().normal())
    } else {
        (theme().hint(), theme().normal())
    }
}

/// 绘制锚点：浮动标签、描边缺口或底部线条、已选文字
fn draw_anchor(
    frame: &mut Frame,
    area: Rect,
    model: &MultiSelectModel,
    icon: Option<&LeadingIconState>,
) {
    let (border_style, text_style) = anchor_style(model);

    let label_text = model.label.as_ref().map(|label| {
        if label.required {
            format!("{} *", label.text)
        } else {
            label.text.clone()
        }
    });
    let floated = model.label.as_ref().is_some_and(|label| label.floated);

    // 描边样式：缺口打开时标签嵌在上边框里；填充样式：只有底边线
    let mut block = match &model.outline {
        Some(_) => Block::bordered().border_type(BorderType::Rounded),
        None => Block::new().borders(Borders::BOTTOM),
    };
    let ripple_active = model.line_ripple.as_ref().is_some_and(|ripple| ripple.active);
    let line_style = if ripple_active {
        theme().active()
    } else {
        border_style
    };
    block = block.border_style(line_style).style(theme().normal());

    let notched = model
        .outline
        .as_ref()
        .is_some_and(|outline| outline.notch_width.is_some());
    if let Some(text) = label_text.as_ref().filter(|_| floated && (notched || model.outline.is_none())) {
        block = block.title(Span::styled(format!(" {text} "), border_style));
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = Vec::new();
    if let Some(icon) = icon {
        let icon_style = if icon.disabled {
            theme().disabled()
        } else {
            theme().active()
        };
        spans.push(Span::styled(format!("{} ", icon.content), icon_style));
    }

    let arrow = if model.menu.open { "▴" } else { "▾" };
    let reserved = spans.iter().map(|s| s.width()).sum::<usize>() + 2;
    let max_width = usize::from(inner.width).saturating_sub(reserved);

    if !model.selected_text.is_empty() {
        spans.push(Span::styled(
            truncate_value(&model.selected_text, max_width),
            text_style,
        ));
    } else if let Some(text) = label_text.filter(|_| !floated) {
        // 未浮动的标签作为占位文字
        spans.push(Span::styled(truncate_value(&text, max_width), theme().hint()));
    }

    let used = spans.iter().map(|s| s.width()).sum::<usize>();
    let padding = usize::from(inner.width).saturating_sub(used + 1);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(arrow, border_style));

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

/// 绘制辅助文字，隐藏时留空
fn draw_helper_text(frame: &mut Frame, area: Rect, helper: &HelperTextState) {
    if !helper.visible {
        return;
    }
    let style = if helper.alert {
        theme().error()
    } else {
        theme().hint()
    };
    let text = truncate_value(&helper.content, usize::from(area.width));
    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// 绘制当前值与有效性
fn draw_status(frame: &mut Frame, area: Rect, widget: &MultiSelect) {
    let value = widget.value();
    let lines = vec![
        Line::from(vec![
            Span::styled("value: ", theme().hint()),
            Span::styled(format!("{value:?}"), theme().normal()),
        ]),
        Line::from(vec![
            Span::styled("index: ", theme().hint()),
            Span::styled(format!("{:?}", widget.selected_index()), theme().normal()),
        ]),
        Line::from(vec![
            Span::styled("valid: ", theme().hint()),
            if widget.valid() {
                Span::styled("true", theme().checked())
            } else {
                Span::styled("false", theme().error())
            },
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// 绘制菜单弹层，已选项带勾选标记；返回滚动偏移
fn draw_menu(frame: &mut Frame, area: Rect, model: &MultiSelectModel) -> usize {
    let invalid = model.menu.classes.contains(css_classes::MENU_INVALID);
    let border_style = if invalid {
        theme().error()
    } else {
        theme().active()
    };

    let items: Vec<ListItem> = model
        .menu
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let checked = model.menu.selected.contains(&i);
            let mark = if checked {
                Span::styled("[x] ", theme().checked())
            } else {
                Span::styled("[ ] ", theme().hint())
            };
            ListItem::new(Line::from(vec![mark, Span::raw(item.text.clone())]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(border_style),
        )
        .style(theme().normal())
        .highlight_style(theme().selected());

    let mut state = ListState::default();
    state.select(model.menu.focused_item);

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
    state.offset()
}
