//! 通用 UI 组件
//!
//! 输入框、按钮等通用组件

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// [组件] 带有标题和占位文字的输入框，内容超出时始终显示最后几行
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: &str,
    is_focused: bool,
    active_color: Color,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(active_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let (text, text_style) = if value.is_empty() {
        (placeholder, Style::default().fg(Color::DarkGray))
    } else {
        (value, Style::default())
    };

    // 不带 block 计算折行后的行数
    let paragraph = Paragraph::new(text)
        .style(text_style)
        .wrap(Wrap { trim: false });
    let total_lines = paragraph.line_count(area.width.saturating_sub(2)) as u16;
    let visible_height = area.height.saturating_sub(2);
    let scroll = total_lines.saturating_sub(visible_height);

    let input = paragraph
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    frame.render_widget(input, area);
}

/// [组件] 按钮
pub fn render_button(frame: &mut Frame, area: Rect, label: &str, is_focused: bool) {
    let style = if is_focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}
