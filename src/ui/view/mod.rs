//! 视图层模块
//!
//! `render` 把状态投影为界面

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::state::{App, Focus};
use crate::models::{EXAMPLE_QUESTIONS, PLACEHOLDER, TITLE};
use components::{render_button, render_input_widget};

/// 渲染 UI
///
/// 除了把回答区的滚动偏移收紧到实际可滚动范围外，不修改 App
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // 示例区高度按当前宽度折行后的行数决定，保证三条示例完整显示
    let examples = examples_paragraph();
    let examples_height = examples.line_count(area.width.saturating_sub(2)) as u16 + 2;

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // 标题
            Constraint::Length(examples_height), // 示例
            Constraint::Min(0),
        ])
        .split(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // 问题输入
            Constraint::Length(3), // 提交按钮
            Constraint::Min(3),    // 回答
            Constraint::Length(1), // 帮助
        ])
        .split(outer[2]);

    render_title(frame, outer[0]);
    frame.render_widget(
        examples.block(Block::default().title("Examples:").borders(Borders::ALL)),
        outer[1],
    );
    render_input_widget(
        frame,
        chunks[0],
        "Question",
        &app.question,
        PLACEHOLDER,
        app.focus == Focus::Question,
        Color::Yellow,
    );
    render_submit(frame, app, chunks[1]);
    render_answer(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(TITLE)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn examples_paragraph() -> Paragraph<'static> {
    let lines: Vec<Line> = EXAMPLE_QUESTIONS
        .iter()
        .map(|q| Line::from(format!("• {q}")))
        .collect();

    Paragraph::new(lines).wrap(Wrap { trim: true })
}

fn render_submit(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(0)])
        .split(area);

    render_button(frame, chunks[0], "Submit", app.focus == Focus::SubmitButton);
}

fn render_answer(frame: &mut Frame, app: &mut App, area: Rect) {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let mut rest = app.answer.split('\n');
    let first = rest.next().unwrap_or_default();

    let mut lines = vec![Line::from(vec![
        Span::styled("Response: ", label),
        Span::raw(first),
    ])];
    lines.extend(rest.map(Line::from));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let total_lines = paragraph.line_count(area.width.saturating_sub(2)) as u16;
    let max_scroll = total_lines.saturating_sub(area.height.saturating_sub(2));
    app.answer_scroll = app.answer_scroll.min(max_scroll);

    let mut title = match app.answered_at {
        Some(at) => format!("Answer ({})", at.format("%H:%M:%S")),
        None => "Answer".to_string(),
    };
    if max_scroll > 0 {
        title.push_str(" [PgUp/PgDn]");
    }

    let answer = paragraph
        .scroll((app.answer_scroll, 0))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(answer, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.focus {
        Focus::Question => "[Tab] button  [Ctrl+S] submit  [Ctrl+U] clear  [Esc] quit",
        Focus::SubmitButton => "[Enter] submit  [Tab] question  [Esc] quit",
    };

    let text = if app.is_waiting() {
        format!("{}  |  Waiting for response...", help_text)
    } else {
        help_text.to_string()
    };

    let help = Paragraph::new(text).style(Style::default().fg(Color::Gray));

    frame.render_widget(help, area);
}
