//! Field rendering utilities for forms

use crate::engine::ValidationError;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn focus_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn field_block(label: &str, is_active: bool, has_error: bool) -> Block<'static> {
    let border_style = if has_error && !is_active {
        Style::default().fg(Color::Red)
    } else {
        focus_style(is_active)
    };
    Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Draw a single-line text field with a cursor when focused
pub fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    has_error: bool,
) {
    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };
    let cursor = if is_active { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_value, focus_style(is_active)),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    frame.render_widget(content.block(field_block(label, is_active, has_error)), area);
}

/// Draw a field whose value is cycled rather than typed
pub fn draw_cycle_field(frame: &mut Frame, area: Rect, label: &str, value: &str, is_active: bool) {
    let value_style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let line = if is_active {
        Line::from(vec![
            Span::styled("◂ ", focus_style(true)),
            Span::styled(value, value_style),
            Span::styled(" ▸", focus_style(true)),
        ])
    } else {
        Line::from(Span::styled(value, value_style))
    };

    frame.render_widget(
        Paragraph::new(line).block(field_block(label, is_active, false)),
        area,
    );
}

/// One-line message under a field; blank when there is no error
pub fn draw_field_error(frame: &mut Frame, area: Rect, error: Option<ValidationError>) {
    if let Some(error) = error {
        let line = Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}
