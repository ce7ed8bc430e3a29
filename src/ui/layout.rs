//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::{
    ADD_CHOICE_SHORTCUT, REMOVE_CHOICE_SHORTCUT, SAVE_SHORTCUT, TOGGLE_CHOICE_SHORTCUT,
};
use crate::state::FormFocus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Split off the bottom line for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    if app.is_submitting() {
        let spinner = SPINNER_FRAMES[app.state.spinner_tick % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!(" {spinner} "),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled(
        focus_hints(app.state.focus),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the focused row
fn focus_hints(focus: FormFocus) -> String {
    match focus {
        FormFocus::Label | FormFocus::DefaultValue => {
            format!("Tab:next  type to edit  {SAVE_SHORTCUT}:save")
        }
        FormFocus::Kind | FormFocus::Order => format!("Tab:next  ←/→:change  {SAVE_SHORTCUT}:save"),
        FormFocus::Required => format!("Tab:next  Space:toggle  {SAVE_SHORTCUT}:save"),
        FormFocus::Choices => format!(
            "↑/↓:row  {ADD_CHOICE_SHORTCUT}:add  {REMOVE_CHOICE_SHORTCUT}:remove  {TOGGLE_CHOICE_SHORTCUT}:select  {SAVE_SHORTCUT}:save"
        ),
        FormFocus::Buttons => "←/→:button  Enter:activate  Tab:next".to_string(),
    }
}
