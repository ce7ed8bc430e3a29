//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Visual weight of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Primary,
    Secondary,
}

impl ButtonKind {
    fn accent(self) -> Color {
        match self {
            Self::Primary => Color::Green,
            Self::Secondary => Color::Cyan,
        }
    }
}

fn button_styles(kind: ButtonKind, is_selected: bool, is_enabled: bool) -> (Style, Style) {
    if !is_enabled {
        let muted = Style::default().fg(Color::DarkGray);
        return (muted, muted);
    }

    if is_selected {
        let accent = Style::default().fg(kind.accent());
        (accent, accent.add_modifier(Modifier::BOLD))
    } else {
        (Style::default().fg(Color::DarkGray), Style::default())
    }
}

/// Render a bordered button with centered text
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    kind: ButtonKind,
    is_selected: bool,
    is_enabled: bool,
) {
    let (border_style, text_style) = button_styles(kind, is_selected, is_enabled);

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
