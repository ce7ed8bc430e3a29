//! Editable choice rows

use crate::app::App;
use crate::state::{FieldKind, FormFocus, RowFlags, MAX_CHOICES};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

fn selection_mark(kind: FieldKind, selected: bool) -> &'static str {
    match (kind, selected) {
        (FieldKind::MultiSelect, true) => "[x] ",
        (FieldKind::MultiSelect, false) => "[ ] ",
        (FieldKind::SingleSelect, true) => "(•) ",
        (FieldKind::SingleSelect, false) => "( ) ",
    }
}

fn flag_notes(flags: RowFlags) -> String {
    let mut notes = Vec::new();
    if flags.duplicate {
        notes.push("duplicate");
    }
    if flags.too_long {
        notes.push("long");
    }
    if flags.blank_selected {
        notes.push("empty but selected");
    }
    if notes.is_empty() {
        String::new()
    } else {
        format!("  ({})", notes.join(", "))
    }
}

/// Draw the choice rows, keeping the cursor row in view
pub fn draw_choice_list(frame: &mut Frame, area: Rect, app: &App, has_error: bool) {
    let is_active = app.state.focus == FormFocus::Choices;
    let draft = app.store.draft();
    let choices = app.store.choices();
    let invalid = &app.store.report().invalid_selected_indices;

    let items: Vec<ListItem> = choices
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let flags = choices.row_flags(index, &draft.selection);
            let is_cursor = is_active && index == app.state.choice_cursor;

            let text_style = if flags.any() || invalid.contains(&index) {
                Style::default().fg(Color::Red)
            } else if is_cursor {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            let text = if row.is_empty() && !is_cursor {
                Span::styled("(empty)", Style::default().fg(Color::DarkGray))
            } else {
                Span::styled(row.as_str(), text_style)
            };

            let mut spans = vec![
                Span::raw(selection_mark(draft.kind, draft.selection.contains(index))),
                text,
            ];
            if is_cursor {
                spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
            }
            spans.push(Span::styled(flag_notes(flags), Style::default().fg(Color::Red)));

            let item = ListItem::new(Line::from(spans));
            if is_cursor {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else if has_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(format!(" Choices ({}/{}) ", choices.len(), MAX_CHOICES))
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut list_state = ListState::default().with_selected(Some(app.state.choice_cursor));
    frame.render_stateful_widget(List::new(items).block(block), area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_marks_follow_kind() {
        assert_eq!(selection_mark(FieldKind::MultiSelect, true), "[x] ");
        assert_eq!(selection_mark(FieldKind::SingleSelect, false), "( ) ");
    }

    #[test]
    fn test_flag_notes() {
        assert_eq!(flag_notes(RowFlags::default()), "");
        let flags = RowFlags {
            duplicate: true,
            too_long: true,
            blank_selected: false,
        };
        assert_eq!(flag_notes(flags), "  (duplicate, long)");
    }
}
