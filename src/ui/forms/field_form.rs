//! The field builder form

use super::choice_list::draw_choice_list;
use super::field_renderer::{draw_cycle_field, draw_field_error, draw_field_with_value};
use crate::app::App;
use crate::state::{FormButton, FormFocus};
use crate::ui::components::{render_button, ButtonKind, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the whole form inside a titled frame
pub fn draw_field_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Field Builder ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Label
            Constraint::Length(1),             // Label error
            Constraint::Length(3),             // Type + Required
            Constraint::Length(3),             // Default value
            Constraint::Min(5),                // Choices
            Constraint::Length(1),             // Choices error
            Constraint::Length(3),             // Order
            Constraint::Length(BUTTON_HEIGHT), // Buttons
        ])
        .split(inner);

    let focus = app.state.focus;
    let draft = app.store.draft();
    let errors = &app.store.report().errors;

    draw_field_with_value(
        frame,
        chunks[0],
        "Label",
        &draft.label,
        focus == FormFocus::Label,
        errors.label.is_some(),
    );
    draw_field_error(frame, chunks[1], errors.label);

    let type_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);
    draw_cycle_field(
        frame,
        type_row[0],
        "Type",
        draft.kind.label(),
        focus == FormFocus::Kind,
    );
    draw_cycle_field(
        frame,
        type_row[1],
        "Required",
        if draft.required { "[x] A value is required" } else { "[ ] A value is required" },
        focus == FormFocus::Required,
    );

    draw_field_with_value(
        frame,
        chunks[3],
        "Default Value",
        &draft.default_value,
        focus == FormFocus::DefaultValue,
        false,
    );

    draw_choice_list(frame, chunks[4], app, errors.choices.is_some());
    draw_field_error(frame, chunks[5], errors.choices);

    draw_cycle_field(
        frame,
        chunks[6],
        "Order",
        draft.order.label(),
        focus == FormFocus::Order,
    );

    draw_buttons(frame, chunks[7], app);
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(area);

    let on_buttons = app.state.focus == FormFocus::Buttons;
    let save_label = if app.is_submitting() {
        "Saving..."
    } else {
        FormButton::Save.label()
    };

    render_button(
        frame,
        chunks[0],
        save_label,
        ButtonKind::Primary,
        on_buttons && app.state.selected_button == FormButton::Save,
        !app.is_submitting(),
    );
    render_button(
        frame,
        chunks[2],
        FormButton::Cancel.label(),
        ButtonKind::Secondary,
        on_buttons && app.state.selected_button == FormButton::Cancel,
        true,
    );
}
