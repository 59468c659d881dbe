//! The appointment booking modal

use super::field_renderer::{draw_field, draw_help_text};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{Form, SUBMIT_ROW};
use crate::ui::components::{
    render_button, render_dialog, spinner_frame, DialogConfig, BUTTON_HEIGHT,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Color,
    Frame,
};

const MODAL_WIDTH: u16 = 64;
const MODAL_HEIGHT: u16 = 26;

/// Draw the appointment modal over whatever is behind it
pub fn draw_appointment_modal(frame: &mut Frame, app: &App) {
    let inner = render_dialog(
        frame,
        DialogConfig {
            title: "Book Appointment",
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            width: MODAL_WIDTH,
            height: MODAL_HEIGHT,
        },
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Name
            Constraint::Length(3),             // Email
            Constraint::Length(3),             // Date
            Constraint::Length(3),             // Time
            Constraint::Min(4),                // Notes
            Constraint::Length(BUTTON_HEIGHT), // Submit button
            Constraint::Length(1),             // Help text
        ])
        .horizontal_margin(1)
        .split(inner);

    let form = &app.state.form;
    let submitting = app.workflow.is_submitting();
    let active = form.active_field();

    for index in 0..SUBMIT_ROW {
        if let Some(field) = form.get_field(index) {
            draw_field(frame, chunks[index], field, active == index, submitting);
        }
    }

    let label = match app.submit_started {
        Some(started) if submitting => format!("{} Booking...", spinner_frame(started.elapsed())),
        _ => "Book Appointment".to_string(),
    };
    render_button(
        frame,
        chunks[SUBMIT_ROW],
        &label,
        form.is_submit_row_active(),
        !submitting,
    );

    draw_help_text(
        frame,
        chunks[SUBMIT_ROW + 1],
        &[("Tab", "next"), ("↑/↓", "pick"), (SUBMIT_SHORTCUT, "book"), ("Esc", "cancel")],
    );
}
