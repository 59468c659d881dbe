//! UI module for rendering the TUI

mod components;
mod forms;
mod landing;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    // The landing screen stays visible behind the modal
    landing::draw(frame, main_area, app);

    if app.state.current_view == View::Booking {
        forms::draw_appointment_modal(frame, app);
    }

    components::render_toasts(frame, &app.state.notifications);

    // Draw status bar
    layout::draw_status_bar(frame, status_area, app);
}
