//! Application state definitions

use super::forms::AppointmentForm;
use super::notifications::Notifications;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    /// The appointment modal is open
    Booking,
}

impl View {
    pub fn is_form_view(&self) -> bool {
        matches!(self, View::Booking)
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Form state; lives only while the modal is open
    pub form: AppointmentForm,

    // Feedback
    pub notifications: Notifications,
}

impl AppState {
    /// Open the appointment modal with an empty form
    pub fn open_booking(&mut self) {
        self.form.reset();
        self.current_view = View::Booking;
    }

    /// Close the modal, discarding the draft
    pub fn close_booking(&mut self) {
        self.form.reset();
        self.current_view = View::Landing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_landing() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Landing);
        assert!(!state.current_view.is_form_view());
    }

    #[test]
    fn test_open_booking_starts_clean() {
        let mut state = AppState::default();
        state.form.set_name("leftover");
        state.open_booking();
        assert_eq!(state.current_view, View::Booking);
        assert!(state.current_view.is_form_view());
        assert_eq!(state.form.name.as_text(), "");
    }

    #[test]
    fn test_close_booking_discards_draft() {
        let mut state = AppState::default();
        state.open_booking();
        state.form.set_name("Ana");
        state.form.active_field_index = 2;
        state.close_booking();
        assert_eq!(state.current_view, View::Landing);
        assert_eq!(state.form.name.as_text(), "");
        assert_eq!(state.form.active_field_index, 0);
    }
}
