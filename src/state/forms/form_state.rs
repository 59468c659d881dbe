//! Form state management for the appointment modal

use super::field::FormField;
use crate::state::AppointmentDraft;
#[cfg(test)]
use crate::state::TimeSlot;
#[cfg(test)]
use chrono::NaiveDate;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Index of the submit button row
pub const SUBMIT_ROW: usize = 5;

/// Which kind of input the active row takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveInput {
    Text,
    Multiline,
    Date,
    Time,
    SubmitButton,
}

/// The appointment modal's fields
#[derive(Debug, Clone)]
pub struct AppointmentForm {
    pub name: FormField,
    pub email: FormField,
    pub date: FormField,
    pub time: FormField,
    pub notes: FormField,
    pub active_field_index: usize,
}

impl AppointmentForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("Name", false),
            email: FormField::text("Email", false),
            date: FormField::date("Date"),
            time: FormField::time("Time"),
            notes: FormField::text("Notes", true),
            active_field_index: 0,
        }
    }

    /// Discard everything entered so far
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Snapshot of the current field values
    pub fn draft(&self) -> AppointmentDraft {
        AppointmentDraft {
            name: self.name.as_text().to_string(),
            email: self.email.as_text().to_string(),
            date: self.date.as_date(),
            time: self.time.as_time(),
            notes: self.notes.as_text().to_string(),
        }
    }

    /// Returns true if the submit button row is currently active
    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == SUBMIT_ROW
    }

    pub fn active_input(&self) -> ActiveInput {
        match self.active_field_index {
            0 | 1 => ActiveInput::Text,
            2 => ActiveInput::Date,
            3 => ActiveInput::Time,
            4 => ActiveInput::Multiline,
            _ => ActiveInput::SubmitButton,
        }
    }
}

/// Direct setters for building form state in tests; at runtime fields are
/// edited key by key
#[cfg(test)]
impl AppointmentForm {
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name.set_text(name.into());
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email.set_text(email.into());
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date.set_date(date);
    }

    pub fn set_time(&mut self, time: Option<TimeSlot>) {
        self.time.set_time(time);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes.set_text(notes.into());
    }
}

impl Default for AppointmentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for AppointmentForm {
    fn field_count(&self) -> usize {
        6 // name, email, date, time, notes, submit button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(SUBMIT_ROW);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.email),
            2 => Some(&mut self.date),
            3 => Some(&mut self.time),
            4 => Some(&mut self.notes),
            // Submit button row has no FormField
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.email),
            2 => Some(&self.date),
            3 => Some(&self.time),
            4 => Some(&self.notes),
            _ => None,
        }
    }
}
