//! Form field value objects

use crate::state::TimeSlot;
use chrono::{Datelike, Days, Months, NaiveDate};

/// Format used to type and display dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Length of a fully typed `YYYY-MM-DD` date
const DATE_INPUT_LEN: usize = 10;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Raw typed input plus the date it parses to, if any
    Date {
        input: String,
        parsed: Option<NaiveDate>,
    },
    Time(Option<TimeSlot>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(label: &str, is_multiline: bool) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            is_multiline,
        }
    }

    /// Create a new, unset date field
    pub fn date(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Date {
                input: String::new(),
                parsed: None,
            },
            is_multiline: false,
        }
    }

    /// Create a new, unset time slot field
    pub fn time(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Time(None),
            is_multiline: false,
        }
    }

    /// Get the text value (returns empty string for non-text fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Date { .. } | FieldValue::Time(_) => "",
        }
    }

    /// Get the parsed date (returns None for non-date fields)
    pub fn as_date(&self) -> Option<NaiveDate> {
        match &self.value {
            FieldValue::Date { parsed, .. } => *parsed,
            _ => None,
        }
    }

    /// Get the selected slot (returns None for non-time fields)
    pub fn as_time(&self) -> Option<TimeSlot> {
        match &self.value {
            FieldValue::Time(slot) => *slot,
            _ => None,
        }
    }

    /// Set the date, replacing whatever was typed
    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.value = FieldValue::Date {
            input: date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            parsed: date,
        };
    }

    /// Set the time slot
    pub fn set_time(&mut self, slot: Option<TimeSlot>) {
        self.value = FieldValue::Time(slot);
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => s.push(c),
            FieldValue::Date { input, parsed } => {
                if (c.is_ascii_digit() || c == '-') && input.len() < DATE_INPUT_LEN {
                    input.push(c);
                    *parsed = parse_date(input);
                }
            }
            FieldValue::Time(_) => {
                // Slots are chosen with the arrow keys
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.pop();
            }
            FieldValue::Date { input, parsed } => {
                input.pop();
                *parsed = parse_date(input);
            }
            FieldValue::Time(slot) => *slot = None,
        }
    }

    /// Move the date by whole days, starting from `today` when unset
    pub fn step_days(&mut self, days: i64, today: NaiveDate) {
        let start = self.as_date().unwrap_or(today);
        let stepped = if days >= 0 {
            start.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            start.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = stepped {
            self.set_date(Some(date));
        }
    }

    /// Move the date by whole months, clamping the day to the month's
    /// length, starting from `today` when unset
    pub fn step_months(&mut self, months: i32, today: NaiveDate) {
        let start = self.as_date().unwrap_or(today);
        let stepped = if months >= 0 {
            start.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            start.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        if let Some(date) = stepped {
            self.set_date(Some(date));
        }
    }

    /// Select the next slot (9:00 when unset)
    pub fn next_slot(&mut self) {
        let next = self.as_time().map_or_else(TimeSlot::first, |s| s.next());
        self.set_time(Some(next));
    }

    /// Select the previous slot (16:00 when unset)
    pub fn prev_slot(&mut self) {
        let prev = self.as_time().map_or_else(TimeSlot::last, |s| s.prev());
        self.set_time(Some(prev));
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Date { input, parsed } => {
                input.clear();
                *parsed = None;
            }
            FieldValue::Time(slot) => *slot = None,
        }
    }

    /// Whether the typed date does not (yet) name a real day
    pub fn has_invalid_date(&self) -> bool {
        matches!(&self.value, FieldValue::Date { input, parsed: None } if !input.is_empty())
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Date {
                input,
                parsed: Some(date),
            } if input.len() == DATE_INPUT_LEN => {
                format!("{input}  ({})", date.weekday())
            }
            FieldValue::Date { input, .. } => input.clone(),
            FieldValue::Time(Some(slot)) => slot.to_string(),
            FieldValue::Time(None) => String::new(),
        }
    }

    /// Placeholder shown when the field is empty and inactive
    pub fn placeholder(&self) -> &'static str {
        match self.value {
            FieldValue::Text(_) if self.is_multiline => "Add any additional notes...",
            FieldValue::Text(_) => "(empty)",
            FieldValue::Date { .. } => "YYYY-MM-DD",
            FieldValue::Time(_) => "Select a time",
        }
    }
}

#[cfg(test)]
impl FormField {
    /// Set the text value
    pub fn set_text(&mut self, value: String) {
        self.value = FieldValue::Text(value);
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    if input.len() != DATE_INPUT_LEN {
        return None;
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn type_str(field: &mut FormField, s: &str) {
        for c in s.chars() {
            field.push_char(c);
        }
    }

    #[test]
    fn test_text_push_and_pop() {
        let mut field = FormField::text("Name", false);
        type_str(&mut field, "Ana");
        assert_eq!(field.as_text(), "Ana");
        field.pop_char();
        assert_eq!(field.as_text(), "An");
    }

    #[test]
    fn test_date_parses_once_complete() {
        let mut field = FormField::date("Date");
        type_str(&mut field, "2024-05-0");
        assert_eq!(field.as_date(), None);
        assert!(field.has_invalid_date());
        field.push_char('1');
        assert_eq!(field.as_date(), Some(ymd(2024, 5, 1)));
        assert!(!field.has_invalid_date());
    }

    #[test]
    fn test_date_rejects_letters_and_overflow() {
        let mut field = FormField::date("Date");
        type_str(&mut field, "2024-05-01x9");
        assert_eq!(field.display_value(), "2024-05-01  (Wed)");
        assert_eq!(field.as_date(), Some(ymd(2024, 5, 1)));
    }

    #[test]
    fn test_date_invalid_calendar_day() {
        let mut field = FormField::date("Date");
        type_str(&mut field, "2023-02-29");
        assert_eq!(field.as_date(), None);
        assert!(field.has_invalid_date());
    }

    #[test]
    fn test_date_backspace_unsets() {
        let mut field = FormField::date("Date");
        field.set_date(Some(ymd(2024, 5, 1)));
        field.pop_char();
        assert_eq!(field.as_date(), None);
        assert_eq!(field.display_value(), "2024-05-0");
    }

    #[test]
    fn test_step_days_from_unset_starts_today() {
        let mut field = FormField::date("Date");
        field.step_days(1, ymd(2024, 12, 31));
        assert_eq!(field.as_date(), Some(ymd(2025, 1, 1)));
        field.step_days(-2, ymd(2000, 1, 1));
        assert_eq!(field.as_date(), Some(ymd(2024, 12, 30)));
    }

    #[test]
    fn test_step_months_clamps_day() {
        let mut field = FormField::date("Date");
        field.set_date(Some(ymd(2024, 1, 31)));
        field.step_months(1, ymd(2000, 1, 1));
        assert_eq!(field.as_date(), Some(ymd(2024, 2, 29)));
        field.step_months(-1, ymd(2000, 1, 1));
        assert_eq!(field.as_date(), Some(ymd(2024, 1, 29)));
    }

    #[test]
    fn test_time_cycles() {
        let mut field = FormField::time("Time");
        field.next_slot();
        assert_eq!(field.display_value(), "9:00");
        field.prev_slot();
        assert_eq!(field.display_value(), "16:00");

        let mut field = FormField::time("Time");
        field.prev_slot();
        assert_eq!(field.as_time(), TimeSlot::new(16));
    }

    #[test]
    fn test_time_ignores_typing_and_backspace_clears() {
        let mut field = FormField::time("Time");
        field.push_char('9');
        assert_eq!(field.as_time(), None);
        field.next_slot();
        field.pop_char();
        assert_eq!(field.as_time(), None);
    }

    #[test]
    fn test_clear_resets_each_kind() {
        let mut text = FormField::text("Notes", true);
        text.set_text("hello".to_string());
        text.clear();
        assert_eq!(text.as_text(), "");

        let mut date = FormField::date("Date");
        date.set_date(Some(ymd(2024, 5, 1)));
        date.clear();
        assert_eq!(date.as_date(), None);
        assert_eq!(date.display_value(), "");

        let mut time = FormField::time("Time");
        time.next_slot();
        time.clear();
        assert_eq!(time.as_time(), None);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(FormField::date("Date").placeholder(), "YYYY-MM-DD");
        assert_eq!(FormField::time("Time").placeholder(), "Select a time");
        assert_eq!(FormField::text("Name", false).placeholder(), "(empty)");
    }
}
