//! Form domain layer
//!
//! Type-safe form handling for the appointment modal.

mod field;
mod form_state;

pub use field::{FieldValue, FormField};
pub use form_state::{ActiveInput, AppointmentForm, Form, SUBMIT_ROW};
