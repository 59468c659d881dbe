//! Form rendering module
//!
//! This module contains UI components for rendering forms:
//! - `field_renderer`: Field rendering utilities
//! - `appointment_form`: The appointment booking modal

mod appointment_form;
mod field_renderer;

pub use appointment_form::draw_appointment_modal;
