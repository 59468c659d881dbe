//! Reusable UI components

mod button;
mod dialog;
mod toast;

pub use button::{render_button, spinner_frame, BUTTON_HEIGHT};
pub use dialog::{render_dialog, DialogConfig};
pub use toast::render_toasts;
