//! Application state module

mod app_state;
mod appointment;
mod forms;
mod notifications;
mod submit;

pub use app_state::*;
pub use appointment::*;
pub use forms::*;
pub use notifications::*;
pub use submit::*;
