//! Bridge between the UI thread and the backend worker owning the controller.

pub mod commands;
pub mod runtime;
