//! UI layer for the calculator window: app shell and keypad layout.

pub mod app;
pub mod layout;

pub use app::CalculatorApp;
