//! Controller layer: keypad roles, pure state transitions, the owned
//! calculator controller, and command orchestration.

pub mod calculator;
pub mod events;
pub mod orchestration;
pub mod reducer;
pub mod roles;
