//! Backend commands queued from UI to backend worker.

use crate::controller::roles::ButtonRole;

pub enum BackendCommand {
    Press(ButtonRole),
    Shutdown,
}
