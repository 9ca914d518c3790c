//! UI/backend events and error modeling for the calculator window.

use client_core::ClientError;

pub enum UiEvent {
    Info(String),
    Display(String),
    MemoryIndicator(bool),
    Error(UiError),
}

impl UiEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            UiEvent::Info(_) => "info",
            UiEvent::Display(_) => "display",
            UiEvent::MemoryIndicator(_) => "memory-indicator",
            UiEvent::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Domain,
    Transport,
    Storage,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Calculate,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Api { .. } => UiErrorCategory::Domain,
            ClientError::Connection(_) => UiErrorCategory::Transport,
            ClientError::Session(_) => UiErrorCategory::Storage,
            ClientError::InvalidResponse { .. } | ClientError::InvalidServerUrl { .. } => {
                UiErrorCategory::Unknown
            }
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn startup(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Unknown,
            context: UiErrorContext::BackendStartup,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_line(&self) -> String {
        let prefix = match self.category {
            UiErrorCategory::Domain => "Calculation rejected",
            UiErrorCategory::Transport => "Server unreachable",
            UiErrorCategory::Storage => "Session storage failure",
            UiErrorCategory::Unknown => "Unexpected failure",
        };
        format!("{prefix}: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_api_errors_as_domain() {
        let err = ClientError::Api {
            status: 400,
            message: "Division by zero".to_string(),
            code: None,
        };
        let ui_error = UiError::from_client_error(UiErrorContext::Calculate, &err);
        assert_eq!(ui_error.category(), UiErrorCategory::Domain);
        assert_eq!(ui_error.context(), UiErrorContext::Calculate);
        assert_eq!(ui_error.message(), "Division by zero");
        assert_eq!(
            ui_error.status_line(),
            "Calculation rejected: Division by zero"
        );
    }

    #[test]
    fn startup_errors_carry_backend_context() {
        let ui_error = UiError::startup("backend worker startup failure: no runtime");
        assert_eq!(ui_error.context(), UiErrorContext::BackendStartup);
        assert_eq!(ui_error.category(), UiErrorCategory::Unknown);
    }
}
