use serde::{Deserialize, Serialize};

/// Machine-readable failure code sent by the calculation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    DivisionByZero,
    InvalidOperator,
    Overflow,
    Other(String),
}

impl ErrorCode {
    pub fn from_wire(code: &str) -> Self {
        match code {
            "DIVISION_BY_ZERO" => Self::DivisionByZero,
            "INVALID_OPERATOR" => Self::InvalidOperator,
            "OVERFLOW" => Self::Overflow,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::InvalidOperator => "INVALID_OPERATOR",
            Self::Overflow => "OVERFLOW",
            Self::Other(code) => code,
        }
    }
}

/// Body of a non-2xx response. Both fields are optional because the service
/// framework may answer with its own shape (e.g. validation failures).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            error: Some(error.into()),
            code: Some(code.as_str().to_string()),
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.code.as_deref().map(ErrorCode::from_wire)
    }
}
