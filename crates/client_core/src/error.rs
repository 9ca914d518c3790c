use shared::error::{ApiErrorBody, ErrorCode};
use thiserror::Error;

use crate::session::SessionStoreError;

const GENERIC_API_FAILURE: &str = "Request failed";

/// Failure of a single service call.
///
/// `Api` carries the service's own message verbatim so the UI can show it as
/// is; `Connection` collapses every transport failure into one message.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        code: Option<ErrorCode>,
    },
    #[error("Connection error")]
    Connection(#[source] reqwest::Error),
    #[error("invalid response from {path}: {source}")]
    InvalidResponse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("session store unavailable: {0}")]
    Session(#[from] SessionStoreError),
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
}

impl ClientError {
    pub(crate) fn from_error_body(status: u16, body: ApiErrorBody) -> Self {
        let code = body.error_code();
        Self::Api {
            status,
            message: body
                .error
                .unwrap_or_else(|| GENERIC_API_FAILURE.to_string()),
            code,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    pub fn code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Api { code, .. } => code.as_ref(),
            _ => None,
        }
    }
}
