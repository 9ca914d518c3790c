use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Operator, SessionId},
    error::ApiErrorBody,
    protocol::{
        CalculateRequest, CalculateResponse, HealthResponse, MemoryResponse, MemoryValueRequest,
        SESSION_HEADER,
    },
};
use tracing::debug;
use url::Url;

pub mod error;
pub mod session;

pub use error::ClientError;
pub use session::{
    FileStore, InMemoryStore, KeyValueStore, SessionIdProvider, SessionStoreError,
    SESSION_STORAGE_KEY,
};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Calculator intents the UI controller can issue against the remote service.
#[async_trait]
pub trait CalculatorApi: Send + Sync {
    async fn calculate(
        &self,
        operand1: f64,
        operand2: f64,
        operator: Operator,
    ) -> Result<CalculateResponse, ClientError>;
    async fn memory_add(&self, value: f64) -> Result<MemoryResponse, ClientError>;
    async fn memory_subtract(&self, value: f64) -> Result<MemoryResponse, ClientError>;
    async fn memory_recall(&self) -> Result<MemoryResponse, ClientError>;
    async fn memory_clear(&self) -> Result<MemoryResponse, ClientError>;
}

pub struct CalculatorClient {
    http: Client,
    server_url: String,
    sessions: SessionIdProvider,
}

impl CalculatorClient {
    pub fn new(
        server_url: impl Into<String>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ClientError> {
        Self::with_session_provider(server_url, SessionIdProvider::new(store))
    }

    pub fn with_session_provider(
        server_url: impl Into<String>,
        sessions: SessionIdProvider,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            server_url: normalize_server_url(server_url.into())?,
            sessions,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn get_or_create_session_id(&self) -> Result<SessionId, ClientError> {
        Ok(SessionId(self.sessions.get_or_create_session_id()?))
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.send("/health", self.request(Method::GET, "/health")?)
            .await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let session_id = self.get_or_create_session_id()?;
        Ok(self
            .http
            .request(method, format!("{}{path}", self.server_url))
            .header(SESSION_HEADER, session_id.as_str())
            .header(CONTENT_TYPE, "application/json"))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await.map_err(ClientError::Connection)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::Connection)?;
        debug!(path, status = status.as_u16(), "calculator service responded");

        if !status.is_success() {
            let payload = serde_json::from_slice::<ApiErrorBody>(&body).unwrap_or_default();
            return Err(ClientError::from_error_body(status.as_u16(), payload));
        }

        serde_json::from_slice(&body).map_err(|source| ClientError::InvalidResponse {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CalculatorApi for CalculatorClient {
    async fn calculate(
        &self,
        operand1: f64,
        operand2: f64,
        operator: Operator,
    ) -> Result<CalculateResponse, ClientError> {
        let request = self
            .request(Method::POST, "/calculate")?
            .json(&CalculateRequest {
                operand1,
                operand2,
                operator,
            });
        self.send("/calculate", request).await
    }

    async fn memory_add(&self, value: f64) -> Result<MemoryResponse, ClientError> {
        let request = self
            .request(Method::POST, "/memory/add")?
            .json(&MemoryValueRequest { value });
        self.send("/memory/add", request).await
    }

    async fn memory_subtract(&self, value: f64) -> Result<MemoryResponse, ClientError> {
        let request = self
            .request(Method::POST, "/memory/subtract")?
            .json(&MemoryValueRequest { value });
        self.send("/memory/subtract", request).await
    }

    async fn memory_recall(&self) -> Result<MemoryResponse, ClientError> {
        self.send("/memory", self.request(Method::GET, "/memory")?)
            .await
    }

    async fn memory_clear(&self) -> Result<MemoryResponse, ClientError> {
        self.send("/memory", self.request(Method::DELETE, "/memory")?)
            .await
    }
}

fn normalize_server_url(raw: String) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|err| ClientError::InvalidServerUrl {
        url: raw.clone(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidServerUrl {
            url: raw.clone(),
            reason: "server_url must start with http:// or https://".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
