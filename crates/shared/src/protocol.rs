use serde::{Deserialize, Serialize};

use crate::domain::Operator;

/// Header scoping remote memory to one client session.
pub const SESSION_HEADER: &str = "X-Session-ID";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub operand1: f64,
    pub operand2: f64,
    pub operator: Operator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub result: f64,
    /// Human-readable summary such as `5 + 3 = 8`.
    #[serde(default, alias = "expression", skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryValueRequest {
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryResponse {
    #[serde(alias = "memory")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

impl MemoryResponse {
    pub fn is_non_zero(&self) -> bool {
        self.value != 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_request_uses_service_field_names() {
        let body = serde_json::to_value(CalculateRequest {
            operand1: 5.0,
            operand2: 3.0,
            operator: Operator::Add,
        })
        .expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({ "operand1": 5.0, "operand2": 3.0, "operator": "+" })
        );
    }

    #[test]
    fn calculate_response_accepts_expression_alias() {
        let response: CalculateResponse =
            serde_json::from_str(r#"{"result":8.0,"expression":"5 + 3 = 8"}"#).expect("decode");
        assert_eq!(response.result, 8.0);
        assert_eq!(response.operation.as_deref(), Some("5 + 3 = 8"));
    }

    #[test]
    fn memory_response_accepts_memory_alias() {
        let response: MemoryResponse =
            serde_json::from_str(r#"{"memory":10,"operation":"M+ 10"}"#).expect("decode");
        assert_eq!(response.value, 10.0);
        assert!(response.is_non_zero());

        let cleared: MemoryResponse =
            serde_json::from_str(r#"{"value":0.0,"message":"Memory cleared"}"#).expect("decode");
        assert!(!cleared.is_non_zero());
    }
}
