//! Request and response bodies of the counter handler

use serde::{Deserialize, Serialize};

/// Body posted to the increment handler
///
/// The handler only accepts `{"hello": "world"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementRequest {
    pub hello: String,
}

impl Default for IncrementRequest {
    fn default() -> Self {
        Self {
            hello: "world".to_string(),
        }
    }
}

/// Block data returned by the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_body() {
        let body = serde_json::to_string(&IncrementRequest::default()).unwrap();
        assert_eq!(body, r#"{"hello":"world"}"#);
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let response: CountResponse =
            serde_json::from_str(r#"{"count": 3, "other": true}"#).unwrap();
        assert_eq!(response.count, 3);
    }

    #[test]
    fn test_response_requires_count() {
        assert!(serde_json::from_str::<CountResponse>(r#"{"total": 3}"#).is_err());
    }
}
