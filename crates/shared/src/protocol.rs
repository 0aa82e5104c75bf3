use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_UPLOAD_PATH: &str = "/api/upload";
pub const DEFAULT_QUERY_PATH: &str = "/api/query_stream";
pub const DEFAULT_HEALTH_PATH: &str = "/";

/// Multipart form field carrying the PDF.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Shown in place of an answer when a successful reply has no `response`.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No 'response' key in the result.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Successful query reply. The body is parsed loosely: anything that is not an
/// object with a non-empty string `response` yields the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResponse {
    pub response: Option<String>,
}

impl QueryResponse {
    pub fn from_value(value: &Value) -> Self {
        let response = value
            .get("response")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        Self { response }
    }

    pub fn into_answer(self) -> String {
        self.response
            .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string())
    }
}

/// Error body of a failed query. Fields are kept as raw JSON because services
/// disagree on their shape (FastAPI validation errors send `detail` as a list).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl ErrorBody {
    /// `detail`, then `error`, then a generic status line.
    pub fn resolve_message(&self, status: u16) -> String {
        non_empty_str(self.detail.as_ref())
            .or_else(|| non_empty_str(self.error.as_ref()))
            .map(str::to_string)
            .unwrap_or_else(|| status_message(status))
    }
}

pub fn status_message(status: u16) -> String {
    format!("Server responded with status: {status}")
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|text| !text.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn query_request_wire_shape() {
        let body = serde_json::to_value(QueryRequest {
            query: "what is covered?".to_string(),
        })
        .expect("serialize");
        assert_eq!(body, json!({ "query": "what is covered?" }));
    }

    #[test]
    fn error_message_prefers_detail_then_error_then_status() {
        let both: ErrorBody =
            serde_json::from_value(json!({ "detail": "bad query", "error": "other" }))
                .expect("parse");
        assert_eq!(both.resolve_message(422), "bad query");

        let error_only: ErrorBody =
            serde_json::from_value(json!({ "error": "engine offline" })).expect("parse");
        assert_eq!(error_only.resolve_message(503), "engine offline");

        let empty: ErrorBody = serde_json::from_value(json!({})).expect("parse");
        assert_eq!(
            empty.resolve_message(500),
            "Server responded with status: 500"
        );
    }

    #[test]
    fn non_string_detail_falls_through() {
        let body: ErrorBody = serde_json::from_value(json!({
            "detail": [{ "loc": ["body", "query"], "msg": "field required" }],
            "error": ""
        }))
        .expect("parse");
        assert_eq!(body.resolve_message(422), "Server responded with status: 422");
    }

    #[test]
    fn missing_or_empty_response_uses_placeholder() {
        assert_eq!(
            QueryResponse::from_value(&json!({})).into_answer(),
            NO_RESPONSE_PLACEHOLDER
        );
        assert_eq!(
            QueryResponse::from_value(&json!({ "response": "" })).into_answer(),
            NO_RESPONSE_PLACEHOLDER
        );
        assert_eq!(
            QueryResponse::from_value(&json!([{ "error": "x" }, 503])).into_answer(),
            NO_RESPONSE_PLACEHOLDER
        );
        assert_eq!(
            QueryResponse::from_value(&json!({ "response": "**bold**" })).into_answer(),
            "**bold**"
        );
    }
}
