//! Wire types and client abstractions for the remote classification service.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod http;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("service returned status {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Service { status: u16, message: Option<String> },
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// The single multipart part sent to `/classify`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyRequest {
    /// Sent as the `email_text` field.
    Text(String),
    /// Sent as the `file` field.
    File {
        name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl ClassifyRequest {
    pub fn field_name(&self) -> &'static str {
        match self {
            ClassifyRequest::Text(_) => "email_text",
            ClassifyRequest::File { .. } => "file",
        }
    }
}

/// Body returned by `/classify`.
///
/// Every field is optional on the wire: a 2xx body may still carry `error`,
/// and interpreting missing fields is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    #[serde(default, deserialize_with = "lenient_label")]
    pub categoria: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub confianca: Option<f64>,
    #[serde(default)]
    pub resposta_automatica: Option<String>,
    #[serde(default)]
    pub resposta_sugerida: Option<String>,
    #[serde(default)]
    pub email_preview: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Accepts any scalar label; numbers and booleans keep their JSON text.
fn lenient_label<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
        _ => None,
    })
}

/// Accepts a number or a numeric string such as `"92"`.
fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    Loading { message: Option<String> },
}

#[async_trait::async_trait]
pub trait ClassificationService: Send + Sync {
    /// Performs exactly one request; no retries.
    async fn classify(&self, request: ClassifyRequest) -> Result<ClassifyResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_fields_are_decoded_leniently() {
        let resp: ClassifyResponse =
            serde_json::from_value(json!({ "categoria": 1, "confianca": " 92 " })).unwrap();
        assert_eq!(resp.categoria.as_deref(), Some("1"));
        assert_eq!(resp.confianca, Some(92.0));

        let resp: ClassifyResponse =
            serde_json::from_value(json!({ "categoria": null, "confianca": "alto" })).unwrap();
        assert_eq!(resp.categoria, None);
        assert_eq!(resp.confianca, None);

        let resp: ClassifyResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(resp, ClassifyResponse::default());
    }
}
