//! Projects a service response into a [`ClassificationResult`].

use crate::error::ClassifyError;
use crate::models::{Category, ClassificationResult};
use providers::ClassifyResponse;
use serde_json::Value;

pub const ELLIPSIS: &str = "...";

/// Where the preview shown next to a result comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewSource {
    /// The trimmed text the user submitted.
    Submitted(String),
    /// The `email_preview` field of the response (file uploads).
    Service(Option<Value>),
}

impl PreviewSource {
    /// Non-string service previews are coerced: null or missing becomes
    /// empty, anything else its compact JSON text.
    pub fn into_text(self) -> String {
        match self {
            PreviewSource::Submitted(text) => text,
            PreviewSource::Service(None) | PreviewSource::Service(Some(Value::Null)) => {
                String::new()
            }
            PreviewSource::Service(Some(Value::String(s))) => s,
            PreviewSource::Service(Some(other)) => other.to_string(),
        }
    }
}

pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Builds the full result or routes to the error path. A non-empty embedded
/// `error` wins over every other field.
pub fn render(
    response: ClassifyResponse,
    preview: PreviewSource,
    preview_chars: usize,
) -> Result<ClassificationResult, ClassifyError> {
    if let Some(message) = response.error.filter(|m| !m.is_empty()) {
        return Err(ClassifyError::Service(message));
    }
    let category_label = response
        .categoria
        .ok_or_else(|| ClassifyError::transport("response is missing `categoria`"))?;
    let confidence = response
        .confianca
        .ok_or_else(|| ClassifyError::transport("response is missing `confianca`"))?;

    let suggested_reply = response
        .resposta_automatica
        .filter(|r| !r.is_empty())
        .or(response.resposta_sugerida)
        .unwrap_or_default();

    Ok(ClassificationResult {
        category: Category::from_label(&category_label),
        category_label,
        confidence: confidence.round().clamp(0.0, 100.0) as u8,
        preview: truncate_preview(&preview.into_text(), preview_chars),
        suggested_reply,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> ClassifyResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn productive_result() {
        let result = render(
            response(json!({
                "categoria": "Produtivo",
                "confianca": 92,
                "resposta_automatica": "Recebemos seu email."
            })),
            PreviewSource::Submitted("Qual o status do chamado #12345?".into()),
            150,
        )
        .unwrap();

        assert_eq!(result.category_label, "Produtivo");
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.category.css_variant(), "produtivo");
        assert_eq!(result.confidence_text(), "92% de confiança");
        assert_eq!(result.suggested_reply, "Recebemos seu email.");
        assert_eq!(result.preview, "Qual o status do chamado #12345?");
    }

    #[test]
    fn embedded_error_takes_precedence() {
        let err = render(
            response(json!({
                "categoria": "Produtivo",
                "confianca": 99,
                "error": "Modelo indisponível"
            })),
            PreviewSource::Submitted("irrelevant text".into()),
            150,
        )
        .unwrap_err();
        assert_eq!(err, ClassifyError::Service("Modelo indisponível".into()));
    }

    #[test]
    fn empty_embedded_error_is_ignored() {
        let result = render(
            response(json!({
                "categoria": "Produtivo",
                "confianca": 92,
                "resposta_automatica": "Recebemos seu email.",
                "error": ""
            })),
            PreviewSource::Submitted("Qual o status do chamado?".into()),
            150,
        )
        .unwrap();
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.confidence, 92);
    }

    #[test]
    fn secondary_reply_used_only_without_primary() {
        let both = render(
            response(json!({
                "categoria": "Improdutivo",
                "confianca": 60,
                "resposta_automatica": "primary",
                "resposta_sugerida": "secondary"
            })),
            PreviewSource::Service(None),
            150,
        )
        .unwrap();
        assert_eq!(both.suggested_reply, "primary");

        let only_secondary = render(
            response(json!({
                "categoria": "Improdutivo",
                "confianca": 60,
                "resposta_sugerida": "secondary"
            })),
            PreviewSource::Service(None),
            150,
        )
        .unwrap();
        assert_eq!(only_secondary.suggested_reply, "secondary");
        assert_eq!(only_secondary.category, Category::Unproductive);
    }

    #[test]
    fn long_preview_is_truncated_with_ellipsis() {
        let text: String = "abcdefghij".repeat(20);
        assert_eq!(text.chars().count(), 200);
        let preview = truncate_preview(&text, 150);
        assert_eq!(preview, format!("{}...", &text[..150]));

        let exact = "x".repeat(150);
        assert_eq!(truncate_preview(&exact, 150), exact);
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        let text = "ç".repeat(151);
        let preview = truncate_preview(&text, 150);
        assert_eq!(preview.chars().count(), 153);
        assert!(preview.ends_with("ç..."));
    }

    #[test]
    fn non_string_service_preview_is_coerced() {
        assert_eq!(PreviewSource::Service(Some(json!(42))).into_text(), "42");
        assert_eq!(PreviewSource::Service(Some(Value::Null)).into_text(), "");
        assert_eq!(
            PreviewSource::Service(Some(json!(["a", 1]))).into_text(),
            "[\"a\",1]"
        );
    }

    #[test]
    fn confidence_is_rounded_and_clamped() {
        let r = render(
            response(json!({ "categoria": "Produtivo", "confianca": 87.6 })),
            PreviewSource::Service(Some(json!("preview"))),
            150,
        )
        .unwrap();
        assert_eq!(r.confidence, 88);
        assert_eq!(r.suggested_reply, "");

        let r = render(
            response(json!({ "categoria": "Produtivo", "confianca": 140 })),
            PreviewSource::Service(None),
            150,
        )
        .unwrap();
        assert_eq!(r.confidence, 100);
    }

    #[test]
    fn missing_category_is_malformed() {
        let err = render(
            response(json!({ "confianca": 50 })),
            PreviewSource::Service(None),
            150,
        )
        .unwrap_err();
        assert!(matches!(err, ClassifyError::Transport { .. }));
    }
}
