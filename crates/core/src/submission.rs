use crate::config::AppConfig;
use crate::error::{ClassifyError, FILE_SERVICE_FALLBACK, TEXT_SERVICE_FALLBACK};
use crate::models::{ClassificationResult, FileHandle};
use crate::render::{self, PreviewSource};
use providers::http::{HttpClassifier, HttpClassifierConfig};
use providers::{ClassificationService, ClassifyRequest, ProviderError};
use std::sync::Arc;
use tracing::{error, info};

/// Input that already passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Text(String),
    File(FileHandle),
}

impl Submission {
    fn service_fallback(&self) -> &'static str {
        match self {
            Submission::Text(_) => TEXT_SERVICE_FALLBACK,
            Submission::File(_) => FILE_SERVICE_FALLBACK,
        }
    }
}

#[derive(Clone)]
pub struct SubmissionClient {
    service: Arc<dyn ClassificationService>,
    preview_chars: usize,
}

impl SubmissionClient {
    pub fn new(service: Arc<dyn ClassificationService>, preview_chars: usize) -> Self {
        Self {
            service,
            preview_chars,
        }
    }

    /// One request, one response, no retries.
    pub async fn send(
        &self,
        submission: &Submission,
    ) -> Result<ClassificationResult, ClassifyError> {
        let request = match submission {
            Submission::Text(text) => ClassifyRequest::Text(text.clone()),
            Submission::File(file) => {
                let bytes = tokio::fs::read(&file.path).await.map_err(|e| {
                    log_transport(&format!("reading {}: {}", file.path.display(), e))
                })?;
                ClassifyRequest::File {
                    name: file.name.clone(),
                    mime: file.mime.clone(),
                    bytes,
                }
            }
        };
        info!(field = request.field_name(), "submitting email for classification");

        let response = self
            .service
            .classify(request)
            .await
            .map_err(|e| map_provider_error(e, submission))?;

        let preview = match submission {
            Submission::Text(text) => PreviewSource::Submitted(text.clone()),
            Submission::File(_) => PreviewSource::Service(response.email_preview.clone()),
        };
        let result = render::render(response, preview, self.preview_chars).map_err(|e| {
            if let ClassifyError::Transport { detail } = &e {
                error!("classification failed: {}", detail);
            }
            e
        })?;
        info!(
            category = %result.category_label,
            confidence = result.confidence,
            "classification received"
        );
        Ok(result)
    }
}

pub fn build_service(config: &AppConfig) -> Arc<dyn ClassificationService> {
    Arc::new(HttpClassifier::new(HttpClassifierConfig {
        base_url: config.service.base_url.clone(),
    }))
}

fn log_transport(detail: &str) -> ClassifyError {
    error!("classification failed: {}", detail);
    ClassifyError::transport(detail)
}

fn map_provider_error(err: ProviderError, submission: &Submission) -> ClassifyError {
    match err {
        ProviderError::Service {
            status,
            message: Some(message),
        } if !message.is_empty() => {
            info!(status, "service rejected submission: {}", message);
            ClassifyError::Service(message)
        }
        ProviderError::Service { status, .. } => {
            info!(status, "service rejected submission without a message");
            ClassifyError::Service(submission.service_fallback().to_string())
        }
        other => log_transport(&other.to_string()),
    }
}
