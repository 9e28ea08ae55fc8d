use crate::{
    ClassificationService, ClassifyRequest, ClassifyResponse, ErrorBody, HealthStatus,
    ProviderError, Readiness,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct HttpClassifierConfig {
    pub base_url: String,
}

impl Default for HttpClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct HttpClassifier {
    client: Client,
    cfg: Arc<HttpClassifierConfig>,
}

impl HttpClassifier {
    pub fn new(cfg: HttpClassifierConfig) -> Self {
        Self {
            client: Client::new(),
            cfg: Arc::new(cfg),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.cfg.base_url.trim_end_matches('/'), path)
    }

    pub async fn health(&self) -> Result<HealthStatus, ProviderError> {
        let resp = self
            .client
            .get(self.endpoint("health"))
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Service {
                status: status.as_u16(),
                message: None,
            });
        }
        resp.json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    /// `/ready` answers 503 while the service is still loading its models.
    pub async fn ready(&self) -> Result<Readiness, ProviderError> {
        #[derive(Deserialize)]
        struct LoadingBody {
            #[serde(default)]
            message: Option<String>,
        }

        let resp = self
            .client
            .get(self.endpoint("ready"))
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        match resp.status() {
            s if s.is_success() => Ok(Readiness::Ready),
            StatusCode::SERVICE_UNAVAILABLE => {
                let body = resp
                    .bytes()
                    .await
                    .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
                let message = serde_json::from_slice::<LoadingBody>(&body)
                    .ok()
                    .and_then(|b| b.message);
                Ok(Readiness::Loading { message })
            }
            s => Err(ProviderError::Service {
                status: s.as_u16(),
                message: None,
            }),
        }
    }
}

fn build_form(request: ClassifyRequest) -> Result<Form, ProviderError> {
    let field = request.field_name();
    match request {
        ClassifyRequest::Text(text) => Ok(Form::new().text(field, text)),
        ClassifyRequest::File { name, mime, bytes } => {
            let part = Part::bytes(bytes)
                .file_name(name)
                .mime_str(&mime)
                .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
            Ok(Form::new().part(field, part))
        }
    }
}

#[async_trait::async_trait]
impl ClassificationService for HttpClassifier {
    async fn classify(&self, request: ClassifyRequest) -> Result<ClassifyResponse, ProviderError> {
        debug!(field = request.field_name(), "posting classification request");
        let form = build_form(request)?;

        let resp = self
            .client
            .post(self.endpoint("classify"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        debug!(%status, bytes = body.len(), "classification response received");

        if !status.is_success() {
            let parsed: ErrorBody = serde_json::from_slice(&body)
                .map_err(|e| ProviderError::Decode(format!("status {}: {}", status, e)))?;
            return Err(ProviderError::Service {
                status: status.as_u16(),
                message: parsed.error.filter(|m| !m.is_empty()),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}
