use crate::validator::ValidationError;
use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Erro ao classificar o email. Tente novamente.";
pub const TEXT_SERVICE_FALLBACK: &str = "Erro ao processar o email";
pub const FILE_SERVICE_FALLBACK: &str = "Erro ao processar o arquivo";

/// Every way a submission can end without results. All of them surface
/// through the same error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Message is either server-supplied or a path-specific fallback.
    #[error("{0}")]
    Service(String),
    /// Detail is kept for logs; users only ever see [`GENERIC_FAILURE`].
    #[error("{}", GENERIC_FAILURE)]
    Transport { detail: String },
}

impl ClassifyError {
    pub fn transport(detail: impl Into<String>) -> Self {
        ClassifyError::Transport {
            detail: detail.into(),
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ClassifyError::Validation(_) => "validation",
            ClassifyError::Service(_) => "service",
            ClassifyError::Transport { .. } => "transport",
        }
    }
}
