//! Synchronous checks run before anything touches the network.

use crate::config::ValidationConfig;
use crate::models::FileHandle;
use crate::selector::format_file_size;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor, digite ou cole um email para classificar.")]
    EmptyText,
    #[error("O email é muito curto. Forneça um email com pelo menos {min} caracteres.")]
    TextTooShort { min: usize },
    #[error("Por favor, selecione um arquivo para classificar.")]
    NoFileSelected,
    #[error("Tipo de arquivo inválido. Use .txt ou .pdf")]
    UnsupportedFileType { mime: String },
    #[error("Tamanho do arquivo excede {}", size_limit(.max))]
    FileTooLarge { size: u64, max: u64 },
}

fn size_limit(max: &u64) -> String {
    format_file_size(*max)
}

#[derive(Debug, Clone)]
pub struct Validator {
    cfg: ValidationConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl Validator {
    pub fn new(cfg: ValidationConfig) -> Self {
        Self { cfg }
    }

    /// Returns the trimmed text on success.
    pub fn validate_text<'a>(&self, text: &'a str) -> Result<&'a str, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        // Counts Unicode scalar values, so an emoji is one character here
        // where a UTF-16 length would count two.
        if trimmed.chars().count() < self.cfg.min_text_chars {
            return Err(ValidationError::TextTooShort {
                min: self.cfg.min_text_chars,
            });
        }
        Ok(trimmed)
    }

    pub fn validate_file(&self, file: &FileHandle) -> Result<(), ValidationError> {
        if !self.cfg.accepted_mime_types.iter().any(|m| m == &file.mime) {
            return Err(ValidationError::UnsupportedFileType {
                mime: file.mime.clone(),
            });
        }
        if file.size > self.cfg.max_file_bytes {
            return Err(ValidationError::FileTooLarge {
                size: file.size,
                max: self.cfg.max_file_bytes,
            });
        }
        Ok(())
    }
}
