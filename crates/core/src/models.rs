use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    #[default]
    Text,
    File,
}

/// A file as handed over by a file picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub path: PathBuf,
}

impl FileHandle {
    /// Builds a handle from a path on disk, deriving the MIME type from the
    /// extension and falling back to content sniffing.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            mime: detect_mime(path),
            size: meta.len(),
            path: path.to_path_buf(),
        })
    }
}

fn detect_mime(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "txt" => "text/plain".to_string(),
        "pdf" => "application/pdf".to_string(),
        _ => infer::get_from_path(path)
            .ok()
            .flatten()
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Productive,
    Unproductive,
}

impl Category {
    /// Binary at display time: only `produtivo` (any case) is productive.
    pub fn from_label(label: &str) -> Self {
        if label.to_lowercase() == "produtivo" {
            Category::Productive
        } else {
            Category::Unproductive
        }
    }

    pub fn css_variant(&self) -> &'static str {
        match self {
            Category::Productive => "produtivo",
            Category::Unproductive => "improdutivo",
        }
    }
}

/// A classification ready for display. Built in one go from a successful
/// response and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub category_label: String,
    pub category: Category,
    pub confidence: u8,
    pub preview: String,
    pub suggested_reply: String,
}

impl ClassificationResult {
    pub fn confidence_text(&self) -> String {
        format!("{}% de confiança", self.confidence)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Form,
    Loading,
    Results,
    ErrorShown,
}
