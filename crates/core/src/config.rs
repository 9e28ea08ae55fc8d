use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_TEXT_CHARS: usize = 10;
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_PREVIEW_CHARS: usize = 150;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: providers::http::DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub min_text_chars: usize,
    pub max_file_bytes: u64,
    pub accepted_mime_types: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            accepted_mime_types: vec!["text/plain".to_string(), "application/pdf".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub preview_chars: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

pub const ENV_PREFIX: &str = "TRIAGE";

/// Layers built-in defaults, then a config file, then `TRIAGE_*` env vars
/// (`TRIAGE_SERVICE__BASE_URL=http://host:8000`).
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    load_with_env(path, ENV_PREFIX)
}

fn environment(prefix: &str) -> config::Environment {
    config::Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(path: Option<&str>, env_prefix: &str) -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();
    let mut settings = config::Config::builder()
        .set_default("service.base_url", defaults.service.base_url)?
        .set_default(
            "validation.min_text_chars",
            defaults.validation.min_text_chars as i64,
        )?
        .set_default(
            "validation.max_file_bytes",
            defaults.validation.max_file_bytes as i64,
        )?
        .set_default(
            "validation.accepted_mime_types",
            defaults.validation.accepted_mime_types,
        )?
        .set_default("display.preview_chars", defaults.display.preview_chars as i64)?;
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(environment(env_prefix));
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
