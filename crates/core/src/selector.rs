use crate::models::{FileHandle, InputMode};
use crate::validator::{ValidationError, Validator};
use tracing::{info, warn};

/// Tracks the active input panel and the file picked for upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSelector {
    mode: InputMode,
    selected: Option<FileHandle>,
}

impl InputSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn selected_file(&self) -> Option<&FileHandle> {
        self.selected.as_ref()
    }

    /// Leaves both the typed text and any selected file untouched.
    pub fn switch_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// Handles a file-picker change. `None` means the user cancelled.
    ///
    /// An invalid file is rolled back immediately, so the selection never
    /// holds a file that failed validation.
    pub fn select_file(
        &mut self,
        handle: Option<FileHandle>,
        validator: &Validator,
    ) -> Result<Option<&FileHandle>, ValidationError> {
        let Some(handle) = handle else {
            self.selected = None;
            return Ok(None);
        };
        if let Err(err) = validator.validate_file(&handle) {
            warn!(file = %handle.name, mime = %handle.mime, size = handle.size, "file rejected: {err}");
            self.selected = None;
            return Err(err);
        }
        info!(file = %handle.name, size = handle.size, "file selected");
        self.selected = Some(handle);
        Ok(self.selected.as_ref())
    }

    pub fn filename_label(&self) -> Option<String> {
        self.selected
            .as_ref()
            .map(|f| format!("Arquivo enviado: {} ({})", f.name, format_file_size(f.size)))
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.mode = InputMode::Text;
    }
}

/// Human-readable size in Bytes, KB or MB (base 1024, two decimals at most).
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
