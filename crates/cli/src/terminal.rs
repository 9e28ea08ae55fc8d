use serde::Serialize;
use std::io::Write;
use triage_core::models::{ClassificationResult, InputMode, ViewState};
use triage_core::view::{Section, View, ViewModel};

/// Prints what changed between two consecutive renders.
pub struct TerminalView<W: Write + Send> {
    out: W,
    last: ViewModel,
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: ViewModel::default(),
        }
    }
}

impl<W: Write + Send> View for TerminalView<W> {
    fn render(&mut self, vm: &ViewModel) {
        for line in describe(&self.last, vm) {
            let _ = writeln!(self.out, "{}", line);
        }
        let _ = self.out.flush();
        self.last = vm.clone();
    }
}

pub fn describe(prev: &ViewModel, next: &ViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if prev.active_panel() != next.active_panel() {
        lines.push(match next.active_panel() {
            InputMode::Text => "Modo: texto".to_string(),
            InputMode::File => "Modo: arquivo".to_string(),
        });
    }

    let (prev_label, next_label) = (prev.filename_label(), next.filename_label());
    if prev_label != next_label {
        lines.push(next_label.unwrap_or_else(|| "Nenhum arquivo selecionado".to_string()));
    }

    if next.loading && !prev.loading {
        lines.push("Classificando...".to_string());
    }

    if prev.error != next.error {
        if let Some(message) = &next.error {
            lines.push(format!("Erro: {}", message));
        }
    }

    // A finished request reprints its result even when it is unchanged.
    if prev.result != next.result || (prev.loading && !next.loading) {
        if let Some(result) = &next.result {
            lines.extend(result_lines(result));
        }
    }

    if prev.section == Section::Results && next.section == Section::Form {
        lines.push("Nova classificação: formulário limpo.".to_string());
    }

    lines
}

pub fn result_lines(result: &ClassificationResult) -> Vec<String> {
    vec![
        format!(
            "Categoria: {} [{}]",
            result.category_label,
            result.category.css_variant()
        ),
        result.confidence_text(),
        format!("Prévia: {}", result.preview),
        "Resposta sugerida:".to_string(),
        result.suggested_reply.clone(),
    ]
}

#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub state: ViewState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a ClassificationResult>,
}

impl<'a> Summary<'a> {
    pub fn of(vm: &'a ViewModel) -> Self {
        Self {
            state: vm.view_state(),
            error: vm.error.as_deref(),
            result: vm.result.as_ref(),
        }
    }
}
