//! The state a front-end draws, and the boundary it draws through.

use crate::models::{ClassificationResult, InputMode, ViewState};
use crate::selector::InputSelector;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Form,
    Results,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollTarget {
    #[default]
    Top,
    Results,
}

/// Everything visible on screen. Owned by the controller; front-ends only
/// ever receive it by shared reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    pub text: String,
    pub selector: InputSelector,
    pub section: Section,
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<ClassificationResult>,
    pub scroll: ScrollTarget,
}

impl ViewModel {
    pub fn view_state(&self) -> ViewState {
        if self.error.is_some() {
            ViewState::ErrorShown
        } else if self.loading {
            ViewState::Loading
        } else if self.section == Section::Results {
            ViewState::Results
        } else {
            ViewState::Form
        }
    }

    pub fn active_panel(&self) -> InputMode {
        self.selector.mode()
    }

    pub fn filename_label(&self) -> Option<String> {
        self.selector.filename_label()
    }

    pub(crate) fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.scroll = ScrollTarget::Top;
    }

    pub(crate) fn hide_error(&mut self) {
        self.error = None;
    }

    /// Only called with a fully built result, so nothing is ever half shown.
    pub(crate) fn show_results(&mut self, result: ClassificationResult) {
        self.result = Some(result);
        self.section = Section::Results;
        self.scroll = ScrollTarget::Results;
    }
}

/// Side-effect boundary: called once after every state transition.
pub trait View {
    fn render(&mut self, vm: &ViewModel);
}

/// For headless use.
#[derive(Debug, Default)]
pub struct NullView;

impl View for NullView {
    fn render(&mut self, _vm: &ViewModel) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_overlays_loading_and_form() {
        let mut vm = ViewModel::default();
        assert_eq!(vm.view_state(), ViewState::Form);
        vm.loading = true;
        assert_eq!(vm.view_state(), ViewState::Loading);
        vm.show_error("falhou");
        assert_eq!(vm.view_state(), ViewState::ErrorShown);
        vm.loading = false;
        vm.hide_error();
        assert_eq!(vm.view_state(), ViewState::Form);
    }
}
