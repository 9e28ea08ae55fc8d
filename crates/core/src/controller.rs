//! Form / Loading / Results / ErrorShown state machine.
//!
//! Each submission is tagged with a generation. Starting another submission
//! or resetting the form bumps it, and only the latest generation's response
//! is ever applied, so a slow response cannot overwrite a newer state.

use crate::config::AppConfig;
use crate::error::ClassifyError;
use crate::models::{ClassificationResult, FileHandle, InputMode, ViewState};
use crate::submission::{Submission, SubmissionClient};
use crate::validator::Validator;
use crate::view::{ScrollTarget, Section, View, ViewModel};
use providers::ClassificationService;
use std::sync::Arc;
use tracing::{debug, warn};

/// A submission that passed validation and is waiting for its response.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    submission: Submission,
}

impl Ticket {
    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Clears the loading flag however the request ends, including when the
/// submitting future is dropped mid-flight.
struct LoadingGuard<'a>(&'a mut bool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct Controller {
    vm: ViewModel,
    validator: Validator,
    client: SubmissionClient,
    view: Box<dyn View + Send>,
    generation: u64,
}

impl Controller {
    pub fn new(
        cfg: &AppConfig,
        service: Arc<dyn ClassificationService>,
        view: Box<dyn View + Send>,
    ) -> Self {
        let mut controller = Self {
            vm: ViewModel::default(),
            validator: Validator::new(cfg.validation.clone()),
            client: SubmissionClient::new(service, cfg.display.preview_chars),
            view,
            generation: 0,
        };
        controller.render();
        controller
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.vm
    }

    pub fn view_state(&self) -> ViewState {
        self.vm.view_state()
    }

    pub fn client(&self) -> &SubmissionClient {
        &self.client
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.vm.text = text.into();
        self.render();
    }

    pub fn switch_mode(&mut self, mode: InputMode) {
        self.vm.selector.switch_mode(mode);
        self.render();
    }

    /// File-picker change; `None` when the user cancelled the dialog.
    pub fn select_file(&mut self, handle: Option<FileHandle>) {
        let outcome = self
            .vm
            .selector
            .select_file(handle, &self.validator)
            .map(|selected| selected.is_some());
        match outcome {
            Ok(true) => self.vm.hide_error(),
            Ok(false) => {}
            Err(err) => self.vm.show_error(err.to_string()),
        }
        self.render();
    }

    fn validate(&self) -> Result<Submission, ClassifyError> {
        match self.vm.selector.mode() {
            InputMode::Text => {
                let text = self.validator.validate_text(&self.vm.text)?;
                Ok(Submission::Text(text.to_string()))
            }
            InputMode::File => {
                let file = self
                    .vm
                    .selector
                    .selected_file()
                    .cloned()
                    .ok_or(crate::validator::ValidationError::NoFileSelected)?;
                Ok(Submission::File(file))
            }
        }
    }

    /// Validates the current input and, on success, enters Loading. On
    /// failure the error is shown and no request may be sent.
    pub fn begin_submission(&mut self) -> Option<Ticket> {
        if self.vm.error.is_some() {
            self.vm.hide_error();
            self.render();
        }
        let submission = match self.validate() {
            Ok(submission) => submission,
            Err(err) => {
                warn!(kind = err.kind(), "submission rejected: {}", err);
                self.vm.show_error(err.user_message());
                self.render();
                return None;
            }
        };
        self.generation += 1;
        self.vm.loading = true;
        self.render();
        Some(Ticket {
            generation: self.generation,
            submission,
        })
    }

    /// Applies a response. Returns false when the ticket is stale and the
    /// outcome was discarded.
    pub fn finish_submission(
        &mut self,
        ticket: Ticket,
        outcome: Result<ClassificationResult, ClassifyError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale classification response"
            );
            return false;
        }
        self.vm.loading = false;
        match outcome {
            Ok(result) => self.vm.show_results(result),
            Err(err) => self.vm.show_error(err.user_message()),
        }
        self.render();
        true
    }

    /// Validate, send and render in one go.
    pub async fn submit(&mut self) -> ViewState {
        let Some(ticket) = self.begin_submission() else {
            return self.vm.view_state();
        };
        let outcome = {
            let _loading = LoadingGuard(&mut self.vm.loading);
            self.client.send(&ticket.submission).await
        };
        self.finish_submission(ticket, outcome);
        self.vm.view_state()
    }

    /// Back to a blank form in text mode. Any response still in flight is
    /// discarded when it arrives.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.vm.text.clear();
        self.vm.selector.clear();
        self.vm.section = Section::Form;
        self.vm.result = None;
        self.vm.loading = false;
        self.vm.hide_error();
        self.vm.scroll = ScrollTarget::Top;
        self.render();
    }

    fn render(&mut self) {
        self.view.render(&self.vm);
    }
}
