use std::sync::Arc;

use shared::domain::FormSubmission;
use tracing::{info, warn};

use crate::surface::Renderer;

/// One submit of the demo form, as raw `(name, value)` pairs in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmitEvent {
    fields: Vec<(String, String)>,
    default_prevented: bool,
}

impl FormSubmitEvent {
    pub fn new<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
            default_prevented: false,
        }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(FormSubmission),
    Rejected { reason: String },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            SubmitOutcome::Accepted(_) => None,
            SubmitOutcome::Rejected { reason } => Some(reason),
        }
    }
}

#[derive(Clone)]
pub struct FormValidator {
    renderer: Arc<dyn Renderer>,
}

impl FormValidator {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { renderer }
    }

    pub fn handle_submit(&self, event: &mut FormSubmitEvent) -> SubmitOutcome {
        event.prevent_default();

        let submission = FormSubmission::from_fields(event.fields().iter().cloned());
        if let Err(err) = submission.validate() {
            let reason = err.to_string();
            warn!(fields = submission.len(), "rejected form submission: {reason}");
            self.renderer.show_invalid_submission(&reason);
            return SubmitOutcome::Rejected { reason };
        }

        info!(data = ?submission.fields(), "form submitted");
        self.renderer.reset_form();
        SubmitOutcome::Accepted(submission)
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
