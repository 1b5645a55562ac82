//! Backend commands queued from UI to backend worker.

use client_core::{FormSubmitEvent, UiAction};

#[derive(Debug)]
pub enum BackendCommand {
    ToggleTheme,
    Increment,
    Decrement,
    LoadUsers,
    SubmitForm { fields: Vec<(String, String)> },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::ToggleTheme => "toggle_theme",
            BackendCommand::Increment => "increment",
            BackendCommand::Decrement => "decrement",
            BackendCommand::LoadUsers => "load_users",
            BackendCommand::SubmitForm { .. } => "submit_form",
        }
    }

    pub fn into_action(self) -> UiAction {
        match self {
            BackendCommand::ToggleTheme => UiAction::ToggleTheme,
            BackendCommand::Increment => UiAction::Increment,
            BackendCommand::Decrement => UiAction::Decrement,
            BackendCommand::LoadUsers => UiAction::LoadUsers,
            BackendCommand::SubmitForm { fields } => {
                UiAction::SubmitForm(FormSubmitEvent::new(fields))
            }
        }
    }
}
