//! Events flowing from the backend worker to the UI thread.

use client_core::{TriggerState, UsersView};

#[derive(Debug)]
pub enum UiEvent {
    DarkModeApplied(bool),
    CountChanged(i64),
    TriggerChanged(TriggerState),
    UsersReplaced(UsersView),
    InvalidSubmission(String),
    FormReset,
    Info(String),
    Error(String),
}
