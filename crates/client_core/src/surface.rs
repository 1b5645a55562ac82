//! Renderer port: the controls the controller binds to and the presentation
//! slots it writes into.

use shared::domain::UserRecord;

pub const LOAD_USERS_LABEL: &str = "Load Users";
pub const LOADING_LABEL: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    ThemeToggle,
    CounterDisplay,
    Increment,
    Decrement,
    LoadUsers,
    UsersList,
    DemoForm,
}

impl Control {
    pub fn label(self) -> &'static str {
        match self {
            Control::ThemeToggle => "theme_toggle",
            Control::CounterDisplay => "counter_display",
            Control::Increment => "increment",
            Control::Decrement => "decrement",
            Control::LoadUsers => "load_users",
            Control::UsersList => "users_list",
            Control::DemoForm => "demo_form",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerState {
    pub enabled: bool,
    pub label: String,
}

impl TriggerState {
    pub fn idle() -> Self {
        Self {
            enabled: true,
            label: LOAD_USERS_LABEL.to_string(),
        }
    }

    pub fn loading() -> Self {
        Self {
            enabled: false,
            label: LOADING_LABEL.to_string(),
        }
    }
}

/// Content of the users list. Each render replaces the previous content.
#[derive(Debug, Clone, PartialEq)]
pub enum UsersView {
    Users(Vec<UserRecord>),
    Error(String),
}

/// Implementations are called from the backend worker and must hand the
/// update to whatever thread owns the real widgets. Slots whose control is
/// absent are never written.
pub trait Renderer: Send + Sync {
    fn has_control(&self, control: Control) -> bool;
    fn apply_dark_mode(&self, enabled: bool);
    fn show_count(&self, value: i64);
    fn set_trigger(&self, trigger: &TriggerState);
    fn replace_users(&self, view: UsersView);
    fn show_invalid_submission(&self, message: &str);
    fn reset_form(&self);
}
