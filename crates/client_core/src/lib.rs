//! Controller core for the practice panel: theme persistence, the counter,
//! the users fetch and the demo form, wired to the UI through ports.

pub mod config;
pub mod controller;
pub mod counter;
pub mod error;
pub mod form;
pub mod preferences;
pub mod surface;
pub mod theme;
pub mod transport;
pub mod users;

pub use config::{load_settings, Settings};
pub use controller::{AppContext, AppController, Dispatched, UiAction};
pub use counter::Counter;
pub use error::FetchError;
pub use form::{FormSubmitEvent, FormValidator, SubmitOutcome};
pub use preferences::PreferencesStore;
pub use surface::{Control, Renderer, TriggerState, UsersView};
pub use theme::ThemeStore;
pub use transport::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use users::UserFetcher;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
