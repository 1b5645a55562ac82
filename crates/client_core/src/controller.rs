//! Startup wiring and action routing for the panel.

use std::{collections::BTreeSet, sync::Arc};

use anyhow::Context;
use shared::domain::{ThemeMode, UserRecord};
use storage::KeyValueStore;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{
    config::{validate_users_url, Settings},
    counter::Counter,
    error::FetchError,
    form::{FormSubmitEvent, FormValidator, SubmitOutcome},
    preferences::PreferencesStore,
    surface::{Control, Renderer},
    theme::ThemeStore,
    transport::{HttpClient, ReqwestHttpClient},
    users::UserFetcher,
};

/// Controls that receive a handler at startup, in binding order.
pub const BINDABLE_CONTROLS: [Control; 5] = [
    Control::ThemeToggle,
    Control::Increment,
    Control::Decrement,
    Control::LoadUsers,
    Control::DemoForm,
];

#[derive(Debug)]
pub enum UiAction {
    ToggleTheme,
    Increment,
    Decrement,
    LoadUsers,
    SubmitForm(FormSubmitEvent),
}

impl UiAction {
    pub fn control(&self) -> Control {
        match self {
            UiAction::ToggleTheme => Control::ThemeToggle,
            UiAction::Increment => Control::Increment,
            UiAction::Decrement => Control::Decrement,
            UiAction::LoadUsers => Control::LoadUsers,
            UiAction::SubmitForm(_) => Control::DemoForm,
        }
    }
}

/// Capabilities handed to the controller once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub renderer: Arc<dyn Renderer>,
    pub store: Arc<dyn KeyValueStore>,
    pub http: Arc<dyn HttpClient>,
    pub users_url: String,
    pub profile_name: String,
}

impl AppContext {
    pub fn from_settings(
        settings: &Settings,
        renderer: Arc<dyn Renderer>,
        store: Arc<dyn KeyValueStore>,
    ) -> anyhow::Result<Self> {
        let users_url = validate_users_url(&settings.users_url)?;
        let http = ReqwestHttpClient::new(settings.request_timeout())
            .context("failed to prepare users client")?;
        Ok(Self {
            renderer,
            store,
            http: Arc::new(http),
            users_url: users_url.to_string(),
            profile_name: settings.profile_name.clone(),
        })
    }
}

#[derive(Debug)]
pub enum Dispatched {
    Handled,
    Submitted(SubmitOutcome),
    Fetching(JoinHandle<Result<Vec<UserRecord>, FetchError>>),
    Unbound(Control),
}

pub struct AppController {
    theme: ThemeStore,
    preferences: PreferencesStore,
    counter: Counter,
    fetcher: UserFetcher,
    validator: FormValidator,
    bindings: BTreeSet<Control>,
    profile_name: String,
    dark_mode: bool,
}

impl AppController {
    /// Restores the theme, records the visit, builds a fresh counter and
    /// binds every control the surface actually has.
    pub async fn start(ctx: AppContext) -> Self {
        let theme = ThemeStore::new(Arc::clone(&ctx.store), Arc::clone(&ctx.renderer));
        let dark_mode = theme.is_dark_mode().await;
        if dark_mode {
            ctx.renderer.apply_dark_mode(true);
        }

        let preferences = PreferencesStore::new(Arc::clone(&ctx.store));
        preferences
            .record_visit(&ctx.profile_name, ThemeMode::from_dark_mode(dark_mode))
            .await;

        let counter = Counter::new(Arc::clone(&ctx.renderer));

        let mut bindings = BTreeSet::new();
        for control in BINDABLE_CONTROLS {
            if ctx.renderer.has_control(control) {
                bindings.insert(control);
            } else {
                debug!(control = control.label(), "control missing; feature disabled");
            }
        }
        info!(dark_mode, bound = bindings.len(), "panel controller started");

        Self {
            theme,
            preferences,
            counter,
            fetcher: UserFetcher::new(
                Arc::clone(&ctx.http),
                Arc::clone(&ctx.renderer),
                ctx.users_url,
            ),
            validator: FormValidator::new(ctx.renderer),
            bindings,
            profile_name: ctx.profile_name,
            dark_mode,
        }
    }

    pub fn is_bound(&self, control: Control) -> bool {
        self.bindings.contains(&control)
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn fetcher(&self) -> &UserFetcher {
        &self.fetcher
    }

    pub async fn dispatch(&mut self, action: UiAction) -> Dispatched {
        let control = action.control();
        if !self.is_bound(control) {
            debug!(control = control.label(), "ignoring action for unbound control");
            return Dispatched::Unbound(control);
        }

        match action {
            UiAction::ToggleTheme => {
                self.toggle_theme().await;
                Dispatched::Handled
            }
            UiAction::Increment => {
                self.counter.increment();
                Dispatched::Handled
            }
            UiAction::Decrement => {
                self.counter.decrement();
                Dispatched::Handled
            }
            UiAction::LoadUsers => {
                let fetcher = self.fetcher.clone();
                Dispatched::Fetching(tokio::spawn(async move { fetcher.load_users().await }))
            }
            UiAction::SubmitForm(mut event) => {
                Dispatched::Submitted(self.validator.handle_submit(&mut event))
            }
        }
    }

    async fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.theme.set_dark_mode(self.dark_mode).await;
        self.preferences
            .update_theme(&self.profile_name, ThemeMode::from_dark_mode(self.dark_mode))
            .await;
        info!(dark_mode = self.dark_mode, "theme toggled");
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
