use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Arc,
};

use shared::domain::UserRecord;
use tracing::{error, info};

use crate::{
    error::FetchError,
    surface::{Control, Renderer, TriggerState, UsersView},
    transport::HttpClient,
};

pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Loads the users listing and renders it. Calls are neither deduplicated
/// nor cancelled: overlapping loads race and whichever settles last owns the
/// list view.
#[derive(Clone)]
pub struct UserFetcher {
    http: Arc<dyn HttpClient>,
    renderer: Arc<dyn Renderer>,
    users_url: String,
    in_flight: Arc<AtomicUsize>,
    next_request: Arc<AtomicU64>,
}

impl UserFetcher {
    pub fn new(
        http: Arc<dyn HttpClient>,
        renderer: Arc<dyn Renderer>,
        users_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            renderer,
            users_url: users_url.into(),
            in_flight: Arc::new(AtomicUsize::new(0)),
            next_request: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub async fn load_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        let request = self.next_request.fetch_add(1, Ordering::Relaxed);
        let _trigger =
            TriggerGuard::engage(Arc::clone(&self.renderer), Arc::clone(&self.in_flight));
        info!(request, url = %self.users_url, "loading users");

        let outcome = self.fetch_users().await;
        match &outcome {
            Ok(users) => {
                info!(request, count = users.len(), "users loaded");
                self.render(UsersView::Users(users.clone()));
            }
            Err(err) => {
                error!(request, error = %err, "failed to load users");
                self.render(UsersView::Error(format!("Error loading users: {err}")));
            }
        }
        outcome
    }

    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        let response = self.http.get(&self.users_url).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }
        serde_json::from_slice(&response.body).map_err(|err| FetchError::Parse(err.to_string()))
    }

    fn render(&self, view: UsersView) {
        if self.renderer.has_control(Control::UsersList) {
            self.renderer.replace_users(view);
        }
    }
}

/// Holds the trigger in its loading state for one invocation and restores it
/// exactly once when dropped, whichever way the invocation ends.
struct TriggerGuard {
    renderer: Arc<dyn Renderer>,
    in_flight: Arc<AtomicUsize>,
}

impl TriggerGuard {
    fn engage(renderer: Arc<dyn Renderer>, in_flight: Arc<AtomicUsize>) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        if renderer.has_control(Control::LoadUsers) {
            renderer.set_trigger(&TriggerState::loading());
        }
        Self {
            renderer,
            in_flight,
        }
    }
}

impl Drop for TriggerGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.renderer.has_control(Control::LoadUsers) {
            self.renderer.set_trigger(&TriggerState::idle());
        }
    }
}

#[cfg(test)]
#[path = "tests/users_tests.rs"]
mod tests;
