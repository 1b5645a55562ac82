use std::sync::Arc;

use chrono::Utc;
use shared::domain::{ThemeMode, UserPreferences};
use storage::KeyValueStore;
use tracing::warn;

pub const PREFERENCES_KEY: &str = "userData";

/// JSON preferences blob. Absent and unreadable blobs both load as `None`.
#[derive(Clone)]
pub struct PreferencesStore {
    store: Arc<dyn KeyValueStore>,
}

impl PreferencesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Option<UserPreferences> {
        let raw = match self.store.get(PREFERENCES_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "failed to read preferences");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(prefs) => Some(prefs),
            Err(err) => {
                warn!(error = %err, "ignoring malformed preferences blob");
                None
            }
        }
    }

    pub async fn save(&self, prefs: &UserPreferences) {
        let raw = match serde_json::to_string(prefs) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "failed to serialize preferences");
                return;
            }
        };
        if let Err(err) = self.store.set(PREFERENCES_KEY, &raw).await {
            warn!(error = %err, "failed to persist preferences");
        }
    }

    pub async fn record_visit(&self, name: &str, theme: ThemeMode) -> UserPreferences {
        let prefs = UserPreferences {
            name: name.to_string(),
            theme,
            last_visit: Utc::now(),
        };
        self.save(&prefs).await;
        prefs
    }

    /// Rewrites the theme, keeping the stored visit time when there is one.
    pub async fn update_theme(&self, name: &str, theme: ThemeMode) -> UserPreferences {
        let last_visit = self
            .load()
            .await
            .map(|prefs| prefs.last_visit)
            .unwrap_or_else(Utc::now);
        let prefs = UserPreferences {
            name: name.to_string(),
            theme,
            last_visit,
        };
        self.save(&prefs).await;
        prefs
    }
}

#[cfg(test)]
#[path = "tests/preferences_tests.rs"]
mod tests;
