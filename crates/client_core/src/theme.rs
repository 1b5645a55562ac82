use std::sync::Arc;

use storage::KeyValueStore;
use tracing::warn;

use crate::surface::Renderer;

pub const DARK_MODE_KEY: &str = "darkMode";

/// Persisted dark-mode flag. Storage failures never reach the caller: a
/// failed read means light mode, a failed write still restyles the surface.
#[derive(Clone)]
pub struct ThemeStore {
    store: Arc<dyn KeyValueStore>,
    renderer: Arc<dyn Renderer>,
}

impl ThemeStore {
    pub fn new(store: Arc<dyn KeyValueStore>, renderer: Arc<dyn Renderer>) -> Self {
        Self { store, renderer }
    }

    pub async fn is_dark_mode(&self) -> bool {
        match self.store.get(DARK_MODE_KEY).await {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!(error = %err, "failed to read dark mode flag; using light mode");
                false
            }
        }
    }

    pub async fn set_dark_mode(&self, enabled: bool) {
        self.renderer.apply_dark_mode(enabled);
        let value = if enabled { "true" } else { "false" };
        if let Err(err) = self.store.set(DARK_MODE_KEY, value).await {
            warn!(error = %err, enabled, "failed to persist dark mode flag");
        }
    }
}

#[cfg(test)]
#[path = "tests/theme_tests.rs"]
mod tests;
