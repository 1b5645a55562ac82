use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::Context;
use url::Url;

use crate::users::DEFAULT_USERS_URL;

pub const SETTINGS_FILE: &str = "panel.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub users_url: String,
    pub database_url: String,
    pub request_timeout_secs: u64,
    pub profile_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            users_url: DEFAULT_USERS_URL.into(),
            database_url: "sqlite://./data/panel.db".into(),
            request_timeout_secs: 10,
            profile_name: "User".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Defaults, then `panel.toml` in the working directory, then `APP__*`
/// environment variables.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file_overrides(&mut settings, &raw),
        Err(err) => tracing::debug!(path = %path.display(), "no settings file: {err}"),
    }
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());

    settings.database_url = normalize_database_url(&settings.database_url);
    settings
}

pub fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, toml::Value>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            tracing::warn!("ignoring unreadable settings file: {err}");
            return;
        }
    };

    if let Some(v) = file_cfg.get("users_url").and_then(toml::Value::as_str) {
        settings.users_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("database_url").and_then(toml::Value::as_str) {
        settings.database_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("profile_name").and_then(toml::Value::as_str) {
        settings.profile_name = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("request_timeout_secs")
        .and_then(toml::Value::as_integer)
    {
        if let Ok(secs) = u64::try_from(v) {
            settings.request_timeout_secs = secs;
        }
    }
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__USERS_URL") {
        settings.users_url = v;
    }
    if let Some(v) = lookup("DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = lookup("APP__DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = lookup("APP__PROFILE_NAME") {
        settings.profile_name = v;
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
}

pub fn validate_users_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid users url '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => anyhow::bail!("unsupported users url scheme '{other}' in '{raw}'"),
    }
}

pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}
