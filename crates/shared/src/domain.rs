use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Name of the form field that must look like an email address.
pub const EMAIL_FIELD: &str = "email";

/// One entry of the remote users listing. Only `name` and `email` are
/// interpreted; any other fields the endpoint sends are carried along as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

/// Preferences blob persisted as JSON text under its own storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub name: String,
    pub theme: ThemeMode,
    pub last_visit: DateTime<Utc>,
}

/// Field values of one submitted form, flattened so that a repeated field
/// name keeps the value that came last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    fields: BTreeMap<String, String>,
}

impl FormSubmission {
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut flattened = BTreeMap::new();
        for (name, value) in fields {
            flattened.insert(name.into(), value.into());
        }
        Self { fields: flattened }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The single rule enforced on submissions: the email field contains `@`.
    /// A missing email field counts as empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let email = self.get(EMAIL_FIELD).unwrap_or_default();
        if email.contains('@') {
            Ok(())
        } else {
            Err(ValidationError::InvalidEmail {
                value: email.to_string(),
            })
        }
    }
}
