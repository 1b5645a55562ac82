use thiserror::Error;

/// Everything that can go wrong while loading users. The list view shows all
/// variants the same way, through their `Display` text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{0}")]
    Network(String),
    #[error("Failed to fetch users (HTTP {status})")]
    Status { status: u16 },
    #[error("invalid users payload: {0}")]
    Parse(String),
}
