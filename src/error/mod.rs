//! Error types and handling for `jt`.
//!
//! Two layers: `JtError` is the internal error enum used with `?`
//! throughout the crate; `StructuredError` is the machine-readable
//! record printed at the top level.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Supports `anyhow` integration for wrapped one-off errors
//! - Transport failures carry the raw response body as detail text
//! - Stable error codes for scripted consumers

mod structured;

pub use structured::{ErrorCode, StructuredError};

use thiserror::Error;

/// Primary error type for `jt` operations.
#[derive(Error, Debug)]
pub enum JtError {
    // === Credential Errors ===
    /// No credentials in the environment or config file.
    #[error("Jira credentials not configured")]
    AuthMissing,

    /// The tracker rejected the credentials (HTTP 401).
    #[error("Invalid Jira credentials")]
    AuthInvalid { details: String },

    /// The tracker refused the operation (HTTP 403).
    #[error("Permission denied")]
    PermissionDenied { details: String },

    // === Issue Errors ===
    /// Issue or endpoint not found (HTTP 404).
    #[error("Issue not found")]
    NotFound { details: String },

    /// Requested status has no available workflow transition.
    #[error("Cannot transition to \"{target}\"")]
    InvalidTransition { target: String, available: String },

    // === Transport Errors ===
    /// Could not reach the tracker at all.
    #[error("Failed to connect to Jira: {0}")]
    Network(String),

    /// Unexpected HTTP status from the tracker.
    #[error("Jira API error: {status}")]
    Http { status: u16, body: String },

    // === Local Errors ===
    /// Configuration file missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Command invoked with unusable arguments.
    #[error("{0}")]
    InvalidArgs(String),

    /// Current branch carries no recognizable ticket key.
    #[error("No ticket number found in branch name")]
    BranchNoTicket { branch: String },

    /// A git invocation failed.
    #[error("Git error: {0}")]
    Git(String),

    // === Wrapped errors ===
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JtError {
    /// Detail text carried alongside the message, if any.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            Self::AuthMissing => Some(
                "Set JIRA_EMAIL and JIRA_API_TOKEN, or add an \"auth\" section to config.json"
                    .to_string(),
            ),
            Self::AuthInvalid { details }
            | Self::PermissionDenied { details }
            | Self::NotFound { details } => {
                if details.is_empty() {
                    None
                } else {
                    Some(details.clone())
                }
            }
            Self::InvalidTransition { available, .. } => {
                Some(format!("Available transitions: {available}"))
            }
            Self::Http { body, .. } => {
                if body.is_empty() {
                    None
                } else {
                    Some(body.clone())
                }
            }
            Self::BranchNoTicket { branch } => Some(format!("Branch: {branch}")),
            _ => None,
        }
    }
}

/// Result type using `JtError`.
pub type Result<T> = std::result::Result<T, JtError>;
