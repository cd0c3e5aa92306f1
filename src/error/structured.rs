//! Structured error output for scripted consumers.
//!
//! Every top-level failure is rendered as a single JSON record on stdout:
//!
//! ```json
//! { "success": false, "error": { "code": "AUTH_INVALID", "message": "...", "details": "..." } }
//! ```
//!
//! Codes are stable and `SCREAMING_SNAKE_CASE` for easy parsing. Exit
//! codes are grouped by category so shell callers can branch without
//! parsing JSON.

use crate::error::JtError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // === Credentials (exit code 3) ===
    /// No credentials configured
    AuthMissing,
    /// Credentials rejected by the tracker
    AuthInvalid,

    // === Lookup (exit code 4) ===
    /// Issue or endpoint not found
    TicketNotFound,
    /// Operation refused by the tracker
    PermissionDenied,

    // === Input (exit code 5) ===
    /// No workflow transition to the requested status
    InvalidTransition,
    /// Unusable command arguments
    InvalidArgs,

    // === Transport (exit code 6) ===
    /// Connection-level failure
    NetworkError,

    // === Local environment (exit codes 2, 7) ===
    /// Config file missing or malformed
    ConfigError,
    /// Branch name carries no ticket key
    BranchNoTicket,
    /// Git invocation failed
    GitError,

    // === Fallback (exit code 1) ===
    /// Anything else
    UnknownError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthMissing => "AUTH_MISSING",
            Self::AuthInvalid => "AUTH_INVALID",
            Self::TicketNotFound => "TICKET_NOT_FOUND",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::InvalidArgs => "INVALID_ARGS",
            Self::NetworkError => "NETWORK_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::BranchNoTicket => "BRANCH_NO_TICKET",
            Self::GitError => "GIT_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Get the exit code for this error category.
    ///
    /// - 1: unknown/internal
    /// - 2: configuration
    /// - 3: credentials
    /// - 4: lookup (not found, permission)
    /// - 5: input (transition, arguments)
    /// - 6: network
    /// - 7: git/branch
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::ConfigError => 2,
            Self::AuthMissing | Self::AuthInvalid => 3,
            Self::TicketNotFound | Self::PermissionDenied => 4,
            Self::InvalidTransition | Self::InvalidArgs => 5,
            Self::NetworkError => 6,
            Self::BranchNoTicket | Self::GitError => 7,
            Self::UnknownError => 1,
        }
    }
}

/// One top-level failure, ready for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl StructuredError {
    /// Map a `JtError` onto its stable code and record fields.
    #[must_use]
    pub fn from_error(err: &JtError) -> Self {
        let code = match err {
            JtError::AuthMissing => ErrorCode::AuthMissing,
            JtError::AuthInvalid { .. } => ErrorCode::AuthInvalid,
            JtError::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            JtError::NotFound { .. } => ErrorCode::TicketNotFound,
            JtError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            JtError::InvalidArgs(_) => ErrorCode::InvalidArgs,
            JtError::Network(_) => ErrorCode::NetworkError,
            JtError::Config(_) => ErrorCode::ConfigError,
            JtError::BranchNoTicket { .. } => ErrorCode::BranchNoTicket,
            JtError::Git(_) => ErrorCode::GitError,
            JtError::Http { .. } | JtError::Json(_) | JtError::Io(_) | JtError::Other(_) => {
                ErrorCode::UnknownError
            }
        };

        Self {
            code,
            message: err.to_string(),
            details: err.details(),
        }
    }

    /// Render the full output record.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_strings_are_stable() {
        assert_eq!(ErrorCode::AuthMissing.as_str(), "AUTH_MISSING");
        assert_eq!(ErrorCode::TicketNotFound.as_str(), "TICKET_NOT_FOUND");
        assert_eq!(ErrorCode::NetworkError.as_str(), "NETWORK_ERROR");
    }

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(ErrorCode::ConfigError.exit_code(), 2);
        assert_eq!(ErrorCode::AuthInvalid.exit_code(), 3);
        assert_eq!(ErrorCode::PermissionDenied.exit_code(), 4);
        assert_eq!(ErrorCode::NetworkError.exit_code(), 6);
        assert_eq!(ErrorCode::UnknownError.exit_code(), 1);
    }

    #[test]
    fn test_record_shape() {
        let err = JtError::Network("connection refused".to_string());
        let record = StructuredError::from_error(&err).to_json();
        assert_eq!(record["success"], false);
        assert_eq!(record["error"]["code"], "NETWORK_ERROR");
        assert!(
            record["error"]["message"]
                .as_str()
                .is_some_and(|m| m.contains("connection refused"))
        );
    }

    #[test]
    fn test_http_errors_carry_body_as_details() {
        let err = JtError::Http {
            status: 500,
            body: "oops".to_string(),
        };
        let structured = StructuredError::from_error(&err);
        assert_eq!(structured.code, ErrorCode::UnknownError);
        assert_eq!(structured.details.as_deref(), Some("oops"));
    }
}
