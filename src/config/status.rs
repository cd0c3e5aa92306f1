//! Status vocabulary.
//!
//! The tracker's status names are arbitrary and often localized; the
//! config's `statusMapping` groups them under a small set of canonical
//! category keys (`todo`, `in_progress`, `in_review`, `done`). This
//! module resolves user-typed status text to a canonical tracker status
//! name, and classifies tracker status names into categories for
//! grouping.

use crate::config::JiraConfig;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Localized shorthand accepted as status input.
static LOCALIZED_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("할일", "todo"),
        ("해야할일", "todo"),
        ("시작", "in_progress"),
        ("진행", "in_progress"),
        ("진행중", "in_progress"),
        ("리뷰", "in_review"),
        ("검토", "in_review"),
        ("완료", "done"),
        ("종료", "done"),
    ])
});

/// Resolve user-typed status text to the canonical tracker status name.
///
/// Lowercased, trimmed input; localized aliases map to a category key
/// first. A category-key match returns the first mapped tracker name;
/// otherwise any mapped value matching the raw input (case-insensitive)
/// returns its list's first name. Unresolvable input returns `None` and
/// callers fall back to the literal text.
#[must_use]
pub fn normalize_status(config: &JiraConfig, input: &str) -> Option<String> {
    let normalized = input.trim().to_lowercase();
    let status_key = LOCALIZED_ALIASES
        .get(normalized.as_str())
        .copied()
        .unwrap_or(normalized.as_str());

    for (key, values) in &config.jira.status_mapping {
        if key == status_key {
            return values.first().cloned();
        }
        if values.iter().any(|v| v.to_lowercase() == normalized) {
            return values.first().cloned();
        }
    }

    None
}

/// Canonical status category used for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusCategory {
    InProgress,
    InReview,
    Todo,
    Done,
    Other,
}

impl StatusCategory {
    /// Grouping precedence, first match wins.
    pub const ORDERED: [Self; 5] = [
        Self::InProgress,
        Self::InReview,
        Self::Todo,
        Self::Done,
        Self::Other,
    ];

    /// Classify a tracker status name by substring, matching both
    /// English and localized fragments.
    #[must_use]
    pub fn classify(status_name: &str) -> Self {
        let lower = status_name.to_lowercase();
        if lower.contains("progress") || lower.contains("진행") {
            Self::InProgress
        } else if lower.contains("review") || lower.contains("리뷰") {
            Self::InReview
        } else if lower.contains("to do") || lower.contains("할 일") {
            Self::Todo
        } else if lower.contains("done") || lower.contains("완료") {
            Self::Done
        } else {
            Self::Other
        }
    }

    /// Status icon for compact subtask lines.
    #[must_use]
    pub fn icon(status_name: &str) -> &'static str {
        let lower = status_name.to_lowercase();
        if lower.contains("done") || lower.contains("완료") {
            "✅"
        } else if lower.contains("progress") || lower.contains("진행") {
            "🔄"
        } else if lower.contains("review") || lower.contains("리뷰") {
            "👀"
        } else if lower.contains("drop") {
            "❌"
        } else {
            "⬜"
        }
    }

    /// Short localized label for compact subtask lines.
    #[must_use]
    pub fn short_label(status_name: &str) -> String {
        let lower = status_name.to_lowercase();
        if lower.contains("done") || lower.contains("완료") {
            "완료".to_string()
        } else if lower.contains("progress") || lower.contains("진행") {
            "진행중".to_string()
        } else if lower.contains("review") || lower.contains("리뷰") {
            "리뷰".to_string()
        } else if lower.contains("drop") {
            "DROP".to_string()
        } else if lower.contains("to do") || lower.contains("할 일") {
            "할일".to_string()
        } else {
            status_name.to_string()
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Todo => "todo",
            Self::Done => "done",
            Self::Other => "other",
        };
        write!(f, "{label}")
    }
}
