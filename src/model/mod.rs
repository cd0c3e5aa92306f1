//! Core data types for `jt`.
//!
//! This module defines the types used throughout the application:
//! - `Issue` - a flattened work-item snapshot as listed/reconciled
//! - `Sprint` - a time-boxed iteration with a lifecycle state
//! - `SprintState` - sprint lifecycle states
//!
//! Issues are read-only snapshots fetched per query; nothing here is
//! ever persisted locally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(b: &bool) -> bool {
    !*b
}

/// Sprint lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    Active,
    #[default]
    Future,
    Closed,
    #[serde(untagged)]
    Custom(String),
}

impl SprintState {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Future => "future",
            Self::Closed => "closed",
            Self::Custom(value) => value,
        }
    }
}

impl fmt::Display for SprintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SprintState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "active" => Self::Active,
            "future" => Self::Future,
            "closed" => Self::Closed,
            other => Self::Custom(other.to_string()),
        })
    }
}

/// One sprint record, as carried on an issue's sprint field or returned
/// by the Agile board endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub state: SprintState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

/// Resolve the "current" sprint name for an issue.
///
/// The tracker allows historical reassignment, so an issue may carry
/// several sprint records. The active one wins; otherwise the
/// most-recently-associated (last) entry; otherwise none.
#[must_use]
pub fn resolve_current_sprint(sprints: &[Sprint]) -> Option<String> {
    if let Some(active) = sprints.iter().find(|s| s.state == SprintState::Active) {
        return Some(active.name.clone());
    }
    sprints.last().map(|s| s.name.clone())
}

/// Parent reference carried by a subtask.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParentRef {
    pub key: String,
    pub summary: String,
}

/// Child reference carried by a parent issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubtaskRef {
    pub key: String,
    pub summary: String,
    pub status: String,
}

/// A flattened issue snapshot as produced by the listing pipeline.
///
/// `assignee` is the team display name when the account id resolves
/// through the team directory. `sprint` is the resolved current sprint
/// name; the reconciler may overwrite it with a name inherited from the
/// parent issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub assignee: Option<String>,
    pub issuetype: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub subtask: bool,
    pub updated: String,
    pub sprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<SubtaskRef>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprint(name: &str, state: SprintState) -> Sprint {
        Sprint {
            id: None,
            name: name.to_string(),
            state,
            start_date: None,
            end_date: None,
            goal: None,
        }
    }

    #[test]
    fn test_active_sprint_wins() {
        let sprints = vec![
            sprint("Sprint 6", SprintState::Closed),
            sprint("Sprint 7", SprintState::Active),
            sprint("Sprint 8", SprintState::Future),
        ];
        assert_eq!(
            resolve_current_sprint(&sprints).as_deref(),
            Some("Sprint 7")
        );
    }

    #[test]
    fn test_last_sprint_when_none_active() {
        let sprints = vec![
            sprint("Sprint 5", SprintState::Closed),
            sprint("Sprint 6", SprintState::Closed),
        ];
        assert_eq!(
            resolve_current_sprint(&sprints).as_deref(),
            Some("Sprint 6")
        );
    }

    #[test]
    fn test_no_sprints_resolves_to_none() {
        assert_eq!(resolve_current_sprint(&[]), None);
    }

    #[test]
    fn test_sprint_state_round_trip() {
        let state: SprintState = "ACTIVE".parse().unwrap();
        assert_eq!(state, SprintState::Active);
        let custom: SprintState = "paused".parse().unwrap();
        assert_eq!(custom.as_str(), "paused");
    }
}
