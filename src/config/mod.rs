//! Configuration management for `jt`.
//!
//! The config file is JSON with camelCase keys, shared with the other
//! team tooling. Resolution order (first hit wins):
//! 1. `--config PATH`
//! 2. `$JT_CONFIG`
//! 3. `~/.config/jt/config.json`
//! 4. `./config.json`
//!
//! Credentials resolve environment-first: `JIRA_EMAIL` and
//! `JIRA_API_TOKEN` override the file's `auth` section.
//!
//! There is no process-wide config state; each command loads a
//! `JiraConfig` and passes it down explicitly.

pub mod status;
pub mod team;

use crate::error::{JtError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Sprint field id used when the config does not map one.
const DEFAULT_SPRINT_FIELD: &str = "customfield_10007";
/// Issue-type name used for the sub-task query when not configured.
const DEFAULT_SUBTASK_TYPE: &str = "하위 작업";
/// Listing result cap when not configured.
const DEFAULT_LIST_LIMIT: usize = 30;
/// Trailing comments included by `show` when not configured.
const DEFAULT_INCLUDE_COMMENTS: usize = 5;

/// Stored credentials (file fallback for the env vars).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthSection {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
}

/// A board the team tracks, as listed in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub default: bool,
}

/// Field lists requested from the tracker per operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldsSection {
    #[serde(default)]
    pub default: Option<Vec<String>>,
    #[serde(default)]
    pub list: Option<Vec<String>>,
}

/// Tracker-facing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JiraSection {
    /// Base site URL, e.g. `https://acme.atlassian.net`.
    pub site: String,
    /// Project key all queries anchor to.
    pub project: String,
    #[serde(default)]
    pub boards: Vec<Board>,
    /// Custom field id carrying sprint membership.
    #[serde(default)]
    pub sprint_field: Option<String>,
    /// Issue-type name of sub-tasks, as used in JQL.
    #[serde(default)]
    pub subtask_type: Option<String>,
    #[serde(default)]
    pub fields: FieldsSection,
    /// Canonical category key -> ordered tracker status names.
    /// The first name in each list is the canonical one.
    #[serde(default)]
    pub status_mapping: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub status_transitions: HashMap<String, String>,
}

/// Branch naming conventions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BranchSection {
    /// Regexes with named groups `type`, `ticket`, `desc`.
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub ticket_regex: Option<String>,
    #[serde(default)]
    pub recommended: Option<String>,
}

/// One team member mapping onto a tracker account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub jira: Option<String>,
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamSection {
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DefaultsSection {
    #[serde(default)]
    pub list_limit: Option<usize>,
    #[serde(default)]
    pub include_comments: Option<usize>,
}

/// Default status filtering for the listing operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListSection {
    #[serde(default)]
    pub exclude_statuses: Vec<String>,
    #[serde(default)]
    pub include_statuses: Vec<String>,
}

/// The whole config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JiraConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthSection>,
    pub jira: JiraSection,
    #[serde(default)]
    pub branch: BranchSection,
    #[serde(default)]
    pub team: TeamSection,
    #[serde(default)]
    pub defaults: DefaultsSection,
    #[serde(default)]
    pub list: ListSection,
}

impl JiraConfig {
    #[must_use]
    pub fn sprint_field(&self) -> &str {
        self.jira
            .sprint_field
            .as_deref()
            .unwrap_or(DEFAULT_SPRINT_FIELD)
    }

    #[must_use]
    pub fn subtask_type(&self) -> &str {
        self.jira
            .subtask_type
            .as_deref()
            .unwrap_or(DEFAULT_SUBTASK_TYPE)
    }

    #[must_use]
    pub fn list_limit(&self) -> usize {
        self.defaults.list_limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }

    #[must_use]
    pub fn include_comments(&self) -> usize {
        self.defaults
            .include_comments
            .unwrap_or(DEFAULT_INCLUDE_COMMENTS)
    }

    /// Default field list for the single-issue view.
    #[must_use]
    pub fn default_fields(&self) -> Vec<String> {
        self.jira.fields.default.clone().unwrap_or_else(|| {
            [
                "summary",
                "status",
                "assignee",
                "reporter",
                "issuetype",
                "priority",
                "parent",
                "subtasks",
                "created",
                "updated",
                "labels",
                "description",
                "comment",
            ]
            .iter()
            .map(ToString::to_string)
            .collect()
        })
    }

    /// The board marked `default`, else the first configured one.
    #[must_use]
    pub fn default_board(&self) -> Option<&Board> {
        self.jira
            .boards
            .iter()
            .find(|b| b.default)
            .or_else(|| self.jira.boards.first())
    }
}

/// Resolved credentials for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    pub email: String,
    pub token: String,
}

/// Resolve credentials, environment first, then the config file.
///
/// # Errors
///
/// Returns `AuthMissing` when neither source carries both values.
pub fn resolve_auth(config: &JiraConfig) -> Result<Auth> {
    let env_email = env::var("JIRA_EMAIL").ok().filter(|v| !v.is_empty());
    let env_token = env::var("JIRA_API_TOKEN").ok().filter(|v| !v.is_empty());

    if let (Some(email), Some(token)) = (env_email, env_token) {
        return Ok(Auth { email, token });
    }

    if let Some(auth) = &config.auth {
        if let (Some(email), Some(token)) = (auth.email.clone(), auth.api_token.clone()) {
            if !email.is_empty() && !token.is_empty() {
                return Ok(Auth { email, token });
            }
        }
    }

    Err(JtError::AuthMissing)
}

/// Candidate config paths in resolution order.
fn candidate_paths(override_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = override_path {
        candidates.push(path.to_path_buf());
        return candidates;
    }
    if let Ok(value) = env::var("JT_CONFIG") {
        if !value.trim().is_empty() {
            candidates.push(PathBuf::from(value));
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("jt").join("config.json"));
    }
    candidates.push(PathBuf::from("config.json"));
    candidates
}

/// Locate the active config file without reading it.
///
/// # Errors
///
/// Returns `CONFIG_ERROR` when no candidate exists.
pub fn locate(override_path: Option<&Path>) -> Result<PathBuf> {
    let candidates = candidate_paths(override_path);
    for candidate in &candidates {
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }
    let checked: Vec<String> = candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    Err(JtError::Config(format!(
        "config.json not found (checked: {})",
        checked.join(", ")
    )))
}

/// Load and parse the active config file.
///
/// # Errors
///
/// Returns `CONFIG_ERROR` when the file is missing or malformed.
pub fn load(override_path: Option<&Path>) -> Result<JiraConfig> {
    let path = locate(override_path)?;
    load_from(&path)
}

/// Load a config file from an explicit path.
pub fn load_from(path: &Path) -> Result<JiraConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| JtError::Config(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&contents)
        .map_err(|e| JtError::Config(format!("cannot parse {}: {e}", path.display())))
}

/// Where `jt init` writes when no config exists yet.
#[must_use]
pub fn init_target_path(override_path: Option<&Path>) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }
    if let Ok(value) = env::var("JT_CONFIG") {
        if !value.trim().is_empty() {
            return PathBuf::from(value);
        }
    }
    dirs::config_dir().map_or_else(
        || PathBuf::from("config.json"),
        |dir| dir.join("jt").join("config.json"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "auth": { "email": "dev@example.com", "apiToken": "token-1" },
        "jira": {
            "site": "https://acme.atlassian.net",
            "project": "AS",
            "boards": [
                { "id": 4933, "name": "AS board", "default": true },
                { "id": 5001, "name": "Spillover" }
            ],
            "statusMapping": {
                "todo": ["To Do", "할 일"],
                "in_progress": ["In Progress", "진행 중"],
                "in_review": ["In Review"],
                "done": ["Done", "완료"]
            }
        },
        "team": {
            "members": [
                { "name": "이승우", "aliases": ["승우"], "accountId": "acc-1" }
            ]
        },
        "list": { "excludeStatuses": ["Done", "Dropped"] }
    }"#;

    fn sample_config() -> JiraConfig {
        serde_json::from_str(SAMPLE).expect("parse sample config")
    }

    #[test]
    fn test_parse_camel_case_config() {
        let config = sample_config();
        assert_eq!(config.jira.project, "AS");
        assert_eq!(config.team.members[0].account_id, "acc-1");
        assert_eq!(config.list.exclude_statuses, vec!["Done", "Dropped"]);
        assert_eq!(config.jira.status_mapping["in_progress"][0], "In Progress");
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = sample_config();
        assert_eq!(config.sprint_field(), "customfield_10007");
        assert_eq!(config.list_limit(), 30);
        assert_eq!(config.include_comments(), 5);
        assert!(config.default_fields().contains(&"summary".to_string()));
    }

    #[test]
    fn test_default_board_prefers_marked() {
        let config = sample_config();
        assert_eq!(config.default_board().map(|b| b.id), Some(4933));
    }

    #[test]
    fn test_auth_falls_back_to_file() {
        let config = sample_config();
        // Only meaningful when the env vars are unset in the test runner.
        if env::var("JIRA_EMAIL").is_err() && env::var("JIRA_API_TOKEN").is_err() {
            let auth = resolve_auth(&config).expect("auth");
            assert_eq!(auth.email, "dev@example.com");
        }
    }

    #[test]
    fn test_auth_missing_without_sources() {
        let mut config = sample_config();
        config.auth = None;
        if env::var("JIRA_EMAIL").is_err() && env::var("JIRA_API_TOKEN").is_err() {
            assert!(matches!(resolve_auth(&config), Err(JtError::AuthMissing)));
        }
    }

    #[test]
    fn test_load_from_missing_file_is_config_error() {
        let err = load_from(Path::new("/nonexistent/jt-config.json")).unwrap_err();
        assert!(matches!(err, JtError::Config(_)));
    }
}
