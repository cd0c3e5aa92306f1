//! Branch-name conventions.
//!
//! Parses branch names against the configured patterns (named groups
//! `type`, `ticket`, `desc`), with a bare ticket-regex fallback, and
//! derives the branch prefix and slug for new branches.

use crate::config::JiraConfig;
use crate::error::{JtError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::process::Command;

/// Pattern set used when the config leaves `branch` empty.
const FALLBACK_PATTERNS: [&str; 2] = [
    r"^(?P<type>feature|bugfix|hotfix|refactor|chore)/(?P<ticket>[A-Z]+-\d+)/(?P<desc>.*)$",
    r"^(?P<type>feature|bugfix|hotfix|refactor|chore)/(?P<ticket>[A-Z]+-\d+)$",
];
const FALLBACK_TICKET_REGEX: &str = r"[A-Z]+-\d+";

/// Result of parsing one branch name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedBranch {
    pub branch: String,
    pub ticket: Option<String>,
    #[serde(rename = "type")]
    pub branch_type: Option<String>,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Parse a branch name against the configured conventions.
#[must_use]
pub fn parse_branch(config: &JiraConfig, branch_name: &str) -> ParsedBranch {
    let patterns: Vec<String> = if config.branch.patterns.is_empty() {
        FALLBACK_PATTERNS.iter().map(ToString::to_string).collect()
    } else {
        config.branch.patterns.clone()
    };
    let ticket_regex = config
        .branch
        .ticket_regex
        .as_deref()
        .unwrap_or(FALLBACK_TICKET_REGEX);

    for pattern in &patterns {
        let Ok(regex) = Regex::new(pattern) else {
            tracing::warn!(%pattern, "skipping invalid branch pattern");
            continue;
        };
        if let Some(captures) = regex.captures(branch_name) {
            let group = |name: &str| captures.name(name).map(|m| m.as_str().to_string());
            if let Some(ticket) = group("ticket") {
                return ParsedBranch {
                    branch: branch_name.to_string(),
                    ticket: Some(ticket),
                    branch_type: group("type"),
                    description: group("desc"),
                    error: None,
                };
            }
        }
    }

    // Pattern miss: still try to pull a bare ticket key out.
    if let Ok(regex) = Regex::new(ticket_regex) {
        if let Some(found) = regex.find(branch_name) {
            return ParsedBranch {
                branch: branch_name.to_string(),
                ticket: Some(found.as_str().to_string()),
                branch_type: None,
                description: None,
                error: None,
            };
        }
    }

    let recommended = config
        .branch
        .recommended
        .as_deref()
        .unwrap_or("feature/AS-1234/description");
    ParsedBranch {
        branch: branch_name.to_string(),
        ticket: None,
        branch_type: None,
        description: None,
        error: Some(format!(
            "No ticket number found in branch name. Recommended format: {recommended}"
        )),
    }
}

/// Name of the currently checked-out git branch.
///
/// # Errors
///
/// Returns `GIT_ERROR` outside a repository or with a detached head.
pub fn current_branch() -> Result<String> {
    let output = Command::new("git")
        .args(["branch", "--show-current"])
        .output()
        .map_err(|e| JtError::Git(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        return Err(JtError::Git(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if branch.is_empty() {
        return Err(JtError::Git("no branch checked out".to_string()));
    }
    Ok(branch)
}

/// Resolve the ticket key for `--from-branch` style flags.
///
/// # Errors
///
/// Returns `BRANCH_NO_TICKET` when the current branch carries no key.
pub fn ticket_from_current_branch(config: &JiraConfig) -> Result<String> {
    let branch = current_branch()?;
    let parsed = parse_branch(config, &branch);
    parsed
        .ticket
        .ok_or(JtError::BranchNoTicket { branch })
}

/// Turn a free-form description into a branch slug.
///
/// Keeps ASCII alphanumerics, Hangul, and dashes; collapses whitespace
/// to single dashes; caps at 50 characters.
#[must_use]
pub fn slugify(description: &str) -> String {
    let cleaned: String = description
        .to_lowercase()
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric()
                || c.is_whitespace()
                || *c == '-'
                || ('가'..='힣').contains(c)
        })
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}

/// Pick the branch prefix for an issue.
///
/// Bugs get `bugfix`, refactoring work (own or parent summary) gets
/// `refactor`, highest-priority or urgent work gets `hotfix`, everything
/// else gets `feature`.
#[must_use]
pub fn branch_prefix(
    issue_type: &str,
    summary: &str,
    parent_summary: Option<&str>,
    priority: Option<&str>,
) -> &'static str {
    let issue_type = issue_type.to_lowercase();
    let summary = summary.to_lowercase();
    let parent_summary = parent_summary.unwrap_or_default().to_lowercase();

    if issue_type == "bug" || issue_type == "버그" {
        return "bugfix";
    }

    if parent_summary.contains("리팩토링")
        || parent_summary.contains("refactor")
        || summary.contains("리팩토링")
        || summary.contains("refactor")
    {
        return "refactor";
    }

    if priority == Some("Highest") || summary.contains("hotfix") || summary.contains("긴급") {
        return "hotfix";
    }

    "feature"
}
