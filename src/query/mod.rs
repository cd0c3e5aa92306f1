//! JQL construction.
//!
//! Translates a filter set into the tracker's query language. The
//! builder never fails locally: unresolved names and statuses fall
//! back to the literal text and the tracker rejects them at execution
//! time if they are wrong.

use crate::config::{JiraConfig, status, team};
use std::fmt;
use std::str::FromStr;

/// Who the listing is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignee {
    /// The authenticated user (`currentUser()`).
    Me,
    /// A team member name, alias, or raw account id.
    Named(String),
}

/// Which sprint the listing is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SprintSelector {
    Current,
    Next,
    Closed,
    Named(String),
}

impl SprintSelector {
    /// Map user input onto a selector; anything unrecognized is a
    /// sprint name.
    #[must_use]
    pub fn from_input(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "current" | "active" => Self::Current,
            "next" | "future" => Self::Next,
            "closed" | "done" => Self::Closed,
            _ => Self::Named(s.to_string()),
        }
    }

    /// JQL predicate for this selector.
    #[must_use]
    pub fn predicate(&self) -> String {
        match self {
            Self::Current => "sprint in openSprints()".to_string(),
            Self::Next => "sprint in futureSprints()".to_string(),
            Self::Closed => "sprint in closedSprints()".to_string(),
            Self::Named(name) => format!("sprint = \"{name}\""),
        }
    }
}

impl FromStr for SprintSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_input(s))
    }
}

impl fmt::Display for SprintSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Next => write!(f, "next"),
            Self::Closed => write!(f, "closed"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// The immutable input to one listing operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    pub assignee: Option<Assignee>,
    pub status: Option<String>,
    pub issue_type: Option<String>,
    pub sprint: Option<SprintSelector>,
    pub backlog: bool,
    pub empty_description: bool,
    /// Raw JQL override; disables all other filter composition.
    pub jql: Option<String>,
    pub limit: usize,
    /// Disables the default status-exclusion policy.
    pub all: bool,
}

impl ListFilters {
    /// Whether the hierarchical sprint reconciler applies: assignee and
    /// a non-backlog sprint selector are both present.
    #[must_use]
    pub fn wants_reconciliation(&self) -> bool {
        self.jql.is_none()
            && self.assignee.is_some()
            && self.sprint.is_some()
            && !self.backlog
    }
}

fn push_assignee(config: &JiraConfig, filters: &ListFilters, conditions: &mut Vec<String>) {
    match &filters.assignee {
        Some(Assignee::Me) => conditions.push("assignee = currentUser()".to_string()),
        Some(Assignee::Named(name)) => {
            let resolved = team::find_member(config, name)
                .map_or_else(|| name.clone(), |member| member.account_id.clone());
            conditions.push(format!("assignee = \"{resolved}\""));
        }
        None => {}
    }
}

/// Default inclusion/exclusion policy. Applies only when the caller did
/// not request a specific status and did not request full history; the
/// include-list takes precedence over the exclude-list.
fn push_status_policy(config: &JiraConfig, filters: &ListFilters, conditions: &mut Vec<String>) {
    if filters.all || filters.status.is_some() {
        return;
    }

    let include = &config.list.include_statuses;
    let exclude = &config.list.exclude_statuses;

    if !include.is_empty() {
        let clause = include
            .iter()
            .map(|s| format!("status = \"{s}\""))
            .collect::<Vec<_>>()
            .join(" OR ");
        conditions.push(format!("({clause})"));
    } else if !exclude.is_empty() {
        let clause = exclude
            .iter()
            .map(|s| format!("status != \"{s}\""))
            .collect::<Vec<_>>()
            .join(" AND ");
        conditions.push(format!("({clause})"));
    }
}

/// Build the primary listing query.
///
/// A raw override is returned verbatim. `include_sprint` is switched
/// off by the reconciler, which re-applies sprint membership
/// client-side after merging subtasks.
#[must_use]
pub fn build_list_jql(config: &JiraConfig, filters: &ListFilters, include_sprint: bool) -> String {
    if let Some(jql) = &filters.jql {
        return jql.clone();
    }

    let mut conditions = vec![format!("project = \"{}\"", config.jira.project)];

    push_assignee(config, filters, &mut conditions);

    if let Some(input) = &filters.status {
        let resolved =
            status::normalize_status(config, input).unwrap_or_else(|| input.clone());
        conditions.push(format!("status = \"{resolved}\""));
    }

    push_status_policy(config, filters, &mut conditions);

    if let Some(issue_type) = &filters.issue_type {
        conditions.push(format!("issuetype = \"{issue_type}\""));
    }

    if filters.empty_description {
        conditions.push("description is EMPTY".to_string());
    }

    // Backlog and sprint selectors are mutually exclusive; backlog wins.
    if filters.backlog {
        conditions.push("sprint is EMPTY".to_string());
    } else if include_sprint {
        if let Some(sprint) = &filters.sprint {
            conditions.push(sprint.predicate());
        }
    }

    format!("{} ORDER BY updated DESC", conditions.join(" AND "))
}

/// Build the reconciler's sub-task query: same assignee scope and
/// status policy, restricted to the configured sub-task type, with no
/// sprint predicate.
#[must_use]
pub fn build_subtask_jql(config: &JiraConfig, filters: &ListFilters) -> String {
    let mut conditions = vec![format!("project = \"{}\"", config.jira.project)];
    push_assignee(config, filters, &mut conditions);
    conditions.push(format!("issuetype = \"{}\"", config.subtask_type()));
    push_status_policy(config, filters, &mut conditions);
    format!("{} ORDER BY updated DESC", conditions.join(" AND "))
}

/// Build the parent-sprint lookup query for the reconciler.
#[must_use]
pub fn build_parent_jql(parent_keys: &[String]) -> String {
    let quoted = parent_keys
        .iter()
        .map(|key| format!("\"{key}\""))
        .collect::<Vec<_>>()
        .join(",");
    format!("key in ({quoted})")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> JiraConfig {
        serde_json::from_str(
            r#"{
                "jira": {
                    "site": "https://acme.atlassian.net",
                    "project": "AS",
                    "statusMapping": {
                        "in_progress": ["In Progress", "진행 중"],
                        "done": ["Done", "완료"]
                    }
                },
                "team": { "members": [
                    { "name": "이승우", "aliases": ["승우"], "accountId": "acc-lee" }
                ]},
                "list": {
                    "excludeStatuses": ["Done", "Dropped"],
                    "includeStatuses": []
                }
            }"#,
        )
        .expect("parse config")
    }

    #[test]
    fn test_raw_override_is_verbatim() {
        let filters = ListFilters {
            jql: Some("assignee = currentUser() AND labels = api".to_string()),
            assignee: Some(Assignee::Me),
            status: Some("Done".to_string()),
            backlog: true,
            ..Default::default()
        };
        assert_eq!(
            build_list_jql(&cfg(), &filters, true),
            "assignee = currentUser() AND labels = api"
        );
    }

    #[test]
    fn test_assignee_resolves_through_team_directory() {
        let filters = ListFilters {
            assignee: Some(Assignee::Named("승우".to_string())),
            all: true,
            ..Default::default()
        };
        let jql = build_list_jql(&cfg(), &filters, true);
        assert!(jql.contains("assignee = \"acc-lee\""));

        let filters = ListFilters {
            assignee: Some(Assignee::Named("외부인".to_string())),
            all: true,
            ..Default::default()
        };
        let jql = build_list_jql(&cfg(), &filters, true);
        assert!(jql.contains("assignee = \"외부인\""));
    }

    #[test]
    fn test_status_normalizes_before_query_construction() {
        let filters = ListFilters {
            status: Some("진행중".to_string()),
            ..Default::default()
        };
        let jql = build_list_jql(&cfg(), &filters, true);
        assert!(jql.contains("status = \"In Progress\""));
        // An explicit status disables the default exclusion policy.
        assert!(!jql.contains("status !="));
    }

    #[test]
    fn test_exclude_policy_applies_by_default() {
        let filters = ListFilters::default();
        let jql = build_list_jql(&cfg(), &filters, true);
        assert!(jql.contains("(status != \"Done\" AND status != \"Dropped\")"));

        let all = ListFilters {
            all: true,
            ..Default::default()
        };
        assert!(!build_list_jql(&cfg(), &all, true).contains("status !="));
    }

    #[test]
    fn test_include_list_takes_precedence() {
        let mut config = cfg();
        config.list.include_statuses = vec!["To Do".to_string(), "In Progress".to_string()];
        let jql = build_list_jql(&config, &ListFilters::default(), true);
        assert!(jql.contains("(status = \"To Do\" OR status = \"In Progress\")"));
        assert!(!jql.contains("status !="));
    }

    #[test]
    fn test_sprint_selector_mapping() {
        for (input, expected) in [
            ("current", "sprint in openSprints()"),
            ("active", "sprint in openSprints()"),
            ("next", "sprint in futureSprints()"),
            ("closed", "sprint in closedSprints()"),
            ("Sprint 8", "sprint = \"Sprint 8\""),
        ] {
            let selector: SprintSelector = input.parse().unwrap();
            assert_eq!(selector.predicate(), expected, "input {input}");
        }
    }

    #[test]
    fn test_backlog_wins_over_sprint_selector() {
        let filters = ListFilters {
            sprint: Some(SprintSelector::Named("Sprint 8".to_string())),
            backlog: true,
            all: true,
            ..Default::default()
        };
        let jql = build_list_jql(&cfg(), &filters, true);
        assert!(jql.contains("sprint is EMPTY"));
        assert!(!jql.contains("Sprint 8"));
        assert!(!filters.wants_reconciliation());
    }

    #[test]
    fn test_ordering_suffix_and_project_anchor() {
        let filters = ListFilters {
            empty_description: true,
            issue_type: Some("Story".to_string()),
            all: true,
            ..Default::default()
        };
        let jql = build_list_jql(&cfg(), &filters, true);
        assert!(jql.starts_with("project = \"AS\""));
        assert!(jql.contains("issuetype = \"Story\""));
        assert!(jql.contains("description is EMPTY"));
        assert!(jql.ends_with("ORDER BY updated DESC"));
    }

    #[test]
    fn test_subtask_query_has_no_sprint_predicate() {
        let filters = ListFilters {
            assignee: Some(Assignee::Me),
            sprint: Some(SprintSelector::Current),
            ..Default::default()
        };
        let jql = build_subtask_jql(&cfg(), &filters);
        assert!(jql.contains("assignee = currentUser()"));
        assert!(jql.contains("issuetype = \"하위 작업\""));
        assert!(jql.contains("(status != \"Done\" AND status != \"Dropped\")"));
        assert!(!jql.contains("sprint"));
    }

    #[test]
    fn test_parent_lookup_query() {
        let keys = vec!["AS-1".to_string(), "AS-2".to_string()];
        assert_eq!(build_parent_jql(&keys), "key in (\"AS-1\",\"AS-2\")");
    }

    #[test]
    fn test_reconciliation_activation() {
        let filters = ListFilters {
            assignee: Some(Assignee::Me),
            sprint: Some(SprintSelector::Current),
            ..Default::default()
        };
        assert!(filters.wants_reconciliation());

        let no_assignee = ListFilters {
            sprint: Some(SprintSelector::Current),
            ..Default::default()
        };
        assert!(!no_assignee.wants_reconciliation());
    }
}
