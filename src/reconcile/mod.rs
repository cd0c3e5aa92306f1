//! Hierarchical sprint reconciliation.
//!
//! The tracker's sprint field is commonly set on parent stories but
//! left empty on their subtasks, so a server-side query for "my items
//! in sprint X" silently omits subtasks the user is actually working
//! on. When both an assignee filter and a non-backlog sprint filter are
//! active, the listing runs its primary query without the sprint
//! predicate, merges in a dedicated sub-task query, and re-applies
//! sprint membership client-side: a subtask with an empty sprint field
//! inherits its parent's resolved sprint.
//!
//! The parent lookup is the one place a failure is swallowed: losing it
//! only degrades inheritance, it never aborts the listing.

use crate::api::JiraApi;
use crate::config::JiraConfig;
use crate::error::Result;
use crate::model::{self, Issue};
use crate::query::{self, ListFilters, SprintSelector};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Merge a subtask result set into the primary set.
///
/// Keys are unique within a result set; on conflict the primary entry
/// wins and the incoming one is discarded.
#[must_use]
pub fn merge_issues(mut primary: Vec<Issue>, extra: Vec<Issue>) -> Vec<Issue> {
    let mut seen: HashSet<String> = primary.iter().map(|issue| issue.key.clone()).collect();
    for issue in extra {
        if seen.insert(issue.key.clone()) {
            primary.push(issue);
        }
    }
    primary
}

/// Distinct parent keys of subtasks carrying a parent reference, in
/// first-seen order.
#[must_use]
pub fn collect_parent_keys(issues: &[Issue]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for issue in issues {
        if !issue.subtask {
            continue;
        }
        if let Some(parent) = &issue.parent {
            if seen.insert(parent.key.clone()) {
                keys.push(parent.key.clone());
            }
        }
    }
    keys
}

/// Whether a resolved sprint name satisfies the requested selector.
///
/// `current`/`active` accepts any non-null name (the issue is in some
/// open sprint); everything else requires exact equality with the
/// selector text.
#[must_use]
pub fn sprint_matches(selector: &SprintSelector, name: Option<&str>) -> bool {
    match selector {
        SprintSelector::Current => name.is_some(),
        other => name == Some(other.to_string().as_str()),
    }
}

/// Filter the merged set against the sprint selector, inheriting the
/// parent's sprint onto qualifying subtasks.
///
/// Non-subtask items pass through (they were sprint-filtered in their
/// own query path); so does a subtask without a parent reference. A
/// subtask passes when its own sprint satisfies the selector, or when
/// its parent's resolved sprint does — in that case the subtask's
/// sprint field is overwritten with the inherited name so downstream
/// grouping displays it correctly. Everything else is dropped,
/// including subtasks whose parent never resolved.
#[must_use]
pub fn filter_with_inheritance(
    issues: Vec<Issue>,
    selector: &SprintSelector,
    parent_sprints: &HashMap<String, Option<String>>,
) -> Vec<Issue> {
    issues
        .into_iter()
        .filter_map(|mut issue| {
            if !issue.subtask {
                return Some(issue);
            }
            if sprint_matches(selector, issue.sprint.as_deref()) {
                return Some(issue);
            }
            let Some(parent) = &issue.parent else {
                return Some(issue);
            };
            match parent_sprints.get(&parent.key) {
                Some(Some(parent_sprint)) if sprint_matches(selector, Some(parent_sprint)) => {
                    issue.sprint = Some(parent_sprint.clone());
                    Some(issue)
                }
                _ => None,
            }
        })
        .collect()
}

/// Look up the resolved current sprint of each parent key.
///
/// Issues one `key in (...)` query retrieving only the sprint field.
/// On failure the listing proceeds with an empty map: no subtask
/// inherits a sprint, none of them error.
#[must_use]
pub fn fetch_parent_sprints(
    api: &JiraApi,
    config: &JiraConfig,
    parent_keys: &[String],
) -> HashMap<String, Option<String>> {
    if parent_keys.is_empty() {
        return HashMap::new();
    }

    let jql = query::build_parent_jql(parent_keys);
    let fields = vec![config.sprint_field().to_string()];

    match api.search_issues(&jql, &fields, parent_keys.len()) {
        Ok(parents) => parents
            .into_iter()
            .map(|parent| {
                let sprint = model::resolve_current_sprint(
                    &parent.fields.sprints(config.sprint_field()),
                );
                (parent.key, sprint)
            })
            .collect(),
        Err(err) => {
            warn!("failed to fetch parent sprint info: {err}");
            HashMap::new()
        }
    }
}

/// Run the full reconciliation pass over a primary result set.
///
/// Fetches the assignee's subtasks server-side, merges them in with
/// key-based de-duplication, resolves parent sprint membership, and
/// filters the merged set against the requested sprint.
pub fn apply(
    api: &JiraApi,
    config: &JiraConfig,
    filters: &ListFilters,
    fields: &[String],
    primary: Vec<Issue>,
) -> Result<Vec<Issue>> {
    let Some(selector) = &filters.sprint else {
        return Ok(primary);
    };

    let subtask_jql = query::build_subtask_jql(config, filters);
    let subtasks: Vec<Issue> = api
        .search_issues(&subtask_jql, fields, filters.limit)?
        .iter()
        .map(|raw| raw.flatten(config))
        .collect();

    let merged = merge_issues(primary, subtasks);
    let parent_keys = collect_parent_keys(&merged);
    debug!(
        merged = merged.len(),
        parents = parent_keys.len(),
        "reconciling sprint membership"
    );

    let parent_sprints = fetch_parent_sprints(api, config, &parent_keys);
    Ok(filter_with_inheritance(merged, selector, &parent_sprints))
}
