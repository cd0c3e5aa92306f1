//! Result grouping for the listing output.
//!
//! Issues are partitioned by resolved sprint name first (no sprint →
//! the backlog bucket), then by status category inside each bucket.

pub mod tree;

use crate::config::status::StatusCategory;
use crate::model::Issue;
use std::collections::HashMap;

/// Bucket label for issues with no sprint association.
pub const BACKLOG_BUCKET: &str = "📦 백로그";

/// Partition issues into sprint buckets.
///
/// Buckets come back sorted alphabetically with the backlog bucket
/// always last, regardless of how it sorts against named sprints.
#[must_use]
pub fn sprint_buckets(issues: &[Issue]) -> Vec<(String, Vec<&Issue>)> {
    let mut buckets: HashMap<String, Vec<&Issue>> = HashMap::new();
    for issue in issues {
        let name = issue
            .sprint
            .clone()
            .unwrap_or_else(|| BACKLOG_BUCKET.to_string());
        buckets.entry(name).or_default().push(issue);
    }

    let mut ordered: Vec<(String, Vec<&Issue>)> = buckets.into_iter().collect();
    ordered.sort_by(|(a, _), (b, _)| {
        if a == BACKLOG_BUCKET {
            std::cmp::Ordering::Greater
        } else if b == BACKLOG_BUCKET {
            std::cmp::Ordering::Less
        } else {
            a.cmp(b)
        }
    });
    ordered
}

/// Partition one bucket by status category, in grouping precedence
/// order. Empty categories are omitted.
#[must_use]
pub fn status_groups<'a>(issues: &[&'a Issue]) -> Vec<(StatusCategory, Vec<&'a Issue>)> {
    let mut groups: HashMap<StatusCategory, Vec<&Issue>> = HashMap::new();
    for issue in issues {
        groups
            .entry(StatusCategory::classify(&issue.status))
            .or_default()
            .push(issue);
    }

    StatusCategory::ORDERED
        .iter()
        .filter_map(|category| {
            groups
                .remove(category)
                .map(|members| (*category, members))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(key: &str, status: &str, sprint: Option<&str>) -> Issue {
        Issue {
            key: key.to_string(),
            summary: format!("{key} summary"),
            status: status.to_string(),
            assignee: None,
            issuetype: "Task".to_string(),
            subtask: false,
            updated: String::new(),
            sprint: sprint.map(ToString::to_string),
            parent: None,
            subtasks: None,
        }
    }

    #[test]
    fn test_backlog_bucket_renders_last() {
        // The backlog label sorts before latin names alphabetically, so
        // the explicit ordering rule has to win.
        let issues = vec![
            issue("AS-1", "To Do", None),
            issue("AS-2", "To Do", Some("Sprint 7")),
            issue("AS-3", "To Do", Some("Alpha")),
        ];
        let buckets = sprint_buckets(&issues);
        let names: Vec<&str> = buckets.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Sprint 7", BACKLOG_BUCKET]);
    }

    #[test]
    fn test_status_groups_in_precedence_order() {
        let issues = vec![
            issue("AS-1", "Done", Some("Sprint 7")),
            issue("AS-2", "In Progress", Some("Sprint 7")),
            issue("AS-3", "코드 리뷰", Some("Sprint 7")),
            issue("AS-4", "Blocked", Some("Sprint 7")),
        ];
        let refs: Vec<&Issue> = issues.iter().collect();
        let groups = status_groups(&refs);
        let order: Vec<StatusCategory> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            order,
            vec![
                StatusCategory::InProgress,
                StatusCategory::InReview,
                StatusCategory::Done,
                StatusCategory::Other,
            ]
        );
    }
}
