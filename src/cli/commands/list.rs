//! List command implementation.
//!
//! The query-heavy path: human-facing filters become a server-side JQL
//! query, results are fetched page by page, and when an assignee and a
//! sprint filter are combined the hierarchical reconciler re-applies
//! sprint membership client-side before grouping and rendering.

use crate::api::JiraApi;
use crate::cli::ListArgs;
use crate::config::JiraConfig;
use crate::error::Result;
use crate::format::tree::render_tree;
use crate::model::Issue;
use crate::query::{self, Assignee, ListFilters, SprintSelector};
use crate::reconcile;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// The structured-mode output record: the reconciled issue list plus
/// the filter set that produced it.
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub total: usize,
    pub issues: Vec<Issue>,
    pub query: QueryEcho,
}

#[derive(Debug, Serialize, Default)]
pub struct QueryEcho {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backlog: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jql: Option<String>,
}

/// Execute the list command.
pub fn execute(args: &ListArgs, json: bool, no_color: bool, config_path: Option<&Path>) -> Result<()> {
    let (config, api) = super::connect(config_path)?;
    let filters = build_filters(args, &config);
    let issues = run(&api, &config, &filters)?;

    if json {
        let output = ListOutput {
            total: issues.len(),
            issues,
            query: echo_query(args),
        };
        super::print_json(&output)
    } else {
        let use_color = !no_color && std::io::IsTerminal::is_terminal(&std::io::stdout());
        print!("{}", render_tree(&issues, &config.jira.site, use_color));
        Ok(())
    }
}

/// Fetch, merge, and reconcile the issue list for a filter set.
pub fn run(api: &JiraApi, config: &JiraConfig, filters: &ListFilters) -> Result<Vec<Issue>> {
    let fields = list_fields(config);

    // Under reconciliation the primary query runs without the sprint
    // predicate; membership is re-applied after the subtask merge.
    let reconcile_pass = filters.wants_reconciliation();
    let jql = query::build_list_jql(config, filters, !reconcile_pass);
    debug!(%jql, "listing issues");

    let issues: Vec<Issue> = api
        .search_issues(&jql, &fields, filters.limit)?
        .iter()
        .map(|raw| raw.flatten(config))
        .collect();

    if reconcile_pass {
        reconcile::apply(api, config, filters, &fields, issues)
    } else {
        Ok(issues)
    }
}

/// Fields requested for every listing query.
fn list_fields(config: &JiraConfig) -> Vec<String> {
    config.jira.fields.list.clone().unwrap_or_else(|| {
        vec![
            "summary".to_string(),
            "status".to_string(),
            "assignee".to_string(),
            "issuetype".to_string(),
            "updated".to_string(),
            "subtasks".to_string(),
            "parent".to_string(),
            config.sprint_field().to_string(),
        ]
    })
}

/// Convert CLI args to the filter set.
pub fn build_filters(args: &ListArgs, config: &JiraConfig) -> ListFilters {
    let assignee = if args.mine {
        Some(Assignee::Me)
    } else {
        args.assignee.clone().map(Assignee::Named)
    };

    let sprint = args.sprint.as_deref().map(SprintSelector::from_input);

    ListFilters {
        assignee,
        status: args.status.clone(),
        issue_type: args.type_.clone(),
        sprint,
        backlog: args.backlog,
        empty_description: args.empty,
        jql: args.jql.clone(),
        limit: args.limit.unwrap_or_else(|| config.list_limit()),
        all: args.all,
    }
}

fn echo_query(args: &ListArgs) -> QueryEcho {
    QueryEcho {
        assignee: if args.mine {
            Some("me".to_string())
        } else {
            args.assignee.clone()
        },
        status: args.status.clone(),
        sprint: args.sprint.clone(),
        backlog: args.backlog.then_some(true),
        empty: args.empty.then_some(true),
        jql: args.jql.clone(),
    }
}
