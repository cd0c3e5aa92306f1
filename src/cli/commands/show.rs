//! Show command implementation.
//!
//! Fetches one issue with the configured field list and emits a single
//! flattened JSON record: description and comments pass through the
//! ADF converter, account ids resolve to team names.

use crate::cli::ShowArgs;
use crate::config::{JiraConfig, team};
use crate::error::Result;
use crate::util::adf::adf_to_text;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueOutput {
    pub key: String,
    pub summary: String,
    pub description: Option<String>,
    pub status: String,
    pub status_category: String,
    pub assignee: Option<PersonRef>,
    pub reporter: Option<PersonRef>,
    pub issuetype: String,
    pub priority: Option<String>,
    pub parent: Option<crate::model::ParentRef>,
    pub subtasks: Vec<crate::model::SubtaskRef>,
    pub labels: Vec<String>,
    pub created: String,
    pub updated: String,
    pub comments: Vec<CommentOutput>,
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    pub name: String,
    pub account_id: String,
}

#[derive(Debug, Serialize)]
pub struct CommentOutput {
    pub id: String,
    pub author: String,
    pub body: String,
    pub created: String,
}

/// Execute the show command.
pub fn execute(args: &ShowArgs, config_path: Option<&Path>) -> Result<()> {
    let (config, api) = super::connect(config_path)?;
    // With no key at all, fall back to the current branch.
    let key = super::resolve_key(&config, args.key.as_deref(), args.from_branch, true)?;

    let fields = config.default_fields();
    let raw = api.get_issue(&key, &fields)?;
    let output = build_output(&config, &raw);
    super::print_json(&output)
}

fn person(config: &JiraConfig, user: &crate::api::types::UserField) -> PersonRef {
    PersonRef {
        name: team::member_name(config, &user.account_id),
        account_id: user.account_id.clone(),
    }
}

fn build_output(config: &JiraConfig, raw: &crate::api::types::SearchIssue) -> IssueOutput {
    let fields = &raw.fields;
    let keep = config.include_comments();
    let comments: Vec<CommentOutput> = fields
        .comment
        .as_ref()
        .map(|container| {
            let total = container.comments.len();
            container.comments[total.saturating_sub(keep)..]
                .iter()
                .map(|comment| CommentOutput {
                    id: comment.id.clone(),
                    author: comment
                        .author
                        .as_ref()
                        .and_then(|a| a.display_name.clone())
                        .unwrap_or_default(),
                    body: comment.body.as_ref().map(adf_to_text).unwrap_or_default(),
                    created: comment.created.clone().unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();

    IssueOutput {
        key: raw.key.clone(),
        summary: fields.summary.clone().unwrap_or_default(),
        description: fields.description.as_ref().map(adf_to_text),
        status: fields
            .status
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_default(),
        status_category: fields
            .status
            .as_ref()
            .and_then(|s| s.status_category.as_ref())
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        assignee: fields.assignee.as_ref().map(|u| person(config, u)),
        reporter: fields.reporter.as_ref().map(|u| person(config, u)),
        issuetype: fields
            .issuetype
            .as_ref()
            .map(|t| t.name.clone())
            .unwrap_or_default(),
        priority: fields.priority.as_ref().map(|p| p.name.clone()),
        parent: fields.parent.as_ref().map(|p| crate::model::ParentRef {
            key: p.key.clone(),
            summary: p
                .fields
                .as_ref()
                .and_then(|f| f.summary.clone())
                .unwrap_or_default(),
        }),
        subtasks: fields
            .subtasks
            .iter()
            .map(|sub| crate::model::SubtaskRef {
                key: sub.key.clone(),
                summary: sub.fields.summary.clone().unwrap_or_default(),
                status: sub
                    .fields
                    .status
                    .as_ref()
                    .map(|s| s.name.clone())
                    .unwrap_or_default(),
            })
            .collect(),
        labels: fields.labels.clone(),
        created: fields.created.clone().unwrap_or_default(),
        updated: fields.updated.clone().unwrap_or_default(),
        comments,
        url: format!("{}/browse/{}", config.jira.site, raw.key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_output_flattens_adf_and_trims_comments() {
        let config: JiraConfig = serde_json::from_str(
            r#"{
                "jira": { "site": "https://acme.atlassian.net", "project": "AS" },
                "defaults": { "includeComments": 2 }
            }"#,
        )
        .expect("parse config");

        let raw: crate::api::types::SearchIssue = serde_json::from_value(json!({
            "key": "AS-10",
            "fields": {
                "summary": "Describe the flow",
                "status": { "name": "In Progress", "statusCategory": { "name": "In Progress" } },
                "description": {
                    "content": [{ "type": "paragraph", "content": [
                        { "type": "text", "text": "body text" }
                    ]}]
                },
                "comment": { "comments": [
                    { "id": "1", "created": "2026-01-01", "body": { "content": [] } },
                    { "id": "2", "created": "2026-01-02", "body": { "content": [] } },
                    { "id": "3", "created": "2026-01-03",
                      "author": { "accountId": "acc-1", "displayName": "SW Lee" },
                      "body": { "content": [{ "type": "paragraph", "content": [
                          { "type": "text", "text": "last word" }
                      ]}] } }
                ]}
            }
        }))
        .expect("parse issue");

        let output = build_output(&config, &raw);
        assert_eq!(output.description.as_deref(), Some("body text"));
        // Only the trailing two comments survive.
        assert_eq!(output.comments.len(), 2);
        assert_eq!(output.comments[1].body, "last word");
        assert_eq!(output.url, "https://acme.atlassian.net/browse/AS-10");
    }
}
