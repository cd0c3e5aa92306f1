//! Subtask command implementation.

use crate::cli::SubtaskArgs;
use crate::config::team;
use crate::error::Result;
use serde::Serialize;
use serde_json::json;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct SubtaskResult {
    pub success: bool,
    pub key: String,
    pub summary: String,
    pub parent: String,
    pub url: String,
}

/// Execute the subtask command.
pub fn execute(args: &SubtaskArgs, config_path: Option<&Path>) -> Result<()> {
    let (config, api) = super::connect(config_path)?;

    let mut fields = json!({
        "project": { "key": config.jira.project },
        "parent": { "key": args.parent },
        "summary": args.summary,
        "issuetype": { "name": config.subtask_type() },
    });

    if let Some(name) = &args.assignee {
        if let Some(member) = team::find_member(&config, name) {
            fields["assignee"] = json!({ "accountId": member.account_id });
        }
    }

    let created = api.create_issue(fields)?;
    let result = SubtaskResult {
        success: true,
        key: created.key.clone(),
        summary: args.summary.clone(),
        parent: args.parent.clone(),
        url: format!("{}/browse/{}", config.jira.site, created.key),
    };
    super::print_json(&result)
}
