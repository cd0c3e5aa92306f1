//! Branch command implementation.
//!
//! Looks the issue up to pick a branch prefix, slugifies the
//! description, and checks the branch out.

use crate::cli::BranchArgs;
use crate::error::{JtError, Result};
use crate::util::branch as branch_util;
use serde::Serialize;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchResult {
    pub success: bool,
    pub branch: String,
    pub previous_branch: String,
    pub issue: BranchIssue,
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchIssue {
    pub key: String,
    pub summary: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Execute the branch command.
pub fn execute(args: &BranchArgs, config_path: Option<&Path>) -> Result<()> {
    let (config, api) = super::connect(config_path)?;

    let issue = api.get_issue(
        &args.key,
        &[
            "summary".to_string(),
            "issuetype".to_string(),
            "parent".to_string(),
            "priority".to_string(),
        ],
    )?;

    let summary = issue.fields.summary.clone().unwrap_or_default();
    let issue_type = issue
        .fields
        .issuetype
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_default();
    let parent_summary = issue
        .fields
        .parent
        .as_ref()
        .and_then(|p| p.fields.as_ref())
        .and_then(|f| f.summary.clone());
    let priority = issue.fields.priority.as_ref().map(|p| p.name.as_str());

    let prefix = branch_util::branch_prefix(
        &issue_type,
        &summary,
        parent_summary.as_deref(),
        priority,
    );
    let slug = branch_util::slugify(&args.description);
    let branch_name = format!("{prefix}/{}/{slug}", args.key);

    let previous = branch_util::current_branch()?;
    checkout_new_branch(&branch_name)?;

    let result = BranchResult {
        success: true,
        branch: branch_name,
        previous_branch: previous,
        issue: BranchIssue {
            key: args.key.clone(),
            summary,
            issue_type,
            parent: issue.fields.parent.as_ref().map(|p| p.key.clone()),
        },
        url: format!("{}/browse/{}", config.jira.site, args.key),
    };
    super::print_json(&result)
}

fn checkout_new_branch(name: &str) -> Result<()> {
    let output = Command::new("git")
        .args(["checkout", "-b", name])
        .output()
        .map_err(|e| JtError::Git(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        return Err(JtError::Git(format!(
            "branch creation failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}
