//! Update command implementation.
//!
//! Status changes resolve through the status vocabulary and then the
//! workflow-transitions endpoint; assignee changes resolve through the
//! team directory and PUT the account id. No-op changes are skipped and
//! `--dry-run` reports without writing.

use crate::cli::UpdateArgs;
use crate::config::{status, team};
use crate::error::{JtError, Result};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct FieldChange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateResult {
    pub success: bool,
    pub key: String,
    pub changes: BTreeMap<String, FieldChange>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Execute the update command.
pub fn execute(args: &UpdateArgs, config_path: Option<&Path>) -> Result<()> {
    let (config, api) = super::connect(config_path)?;
    let key = super::resolve_key(&config, args.key.as_deref(), args.from_branch, false)?;

    if args.status.is_none() && args.assignee.is_none() {
        return Err(JtError::InvalidArgs(
            "No changes specified. Use --status or --assignee".to_string(),
        ));
    }

    let current = api.get_issue(
        &key,
        &["status".to_string(), "assignee".to_string()],
    )?;
    let mut changes = BTreeMap::new();

    if let Some(input) = &args.status {
        let target =
            status::normalize_status(&config, input).unwrap_or_else(|| input.clone());
        let current_status = current
            .fields
            .status
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_default();

        if !current_status.eq_ignore_ascii_case(&target) {
            let transitions = api.get_transitions(&key)?;
            let transition = transitions.transitions.iter().find(|t| {
                t.to.name.eq_ignore_ascii_case(&target) || t.name.eq_ignore_ascii_case(&target)
            });

            let Some(transition) = transition else {
                let available = transitions
                    .transitions
                    .iter()
                    .map(|t| t.to.name.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(JtError::InvalidTransition { target, available });
            };

            if !args.dry_run {
                api.do_transition(&key, &transition.id)?;
            }
            changes.insert(
                "status".to_string(),
                FieldChange {
                    from: current_status,
                    to: transition.to.name.clone(),
                },
            );
        }
    }

    if let Some(input) = &args.assignee {
        let member = team::find_member(&config, input);
        let target_account = member.map_or_else(|| input.clone(), |m| m.account_id.clone());
        let target_name = member.map_or_else(|| input.clone(), |m| m.name.clone());

        let current_account = current.fields.assignee.as_ref().map(|u| u.account_id.clone());
        let current_name = current_account.as_deref().map_or_else(
            || "Unassigned".to_string(),
            |account| team::member_name(&config, account),
        );

        if current_account.as_deref() != Some(target_account.as_str()) {
            if !args.dry_run {
                api.update_issue(&key, json!({ "assignee": { "accountId": target_account } }))?;
            }
            changes.insert(
                "assignee".to_string(),
                FieldChange {
                    from: current_name,
                    to: target_name,
                },
            );
        }
    }

    let message = if args.dry_run {
        Some("Dry run - no changes made".to_string())
    } else if changes.is_empty() {
        Some("No changes needed - already in desired state".to_string())
    } else {
        None
    };

    let result = UpdateResult {
        success: true,
        key: key.clone(),
        changes,
        url: format!("{}/browse/{key}", config.jira.site),
        dry_run: args.dry_run.then_some(true),
        message,
    };
    super::print_json(&result)
}
