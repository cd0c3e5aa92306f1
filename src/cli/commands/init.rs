//! Init command implementation.
//!
//! Creates or updates the config file in place. `--show` prints the
//! active config with the token redacted.

use crate::cli::InitArgs;
use crate::config::{
    self, AuthSection, Board, BranchSection, DefaultsSection, FieldsSection, JiraConfig,
    JiraSection, ListSection, TeamMember, TeamSection,
};
use crate::error::{JtError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct InitResult {
    pub success: bool,
    pub path: String,
    pub updated: Vec<String>,
}

/// Starter config written when no file exists yet.
fn starter_config(site: &str, project: &str) -> JiraConfig {
    let mut status_mapping = HashMap::new();
    status_mapping.insert("todo".to_string(), vec!["To Do".to_string()]);
    status_mapping.insert("in_progress".to_string(), vec!["In Progress".to_string()]);
    status_mapping.insert("in_review".to_string(), vec!["In Review".to_string()]);
    status_mapping.insert("done".to_string(), vec!["Done".to_string()]);

    JiraConfig {
        auth: None,
        jira: JiraSection {
            site: site.to_string(),
            project: project.to_string(),
            boards: Vec::new(),
            sprint_field: None,
            subtask_type: None,
            fields: FieldsSection::default(),
            status_mapping,
            status_transitions: HashMap::new(),
        },
        branch: BranchSection {
            patterns: vec![
                format!(
                    "^(?P<type>feature|bugfix|hotfix|refactor|chore)/(?P<ticket>{project}-\\d+)/(?P<desc>.*)$"
                ),
                format!(
                    "^(?P<type>feature|bugfix|hotfix|refactor|chore)/(?P<ticket>{project}-\\d+)$"
                ),
            ],
            ticket_regex: Some(format!("{project}-\\d+")),
            recommended: Some(format!("feature/{project}-1234/description")),
        },
        team: TeamSection::default(),
        defaults: DefaultsSection::default(),
        list: ListSection {
            exclude_statuses: vec!["Done".to_string()],
            include_statuses: Vec::new(),
        },
    }
}

/// Execute the init command.
pub fn execute(args: &InitArgs, config_path: Option<&Path>) -> Result<()> {
    let target = config::locate(config_path)
        .unwrap_or_else(|_| config::init_target_path(config_path));

    let mut cfg = if target.is_file() {
        config::load_from(&target)?
    } else {
        starter_config(
            args.site.as_deref().unwrap_or_default(),
            args.project.as_deref().unwrap_or_default(),
        )
    };

    if args.show {
        let mut redacted = cfg;
        if let Some(auth) = &mut redacted.auth {
            if auth.api_token.is_some() {
                auth.api_token = Some("********".to_string());
            }
        }
        return super::print_json(&redacted);
    }

    let mut updated = Vec::new();

    if let Some(site) = &args.site {
        cfg.jira.site = site.clone();
        updated.push("jira.site".to_string());
    }
    if let Some(project) = &args.project {
        cfg.jira.project = project.clone();
        updated.push("jira.project".to_string());
    }
    if let Some(auth) = &args.auth {
        cfg.auth = Some(AuthSection {
            email: auth.first().cloned(),
            api_token: auth.get(1).cloned(),
        });
        updated.push("auth".to_string());
    }
    if let Some(board) = &args.add_board {
        let id = board
            .first()
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| JtError::InvalidArgs("--add-board needs a numeric id".to_string()))?;
        let name = board.get(1).cloned().unwrap_or_default();
        let default = cfg.jira.boards.is_empty();
        cfg.jira.boards.push(Board { id, name, default });
        updated.push("jira.boards".to_string());
    }
    if let Some(member) = &args.add_member {
        let name = member.first().cloned().unwrap_or_default();
        let account_id = member.get(1).cloned().unwrap_or_default();
        cfg.team.members.push(TeamMember {
            name,
            aliases: Vec::new(),
            github: None,
            jira: None,
            account_id,
        });
        updated.push("team.members".to_string());
    }

    if updated.is_empty() && target.is_file() {
        return Err(JtError::InvalidArgs(
            "Nothing to change. Pass --site, --project, --auth, --add-board, or --add-member"
                .to_string(),
        ));
    }

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&target, serde_json::to_string_pretty(&cfg)? + "\n")?;

    let result = InitResult {
        success: true,
        path: target.display().to_string(),
        updated,
    };
    super::print_json(&result)
}
