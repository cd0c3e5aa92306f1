//! Meta command implementation.
//!
//! Live environment inspection against the tracker: project info,
//! boards, sprints, issue types, and create-meta fields. Individual
//! lookups degrade to empty sections so a partially-permissioned
//! account still gets a useful picture.

use crate::api::JiraApi;
use crate::cli::MetaArgs;
use crate::config;
use crate::error::Result;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetaOutput {
    pub project: Option<ProjectOut>,
    pub boards: Vec<BoardOut>,
    pub sprints: Vec<SprintOut>,
    pub issue_types: Vec<IssueTypeOut>,
    pub fields: FieldsOut,
    pub current_config: ConfigPresence,
}

#[derive(Debug, Serialize)]
pub struct ProjectOut {
    pub key: String,
    pub name: String,
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardOut {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub board_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintOut {
    pub id: Option<u64>,
    pub name: String,
    pub state: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IssueTypeOut {
    pub id: String,
    pub name: String,
    pub subtask: bool,
}

#[derive(Debug, Serialize, Default)]
pub struct FieldsOut {
    pub standard: Vec<FieldOut>,
    pub custom: Vec<FieldOut>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOut {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    pub custom: bool,
}

/// Which config sections are present, for setup guidance.
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPresence {
    pub has_auth: bool,
    pub has_site: bool,
    pub has_project: bool,
    pub has_boards: bool,
}

/// Execute the meta command.
pub fn execute(args: &MetaArgs, config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;
    let presence = ConfigPresence {
        has_auth: config::resolve_auth(&config).is_ok(),
        has_site: !config.jira.site.is_empty(),
        has_project: !config.jira.project.is_empty(),
        has_boards: !config.jira.boards.is_empty(),
    };

    let auth = config::resolve_auth(&config)?;
    let api = JiraApi::connect(&config, auth)?;
    let project_key = args.project.clone().unwrap_or_else(|| config.jira.project.clone());

    let all = !(args.boards || args.sprints || args.fields || args.issue_types);
    let mut output = MetaOutput {
        current_config: presence,
        ..Default::default()
    };

    output.project = api
        .get_project(&project_key)
        .inspect_err(|err| debug!("project lookup failed: {err}"))
        .ok()
        .map(|p| ProjectOut {
            key: p.key,
            name: p.name,
            id: p.id,
        });

    if all || args.boards || args.sprints {
        output.boards = api
            .get_boards(&project_key)
            .inspect_err(|err| debug!("board lookup failed: {err}"))
            .unwrap_or_default()
            .into_iter()
            .map(|b| BoardOut {
                id: b.id,
                name: b.name,
                board_type: b.board_type,
            })
            .collect();
    }

    if all || args.sprints {
        if let Some(board) = output.boards.first() {
            output.sprints = api
                .get_sprints(board.id, "active,future")
                .inspect_err(|err| debug!("sprint lookup failed: {err}"))
                .unwrap_or_default()
                .into_iter()
                .map(|s| SprintOut {
                    id: s.id,
                    name: s.name,
                    state: s.state.as_str().to_string(),
                    start_date: s.start_date,
                    end_date: s.end_date,
                })
                .collect();
        }
    }

    if all || args.issue_types || args.fields {
        output.issue_types = api
            .issue_types(&project_key)
            .inspect_err(|err| debug!("issue-type lookup failed: {err}"))
            .unwrap_or_default()
            .into_iter()
            .map(|t| IssueTypeOut {
                id: t.id,
                name: t.name,
                subtask: t.subtask,
            })
            .collect();
    }

    if all || args.fields {
        output.fields = fetch_fields(&api, &project_key, &output.issue_types);
    }

    super::print_json(&output)
}

/// Create-meta fields for the story type, split standard/custom.
fn fetch_fields(api: &JiraApi, project_key: &str, issue_types: &[IssueTypeOut]) -> FieldsOut {
    let Some(story) = issue_types
        .iter()
        .find(|t| t.name == "Story" || t.name == "스토리")
    else {
        return FieldsOut::default();
    };

    let mut out = FieldsOut::default();
    for field in api
        .create_meta_fields(project_key, &story.id)
        .inspect_err(|err| debug!("field lookup failed: {err}"))
        .unwrap_or_default()
    {
        let custom = field.field_id.starts_with("customfield_");
        let line = FieldOut {
            id: field.field_id,
            name: field.name,
            field_type: field
                .schema
                .and_then(|s| s.field_type)
                .unwrap_or_else(|| "unknown".to_string()),
            required: field.required,
            custom,
        };
        if custom {
            out.custom.push(line);
        } else {
            out.standard.push(line);
        }
    }
    out
}
