//! Wire types for the tracker's REST responses.
//!
//! The tracker's JSON is loosely typed; everything the core touches is
//! deserialized here, at the transport boundary, into explicit optional
//! fields. The sprint custom field has a config-mapped id, so it rides
//! in the flattened `extra` map and is pulled out by id.

use crate::config::{self, JiraConfig};
use crate::model::{Issue, ParentRef, Sprint, SubtaskRef};
use serde::Deserialize;
use serde_json::Value;

/// One page of `/rest/api/3/search/jql` results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<SearchIssue>,
    #[serde(default)]
    pub total: Option<usize>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// An issue as returned by search and single-issue endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchIssue {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<StatusField>,
    #[serde(default)]
    pub assignee: Option<UserField>,
    #[serde(default)]
    pub reporter: Option<UserField>,
    #[serde(default)]
    pub issuetype: Option<IssueTypeField>,
    #[serde(default)]
    pub priority: Option<NamedField>,
    #[serde(default)]
    pub parent: Option<ParentField>,
    #[serde(default)]
    pub subtasks: Vec<SubtaskField>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Atlassian Document Format tree.
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub comment: Option<CommentContainer>,
    /// Custom fields, including the sprint field.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl IssueFields {
    /// Sprint records carried on the configured custom field.
    ///
    /// Tolerates a missing, null, or unreadable field by returning an
    /// empty list; sprint membership is optional everywhere.
    #[must_use]
    pub fn sprints(&self, sprint_field: &str) -> Vec<Sprint> {
        self.extra
            .get(sprint_field)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusField {
    pub name: String,
    #[serde(default)]
    pub status_category: Option<NamedField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserField {
    pub account_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTypeField {
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedField {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentField {
    pub key: String,
    #[serde(default)]
    pub fields: Option<ParentFields>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ParentFields {
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtaskField {
    pub key: String,
    #[serde(default)]
    pub fields: SubtaskFields,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SubtaskFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<StatusField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentContainer {
    #[serde(default)]
    pub comments: Vec<RawComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawComment {
    pub id: String,
    #[serde(default)]
    pub author: Option<UserField>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub created: Option<String>,
}

/// `/rest/api/3/issue/{key}/transitions` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
    pub to: StatusField,
}

/// Issue-creation response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
}

/// `/rest/api/3/project/{key}` response, trimmed.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInfo {
    pub id: String,
    pub key: String,
    pub name: String,
}

/// Agile board listing.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardsResponse {
    #[serde(default)]
    pub values: Vec<BoardInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoardInfo {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub board_type: Option<String>,
}

/// Agile sprint listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SprintsResponse {
    #[serde(default)]
    pub values: Vec<Sprint>,
}

/// Create-meta issue-type listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTypesResponse {
    #[serde(default)]
    pub issue_types: Vec<IssueTypeInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueTypeInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
}

/// Create-meta field listing.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldsMetaResponse {
    #[serde(default)]
    pub fields: Vec<FieldMeta>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    pub field_id: String,
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub schema: Option<FieldSchema>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldSchema {
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
}

impl SearchIssue {
    /// Flatten a wire issue into the listing snapshot.
    ///
    /// Assignee account ids resolve through the team directory; sprint
    /// membership collapses to the resolved current sprint name.
    #[must_use]
    pub fn flatten(&self, cfg: &JiraConfig) -> Issue {
        let fields = &self.fields;
        let sprint = crate::model::resolve_current_sprint(&fields.sprints(cfg.sprint_field()));

        let parent = fields.parent.as_ref().map(|p| ParentRef {
            key: p.key.clone(),
            summary: p
                .fields
                .as_ref()
                .and_then(|f| f.summary.clone())
                .unwrap_or_default(),
        });

        let subtasks = if fields.subtasks.is_empty() {
            None
        } else {
            Some(
                fields
                    .subtasks
                    .iter()
                    .map(|sub| SubtaskRef {
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
            )
        };

        Issue {
            key: self.key.clone(),
            summary: fields.summary.clone().unwrap_or_default(),
            status: fields
                .status
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            assignee: fields
                .assignee
                .as_ref()
                .map(|user| config::team::member_name(cfg, &user.account_id)),
            issuetype: fields
                .issuetype
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_default(),
            subtask: fields
                .issuetype
                .as_ref()
                .is_some_and(|t| t.subtask || t.name == cfg.subtask_type()),
            updated: fields.updated.clone().unwrap_or_default(),
            sprint,
            parent,
            subtasks,
        }
    }
}
