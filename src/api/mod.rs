//! Tracker transport and endpoint wrappers.
//!
//! `Transport` is the one seam between the core and HTTP: it issues a
//! request and returns the parsed JSON body, raising typed failures for
//! the auth/permission/not-found statuses and a distinct kind for
//! connection errors. `JiraApi` layers the REST v3 and Agile 1.0
//! endpoints on top, including the continuation-token pagination used
//! by the listing pipeline.
//!
//! No retries anywhere: a failed request surfaces unchanged.

pub mod types;

use crate::config::{Auth, JiraConfig};
use crate::error::{JtError, Result};
use crate::model::Sprint;
use serde_json::{Value, json};
use types::{
    BoardInfo, BoardsResponse, CreatedIssue, FieldMeta, FieldsMetaResponse, IssueTypeInfo,
    IssueTypesResponse, ProjectInfo, SearchIssue, SearchResponse, SprintsResponse,
    TransitionsResponse,
};

/// HTTP methods the tracker endpoints use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// One request to the tracker, already routed and serialized.
pub trait Transport {
    /// Issue a request and parse the response body as JSON.
    ///
    /// Empty response bodies (DELETE/PUT/204) parse as `{}`.
    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value>;
}

/// Blocking HTTP transport with basic auth.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
    auth: Auth,
}

impl HttpTransport {
    /// Build a transport for the configured site.
    pub fn new(base_url: &str, auth: Auth) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| JtError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }
}

impl Transport for HttpTransport {
    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);
        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
        }
        .basic_auth(&self.auth.email, Some(&self.auth.token))
        .header(reqwest::header::ACCEPT, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .map_err(|e| JtError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| JtError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(match status.as_u16() {
                401 => JtError::AuthInvalid { details: text },
                403 => JtError::PermissionDenied { details: text },
                404 => JtError::NotFound { details: text },
                code => JtError::Http {
                    status: code,
                    body: text,
                },
            });
        }

        if text.is_empty() {
            Ok(json!({}))
        } else {
            Ok(serde_json::from_str(&text)?)
        }
    }
}

/// Endpoint wrappers over a transport.
pub struct JiraApi {
    transport: Box<dyn Transport>,
}

impl JiraApi {
    /// Connect to the configured site with resolved credentials.
    pub fn connect(config: &JiraConfig, auth: Auth) -> Result<Self> {
        Ok(Self {
            transport: Box::new(HttpTransport::new(&config.jira.site, auth)?),
        })
    }

    /// Wrap an arbitrary transport (used by tests).
    #[must_use]
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    fn parse<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
        Ok(serde_json::from_value(value)?)
    }

    /// Execute a JQL search, following the continuation-token protocol.
    ///
    /// Follows `nextPageToken` until no token remains, the
    /// server-reported total is reached, or `limit` is reached; the
    /// returned sequence is truncated to exactly `limit` entries.
    pub fn search_issues(
        &self,
        jql: &str,
        fields: &[String],
        limit: usize,
    ) -> Result<Vec<SearchIssue>> {
        let mut all: Vec<SearchIssue> = Vec::new();
        let mut next_page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("jql".to_string(), jql.to_string()),
                ("fields".to_string(), fields.join(",")),
                ("maxResults".to_string(), limit.to_string()),
            ];
            if let Some(token) = next_page_token.take() {
                query.push(("nextPageToken".to_string(), token));
            }

            let page: SearchResponse = Self::parse(self.transport.request(
                Method::Get,
                "/rest/api/3/search/jql",
                &query,
                None,
            )?)?;
            all.extend(page.issues);

            match page.next_page_token {
                Some(token)
                    if all.len() < limit && page.total.is_none_or(|total| all.len() < total) =>
                {
                    next_page_token = Some(token);
                }
                _ => break,
            }
        }

        all.truncate(limit);
        Ok(all)
    }

    /// Fetch one issue with an explicit field list.
    pub fn get_issue(&self, key: &str, fields: &[String]) -> Result<SearchIssue> {
        let query = vec![
            ("fields".to_string(), fields.join(",")),
            ("expand".to_string(), "renderedFields".to_string()),
        ];
        Self::parse(self.transport.request(
            Method::Get,
            &format!("/rest/api/3/issue/{key}"),
            &query,
            None,
        )?)
    }

    /// PUT a field update onto an issue.
    pub fn update_issue(&self, key: &str, fields: Value) -> Result<()> {
        self.transport.request(
            Method::Put,
            &format!("/rest/api/3/issue/{key}"),
            &[],
            Some(&json!({ "fields": fields })),
        )?;
        Ok(())
    }

    /// List the workflow transitions available from the issue's state.
    pub fn get_transitions(&self, key: &str) -> Result<TransitionsResponse> {
        Self::parse(self.transport.request(
            Method::Get,
            &format!("/rest/api/3/issue/{key}/transitions"),
            &[],
            None,
        )?)
    }

    /// Execute a workflow transition.
    pub fn do_transition(&self, key: &str, transition_id: &str) -> Result<()> {
        self.transport.request(
            Method::Post,
            &format!("/rest/api/3/issue/{key}/transitions"),
            &[],
            Some(&json!({ "transition": { "id": transition_id } })),
        )?;
        Ok(())
    }

    /// Add a plain-text comment, wrapped as a one-paragraph ADF doc.
    pub fn add_comment(&self, key: &str, text: &str) -> Result<String> {
        let body = json!({
            "body": {
                "type": "doc",
                "version": 1,
                "content": [
                    {
                        "type": "paragraph",
                        "content": [{ "type": "text", "text": text }],
                    }
                ],
            }
        });
        let response = self.transport.request(
            Method::Post,
            &format!("/rest/api/3/issue/{key}/comment"),
            &[],
            Some(&body),
        )?;
        Ok(response
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    /// Create an issue from a prebuilt field map.
    pub fn create_issue(&self, fields: Value) -> Result<CreatedIssue> {
        Self::parse(self.transport.request(
            Method::Post,
            "/rest/api/3/issue",
            &[],
            Some(&json!({ "fields": fields })),
        )?)
    }

    /// Project metadata.
    pub fn get_project(&self, project: &str) -> Result<ProjectInfo> {
        Self::parse(self.transport.request(
            Method::Get,
            &format!("/rest/api/3/project/{project}"),
            &[],
            None,
        )?)
    }

    /// Agile boards attached to a project.
    pub fn get_boards(&self, project: &str) -> Result<Vec<BoardInfo>> {
        let query = vec![("projectKeyOrId".to_string(), project.to_string())];
        let response: BoardsResponse = Self::parse(self.transport.request(
            Method::Get,
            "/rest/agile/1.0/board",
            &query,
            None,
        )?)?;
        Ok(response.values)
    }

    /// Sprints on a board, filtered by comma-joined states.
    pub fn get_sprints(&self, board_id: u64, states: &str) -> Result<Vec<Sprint>> {
        let query = vec![("state".to_string(), states.to_string())];
        let response: SprintsResponse = Self::parse(self.transport.request(
            Method::Get,
            &format!("/rest/agile/1.0/board/{board_id}/sprint"),
            &query,
            None,
        )?)?;
        Ok(response.values)
    }

    /// Issue types creatable in a project.
    pub fn issue_types(&self, project: &str) -> Result<Vec<IssueTypeInfo>> {
        let response: IssueTypesResponse = Self::parse(self.transport.request(
            Method::Get,
            &format!("/rest/api/3/issue/createmeta/{project}/issuetypes"),
            &[],
            None,
        )?)?;
        Ok(response.issue_types)
    }

    /// Create-meta fields for one issue type.
    pub fn create_meta_fields(&self, project: &str, issue_type_id: &str) -> Result<Vec<FieldMeta>> {
        let response: FieldsMetaResponse = Self::parse(self.transport.request(
            Method::Get,
            &format!("/rest/api/3/issue/createmeta/{project}/issuetypes/{issue_type_id}"),
            &[],
            None,
        )?)?;
        Ok(response.fields)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeTransport;
    use super::*;
    use serde_json::json;

    fn page(keys: &[&str], total: usize, token: Option<&str>) -> Value {
        let issues: Vec<Value> = keys
            .iter()
            .map(|key| json!({ "key": key, "fields": { "summary": key } }))
            .collect();
        let mut body = json!({ "issues": issues, "total": total });
        if let Some(token) = token {
            body["nextPageToken"] = json!(token);
        }
        body
    }

    fn api_with(transport: FakeTransport) -> JiraApi {
        JiraApi::with_transport(Box::new(transport))
    }

    #[test]
    fn test_pagination_follows_tokens_in_order() {
        let transport = FakeTransport::new();
        transport.push_ok(page(&["AS-1", "AS-2"], 5, Some("t1")));
        transport.push_ok(page(&["AS-3", "AS-4"], 5, Some("t2")));
        transport.push_ok(page(&["AS-5"], 5, None));

        let api = api_with(transport);
        let issues = api
            .search_issues("project = \"AS\"", &["summary".to_string()], 50)
            .expect("search");
        let keys: Vec<&str> = issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["AS-1", "AS-2", "AS-3", "AS-4", "AS-5"]);
    }

    #[test]
    fn test_pagination_truncates_to_limit() {
        let transport = FakeTransport::new();
        transport.push_ok(page(&["AS-1", "AS-2"], 10, Some("t1")));
        transport.push_ok(page(&["AS-3", "AS-4"], 10, Some("t2")));

        let api = api_with(transport);
        let issues = api
            .search_issues("project = \"AS\"", &["summary".to_string()], 3)
            .expect("search");
        // Stops after the page that overshoots the limit; no third fetch.
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[2].key, "AS-3");
    }

    #[test]
    fn test_pagination_stops_at_server_total() {
        let transport = FakeTransport::new();
        // A server that keeps handing out tokens past its own total.
        transport.push_ok(page(&["AS-1", "AS-2"], 2, Some("t1")));

        let api = api_with(transport);
        let issues = api
            .search_issues("project = \"AS\"", &["summary".to_string()], 50)
            .expect("search");
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_errors_surface_unmodified() {
        let transport = FakeTransport::new();
        transport.push_err(JtError::PermissionDenied {
            details: "scope".to_string(),
        });

        let api = api_with(transport);
        let err = api
            .search_issues("project = \"AS\"", &["summary".to_string()], 10)
            .unwrap_err();
        assert!(matches!(err, JtError::PermissionDenied { .. }));
    }

    #[test]
    fn test_search_query_carries_token_on_followup() {
        let transport = FakeTransport::new();
        let log = transport.request_log();
        transport.push_ok(page(&["AS-1"], 2, Some("t1")));
        transport.push_ok(page(&["AS-2"], 2, None));

        let api = api_with(transport);
        let _ = api
            .search_issues("project = \"AS\"", &["summary".to_string()], 50)
            .expect("search");

        let requests = log.borrow();
        assert_eq!(requests.len(), 2);
        assert!(
            !requests[0]
                .query
                .iter()
                .any(|(name, _)| name == "nextPageToken")
        );
        assert!(
            requests[1]
                .query
                .contains(&("nextPageToken".to_string(), "t1".to_string()))
        );
    }
}
