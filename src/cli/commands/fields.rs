//! Fields command implementation.
//!
//! Writes the scheduling fields a board cares about: the start-date
//! custom field and the original time estimate.

use crate::cli::FieldsArgs;
use crate::error::{JtError, Result};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::path::Path;

/// Start Date custom field id (Jira default).
const START_DATE_FIELD: &str = "customfield_10015";

#[derive(Debug, Serialize)]
pub struct FieldsResult {
    pub success: bool,
    pub key: String,
    pub changes: BTreeMap<String, String>,
    pub url: String,
}

/// Execute the fields command.
pub fn execute(args: &FieldsArgs, config_path: Option<&Path>) -> Result<()> {
    if args.start_date.is_none() && args.estimate.is_none() {
        return Err(JtError::InvalidArgs(
            "At least one of --start-date or --estimate is required".to_string(),
        ));
    }

    let (config, api) = super::connect(config_path)?;
    let mut fields = Map::new();
    let mut changes = BTreeMap::new();

    if let Some(start_date) = &args.start_date {
        fields.insert(START_DATE_FIELD.to_string(), json!(start_date));
        changes.insert("startDate".to_string(), start_date.clone());
    }
    if let Some(estimate) = &args.estimate {
        fields.insert(
            "timetracking".to_string(),
            json!({ "originalEstimate": estimate }),
        );
        changes.insert("originalEstimate".to_string(), estimate.clone());
    }

    api.update_issue(&args.key, Value::Object(fields))?;

    let result = FieldsResult {
        success: true,
        key: args.key.clone(),
        changes,
        url: format!("{}/browse/{}", config.jira.site, args.key),
    };
    super::print_json(&result)
}
