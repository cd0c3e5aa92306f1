//! Comment command implementation.
//!
//! Positional args carry the issue key and the comment text in any
//! order; anything shaped like a ticket key is the key, the rest joins
//! into the comment body.

use crate::cli::CommentArgs;
use crate::error::{JtError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::Path;

static TICKET_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]+-\d+$").expect("ticket key regex"));

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResult {
    pub success: bool,
    pub key: String,
    pub comment_id: String,
    pub url: String,
}

/// Split positional args into a ticket key and the comment body.
fn split_args(args: &[String]) -> (Option<String>, Option<String>) {
    let key = args.iter().find(|arg| TICKET_KEY.is_match(arg)).cloned();
    let body_parts: Vec<&str> = args
        .iter()
        .filter(|arg| !TICKET_KEY.is_match(arg))
        .map(String::as_str)
        .collect();
    let body = if body_parts.is_empty() {
        None
    } else {
        Some(body_parts.join(" "))
    };
    (key, body)
}

/// Execute the comment command.
pub fn execute(args: &CommentArgs, config_path: Option<&Path>) -> Result<()> {
    let (config, api) = super::connect(config_path)?;
    let (key_arg, body) = split_args(&args.args);
    let key = super::resolve_key(&config, key_arg.as_deref(), args.from_branch, false)?;

    let Some(body) = body else {
        return Err(JtError::InvalidArgs("No comment body provided".to_string()));
    };

    let comment_id = api.add_comment(&key, &body)?;
    let result = CommentResult {
        success: true,
        key: key.clone(),
        comment_id,
        url: format!("{}/browse/{key}", config.jira.site),
    };
    super::print_json(&result)
}
