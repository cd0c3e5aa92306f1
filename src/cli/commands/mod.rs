//! Subcommand implementations.

pub mod branch;
pub mod comment;
pub mod fields;
pub mod init;
pub mod list;
pub mod meta;
pub mod parse;
pub mod show;
pub mod sprints;
pub mod subtask;
pub mod update;

use crate::api::JiraApi;
use crate::config::{self, JiraConfig};
use crate::error::{JtError, Result};
use crate::util::branch as branch_util;
use serde::Serialize;
use std::path::Path;

/// Load the config, resolve credentials, and open the API.
pub(crate) fn connect(config_path: Option<&Path>) -> Result<(JiraConfig, JiraApi)> {
    let config = config::load(config_path)?;
    let auth = config::resolve_auth(&config)?;
    let api = JiraApi::connect(&config, auth)?;
    Ok((config, api))
}

/// Print one pretty JSON record to stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Resolve the ticket key for commands taking `[KEY] [--from-branch]`.
///
/// An explicit key wins; otherwise the current branch is parsed when
/// `--from-branch` is set or `fallback_to_branch` allows it.
pub(crate) fn resolve_key(
    config: &JiraConfig,
    key: Option<&str>,
    from_branch: bool,
    fallback_to_branch: bool,
) -> Result<String> {
    if let Some(key) = key {
        return Ok(key.to_string());
    }
    if from_branch || fallback_to_branch {
        return branch_util::ticket_from_current_branch(config);
    }
    Err(JtError::InvalidArgs(
        "No ticket specified. Pass a key like AS-1234 or use --from-branch".to_string(),
    ))
}
