//! Parse command implementation.
//!
//! Extracts the ticket key from a branch name. Other commands consume
//! the resolved key only; the pattern syntax stays inside
//! `util::branch`.

use crate::cli::ParseArgs;
use crate::config;
use crate::error::Result;
use crate::util::branch as branch_util;
use std::path::Path;

/// Execute the parse command.
pub fn execute(args: &ParseArgs, config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;

    let branch_name = match &args.branch {
        Some(name) => name.clone(),
        None => branch_util::current_branch()?,
    };

    let parsed = branch_util::parse_branch(&config, &branch_name);
    super::print_json(&parsed)
}
