//! Team-configured Jira CLI.
//!
//! A local `config.json` maps team members, boards, status vocabulary,
//! and branch conventions onto the tracker's raw field schema; the
//! binary exposes a query-heavy `list` pipeline (JQL construction,
//! paginated retrieval, hierarchical sprint reconciliation, grouped
//! rendering) plus small single-purpose mutation commands.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod query;
pub mod reconcile;
pub mod util;

pub use error::{ErrorCode, JtError, Result, StructuredError};
