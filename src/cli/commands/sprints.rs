//! Sprints command implementation.
//!
//! Lists sprints on one board, flagging active sprints that ran past
//! their end date.

use crate::cli::SprintsArgs;
use crate::error::{JtError, Result};
use crate::model::SprintState;
use crate::util::time;
use chrono::Utc;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintListOutput {
    pub total: usize,
    pub board_id: u64,
    pub board_name: String,
    pub sprints: Vec<SprintLine>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintLine {
    pub id: Option<u64>,
    pub name: String,
    pub state: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_overdue: bool,
}

/// Execute the sprints command.
pub fn execute(args: &SprintsArgs, config_path: Option<&Path>) -> Result<()> {
    let (config, api) = super::connect(config_path)?;

    let (board_id, board_name) = if let Some(id) = args.board {
        let configured = config.jira.boards.iter().find(|b| b.id == id);
        (
            id,
            configured.map_or_else(|| format!("Board {id}"), |b| b.name.clone()),
        )
    } else {
        let board = config.default_board().ok_or_else(|| {
            JtError::Config("No board configured; add one with jt init --add-board".to_string())
        })?;
        (board.id, board.name.clone())
    };

    let sprints = api.get_sprints(board_id, &args.state)?;
    let now = Utc::now();

    let lines: Vec<SprintLine> = sprints
        .into_iter()
        .map(|sprint| {
            let is_overdue = sprint.state == SprintState::Active
                && time::is_overdue(sprint.end_date.as_deref(), now);
            SprintLine {
                id: sprint.id,
                name: sprint.name,
                state: sprint.state.as_str().to_string(),
                start_date: sprint.start_date,
                end_date: sprint.end_date,
                is_overdue,
            }
        })
        .collect();

    let output = SprintListOutput {
        total: lines.len(),
        board_id,
        board_name,
        sprints: lines,
    };
    super::print_json(&output)
}
