//! CLI definitions and entry point.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Team-configured Jira CLI (REST v3 + Agile)
#[derive(Parser, Debug)]
#[command(name = "jt", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (default: $JT_CONFIG, ~/.config/jt/config.json, ./config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List issues (tree or JSON)
    List(ListArgs),

    /// Show one issue in detail
    Show(ShowArgs),

    /// Change an issue's status and/or assignee
    Update(UpdateArgs),

    /// Add a comment to an issue
    Comment(CommentArgs),

    /// Update scheduling fields (start date, estimate)
    Fields(FieldsArgs),

    /// Create a sub-task under a parent issue
    Subtask(SubtaskArgs),

    /// List sprints on a board
    Sprints(SprintsArgs),

    /// Inspect the live tracker environment (boards, fields, types)
    Meta(MetaArgs),

    /// Create a git branch named after an issue
    Branch(BranchArgs),

    /// Extract the ticket key from a branch name
    Parse(ParseArgs),

    /// Create or update the config file
    Init(InitArgs),
}

/// Arguments for the list command.
#[derive(Args, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ListArgs {
    /// Issues assigned to me
    #[arg(long)]
    pub mine: bool,

    /// Issues assigned to a team member (name or alias)
    #[arg(long, conflicts_with = "mine")]
    pub assignee: Option<String>,

    /// Filter by status (accepts localized shorthand)
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by issue type
    #[arg(long = "type")]
    pub type_: Option<String>,

    /// Issues with an empty description
    #[arg(long)]
    pub empty: bool,

    /// Raw JQL override (disables all other filters)
    #[arg(long)]
    pub jql: Option<String>,

    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Include finished issues (disables default status filtering)
    #[arg(long)]
    pub all: bool,

    /// Sprint scope: current | next | closed | <name>
    #[arg(long)]
    pub sprint: Option<String>,

    /// Issues with no sprint assignment
    #[arg(long, conflicts_with = "sprint")]
    pub backlog: bool,
}

/// Arguments for the show command.
#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Issue key (e.g. AS-1234); defaults to the current branch's ticket
    pub key: Option<String>,

    /// Resolve the key from the current git branch
    #[arg(long)]
    pub from_branch: bool,
}

/// Arguments for the update command.
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Issue key (e.g. AS-1234)
    pub key: Option<String>,

    /// Resolve the key from the current git branch
    #[arg(long)]
    pub from_branch: bool,

    /// Target status (accepts localized shorthand)
    #[arg(long)]
    pub status: Option<String>,

    /// New assignee (team member name or alias)
    #[arg(long)]
    pub assignee: Option<String>,

    /// Report the would-be changes without writing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the comment command.
#[derive(Args, Debug, Default)]
pub struct CommentArgs {
    /// Issue key followed by the comment text, in any order
    pub args: Vec<String>,

    /// Resolve the key from the current git branch
    #[arg(long)]
    pub from_branch: bool,
}

/// Arguments for the fields command.
#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Issue key (e.g. AS-1234)
    pub key: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Original estimate (e.g. 2h, 1d)
    #[arg(long)]
    pub estimate: Option<String>,
}

/// Arguments for the subtask command.
#[derive(Args, Debug)]
pub struct SubtaskArgs {
    /// Parent issue key
    pub parent: String,

    /// Sub-task summary
    pub summary: String,

    /// Assign to a team member (name or alias)
    #[arg(long)]
    pub assignee: Option<String>,
}

/// Arguments for the sprints command.
#[derive(Args, Debug)]
pub struct SprintsArgs {
    /// Sprint states, comma-joined
    #[arg(long, default_value = "active,future")]
    pub state: String,

    /// Board id (default: the config's default board)
    #[arg(long)]
    pub board: Option<u64>,
}

/// Arguments for the meta command.
#[derive(Args, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MetaArgs {
    /// Boards only
    #[arg(long)]
    pub boards: bool,

    /// Sprints only
    #[arg(long)]
    pub sprints: bool,

    /// Create-meta fields only
    #[arg(long)]
    pub fields: bool,

    /// Issue types only
    #[arg(long)]
    pub issue_types: bool,

    /// Project key (default: the configured project)
    #[arg(long)]
    pub project: Option<String>,
}

/// Arguments for the branch command.
#[derive(Args, Debug)]
pub struct BranchArgs {
    /// Issue key the branch belongs to
    pub key: String,

    /// Short description for the branch slug
    pub description: String,
}

/// Arguments for the parse command.
#[derive(Args, Debug, Default)]
pub struct ParseArgs {
    /// Branch name (default: the current git branch)
    pub branch: Option<String>,
}

/// Arguments for the init command.
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Print the active config with the token redacted
    #[arg(long)]
    pub show: bool,

    /// Base site URL (https://xxx.atlassian.net)
    #[arg(long)]
    pub site: Option<String>,

    /// Project key
    #[arg(long)]
    pub project: Option<String>,

    /// Credentials: EMAIL TOKEN
    #[arg(long, num_args = 2, value_names = ["EMAIL", "TOKEN"])]
    pub auth: Option<Vec<String>>,

    /// Register a board: ID NAME
    #[arg(long, num_args = 2, value_names = ["ID", "NAME"])]
    pub add_board: Option<Vec<String>>,

    /// Register a team member: NAME ACCOUNT-ID
    #[arg(long, num_args = 2, value_names = ["NAME", "ACCOUNT_ID"])]
    pub add_member: Option<Vec<String>>,
}
