use clap::Parser;
use jt::cli::commands;
use jt::cli::{Cli, Commands};
use jt::logging::init_logging;
use jt::{JtError, StructuredError};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref();
    let result = match &cli.command {
        Commands::List(args) => {
            commands::list::execute(args, cli.json, cli.no_color, config_path)
        }
        Commands::Show(args) => commands::show::execute(args, config_path),
        Commands::Update(args) => commands::update::execute(args, config_path),
        Commands::Comment(args) => commands::comment::execute(args, config_path),
        Commands::Fields(args) => commands::fields::execute(args, config_path),
        Commands::Subtask(args) => commands::subtask::execute(args, config_path),
        Commands::Sprints(args) => commands::sprints::execute(args, config_path),
        Commands::Meta(args) => commands::meta::execute(args, config_path),
        Commands::Branch(args) => commands::branch::execute(args, config_path),
        Commands::Parse(args) => commands::parse::execute(args, config_path),
        Commands::Init(args) => commands::init::execute(args, config_path),
    };

    if let Err(e) = result {
        handle_error(&e);
    }
}

/// Render a failure as one structured record on stdout and exit.
///
/// Nothing is ever thrown past this boundary unformatted, and commands
/// build their output before printing, so a failing invocation never
/// leaves partial output behind.
fn handle_error(err: &JtError) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    let record = structured.to_json();
    println!(
        "{}",
        serde_json::to_string_pretty(&record).unwrap_or_else(|_| record.to_string())
    );

    std::process::exit(exit_code);
}
