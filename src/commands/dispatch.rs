//! Command dispatch logic for gradecheck

use std::time::Instant;

use clap::CommandFactory;
use gradecheck_core::error::Result;

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    match &cli.command {
        None => handle_no_command(),

        Some(Commands::Evaluate(args)) => commands::evaluate::execute(cli, args, start),

        Some(Commands::Criteria { checklist }) => commands::criteria::execute(cli, checklist),

        Some(Commands::Checklist { assignment }) => commands::checklist::execute(cli, assignment),

        Some(Commands::Judge {
            assignment,
            submissions,
            checklist,
            save,
        }) => commands::judge::execute(
            cli,
            assignment,
            submissions,
            checklist.as_deref(),
            save.as_deref(),
        ),

        Some(Commands::Config(ConfigCommands::Init { force })) => {
            commands::config::handle_init(cli, *force)
        }

        Some(Commands::Config(ConfigCommands::Show)) => commands::config::handle_show(cli),
    }
}

fn handle_no_command() -> Result<()> {
    Cli::command()
        .print_help()
        .map_err(gradecheck_core::error::GradeError::Io)?;
    println!();
    Ok(())
}
