//! CLI argument parsing for gradecheck
//!
//! Global flags: --config, --format, --quiet, --verbose, --log-level, --log-json

pub mod parse;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use gradecheck_core::config::MatchMode;
pub use gradecheck_core::format::OutputFormat;
use parse::{parse_format, parse_match_mode, parse_threshold};

/// Gradecheck - checklist-driven grading for beginner programming assignments
#[derive(Parser, Debug)]
#[command(name = "gradecheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (human or json)
    #[arg(long, global = true, value_parser = parse_format, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug-level logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. "debug" or "gradecheck_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grade every student directory against a checklist by keyword evidence
    Evaluate(EvaluateArgs),

    /// Show the valid criteria of a checklist and their keywords
    Criteria {
        /// Checklist file
        #[arg(long)]
        checklist: PathBuf,
    },

    /// Generate a checklist from an assignment via the chat endpoint
    Checklist {
        /// Assignment text file
        #[arg(long)]
        assignment: PathBuf,
    },

    /// Ask the chat endpoint to judge each student directly
    Judge {
        /// Assignment text file
        #[arg(long)]
        assignment: PathBuf,

        /// Directory holding one sub-directory per student
        #[arg(long)]
        submissions: PathBuf,

        /// Checklist file (generated from the assignment when omitted)
        #[arg(long)]
        checklist: Option<PathBuf>,

        /// Directory to save a timestamped JSON report in
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Manage the engine configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Directory holding one sub-directory per student
    #[arg(long)]
    pub submissions: PathBuf,

    /// Checklist file
    #[arg(long, required_unless_present = "assignment", conflicts_with = "assignment")]
    pub checklist: Option<PathBuf>,

    /// Assignment text file; the checklist is generated via the chat endpoint
    #[arg(long)]
    pub assignment: Option<PathBuf>,

    /// Fraction of keywords that must be present (0.0 to 1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Keywords must be longer than this many characters
    #[arg(long)]
    pub min_keyword_len: Option<usize>,

    /// Keyword lookup: substring or word
    #[arg(long, value_parser = parse_match_mode)]
    pub match_mode: Option<MatchMode>,

    /// Source file extension to read (repeatable)
    #[arg(long = "ext", action = clap::ArgAction::Append)]
    pub extensions: Vec<String>,

    /// Directory to save a timestamped JSON report in
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_evaluate_args() {
        let cli = Cli::try_parse_from([
            "gradecheck",
            "evaluate",
            "--submissions",
            "turma",
            "--checklist",
            "checklist.md",
            "--threshold",
            "0.5",
            "--ext",
            "cs",
            "--ext",
            "py",
            "--match-mode",
            "word",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Evaluate(args)) => {
                assert_eq!(args.threshold, Some(0.5));
                assert_eq!(args.extensions, vec!["cs", "py"]);
                assert_eq!(args.match_mode, Some(MatchMode::Word));
                assert!(args.assignment.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_evaluate_needs_a_checklist_source() {
        let err = Cli::try_parse_from(["gradecheck", "evaluate", "--submissions", "turma"])
            .unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_checklist_and_assignment_conflict() {
        let err = Cli::try_parse_from([
            "gradecheck",
            "evaluate",
            "--submissions",
            "turma",
            "--checklist",
            "a.md",
            "--assignment",
            "b.md",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
