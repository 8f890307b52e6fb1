//! `gradecheck evaluate` - keyword-evidence grading of a whole class

use std::time::Instant;

use gradecheck_core::bail_usage;
use gradecheck_core::config::EngineConfig;
use gradecheck_core::corpus::{source_map, SubmissionLoader};
use gradecheck_core::error::Result;
use gradecheck_core::evaluate::{EvaluationReport, Evaluator, SubmissionStatus};
use gradecheck_core::llm::generate_checklist;
use gradecheck_core::report::save_report;
use gradecheck_core::trace_time;
use serde::Serialize;
use tracing::info;

use super::helpers::{chat_client, load_config, note, read_input};
use crate::cli::{Cli, EvaluateArgs, OutputFormat};

const REPORT_PREFIX: &str = "avaliacao";

/// Checklist text the run used, alongside the verdicts derived from it
#[derive(Debug, Serialize)]
pub struct EvaluationOutput<'a> {
    pub checklist: &'a str,
    #[serde(flatten)]
    pub report: &'a EvaluationReport,
}

/// Apply command-line overrides on top of the loaded configuration
pub fn apply_overrides(mut config: EngineConfig, args: &EvaluateArgs) -> Result<EngineConfig> {
    if let Some(threshold) = args.threshold {
        config.matching.threshold = threshold;
    }
    if let Some(min_len) = args.min_keyword_len {
        config.keywords.min_keyword_len = min_len;
    }
    if let Some(mode) = args.match_mode {
        config.matching.mode = mode;
    }
    if !args.extensions.is_empty() {
        config.corpus.extensions = args.extensions.clone();
    }
    config.validate()?;
    Ok(config)
}

pub fn execute(cli: &Cli, args: &EvaluateArgs, start: Instant) -> Result<()> {
    let config = apply_overrides(load_config(cli)?, args)?;

    let submissions = SubmissionLoader::new(&config.corpus).load_all(&args.submissions)?;
    info!(students = submissions.len(), "submissions loaded");
    trace_time!(start, "load_submissions");

    let checklist = match (&args.checklist, &args.assignment) {
        (Some(path), _) => read_input("checklist file", path)?,
        (None, Some(path)) => {
            let assignment = read_input("assignment file", path)?;
            let client = chat_client(&config)?;
            note(cli, "Generating checklist from assignment...");
            generate_checklist(&client, client.config(), &assignment)?
        }
        (None, None) => bail_usage!("either --checklist or --assignment is required"),
    };

    let report = Evaluator::new(&config).evaluate(&checklist, &source_map(&submissions));
    let output = EvaluationOutput {
        checklist: &checklist,
        report: &report,
    };

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => print_human(cli, &report),
    }

    if let Some(dir) = &args.save {
        let path = save_report(dir, REPORT_PREFIX, &output)?;
        note(cli, format!("Report saved to {}", path.display()));
    }

    Ok(())
}

fn print_human(cli: &Cli, report: &EvaluationReport) {
    if report.criteria.is_empty() {
        note(cli, "No valid criteria found in checklist");
    }

    for (student, result) in &report.students {
        match result.status {
            SubmissionStatus::Evaluated => {
                println!("{} ({}/{})", student, result.passed(), result.total());
            }
            SubmissionStatus::NoSource => {
                println!("{} (0/{}, no source files)", student, result.total());
            }
        }

        for criterion in &report.criteria {
            let Some(verdict) = result.criteria.get(&criterion.text) else {
                continue;
            };
            println!("  {:<5}  {}", verdict.to_string(), criterion.text);

            if cli.quiet || result.status == SubmissionStatus::NoSource {
                continue;
            }
            if let Some(missing) = result.missing.get(&criterion.text) {
                if !missing.is_empty() {
                    println!("         missing: {}", missing.join(", "));
                }
            }
        }
    }
}
