//! `gradecheck judge` - direct judgment of each student by the chat endpoint

use std::collections::BTreeMap;
use std::path::Path;

use gradecheck_core::corpus::SubmissionLoader;
use gradecheck_core::error::Result;
use gradecheck_core::llm::{generate_checklist, judge_code, JudgeOutcome};
use gradecheck_core::report::save_report;
use serde::Serialize;
use tracing::{debug, info};

use super::helpers::{chat_client, load_config, note, read_input};
use crate::cli::{Cli, OutputFormat};

const REPORT_PREFIX: &str = "julgamento";

/// Checklist used and the endpoint's answer for each student
#[derive(Debug, Serialize)]
pub struct JudgeReport {
    pub checklist: String,
    pub students: BTreeMap<String, JudgeOutcome>,
    /// Students without any eligible source file; never sent to the endpoint
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub no_source: Vec<String>,
}

pub fn execute(
    cli: &Cli,
    assignment: &Path,
    submissions: &Path,
    checklist: Option<&Path>,
    save: Option<&Path>,
) -> Result<()> {
    let config = load_config(cli)?;
    let assignment = read_input("assignment file", assignment)?;
    let loaded = SubmissionLoader::new(&config.corpus).load_all(submissions)?;
    let client = chat_client(&config)?;

    let checklist = match checklist {
        Some(path) => read_input("checklist file", path)?,
        None => {
            note(cli, "Generating checklist from assignment...");
            generate_checklist(&client, client.config(), &assignment)?
        }
    };

    let mut report = JudgeReport {
        checklist,
        students: BTreeMap::new(),
        no_source: Vec::new(),
    };

    for submission in &loaded {
        if !submission.has_source() {
            debug!(student = %submission.student, "no source, skipping");
            report.no_source.push(submission.student.clone());
            continue;
        }

        note(cli, format!("Judging {}...", submission.student));
        let outcome = judge_code(
            &client,
            client.config(),
            &assignment,
            &report.checklist,
            &submission.source,
        )?;
        report.students.insert(submission.student.clone(), outcome);
    }
    info!(judged = report.students.len(), "judgment complete");

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Human => print_human(&report),
    }

    if let Some(dir) = save {
        let path = save_report(dir, REPORT_PREFIX, &report)?;
        note(cli, format!("Report saved to {}", path.display()));
    }

    Ok(())
}

fn print_human(report: &JudgeReport) {
    for (student, outcome) in &report.students {
        match outcome {
            JudgeOutcome::Parsed(_) => {
                let verdicts = outcome.verdicts();
                let passed = verdicts.values().filter(|v| v.is_ok()).count();
                println!("{} ({}/{})", student, passed, verdicts.len());
                for (criterion, verdict) in &verdicts {
                    println!("  {:<5}  {}", verdict.to_string(), criterion);
                }
            }
            JudgeOutcome::Unparsed { error, raw } => {
                println!("{} (unreadable answer: {})", student, error);
                println!("  {}", raw);
            }
        }
    }

    for student in &report.no_source {
        println!("{} (no source files)", student);
    }
}
