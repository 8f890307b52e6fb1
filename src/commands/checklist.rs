//! `gradecheck checklist` - generate a checklist for an assignment

use std::path::Path;

use gradecheck_core::error::Result;
use gradecheck_core::llm::generate_checklist;

use super::helpers::{chat_client, load_config, read_input};
use crate::cli::{Cli, OutputFormat};

pub fn execute(cli: &Cli, assignment: &Path) -> Result<()> {
    let config = load_config(cli)?;
    let text = read_input("assignment file", assignment)?;
    let client = chat_client(&config)?;

    let checklist = generate_checklist(&client, client.config(), &text)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "checklist": checklist });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => println!("{}", checklist.trim_end()),
    }

    Ok(())
}
