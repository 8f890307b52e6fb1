//! `gradecheck criteria` - preview what the engine will check

use std::path::Path;

use gradecheck_core::error::Result;
use gradecheck_core::evaluate::Evaluator;

use super::helpers::{load_config, note, read_input};
use crate::cli::{Cli, OutputFormat};

pub fn execute(cli: &Cli, checklist: &Path) -> Result<()> {
    let config = load_config(cli)?;
    let text = read_input("checklist file", checklist)?;
    let criteria = Evaluator::new(&config).criteria(&text);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&criteria)?);
        }
        OutputFormat::Human => {
            if criteria.is_empty() {
                note(cli, "No valid criteria found in checklist");
            }
            for (i, criterion) in criteria.iter().enumerate() {
                println!("{}. {}", i + 1, criterion.text);
                if criterion.keywords.is_empty() {
                    println!("   keywords: (none)");
                } else {
                    println!("   keywords: {}", criterion.keywords.join(", "));
                }
            }
        }
    }

    Ok(())
}
