//! `gradecheck config` - write or show the engine configuration

use gradecheck_core::config::EngineConfig;
use gradecheck_core::error::{GradeError, Result};

use super::helpers::load_config;
use crate::cli::{Cli, OutputFormat};

pub fn handle_init(cli: &Cli, force: bool) -> Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => EngineConfig::default_path()?,
    };

    if path.exists() && !force {
        return Err(GradeError::already_exists("config file", path.display()));
    }

    EngineConfig::default().save(&path)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "path": path.display().to_string() });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Wrote config to {}", path.display());
            }
        }
    }
    Ok(())
}

pub fn handle_show(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Human => {
            let content = toml::to_string_pretty(&config)
                .map_err(|e| GradeError::Other(format!("failed to serialize config: {}", e)))?;
            print!("{}", content);
        }
    }
    Ok(())
}
