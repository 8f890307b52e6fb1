//! Shared helpers for command handlers

use std::fs;
use std::path::Path;

use gradecheck_core::config::EngineConfig;
use gradecheck_core::error::{GradeError, Result};
use gradecheck_core::llm::HttpChatClient;
use tracing::debug;

use crate::cli::Cli;

/// Read a UTF-8 input file; a missing file is a data error
pub fn read_input(context: &str, path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(GradeError::not_found(context, path.display()));
    }
    fs::read_to_string(path).map_err(|e| GradeError::io_operation("read", path.display(), e))
}

/// Effective engine configuration for this invocation
pub fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let (config, source) = EngineConfig::resolve(cli.config.as_deref())?;
    match source {
        Some(path) => debug!(path = %path.display(), "using config file"),
        None => debug!("using built-in config"),
    }
    Ok(config)
}

/// Chat client built from the configuration and environment
pub fn chat_client(config: &EngineConfig) -> Result<HttpChatClient> {
    HttpChatClient::from_config(config.llm.clone().with_env_overrides())
}

/// Print a progress or status line on stderr unless `--quiet`
pub fn note(cli: &Cli, message: impl std::fmt::Display) {
    if !cli.quiet {
        eprintln!("{}", message);
    }
}
