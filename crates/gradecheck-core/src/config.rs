//! Engine configuration for gradecheck
//!
//! Stored as TOML. Lookup order: an explicit path, then
//! `$GRADECHECK_CONFIG_DIR/config.toml`, then `~/.config/gradecheck/config.toml`.
//! A missing file means built-in defaults.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::bail_invalid;
use crate::error::{GradeError, Result};

pub use types::{
    CorpusConfig, EmptyKeywordPolicy, EngineConfig, FilterConfig, KeywordConfig, LlmConfig,
    MatchConfig, MatchMode, CONFIG_FORMAT_VERSION,
};

const CONFIG_DIR: &str = "gradecheck";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "GRADECHECK_CONFIG_DIR";

impl EngineConfig {
    /// Default location of the configuration file
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    GradeError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load configuration from a file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GradeError::io_operation("read config", path.display(), e))?;
        let config: EngineConfig =
            toml::from_str(&content).map_err(|e| GradeError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if config.version > CONFIG_FORMAT_VERSION {
            return Err(GradeError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!(
                    "config version {} is newer than supported version {}",
                    config.version, CONFIG_FORMAT_VERSION
                ),
            });
        }

        config.validate().map_err(|e| GradeError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist; the default location is optional.
    /// Returns the configuration and the file it came from, if any.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(GradeError::not_found("config file", path.display()));
            }
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let path = Self::default_path()?;
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            Ok((Self::load(&path)?, Some(path)))
        } else {
            Ok((Self::default(), None))
        }
    }

    /// Save configuration to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    GradeError::io_operation("create config directory", parent.display(), e)
                })?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| GradeError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| GradeError::io_operation("write config", path.display(), e))?;
        Ok(())
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let threshold = self.matching.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            bail_invalid!("threshold (expected 0.0 to 1.0)", threshold);
        }
        if self.filter.marker.trim().is_empty() {
            bail_invalid!("checklist marker", "empty");
        }
        if self.filter.require_action_verb && self.filter.action_verbs.is_empty() {
            bail_invalid!("action verb list", "empty while require_action_verb is set");
        }
        if self.corpus.extensions.is_empty() {
            bail_invalid!("extension list", "empty");
        }
        Ok(())
    }
}

impl LlmConfig {
    /// Apply `GRADECHECK_LLM_*` environment overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("GRADECHECK_LLM_ENDPOINT") {
            if !endpoint.is_empty() {
                self.endpoint = endpoint;
            }
        }

        if let Ok(model) = std::env::var("GRADECHECK_LLM_MODEL") {
            if !model.is_empty() {
                self.model = model;
            }
        }

        if let Ok(timeout) = std::env::var("GRADECHECK_LLM_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                self.timeout_seconds = seconds;
            }
        }

        if let Ok(retries) = std::env::var("GRADECHECK_LLM_RETRIES") {
            if let Ok(count) = retries.parse::<u32>() {
                self.max_retries = count;
            }
        }

        self.timeout_seconds = self.timeout_seconds.clamp(5, 300);
        self.max_retries = self.max_retries.clamp(0, 10);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.version, CONFIG_FORMAT_VERSION);
        assert_eq!(config.filter.marker, "[ ]");
        assert!(config.filter.require_action_verb);
        assert_eq!(config.filter.min_words, 0);
        assert_eq!(config.keywords.min_keyword_len, 3);
        assert!(!config.keywords.stemming);
        assert_eq!(config.matching.threshold, 0.4);
        assert_eq!(config.matching.mode, MatchMode::Substring);
        assert_eq!(config.matching.empty_keywords, EmptyKeywordPolicy::Fail);
        assert_eq!(config.corpus.extensions, vec!["cs".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = EngineConfig::default();
        config.matching.threshold = 0.5;
        config.matching.mode = MatchMode::Word;
        config.keywords.stopwords.push("sistema".to_string());
        config.save(&path).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[matching]\nthreshold = 1.0\nempty_keywords = \"pass\"\n\n[corpus]\nextensions = [\"py\"]\n",
        )
        .unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.matching.threshold, 1.0);
        assert_eq!(config.matching.empty_keywords, EmptyKeywordPolicy::Pass);
        assert_eq!(config.corpus.extensions, vec!["py".to_string()]);
        assert_eq!(config.filter, FilterConfig::default());
        assert_eq!(config.keywords, KeywordConfig::default());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[matching]\nthreshold = 1.5\n").unwrap();

        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, GradeError::InvalidConfig { .. }));
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn test_malformed_toml_is_invalid_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[matching\nthreshold = ").unwrap();

        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, GradeError::InvalidConfig { .. }));
        assert_eq!(err.exit_code() as i32, 3);
        assert_eq!(err.to_json()["error"]["type"], "invalid_config");
    }

    #[test]
    fn test_newer_version_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "version = 99\n").unwrap();

        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, GradeError::InvalidConfig { .. }));
    }

    #[test]
    fn test_resolve_explicit_missing_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = EngineConfig::resolve(Some(&missing)).unwrap_err();
        assert!(matches!(err, GradeError::NotFound { .. }));
    }

    #[test]
    fn test_resolve_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[keywords]\nmin_keyword_len = 4\n").unwrap();

        let (config, source) = EngineConfig::resolve(Some(&path)).unwrap();
        assert_eq!(config.keywords.min_keyword_len, 4);
        assert_eq!(source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_llm_env_overrides_and_clamping() {
        std::env::set_var("GRADECHECK_LLM_ENDPOINT", "http://localhost:9999/v1");
        std::env::set_var("GRADECHECK_LLM_TIMEOUT", "1");
        std::env::set_var("GRADECHECK_LLM_RETRIES", "100");
        let config = LlmConfig::default().with_env_overrides();
        assert_eq!(config.endpoint, "http://localhost:9999/v1");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.max_retries, 10);
        std::env::remove_var("GRADECHECK_LLM_ENDPOINT");
        std::env::remove_var("GRADECHECK_LLM_TIMEOUT");
        std::env::remove_var("GRADECHECK_LLM_RETRIES");

        let config = LlmConfig::default().with_env_overrides();
        assert_eq!(config.endpoint, "https://models.github.ai/inference");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.max_retries, 3);
    }
}
