//! Configuration type definitions

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bail_unsupported;
use crate::error::GradeError;

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Configuration format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Which checklist lines count as criteria
    #[serde(default)]
    pub filter: FilterConfig,

    /// How keywords are derived from a criterion
    #[serde(default)]
    pub keywords: KeywordConfig,

    /// How keywords are scored against a corpus
    #[serde(default)]
    pub matching: MatchConfig,

    /// Which submission files feed the corpus
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Chat-completion endpoint settings
    #[serde(default)]
    pub llm: LlmConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            filter: FilterConfig::default(),
            keywords: KeywordConfig::default(),
            matching: MatchConfig::default(),
            corpus: CorpusConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

/// Criterion filter configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    /// Literal prefix marking a checkable line
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Require at least one action verb in the line
    #[serde(default = "default_true")]
    pub require_action_verb: bool,

    /// Action verbs, compared against the normalized line
    #[serde(default = "default_action_verbs")]
    pub action_verbs: Vec<String>,

    /// Minimum whitespace-separated words in the line (0 disables)
    #[serde(default)]
    pub min_words: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            require_action_verb: true,
            action_verbs: default_action_verbs(),
            min_words: 0,
        }
    }
}

/// Keyword extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordConfig {
    /// Keywords must be strictly longer than this many characters
    #[serde(default = "default_min_keyword_len")]
    pub min_keyword_len: usize,

    /// Words that carry no domain evidence
    #[serde(default = "default_stopwords")]
    pub stopwords: Vec<String>,

    /// Short domain nouns kept even when the length or stopword filter drops them
    #[serde(default = "default_domain_terms")]
    pub domain_terms: Vec<String>,

    /// Drop everything after `exemplo:` / `ex:`
    #[serde(default = "default_true")]
    pub strip_example_clauses: bool,

    /// Reduce keywords to their Portuguese stem before matching
    #[serde(default)]
    pub stemming: bool,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            min_keyword_len: default_min_keyword_len(),
            stopwords: default_stopwords(),
            domain_terms: default_domain_terms(),
            strip_example_clauses: true,
            stemming: false,
        }
    }
}

/// How a keyword is looked up in a corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Keyword occurs anywhere, including inside longer identifiers
    #[default]
    Substring,
    /// Keyword equals a whole identifier-like word of the corpus
    Word,
}

impl FromStr for MatchMode {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "word" => Ok(MatchMode::Word),
            other => bail_unsupported!("match mode", other, "substring, word"),
        }
    }
}

/// Verdict for a criterion whose keyword set came out empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyKeywordPolicy {
    /// Nothing to look for counts as no evidence
    #[default]
    Fail,
    /// Nothing to look for is vacuously satisfied
    Pass,
}

/// Scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Fraction of keywords that must be present (0.0..=1.0)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Substring or whole-word lookup
    #[serde(default)]
    pub mode: MatchMode,

    /// Verdict for criteria without keywords
    #[serde(default)]
    pub empty_keywords: EmptyKeywordPolicy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            mode: MatchMode::default(),
            empty_keywords: EmptyKeywordPolicy::default(),
        }
    }
}

/// Submission file selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusConfig {
    /// File extensions (without dot) read into the corpus
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

/// Chat-completion endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Language named in the judging prompt
    #[serde(default = "default_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retries for transport errors, 429 and 5xx
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_checklist_temperature")]
    pub checklist_temperature: f32,

    #[serde(default = "default_checklist_max_tokens")]
    pub checklist_max_tokens: u32,

    #[serde(default = "default_judge_temperature")]
    pub judge_temperature: f32,

    #[serde(default = "default_judge_max_tokens")]
    pub judge_max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            token_env: default_token_env(),
            language: default_language(),
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
            checklist_temperature: default_checklist_temperature(),
            checklist_max_tokens: default_checklist_max_tokens(),
            judge_temperature: default_judge_temperature(),
            judge_max_tokens: default_judge_max_tokens(),
        }
    }
}

fn default_version() -> u32 {
    CONFIG_FORMAT_VERSION
}

fn default_true() -> bool {
    true
}

fn default_marker() -> String {
    "[ ]".to_string()
}

fn default_min_keyword_len() -> usize {
    3
}

fn default_threshold() -> f64 {
    0.4
}

fn default_extensions() -> Vec<String> {
    vec!["cs".to_string()]
}

fn default_endpoint() -> String {
    "https://models.github.ai/inference".to_string()
}

fn default_model() -> String {
    "openai/gpt-4o".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_language() -> String {
    "C#".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_checklist_temperature() -> f32 {
    0.5
}

fn default_checklist_max_tokens() -> u32 {
    1500
}

fn default_judge_temperature() -> f32 {
    0.25
}

fn default_judge_max_tokens() -> u32 {
    1800
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_action_verbs() -> Vec<String> {
    to_strings(&[
        "verificar",
        "exibir",
        "remover",
        "adicionar",
        "listar",
        "implementar",
        "usar",
        "utilizar",
        "mostrar",
        "validar",
        "executar",
        "criar",
        "manter",
        "incluir",
    ])
}

fn default_stopwords() -> Vec<String> {
    to_strings(&[
        "deve", "como", "caso", "exemplo", "formato", "programa", "usuario", "acao", "utilizar",
        "uma", "para", "que", "com", "dos", "das", "ou", "da", "do", "em", "na", "no", "aos",
    ])
}

fn default_domain_terms() -> Vec<String> {
    to_strings(&[
        "fila",
        "lista",
        "array",
        "menu",
        "cliente",
        "adicionar",
        "remover",
        "exibir",
    ])
}
