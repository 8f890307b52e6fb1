//! Criterion matcher: keyword presence plus a threshold rule
//!
//! A criterion is OK when `hits >= max(1, ceil(keywords * threshold))`.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::config::{EmptyKeywordPolicy, MatchConfig, MatchMode};
use crate::text::{normalize, words};

/// Outcome for one (student, criterion) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "FALHA")]
    Falha,
}

impl Verdict {
    pub fn is_ok(self) -> bool {
        self == Verdict::Ok
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Ok => write!(f, "OK"),
            Verdict::Falha => write!(f, "FALHA"),
        }
    }
}

/// Normalized source text of one student
#[derive(Debug, Default)]
pub struct StudentCorpus {
    text: String,
    words: OnceLock<HashSet<String>>,
}

impl StudentCorpus {
    /// Wrap text that is already normalized
    pub fn new(normalized: String) -> Self {
        Self {
            text: normalized,
            words: OnceLock::new(),
        }
    }

    /// Normalize raw source text
    pub fn from_raw(raw: &str) -> Self {
        Self::new(normalize(raw))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// No usable source text at all
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether `keyword` is present under the given lookup mode
    pub fn contains(&self, keyword: &str, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Substring => self.text.contains(keyword),
            MatchMode::Word => self
                .words
                .get_or_init(|| words(&self.text).map(str::to_string).collect())
                .contains(keyword),
        }
    }
}

/// Scoring detail for one criterion against one corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionOutcome {
    pub verdict: Verdict,
    /// Keywords found in the corpus, in keyword order
    pub matched: Vec<String>,
    /// Keywords absent from the corpus, in keyword order
    pub missing: Vec<String>,
    /// Hits needed for OK
    pub required: usize,
}

/// Minimum hit count for a keyword set of `keyword_count` tokens
pub fn required_hits(keyword_count: usize, threshold: f64) -> usize {
    // Epsilon keeps products like 5 * 0.4 from rounding up past the exact value.
    let scaled = (keyword_count as f64 * threshold - 1e-9).ceil().max(0.0) as usize;
    scaled.max(1)
}

/// Applies a [`MatchConfig`] to keyword sets and corpora
#[derive(Debug, Clone)]
pub struct Matcher {
    threshold: f64,
    mode: MatchMode,
    empty_keywords: EmptyKeywordPolicy,
}

impl Matcher {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            threshold: config.threshold,
            mode: config.mode,
            empty_keywords: config.empty_keywords,
        }
    }

    /// Score one keyword set against one corpus
    pub fn score(&self, keywords: &[String], corpus: &StudentCorpus) -> CriterionOutcome {
        if keywords.is_empty() {
            let verdict = match self.empty_keywords {
                EmptyKeywordPolicy::Pass if !corpus.is_empty() => Verdict::Ok,
                _ => Verdict::Falha,
            };
            return CriterionOutcome {
                verdict,
                matched: Vec::new(),
                missing: Vec::new(),
                required: 0,
            };
        }

        let (matched, missing): (Vec<String>, Vec<String>) = keywords
            .iter()
            .cloned()
            .partition(|keyword| corpus.contains(keyword, self.mode));

        let required = required_hits(keywords.len(), self.threshold);
        let verdict = if matched.len() >= required {
            Verdict::Ok
        } else {
            Verdict::Falha
        };

        CriterionOutcome {
            verdict,
            matched,
            missing,
            required,
        }
    }
}
