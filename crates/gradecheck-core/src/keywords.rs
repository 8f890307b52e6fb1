//! Keyword extraction: the evidence signature of a criterion
//!
//! Illustrative spans (quoted strings, inline code, parenthesized alternatives
//! and trailing `exemplo:` or `ex.:` clauses) are removed before tokenizing,
//! because they name example values rather than required evidence.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::config::KeywordConfig;
use crate::text::{fold, stem, strip_punctuation};

/// Patterns for spans that hold illustrative values rather than evidence
struct SpanPatterns {
    quoted: Regex,
    backticked: Regex,
    parenthesized: Regex,
    example_clause: Regex,
}

impl SpanPatterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            quoted: Regex::new(r#""[^"]+""#)?,
            backticked: Regex::new(r"`[^`]+`")?,
            parenthesized: Regex::new(r"\([^)]*\)")?,
            example_clause: Regex::new(r"\b(?:exemplo|ex)\.?:.*")?,
        })
    }
}

static SPAN_PATTERNS: OnceLock<Option<SpanPatterns>> = OnceLock::new();

fn span_patterns() -> Option<&'static SpanPatterns> {
    SPAN_PATTERNS
        .get_or_init(|| match SpanPatterns::compile() {
            Ok(patterns) => Some(patterns),
            Err(e) => {
                warn!(error = %e, "Failed to compile span regexes");
                None
            }
        })
        .as_ref()
}

/// Derives keyword sets from criterion text according to a [`KeywordConfig`]
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    min_len: usize,
    stopwords: HashSet<String>,
    domain_terms: Vec<String>,
    strip_examples: bool,
    stemming: bool,
}

impl KeywordExtractor {
    pub fn new(config: &KeywordConfig) -> Self {
        Self {
            min_len: config.min_keyword_len,
            stopwords: config.stopwords.iter().map(|w| fold(w)).collect(),
            domain_terms: config.domain_terms.iter().map(|w| fold(w)).collect(),
            strip_examples: config.strip_example_clauses,
            stemming: config.stemming,
        }
    }

    /// Remove illustrative spans and punctuation, leaving comparable words
    pub fn clean(&self, criterion: &str) -> String {
        let folded = fold(criterion);
        let Some(patterns) = span_patterns() else {
            return strip_punctuation(&folded);
        };

        let without_quotes = patterns.quoted.replace_all(&folded, " ");
        let without_code = patterns.backticked.replace_all(&without_quotes, " ");
        let mut cleaned = patterns
            .parenthesized
            .replace_all(&without_code, " ")
            .into_owned();
        if self.strip_examples {
            cleaned = patterns
                .example_clause
                .replace_all(&cleaned, "")
                .into_owned();
        }
        strip_punctuation(&cleaned)
    }

    fn is_significant(&self, word: &str) -> bool {
        word.len() > self.min_len
            && word.chars().all(|c| c.is_ascii_alphabetic())
            && !self.stopwords.contains(word)
    }

    /// Ordered, duplicate-free keywords of one criterion. May be empty.
    pub fn extract(&self, criterion: &str) -> Vec<String> {
        let cleaned = self.clean(criterion);
        let words: Vec<&str> = cleaned.split_whitespace().collect();

        let mut keywords: Vec<String> = Vec::new();
        for word in words.iter().copied().filter(|w| self.is_significant(w)) {
            push_unique(&mut keywords, word.to_string());
        }

        for term in &self.domain_terms {
            if words.contains(&term.as_str()) {
                push_unique(&mut keywords, term.clone());
            }
        }

        if !self.stemming {
            return keywords;
        }

        let mut stemmed = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            let root = stem(&keyword);
            let root = if root.len() > self.min_len && root.chars().all(|c| c.is_ascii_alphabetic())
            {
                root
            } else {
                keyword
            };
            push_unique(&mut stemmed, root);
        }
        stemmed
    }
}

fn push_unique(keywords: &mut Vec<String>, word: String) {
    if !keywords.contains(&word) {
        keywords.push(word);
    }
}
