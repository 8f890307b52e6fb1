//! Evaluation orchestrator: every student against every criterion
//!
//! Criteria and their keyword sets are derived once per run and shared by all
//! students. Students are scored independently and in parallel; the result is
//! ordered by student id.

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::criteria::CriterionFilter;
use crate::keywords::KeywordExtractor;
use crate::matcher::{Matcher, StudentCorpus, Verdict};
use crate::trace_time;

/// A checkable requirement and its evidence signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub text: String,
    pub keywords: Vec<String>,
}

/// Whether a student had anything to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Source text was found and scored
    Evaluated,
    /// No eligible source file was found; every criterion is FALHA
    NoSource,
}

/// Verdicts of one student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentResult {
    pub status: SubmissionStatus,
    /// Criterion text to verdict, one entry per criterion
    pub criteria: BTreeMap<String, Verdict>,
    /// Missing keywords of each failing criterion
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub missing: BTreeMap<String, Vec<String>>,
}

impl StudentResult {
    pub fn passed(&self) -> usize {
        self.criteria.values().filter(|v| v.is_ok()).count()
    }

    pub fn total(&self) -> usize {
        self.criteria.len()
    }
}

/// Complete output of one evaluation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub criteria: Vec<Criterion>,
    pub students: BTreeMap<String, StudentResult>,
}

/// Filter, extractor and matcher configured for one run
#[derive(Debug, Clone)]
pub struct Evaluator {
    filter: CriterionFilter,
    extractor: KeywordExtractor,
    matcher: Matcher,
}

impl Evaluator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            filter: CriterionFilter::new(&config.filter),
            extractor: KeywordExtractor::new(&config.keywords),
            matcher: Matcher::new(&config.matching),
        }
    }

    /// Valid criteria of a checklist with their keyword sets
    pub fn criteria(&self, checklist: &str) -> Vec<Criterion> {
        self.filter
            .parse(checklist)
            .into_iter()
            .map(|text| {
                let keywords = self.extractor.extract(&text);
                Criterion { text, keywords }
            })
            .collect()
    }

    /// Score one student's lower-cased source against every criterion
    ///
    /// `source` is the joined text of the student's eligible files, so it is
    /// empty exactly when no file was found. A file that is blank, or that
    /// normalizes to nothing, still counts as submitted source.
    pub fn evaluate_student(&self, criteria: &[Criterion], source: &str) -> StudentResult {
        let status = if source.is_empty() {
            SubmissionStatus::NoSource
        } else {
            SubmissionStatus::Evaluated
        };
        let corpus = StudentCorpus::from_raw(source);

        let mut verdicts = BTreeMap::new();
        let mut missing = BTreeMap::new();

        for criterion in criteria {
            let outcome = self.matcher.score(&criterion.keywords, &corpus);
            if !outcome.verdict.is_ok() {
                missing.insert(criterion.text.clone(), outcome.missing);
            }
            verdicts.insert(criterion.text.clone(), outcome.verdict);
        }

        StudentResult {
            status,
            criteria: verdicts,
            missing,
        }
    }

    /// Score every student against precomputed criteria
    pub fn evaluate_criteria(
        &self,
        criteria: Vec<Criterion>,
        sources: &BTreeMap<String, String>,
    ) -> EvaluationReport {
        let start = Instant::now();

        let students: BTreeMap<String, StudentResult> = sources
            .par_iter()
            .map(|(student, source)| (student.clone(), self.evaluate_student(&criteria, source)))
            .collect();

        for (student, result) in &students {
            if result.status == SubmissionStatus::NoSource {
                debug!(student = %student, "no source found");
            }
            for (criterion, keywords) in &result.missing {
                debug!(student = %student, criterion = %criterion, missing = ?keywords, "criterion failed");
            }
        }

        info!(
            criteria = criteria.len(),
            students = students.len(),
            "evaluation complete"
        );
        trace_time!(start, "evaluate", students = students.len());

        EvaluationReport { criteria, students }
    }

    /// Parse a checklist and score every student against it
    pub fn evaluate(
        &self,
        checklist: &str,
        sources: &BTreeMap<String, String>,
    ) -> EvaluationReport {
        let criteria = self.criteria(checklist);
        debug!(count = criteria.len(), "criteria extracted");
        self.evaluate_criteria(criteria, sources)
    }
}
