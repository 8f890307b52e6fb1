//! Submission loading: one lower-cased source corpus per student
//!
//! Layout: every immediate sub-directory of the submissions root belongs to one
//! student and is named after them. Files below it are collected recursively
//! when their extension is in the configured list.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::CorpusConfig;
use crate::error::{GradeError, Result};

/// Source files and concatenated text of one student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Student identifier (directory name)
    pub student: String,
    /// Eligible files, sorted by path
    pub files: Vec<PathBuf>,
    /// Lower-cased contents of `files`, newline separated
    pub source: String,
}

impl Submission {
    pub fn has_source(&self) -> bool {
        !self.files.is_empty()
    }
}

/// Reads student directories according to a [`CorpusConfig`]
#[derive(Debug, Clone)]
pub struct SubmissionLoader {
    extensions: Vec<String>,
}

impl SubmissionLoader {
    pub fn new(config: &CorpusConfig) -> Self {
        Self {
            extensions: config
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Whether a file feeds the corpus
    pub fn is_eligible(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }

    /// Load every student directory under `root`, sorted by student id
    pub fn load_all(&self, root: &Path) -> Result<Vec<Submission>> {
        if !root.is_dir() {
            return Err(GradeError::SubmissionsNotFound {
                path: root.to_path_buf(),
            });
        }

        let entries = fs::read_dir(root)
            .map_err(|e| GradeError::io_operation("read submissions", root.display(), e))?;

        let mut student_dirs = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                student_dirs.push(path);
            } else {
                debug!(path = %path.display(), "skipping non-directory entry");
            }
        }
        student_dirs.sort();

        Ok(student_dirs
            .iter()
            .map(|dir| self.load_student(dir))
            .collect())
    }

    /// Collect one student's eligible files. Unreadable files are skipped.
    pub fn load_student(&self, dir: &Path) -> Submission {
        let student = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());

        let mut files = Vec::new();
        let mut source = String::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(student = %student, error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.is_eligible(entry.path()) {
                continue;
            }

            match fs::read(entry.path()) {
                Ok(bytes) => {
                    source.push_str(&String::from_utf8_lossy(&bytes).to_lowercase());
                    source.push('\n');
                    files.push(entry.path().to_path_buf());
                }
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "skipping unreadable file");
                }
            }
        }

        debug!(student = %student, files = files.len(), "loaded submission");
        Submission {
            student,
            files,
            source,
        }
    }
}

/// Student id to lower-cased source text
pub fn source_map(submissions: &[Submission]) -> BTreeMap<String, String> {
    submissions
        .iter()
        .map(|s| (s.student.clone(), s.source.clone()))
        .collect()
}
