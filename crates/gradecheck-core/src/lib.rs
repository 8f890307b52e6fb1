//! Gradecheck Core Library
//!
//! Criterion extraction and keyword matching engine for grading beginner
//! programming assignments, plus the collaborators that feed it: source
//! corpus loading, a chat-completion client and report persistence.

pub mod config;
pub mod corpus;
pub mod criteria;
pub mod error;
pub mod evaluate;
pub mod format;
pub mod keywords;
pub mod llm;
pub mod logging;
pub mod matcher;
pub mod report;
pub mod text;
