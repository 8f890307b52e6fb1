//! CLI commands for gradecheck

pub mod checklist;
pub mod config;
pub mod criteria;
pub mod dispatch;
pub mod evaluate;
pub mod helpers;
pub mod judge;
