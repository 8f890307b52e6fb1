//! Chat-completion collaborator
//!
//! Two capabilities sit behind the [`ChatCompletion`] trait: turning an
//! assignment text into a checklist, and judging a student's code against a
//! checklist directly. Both are opaque, non-deterministic and may fail.

mod client;
mod judge;
mod prompts;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use client::HttpChatClient;
pub use judge::{
    generate_checklist, judge_code, parse_judge_response, pipeline, JudgeOutcome, PipelineResult,
};

/// One message of a chat conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of a chat-completions request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

/// Anything that can answer a chat request with the assistant's text
pub trait ChatCompletion {
    fn complete(&self, request: &ChatRequest) -> Result<String>;
}
