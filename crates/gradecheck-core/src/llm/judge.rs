//! Checklist generation and direct judgment through a [`ChatCompletion`]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::prompts;
use super::{ChatCompletion, ChatMessage, ChatRequest};
use crate::config::LlmConfig;
use crate::error::Result;
use crate::matcher::Verdict;

/// Longest raw answer kept in an [`JudgeOutcome::Unparsed`]
const RAW_PREVIEW_CHARS: usize = 200;

/// Parsed answer of the judge, or the reason it could not be parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JudgeOutcome {
    Unparsed { error: String, raw: String },
    Parsed(Map<String, Value>),
}

impl JudgeOutcome {
    /// Criteria whose value reads as OK or FALHA; anything else is skipped
    pub fn verdicts(&self) -> BTreeMap<String, Verdict> {
        let JudgeOutcome::Parsed(map) = self else {
            return BTreeMap::new();
        };

        map.iter()
            .filter_map(|(criterion, value)| {
                let verdict = match value.as_str()?.trim().to_uppercase().as_str() {
                    "OK" => Verdict::Ok,
                    "FALHA" => Verdict::Falha,
                    _ => return None,
                };
                Some((criterion.clone(), verdict))
            })
            .collect()
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, JudgeOutcome::Parsed(_))
    }
}

/// Checklist produced for an assignment and the judgment made with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub checklist: String,
    pub assessment: JudgeOutcome,
}

/// Ask the endpoint for a `[ ]` checklist covering `assignment`
pub fn generate_checklist<C: ChatCompletion + ?Sized>(
    client: &C,
    config: &LlmConfig,
    assignment: &str,
) -> Result<String> {
    let request = ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(prompts::checklist_system()),
            ChatMessage::user(prompts::checklist_user(assignment)),
        ],
        temperature: config.checklist_temperature,
        top_p: 1.0,
        max_tokens: config.checklist_max_tokens,
    };

    let checklist = client.complete(&request)?;
    debug!(lines = checklist.lines().count(), "checklist generated");
    Ok(checklist)
}

/// Ask the endpoint to judge `code` against `checklist`
pub fn judge_code<C: ChatCompletion + ?Sized>(
    client: &C,
    config: &LlmConfig,
    assignment: &str,
    checklist: &str,
    code: &str,
) -> Result<JudgeOutcome> {
    let request = ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(prompts::judge_system(&config.language)),
            ChatMessage::user(prompts::judge_user(assignment, checklist, code)),
        ],
        temperature: config.judge_temperature,
        top_p: 1.0,
        max_tokens: config.judge_max_tokens,
    };

    let raw = client.complete(&request)?;
    Ok(parse_judge_response(&raw))
}

/// Generate a checklist, then judge `code` with it
pub fn pipeline<C: ChatCompletion + ?Sized>(
    client: &C,
    config: &LlmConfig,
    assignment: &str,
    code: &str,
) -> Result<PipelineResult> {
    let checklist = generate_checklist(client, config, assignment)?;
    let assessment = judge_code(client, config, assignment, &checklist, code)?;
    Ok(PipelineResult {
        checklist,
        assessment,
    })
}

/// Read the judge's answer as a JSON object, tolerating markdown fences
pub fn parse_judge_response(raw: &str) -> JudgeOutcome {
    let direct = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => return JudgeOutcome::Parsed(map),
        Ok(other) => format!("expected a JSON object, got {}", kind(&other)),
        Err(e) => e.to_string(),
    };
    debug!(error = %direct, "judge answer is not plain JSON, stripping fences");

    let cleaned = raw.replace("```json", "").replace("```", "");
    let error = match serde_json::from_str::<Value>(cleaned.trim()) {
        Ok(Value::Object(map)) => return JudgeOutcome::Parsed(map),
        Ok(other) => format!("expected a JSON object, got {}", kind(&other)),
        Err(e) => e.to_string(),
    };

    warn!(error = %error, "could not parse judge answer");
    JudgeOutcome::Unparsed {
        error,
        raw: preview(raw),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn preview(raw: &str) -> String {
    if raw.chars().count() > RAW_PREVIEW_CHARS {
        let head: String = raw.chars().take(RAW_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        raw.to_string()
    }
}
