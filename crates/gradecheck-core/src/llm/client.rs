//! HTTP client for OpenAI-compatible chat-completions endpoints
//!
//! Synchronous (ureq). Transport failures, 429 and 5xx responses are retried
//! with exponential backoff; other 4xx responses fail immediately.

use std::time::Duration;

use tracing::{debug, warn};

use super::{ChatCompletion, ChatRequest};
use crate::config::LlmConfig;
use crate::error::{GradeError, Result};

/// Chat client bound to one endpoint, model and token
pub struct HttpChatClient {
    config: LlmConfig,
    token: String,
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpChatClient {
    /// Build a client, reading the token from `config.token_env`
    pub fn from_config(config: LlmConfig) -> Result<Self> {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| GradeError::MissingToken {
                env_var: config.token_env.clone(),
            })?;
        Ok(Self::with_token(config, token))
    }

    /// Build a client with an explicit token
    pub fn with_token(config: LlmConfig, token: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build();
        let user_agent = format!(
            "gradecheck/{} ({})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS
        );

        Self {
            config,
            token: token.into(),
            agent,
            user_agent,
        }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    /// Send one request without retrying
    pub fn send(&self, request: &ChatRequest) -> Result<String> {
        let payload = serde_json::to_string(request)?;

        let response = self
            .agent
            .post(&self.url())
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Content-Type", "application/json")
            .set("User-Agent", &self.user_agent)
            .send_string(&payload);

        match response {
            Ok(res) => {
                let body = res
                    .into_string()
                    .map_err(|e| GradeError::EndpointTransport(e.to_string()))?;
                extract_content(&body)
            }
            Err(ureq::Error::Status(status, res)) => Err(GradeError::EndpointStatus {
                status,
                body: res.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(e)) => Err(GradeError::EndpointTransport(e.to_string())),
        }
    }
}

impl ChatCompletion for HttpChatClient {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let backoff = Duration::from_millis(100 * 2_u64.pow(attempt - 1));
                std::thread::sleep(backoff);
            }

            match self.send(request) {
                Ok(content) => {
                    debug!(attempt, model = %request.model, "chat completion received");
                    return Ok(content);
                }
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    warn!(attempt, error = %e, "chat completion failed, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Assistant text of the first choice; a null content is an empty answer
fn extract_content(body: &str) -> Result<String> {
    let json: serde_json::Value = serde_json::from_str(body)?;
    let message = json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|c| c.get("message"))
        .ok_or_else(|| GradeError::FailedOperation {
            operation: "read chat completion".to_string(),
            reason: "response has no choices[0].message".to_string(),
        })?;

    Ok(message
        .get("content")
        .and_then(|c| c.as_str())
        .unwrap_or_default()
        .to_string())
}
