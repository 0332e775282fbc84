//! Chat-completion client -- the single point of entry for all LLM calls.
//!
//! Wraps the Anthropic Messages API with bounded retries and a JSON-object
//! response helper. No other module may call the API directly.

use reqwest::Client;
use serde::{Deserialize, Serialize};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The shared LLM client. Cheap to clone.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Build a client from the `LLM_API_KEY` environment variable.
    ///
    /// # Panics
    ///
    /// Panics if `LLM_API_KEY` is not set.
    pub fn from_env() -> Self {
        let api_key = std::env::var("LLM_API_KEY").expect("LLM_API_KEY must be set");
        Self::new(api_key)
    }

    /// Make one completion call, retrying on rate limits and 5xx responses
    /// with exponential backoff (1s, 2s, 4s).
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "LLM call failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", API_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(err) => {
                    last_error = Some(LlmError::Http(err));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: "retryable upstream error".to_string(),
                });
                continue;
            }

            if !status.is_success() {
                let message = response
                    .json::<ApiErrorEnvelope>()
                    .await
                    .map(|e| e.error.message)
                    .unwrap_or_else(|_| "unknown API error".to_string());
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: ChatResponse = response.json().await?;
            let text = parsed
                .content
                .iter()
                .find(|block| block.block_type == "text")
                .and_then(|block| block.text.as_deref())
                .ok_or(LlmError::EmptyContent)?;
            return Ok(text.to_string());
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Complete and parse the response as a single JSON object. Markdown
    /// code fences around the object are tolerated.
    pub async fn complete_json(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<serde_json::Value, LlmError> {
        let text = self.complete(system, prompt).await?;
        let trimmed = strip_code_fences(&text);
        Ok(serde_json::from_str(trimmed)?)
    }
}

/// Remove a surrounding markdown code fence if the model added one.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open.strip_suffix("```").unwrap_or(without_open).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
    }

    #[test]
    fn leaves_bare_json_alone() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn error_display() {
        let err = LlmError::Api {
            status: 400,
            message: "bad request".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 400): bad request");
    }
}
