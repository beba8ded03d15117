use crate::config::Settings;
use crate::llm::error::{GenerationFailure, GenerationResult};
use crate::llm::{GenerateInput, Provider, StrategyClient};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
const DEFAULT_MODEL: &str = "deepseek-chat";
const DEFAULT_MAX_TOKENS: u32 = 2000;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Chat-completions client for the DeepSeek API (OpenAI-compatible wire format).
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout_secs: u64,
}

impl DeepSeekClient {
    /// Fails with [`GenerationFailure::Unconfigured`] when no API key is set.
    pub fn from_settings(settings: &Settings) -> Result<Self, GenerationFailure> {
        let api_key = settings.deepseek_api_key.clone().ok_or_else(|| {
            GenerationFailure::Unconfigured("DEEPSEEK_API_KEY is not set".to_string())
        })?;
        let base_url =
            std::env::var("DEEPSEEK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("DEEPSEEK_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let max_tokens = std::env::var("DEEPSEEK_MAX_TOKENS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);
        let temperature = std::env::var("DEEPSEEK_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse::<f32>().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);
        let timeout_secs = std::env::var("DEEPSEEK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                GenerationFailure::Unconfigured(format!("failed to build reqwest client: {e}"))
            })?;

        Ok(Self {
            http,
            api_key,
            base_url,
            model,
            max_tokens,
            temperature,
            timeout_secs,
        })
    }

    fn request(&self, input: GenerateInput) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: input.system,
                },
                Message {
                    role: "user",
                    content: input.prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    fn transport_failure(&self, err: reqwest::Error) -> GenerationFailure {
        if err.is_timeout() {
            GenerationFailure::Timeout(self.timeout_secs)
        } else {
            GenerationFailure::Transport(err.to_string())
        }
    }
}

#[async_trait::async_trait]
impl StrategyClient for DeepSeekClient {
    fn provider(&self) -> Provider {
        Provider::DeepSeek
    }

    async fn complete(&self, input: GenerateInput) -> GenerationResult {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let req = self.request(input);

        tracing::debug!(model = %self.model, max_tokens = self.max_tokens, "sending completion request");

        let res = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| self.transport_failure(e))?;

        let status = res.status();
        let text = res.text().await.map_err(|e| self.transport_failure(e))?;
        if !status.is_success() {
            return Err(GenerationFailure::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        completion_text(&text)
    }
}

/// Extracts the first choice's message content from a response body.
fn completion_text(body: &str) -> GenerationResult {
    let parsed = serde_json::from_str::<ChatCompletionResponse>(body)
        .map_err(|e| GenerationFailure::MalformedBody(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(GenerationFailure::EmptyCompletion)
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> DeepSeekClient {
        DeepSeekClient {
            http: reqwest::Client::new(),
            api_key: "sk-test".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[test]
    fn request_carries_system_and_user_roles() {
        let req = client().request(GenerateInput {
            system: "sys".to_string(),
            prompt: "user prompt".to_string(),
        });
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["model"], "deepseek-chat");
        assert_eq!(v["max_tokens"], 2000);
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["role"], "user");
        assert_eq!(v["messages"][1]["content"], "user prompt");
    }

    #[test]
    fn extracts_first_choice() {
        let body = json!({
            "id": "cmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"strategy_name\": \"A\"}"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ]
        })
        .to_string();
        assert_eq!(completion_text(&body).unwrap(), "{\"strategy_name\": \"A\"}");
    }

    #[test]
    fn empty_choices_is_a_failure() {
        let body = json!({"choices": []}).to_string();
        assert_eq!(
            completion_text(&body).unwrap_err(),
            GenerationFailure::EmptyCompletion
        );
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = completion_text("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, GenerationFailure::MalformedBody(_)));
    }
}
