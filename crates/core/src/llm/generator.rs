use crate::config::Settings;
use crate::llm::deepseek::DeepSeekClient;
use crate::llm::error::{GenerationFailure, GenerationResult};
use crate::llm::{GenerateInput, Provider, StrategyClient};
use crate::prompt::build_refine_prompt;
use crate::prompt::schema::SYSTEM_PROMPT;
use std::sync::Arc;

/// Submits prompts to the strategy service.
///
/// One attempt per call, no retries. Failures come back as
/// [`GenerationFailure`](crate::llm::GenerationFailure) values and never as
/// panics; the `*_text` variants fold them into marker-prefixed text for
/// storage.
#[derive(Clone)]
pub struct StrategyGenerator {
    client: Arc<dyn StrategyClient>,
}

impl StrategyGenerator {
    pub fn new(client: Arc<dyn StrategyClient>) -> Self {
        Self { client }
    }

    /// DeepSeek-backed generator. If the client cannot be built, every call
    /// reports that as a failure so the run still ends with an artifact.
    pub fn from_settings(settings: &Settings) -> Self {
        match DeepSeekClient::from_settings(settings) {
            Ok(client) => Self::new(Arc::new(client)),
            Err(failure) => {
                tracing::warn!(error = %failure, "strategy client unavailable");
                Self::new(Arc::new(Unconfigured(failure)))
            }
        }
    }

    pub async fn generate(&self, prompt: &str) -> GenerationResult {
        let input = GenerateInput {
            system: SYSTEM_PROMPT.to_string(),
            prompt: prompt.to_string(),
        };

        let result = self.client.complete(input).await;
        match &result {
            Ok(text) => tracing::info!(
                provider = ?self.client.provider(),
                chars = text.chars().count(),
                "strategy generated"
            ),
            Err(failure) => tracing::warn!(
                provider = ?self.client.provider(),
                stage = failure.stage(),
                error = %failure,
                "strategy generation failed"
            ),
        }
        result
    }

    pub async fn generate_text(&self, prompt: &str) -> String {
        self.generate(prompt)
            .await
            .unwrap_or_else(|failure| failure.to_artifact_text())
    }

    /// One feedback round: a pure function of the prior result and the feedback.
    pub async fn refine(&self, prior_result: &str, feedback: &str) -> GenerationResult {
        self.generate(&build_refine_prompt(prior_result, feedback)).await
    }

    pub async fn refine_text(&self, prior_result: &str, feedback: &str) -> String {
        self.refine(prior_result, feedback)
            .await
            .unwrap_or_else(|failure| failure.to_artifact_text())
    }
}

/// Stands in for a client whose configuration failed.
struct Unconfigured(GenerationFailure);

#[async_trait::async_trait]
impl StrategyClient for Unconfigured {
    fn provider(&self) -> Provider {
        Provider::DeepSeek
    }

    async fn complete(&self, _input: GenerateInput) -> GenerationResult {
        Err(self.0.clone())
    }
}


#[cfg(test)]
mod tests {
    use super::test_clients::{Canned, Unreachable};
    use super::*;
    use crate::llm::error::is_failure_text;

    #[tokio::test]
    async fn failing_transport_yields_marked_text() {
        let generator = StrategyGenerator::new(Arc::new(Unreachable));

        let err = generator.generate("prompt").await.unwrap_err();
        assert_eq!(err, GenerationFailure::Transport("connection refused".to_string()));

        let text = generator.generate_text("prompt").await;
        assert!(is_failure_text(&text));
        assert!(text.contains("connection refused"));
    }

    #[tokio::test]
    async fn sends_system_instruction_and_prompt() {
        let client = Arc::new(Canned::new("{\"strategy_name\": \"A\"}"));
        let generator = StrategyGenerator::new(client.clone());

        let text = generator.generate_text("hello").await;
        assert_eq!(text, "{\"strategy_name\": \"A\"}");

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].system, SYSTEM_PROMPT);
        assert_eq!(seen[0].prompt, "hello");
    }

    #[tokio::test]
    async fn refine_embeds_prior_and_feedback() {
        let client = Arc::new(Canned::new("v2"));
        let generator = StrategyGenerator::new(client.clone());

        let out = generator.refine("v1 strategy text", "cut Harbin").await.unwrap();
        assert_eq!(out, "v2");

        let seen = client.seen.lock().unwrap();
        assert!(seen[0].prompt.contains("v1 strategy text"));
        assert!(seen[0].prompt.contains("cut Harbin"));
    }

    #[tokio::test]
    async fn missing_api_key_fails_every_call() {
        let settings = crate::config::tests::settings_without_key();
        let generator = StrategyGenerator::from_settings(&settings);

        let err = generator.generate("prompt").await.unwrap_err();
        assert_eq!(err.stage(), "config");
        let text = generator.refine_text("prior", "feedback").await;
        assert!(is_failure_text(&text));
        assert!(text.contains("DEEPSEEK_API_KEY"));
    }

    #[tokio::test]
    async fn refine_failure_is_text_too() {
        let generator = StrategyGenerator::new(Arc::new(Unreachable));
        let text = generator.refine_text("prior", "feedback").await;
        assert!(is_failure_text(&text));
    }
}
