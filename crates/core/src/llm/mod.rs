pub mod deepseek;
pub mod error;
pub mod generator;

pub use error::{GenerationFailure, GenerationResult, FAILURE_MARKER};
pub use generator::StrategyGenerator;

#[derive(Debug, Clone)]
pub struct GenerateInput {
    pub system: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    DeepSeek,
}

/// One request/response exchange with the strategy-generation service.
#[async_trait::async_trait]
pub trait StrategyClient: Send + Sync {
    fn provider(&self) -> Provider;

    async fn complete(&self, input: GenerateInput) -> GenerationResult;
}
