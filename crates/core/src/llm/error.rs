use thiserror::Error;

/// Prefix of the stored text of a failed generation.
///
/// A failed round still produces an artifact; its `analysis` is this marker
/// followed by the failure description.
pub const FAILURE_MARKER: &str = "[generation failed] ";

pub type GenerationResult = Result<String, GenerationFailure>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationFailure {
    #[error("client not configured: {0}")]
    Unconfigured(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("response contained no completion")]
    EmptyCompletion,
}

impl GenerationFailure {
    pub fn stage(&self) -> &'static str {
        match self {
            GenerationFailure::Unconfigured(_) => "config",
            GenerationFailure::Transport(_) | GenerationFailure::Timeout(_) => "transport",
            GenerationFailure::Status { .. } => "http",
            GenerationFailure::MalformedBody(_) | GenerationFailure::EmptyCompletion => "decode",
        }
    }

    /// The backward-compatible stored form of this failure.
    pub fn to_artifact_text(&self) -> String {
        format!("{FAILURE_MARKER}{self}")
    }
}

pub fn is_failure_text(text: &str) -> bool {
    text.starts_with(FAILURE_MARKER)
}
