use serde::{Deserialize, Serialize};

/// Timestamp layout shared by both files of one artifact.
pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// One persisted generation result.
///
/// `analysis` is the raw generator output, failure text included. It is
/// never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyArtifact {
    pub timestamp: String,
    pub strategy_name: String,
    pub analysis: String,
    pub feedback: Option<String>,
}
