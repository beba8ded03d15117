use thiserror::Error;

/// A source dataset could not be loaded. Fatal for a generation run.
#[derive(Debug, Error)]
#[error("dataset {dataset} unavailable: {reason}")]
pub struct DataUnavailable {
    pub dataset: String,
    pub reason: String,
}

impl DataUnavailable {
    pub fn new(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            reason: reason.into(),
        }
    }
}
