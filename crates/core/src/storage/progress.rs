use crate::domain::progress::ProgressRecord;
use crate::storage::atomic::write_atomic;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// JSON file holding the whole progress record. Read and rewritten in full;
/// single writer assumed, no locking.
#[derive(Debug, Clone)]
pub struct ProgressFile {
    path: PathBuf,
}

impl ProgressFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when no record has been written yet.
    pub fn load(&self) -> anyhow::Result<Option<ProgressRecord>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", self.path.display()))
            }
        };
        let record = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(Some(record))
    }

    pub fn save(&self, record: &ProgressRecord) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(record).context("failed to encode progress record")?;
        write_atomic(&self.path, &json)
    }
}
