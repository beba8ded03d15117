use crate::domain::artifact::{StrategyArtifact, ARTIFACT_TIMESTAMP_FORMAT};
use crate::storage::atomic::write_atomic;
use anyhow::Context;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "strategy_";
pub const NO_FEEDBACK: &str = "None";

/// Directory of generation results, one `strategy_<timestamp>.{json,md}` pair each.
///
/// Timestamps have second resolution; a second persist within the same
/// second overwrites the first pair.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persists with the current local time. Returns (record path, report path).
    pub fn persist(
        &self,
        analysis: &str,
        strategy_name: &str,
        feedback: Option<&str>,
    ) -> anyhow::Result<(PathBuf, PathBuf)> {
        self.persist_at(
            analysis,
            strategy_name,
            feedback,
            chrono::Local::now().naive_local(),
        )
    }

    pub fn persist_at(
        &self,
        analysis: &str,
        strategy_name: &str,
        feedback: Option<&str>,
        now: NaiveDateTime,
    ) -> anyhow::Result<(PathBuf, PathBuf)> {
        let artifact = StrategyArtifact {
            timestamp: now.format(ARTIFACT_TIMESTAMP_FORMAT).to_string(),
            strategy_name: strategy_name.to_string(),
            analysis: analysis.to_string(),
            feedback: feedback.map(str::to_string),
        };

        let json_path = self.record_path(&artifact.timestamp);
        let md_path = self.report_path(&artifact.timestamp);

        let json = serde_json::to_vec_pretty(&artifact).context("failed to encode artifact")?;
        write_atomic(&json_path, &json)?;
        write_atomic(&md_path, render_report(&artifact, now).as_bytes())?;

        tracing::info!(
            timestamp = %artifact.timestamp,
            strategy_name = %artifact.strategy_name,
            has_feedback = artifact.feedback.is_some(),
            "persisted strategy artifact"
        );
        Ok((json_path, md_path))
    }

    pub fn record_path(&self, timestamp: &str) -> PathBuf {
        self.dir.join(format!("{FILE_PREFIX}{timestamp}.json"))
    }

    pub fn report_path(&self, timestamp: &str) -> PathBuf {
        self.dir.join(format!("{FILE_PREFIX}{timestamp}.md"))
    }

    /// Loads a record by its `YYYYMMDD_HHMMSS` id. Anything else is rejected
    /// before the file system is touched.
    pub fn load(&self, timestamp: &str) -> anyhow::Result<StrategyArtifact> {
        validate_timestamp(timestamp)?;
        let path = self.record_path(timestamp);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Structured-record file names, newest first. A missing directory lists as empty.
    pub fn list(&self) -> anyhow::Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to list {}", self.dir.display()))
            }
        };

        let mut out = Vec::new();
        for entry in entries {
            let name = entry
                .with_context(|| format!("failed to list {}", self.dir.display()))?
                .file_name()
                .to_string_lossy()
                .into_owned();
            if name.starts_with(FILE_PREFIX) && name.ends_with(".json") {
                out.push(name);
            }
        }
        out.sort_unstable_by(|a, b| b.cmp(a));
        Ok(out)
    }
}

/// Timestamp part of a record file name: `strategy_20260301_101500.json` -> `20260301_101500`.
pub fn timestamp_of(file_name: &str) -> Option<&str> {
    file_name.strip_prefix(FILE_PREFIX)?.strip_suffix(".json")
}

fn validate_timestamp(timestamp: &str) -> anyhow::Result<()> {
    let parsed = NaiveDateTime::parse_from_str(timestamp, ARTIFACT_TIMESTAMP_FORMAT)
        .with_context(|| format!("invalid artifact timestamp {timestamp:?}"))?;
    anyhow::ensure!(
        parsed.format(ARTIFACT_TIMESTAMP_FORMAT).to_string() == timestamp,
        "invalid artifact timestamp {timestamp:?}"
    );
    Ok(())
}

fn render_report(artifact: &StrategyArtifact, generated_at: NaiveDateTime) -> String {
    format!(
        "# Paid-Traffic Strategy Report\n\n\
**Generated at**: {}\n\n\
## Strategy name\n{}\n\n\
## Analysis\n{}\n\n\
## Feedback\n{}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        artifact.strategy_name,
        artifact.analysis,
        artifact.feedback.as_deref().unwrap_or(NO_FEEDBACK),
    )
}
