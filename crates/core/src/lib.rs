pub mod domain;
pub mod ingest;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod storage;
pub mod tracker;

pub mod config {
    use crate::ingest::table::TableEncoding;
    use anyhow::Context;
    use std::path::PathBuf;

    const DEFAULT_ARTIFACT_DIR: &str = "./strategy_artifacts";
    const DEFAULT_PROGRESS_FILE: &str = "./progress_tracker.json";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub deepseek_api_key: Option<String>,
        pub performance_csv: Option<PathBuf>,
        pub performance_encoding: TableEncoding,
        pub weather_csv: Option<PathBuf>,
        pub weather_encoding: TableEncoding,
        pub artifact_dir: PathBuf,
        pub progress_file: PathBuf,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                deepseek_api_key: std::env::var("DEEPSEEK_API_KEY")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                performance_csv: std::env::var("PERFORMANCE_CSV").ok().map(PathBuf::from),
                performance_encoding: encoding_from_env(
                    "PERFORMANCE_CSV_ENCODING",
                    TableEncoding::Gbk,
                )?,
                weather_csv: std::env::var("WEATHER_CSV").ok().map(PathBuf::from),
                weather_encoding: encoding_from_env("WEATHER_CSV_ENCODING", TableEncoding::Utf8)?,
                artifact_dir: std::env::var("ARTIFACT_DIR")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_ARTIFACT_DIR.to_string())
                    .into(),
                progress_file: std::env::var("PROGRESS_FILE")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_PROGRESS_FILE.to_string())
                    .into(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_performance_csv(&self) -> anyhow::Result<&std::path::Path> {
            self.performance_csv
                .as_deref()
                .context("PERFORMANCE_CSV is required")
        }

        pub fn require_weather_csv(&self) -> anyhow::Result<&std::path::Path> {
            self.weather_csv
                .as_deref()
                .context("WEATHER_CSV is required")
        }
    }

    fn encoding_from_env(key: &str, default: TableEncoding) -> anyhow::Result<TableEncoding> {
        match std::env::var(key) {
            Ok(s) if !s.trim().is_empty() => s
                .parse::<TableEncoding>()
                .with_context(|| format!("invalid {key}")),
            _ => Ok(default),
        }
    }

}
