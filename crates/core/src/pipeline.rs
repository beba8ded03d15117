use crate::domain::shop::ShopProfile;
use crate::ingest::aggregate::load_summary;
use crate::ingest::source::DataSource;
use crate::llm::error::is_failure_text;
use crate::llm::StrategyGenerator;
use crate::prompt::build_strategy_prompt;
use crate::storage::ArtifactStore;
use std::path::PathBuf;

pub const DEFAULT_STRATEGY_NAME: &str = "DeepSeek smart strategy";

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub analysis: String,
    pub failed: bool,
    pub record_path: PathBuf,
    pub report_path: PathBuf,
}

impl RunOutcome {
    fn new(analysis: String, (record_path, report_path): (PathBuf, PathBuf)) -> Self {
        Self {
            failed: is_failure_text(&analysis),
            analysis,
            record_path,
            report_path,
        }
    }
}

/// First pass: aggregate, render, generate, persist.
///
/// Fails only if a dataset cannot be loaded (before any network call) or the
/// artifact cannot be written. A failed generation still persists an artifact.
pub async fn generate_strategy(
    source: &dyn DataSource,
    shop: &ShopProfile,
    generator: &StrategyGenerator,
    store: &ArtifactStore,
    requirement: Option<&str>,
    strategy_name: &str,
) -> anyhow::Result<RunOutcome> {
    let summary = load_summary(source)?;
    let prompt = build_strategy_prompt(&summary, shop, requirement);
    let analysis = generator.generate_text(&prompt).await;
    let paths = store.persist(&analysis, strategy_name, None)?;
    Ok(RunOutcome::new(analysis, paths))
}

/// Feedback round: refine a stored artifact and persist the result as a new one.
pub async fn refine_artifact(
    generator: &StrategyGenerator,
    store: &ArtifactStore,
    timestamp: &str,
    feedback: &str,
    strategy_name: Option<&str>,
) -> anyhow::Result<RunOutcome> {
    let prior = store.load(timestamp)?;
    let analysis = generator.refine_text(&prior.analysis, feedback).await;
    let name = strategy_name.unwrap_or(&prior.strategy_name);
    let paths = store.persist(&analysis, name, Some(feedback))?;

    tracing::info!(from = %timestamp, failed = is_failure_text(&analysis), "feedback round complete");
    Ok(RunOutcome::new(analysis, paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::error::DataUnavailable;
    use crate::ingest::types::{BucketTemperature, CityPerformance};
    use crate::llm::generator::test_clients::{Canned, Unreachable};
    use std::sync::Arc;

    struct Fixed;

    impl DataSource for Fixed {
        fn load_performance(&self) -> Result<Vec<CityPerformance>, DataUnavailable> {
            Ok(vec![CityPerformance {
                region: "浙江".to_string(),
                subregion: "杭州".to_string(),
                impressions: 1_000.0,
                spend: 100.0,
                revenue: 900.0,
                roi: 9.0,
            }])
        }

        fn load_environment(&self) -> Result<Vec<BucketTemperature>, DataUnavailable> {
            Ok(vec![])
        }
    }

    struct Broken;

    impl DataSource for Broken {
        fn load_performance(&self) -> Result<Vec<CityPerformance>, DataUnavailable> {
            Err(DataUnavailable::new("city_performance", "cannot read"))
        }

        fn load_environment(&self) -> Result<Vec<BucketTemperature>, DataUnavailable> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn failed_generation_still_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let generator = StrategyGenerator::new(Arc::new(Unreachable));

        let outcome = generate_strategy(
            &Fixed,
            &ShopProfile::default(),
            &generator,
            &store,
            None,
            DEFAULT_STRATEGY_NAME,
        )
        .await
        .unwrap();

        assert!(outcome.failed);
        assert!(outcome.record_path.exists());
        assert!(outcome.report_path.exists());
    }

    #[tokio::test]
    async fn missing_api_key_still_persists_marked_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let settings = crate::config::tests::settings_without_key();
        let generator = StrategyGenerator::from_settings(&settings);

        let outcome = generate_strategy(
            &Fixed,
            &ShopProfile::default(),
            &generator,
            &store,
            None,
            "s",
        )
        .await
        .unwrap();

        assert!(outcome.failed);
        assert!(outcome.analysis.contains("DEEPSEEK_API_KEY"));
        let stored = store.list().unwrap();
        assert_eq!(stored.len(), 1);
        let artifact = store
            .load(crate::storage::artifacts::timestamp_of(&stored[0]).unwrap())
            .unwrap();
        assert!(is_failure_text(&artifact.analysis));
    }

    #[tokio::test]
    async fn unavailable_data_aborts_before_generation() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("out"));
        let client = Arc::new(Canned::new("never"));
        let generator = StrategyGenerator::new(client.clone());

        let err = generate_strategy(&Broken, &ShopProfile::default(), &generator, &store, None, "s")
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<DataUnavailable>().is_some());
        assert!(client.seen.lock().unwrap().is_empty());
        assert!(store.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn refine_persists_new_artifact_with_feedback() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let prior_at = chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        store.persist_at("v1 text", "East push", None, prior_at).unwrap();

        let client = Arc::new(Canned::new("v2 text"));
        let generator = StrategyGenerator::new(client.clone());
        let outcome = refine_artifact(&generator, &store, "20260301_080000", "drop Harbin", None)
            .await
            .unwrap();

        assert!(!outcome.failed);
        assert_eq!(outcome.analysis, "v2 text");
        assert!(client.seen.lock().unwrap()[0].prompt.contains("v1 text"));

        // The prior artifact is untouched.
        let prior = store.load("20260301_080000").unwrap();
        assert_eq!(prior.analysis, "v1 text");
        assert!(prior.feedback.is_none());

        let names = store.list().unwrap();
        assert_eq!(names.len(), 2);
        let refined_name = names
            .iter()
            .find(|n| n.as_str() != "strategy_20260301_080000.json")
            .unwrap();
        let refined = store
            .load(crate::storage::artifacts::timestamp_of(refined_name).unwrap())
            .unwrap();
        assert_eq!(refined.strategy_name, "East push");
        assert_eq!(refined.feedback.as_deref(), Some("drop Harbin"));
    }
}
