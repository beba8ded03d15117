use budgetloop_core::config::Settings;
use budgetloop_core::domain::shop::ShopProfile;
use budgetloop_core::ingest::source::CsvDataSource;
use budgetloop_core::llm::StrategyGenerator;
use budgetloop_core::pipeline::{self, RunOutcome, DEFAULT_STRATEGY_NAME};
use budgetloop_core::storage::ArtifactStore;
pub async fn generate(
    settings: &Settings,
    requirement: Option<&str>,
    name: Option<&str>,
) -> anyhow::Result<()> {
    let source = CsvDataSource::from_settings(settings)?;
    let generator = StrategyGenerator::from_settings(settings);
    let store = ArtifactStore::new(&settings.artifact_dir);

    let outcome = pipeline::generate_strategy(
        &source,
        &ShopProfile::default(),
        &generator,
        &store,
        requirement,
        name.unwrap_or(DEFAULT_STRATEGY_NAME),
    )
    .await?;

    print_outcome(&outcome);
    Ok(())
}

pub async fn refine(
    settings: &Settings,
    timestamp: &str,
    feedback: &str,
    name: Option<&str>,
) -> anyhow::Result<()> {
    let generator = StrategyGenerator::from_settings(settings);
    let store = ArtifactStore::new(&settings.artifact_dir);

    let outcome = pipeline::refine_artifact(&generator, &store, timestamp, feedback, name).await?;
    print_outcome(&outcome);
    Ok(())
}

pub fn list(settings: &Settings) -> anyhow::Result<()> {
    let store = ArtifactStore::new(&settings.artifact_dir);
    let names = store.list()?;
    if names.is_empty() {
        println!("No saved strategies in {}", store.dir().display());
        return Ok(());
    }

    println!("Saved strategies:");
    for name in names {
        println!("  - {name}");
    }
    Ok(())
}

fn print_outcome(outcome: &RunOutcome) {
    if outcome.failed {
        sentry_anyhow::capture_anyhow(&anyhow::anyhow!("{}", outcome.analysis));
        println!("Generation failed; the failure was stored as the result.");
    } else {
        println!("Strategy generated.");
    }
    println!("   JSON: {}", outcome.record_path.display());
    println!("   MD:   {}", outcome.report_path.display());
}
