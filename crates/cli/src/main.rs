use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod progress;
mod strategy;

#[derive(Debug, Parser)]
#[command(name = "budgetloop", about = "Ad budget strategy generation and progress tracking")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Aggregate the datasets, request a strategy and store it.
    Generate {
        /// Free-text requirement passed to the strategist verbatim.
        requirement: Option<String>,

        #[arg(long)]
        name: Option<String>,
    },

    /// Run a feedback round on a stored strategy (by timestamp, e.g. 20260301_101500).
    Refine {
        timestamp: String,
        feedback: String,

        #[arg(long)]
        name: Option<String>,
    },

    /// List stored strategies, newest first.
    ListArtifacts,

    /// Create the progress record if it does not exist yet.
    InitTracker,

    /// Append one week of observed results.
    RecordWeek {
        week: u32,
        strategy: String,
        roi: f64,
        sales: f64,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Append an optimization note.
    RecordOptimization {
        problem: String,
        solution: String,
        effect: String,
    },

    /// Print the progress report.
    Report,

    /// Replace the selected strategy.
    SelectStrategy {
        name: String,
        /// Daily budget in yuan.
        budget: u64,

        #[arg(long = "city")]
        cities: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = budgetloop_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let result = match args.command {
        Command::Generate { requirement, name } => {
            strategy::generate(&settings, requirement.as_deref(), name.as_deref()).await
        }
        Command::Refine {
            timestamp,
            feedback,
            name,
        } => strategy::refine(&settings, &timestamp, &feedback, name.as_deref()).await,
        Command::ListArtifacts => strategy::list(&settings),
        Command::InitTracker => progress::init(&settings),
        Command::RecordWeek {
            week,
            strategy,
            roi,
            sales,
            notes,
        } => progress::record_week(&settings, week, strategy, roi, sales, notes),
        Command::RecordOptimization {
            problem,
            solution,
            effect,
        } => progress::record_optimization(&settings, &problem, &solution, &effect),
        Command::Report => progress::report(&settings),
        Command::SelectStrategy {
            name,
            budget,
            cities,
        } => progress::select_strategy(&settings, &name, budget, cities),
    };

    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %err, "command failed");
    }
    result
}

fn init_sentry(settings: &budgetloop_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
