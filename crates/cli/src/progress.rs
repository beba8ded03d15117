use budgetloop_core::config::Settings;
use budgetloop_core::domain::progress::Baseline;
use budgetloop_core::prompt::group_thousands;
use budgetloop_core::tracker::{ProgressTracker, WeekEntry};
use chrono::NaiveDate;

fn tracker(settings: &Settings) -> ProgressTracker {
    ProgressTracker::new(&settings.progress_file, Baseline::spring_campaign())
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn init(settings: &Settings) -> anyhow::Result<()> {
    tracker(settings).init()?;
    println!("Tracker ready: {}", settings.progress_file.display());
    Ok(())
}

pub fn record_week(
    settings: &Settings,
    week: u32,
    strategy: String,
    roi: f64,
    sales: f64,
    notes: String,
) -> anyhow::Result<()> {
    let outcome = tracker(settings).record_week(
        WeekEntry {
            week,
            strategy,
            actual_roi: roi,
            actual_sales: sales,
            notes,
        },
        today(),
    )?;

    println!(
        "Week {} recorded: ROI={} ({:+.1}%)",
        outcome.progress.week, outcome.progress.actual_roi, outcome.progress.roi_improvement
    );
    for m in &outcome.achieved {
        println!("Milestone reached: {}", m.message);
    }
    Ok(())
}

pub fn record_optimization(
    settings: &Settings,
    problem: &str,
    solution: &str,
    effect: &str,
) -> anyhow::Result<()> {
    let opt = tracker(settings).record_optimization(problem, solution, effect, today())?;
    println!("Optimization recorded on {}", opt.date);
    Ok(())
}

pub fn report(settings: &Settings) -> anyhow::Result<()> {
    println!("{}", tracker(settings).report()?);
    Ok(())
}

pub fn select_strategy(
    settings: &Settings,
    name: &str,
    budget: u64,
    cities: Vec<String>,
) -> anyhow::Result<()> {
    let selected = tracker(settings).select_strategy(name, cities, budget, today())?;

    println!("Selected strategy: {}", selected.name);
    if !selected.cities.is_empty() {
        let shown: Vec<&str> = selected.cities.iter().take(5).map(String::as_str).collect();
        let more = if selected.cities.len() > 5 { ", ..." } else { "" };
        println!("   Cities: {}{more}", shown.join(", "));
    }
    println!("   Budget: ¥{}/day", group_thousands(selected.budget as f64));
    Ok(())
}
