use crate::domain::progress::ProgressRecord;
use crate::prompt::group_thousands;
use std::fmt;

pub const NO_PROGRESS_MESSAGE: &str = "No progress recorded yet.";

/// Result of a progress report request. `NoData` is informational, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressReport {
    NoData,
    Ready(String),
}

impl ProgressReport {
    pub fn from_record(record: &ProgressRecord) -> Self {
        match record.weekly_progress.last() {
            None => ProgressReport::NoData,
            Some(_) => ProgressReport::Ready(render(record)),
        }
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressReport::NoData => f.write_str(NO_PROGRESS_MESSAGE),
            ProgressReport::Ready(text) => f.write_str(text),
        }
    }
}

fn render(record: &ProgressRecord) -> String {
    let baseline = &record.baseline;
    let mut out = String::new();

    out.push_str("ROI Improvement Progress Report\n");
    out.push_str("===============================\n\n");
    out.push_str(&format!(
        "Goal: raise ROI from {} to {} between {} and {}\n",
        baseline.metrics.avg_roi, baseline.target.roi, baseline.start_date, baseline.target_date
    ));

    if let Some(latest) = record.weekly_progress.last() {
        out.push_str(&format!("\nCurrent (week {})\n", latest.week));
        out.push_str(&format!(
            "   - ROI={} ({:+.1}%)\n",
            latest.actual_roi, latest.roi_improvement
        ));
        out.push_str(&format!("   - Strategy: {}\n", latest.strategy));
    }

    out.push_str("\nWeekly results:\n");
    for p in &record.weekly_progress {
        out.push_str(&format!(
            "   Week {}: ROI={}, sales=¥{}\n",
            p.week,
            p.actual_roi,
            group_thousands(p.actual_sales)
        ));
    }

    if !record.milestones.is_empty() {
        out.push_str("\nMilestones:\n");
        for m in &record.milestones {
            out.push_str(&format!("   - {}: {} (ROI={})\n", m.date, m.message, m.roi));
        }
    }

    if !record.optimizations.is_empty() {
        out.push_str("\nOptimizations:\n");
        for opt in &record.optimizations {
            out.push_str(&format!(
                "   - {}: {} -> {} (effect: {})\n",
                opt.date, opt.problem, opt.solution, opt.effect
            ));
        }
    }

    out
}
