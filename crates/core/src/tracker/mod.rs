//! Longitudinal progress against the fixed baseline.
//!
//! Every mutating call loads the whole record, changes it, and writes it back.
//! A missing record is initialised first, so `init` is optional for callers.

pub mod milestones;
pub mod report;

use crate::domain::progress::{
    AchievedMilestone, Baseline, Milestone, OptimizationRecord, ProgressRecord, SelectedStrategy,
    WeeklyProgress,
};
use crate::storage::ProgressFile;
use chrono::NaiveDate;
use std::path::PathBuf;

pub use report::{ProgressReport, NO_PROGRESS_MESSAGE};

#[derive(Debug, Clone)]
pub struct WeekEntry {
    pub week: u32,
    pub strategy: String,
    pub actual_roi: f64,
    pub actual_sales: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekOutcome {
    pub progress: WeeklyProgress,
    pub achieved: Vec<AchievedMilestone>,
}

#[derive(Debug, Clone)]
pub struct ProgressTracker {
    file: ProgressFile,
    baseline: Baseline,
    milestones: Vec<Milestone>,
}

impl ProgressTracker {
    pub fn new(path: impl Into<PathBuf>, baseline: Baseline) -> Self {
        Self {
            file: ProgressFile::new(path),
            baseline,
            milestones: Milestone::predefined(),
        }
    }

    /// Loads the record, creating it with the configured baseline if absent.
    pub fn init(&self) -> anyhow::Result<ProgressRecord> {
        if let Some(record) = self.file.load()? {
            return Ok(record);
        }

        let record = ProgressRecord::new(self.baseline.clone());
        self.file.save(&record)?;
        tracing::info!(path = %self.file.path().display(), "initialised progress record");
        Ok(record)
    }

    pub fn record_week(&self, entry: WeekEntry, today: NaiveDate) -> anyhow::Result<WeekOutcome> {
        let mut record = self.init()?;

        let progress = WeeklyProgress {
            week: entry.week,
            date: today,
            strategy: entry.strategy,
            actual_roi: entry.actual_roi,
            actual_sales: entry.actual_sales,
            roi_improvement: record.baseline.roi_improvement(entry.actual_roi),
            notes: entry.notes,
        };
        record.weekly_progress.push(progress.clone());
        self.file.save(&record)?;

        tracing::info!(
            week = progress.week,
            entries = record.weekly_progress.len(),
            actual_roi = progress.actual_roi,
            roi_improvement = progress.roi_improvement,
            "recorded weekly progress"
        );

        let achieved =
            milestones::newly_achieved(&self.milestones, &record, progress.actual_roi, today);
        if !achieved.is_empty() {
            for m in &achieved {
                tracing::info!(week = m.week, roi = m.roi, milestone = %m.message, "milestone achieved");
            }
            record.milestones.extend(achieved.iter().cloned());
            self.file.save(&record)?;
        }

        Ok(WeekOutcome { progress, achieved })
    }

    pub fn record_optimization(
        &self,
        problem: &str,
        solution: &str,
        effect: &str,
        today: NaiveDate,
    ) -> anyhow::Result<OptimizationRecord> {
        let mut record = self.init()?;
        let opt = OptimizationRecord {
            date: today,
            problem: problem.to_string(),
            solution: solution.to_string(),
            effect: effect.to_string(),
        };
        record.optimizations.push(opt.clone());
        self.file.save(&record)?;
        Ok(opt)
    }

    /// Replaces the current selection; the previous one is discarded.
    pub fn select_strategy(
        &self,
        name: &str,
        cities: Vec<String>,
        budget: u64,
        today: NaiveDate,
    ) -> anyhow::Result<SelectedStrategy> {
        let mut record = self.init()?;
        let selected = SelectedStrategy {
            name: name.to_string(),
            cities,
            budget,
            selected_date: today,
        };
        record.selected_strategy = Some(selected.clone());
        self.file.save(&record)?;

        tracing::info!(name = %selected.name, budget, cities = selected.cities.len(), "strategy selected");
        Ok(selected)
    }

    pub fn selected_strategy(&self) -> anyhow::Result<Option<SelectedStrategy>> {
        Ok(self.init()?.selected_strategy)
    }

    pub fn report(&self) -> anyhow::Result<ProgressReport> {
        Ok(ProgressReport::from_record(&self.init()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tracker() -> (TempDir, ProgressTracker) {
        let dir = tempfile::tempdir().unwrap();
        let tracker = ProgressTracker::new(
            dir.path().join("progress_tracker.json"),
            Baseline::spring_campaign(),
        );
        (dir, tracker)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn week(n: u32, roi: f64) -> WeekEntry {
        WeekEntry {
            week: n,
            strategy: format!("strategy {n}"),
            actual_roi: roi,
            actual_sales: 800_000.0,
            notes: String::new(),
        }
    }

    #[test]
    fn init_is_idempotent() {
        let (_dir, tracker) = tracker();
        let first = tracker.init().unwrap();
        tracker.record_optimization("p", "s", "e", day(1)).unwrap();

        let second = tracker.init().unwrap();
        assert_eq!(first.baseline, second.baseline);
        assert_eq!(second.optimizations.len(), 1);
        assert!(first.weekly_progress.is_empty());
    }

    #[test]
    fn report_without_weeks_is_no_data() {
        let (_dir, tracker) = tracker();
        let report = tracker.report().unwrap();
        assert_eq!(report, ProgressReport::NoData);
        assert_eq!(report.to_string(), NO_PROGRESS_MESSAGE);
    }

    #[test]
    fn first_week_example() {
        let (_dir, tracker) = tracker();
        let outcome = tracker
            .record_week(
                WeekEntry {
                    week: 1,
                    strategy: "A".to_string(),
                    actual_roi: 7.5,
                    actual_sales: 800_000.0,
                    notes: String::new(),
                },
                day(2),
            )
            .unwrap();

        assert_eq!(outcome.progress.roi_improvement, 10.8);
        assert!(outcome.achieved.is_empty());

        let report = tracker.report().unwrap().to_string();
        assert!(report.contains("ROI=7.5 (+10.8%)"));
        assert!(report.contains("Strategy: A"));
        assert!(report.contains("Week 1: ROI=7.5, sales=¥800,000"));
        assert!(report.contains("from 6.77 to 12"));
    }

    #[test]
    fn milestones_fire_on_matching_counts() {
        let (_dir, tracker) = tracker();
        let rois = [7.0, 9.0, 11.0, 13.0];
        let mut fired = Vec::new();
        for (i, roi) in rois.iter().enumerate() {
            let outcome = tracker.record_week(week(i as u32 + 1, *roi), day(1)).unwrap();
            fired.extend(outcome.achieved);
        }

        assert_eq!(fired.iter().map(|m| m.week).collect::<Vec<_>>(), vec![2, 4]);
        let record = tracker.init().unwrap();
        assert_eq!(record.milestones, fired);
        assert_eq!(record.milestones[0].roi, 9.0);
        assert_eq!(record.milestones[1].roi, 13.0);
    }

    #[test]
    fn missed_milestone_is_never_caught_up() {
        let (_dir, tracker) = tracker();
        tracker.record_week(week(1, 7.0), day(1)).unwrap();
        let second = tracker.record_week(week(2, 7.9), day(8)).unwrap();
        let third = tracker.record_week(week(3, 9.0), day(15)).unwrap();

        assert!(second.achieved.is_empty());
        assert!(third.achieved.is_empty());
        assert!(tracker.init().unwrap().milestones.is_empty());
    }

    #[test]
    fn milestones_follow_entry_count_not_week_number() {
        let (_dir, tracker) = tracker();
        tracker.record_week(week(5, 7.0), day(1)).unwrap();
        let outcome = tracker.record_week(week(9, 8.2), day(8)).unwrap();

        assert_eq!(outcome.achieved.len(), 1);
        assert_eq!(outcome.achieved[0].week, 2);
    }

    #[test]
    fn entries_and_optimizations_keep_order_in_report() {
        let (_dir, tracker) = tracker();
        tracker.record_week(week(1, 7.1), day(1)).unwrap();
        tracker
            .record_optimization("CPC spike in Harbin", "paused Harbin", "ROI +0.3", day(3))
            .unwrap();
        tracker
            .record_optimization("CPC spike in Harbin", "paused Harbin", "ROI +0.3", day(3))
            .unwrap();
        tracker.record_week(week(2, 7.4), day(8)).unwrap();

        let record = tracker.init().unwrap();
        assert_eq!(record.optimizations.len(), 2);

        let report = tracker.report().unwrap().to_string();
        let w1 = report.find("Week 1: ROI=7.1").unwrap();
        let w2 = report.find("Week 2: ROI=7.4").unwrap();
        let opt = report.find("2026-03-03: CPC spike in Harbin -> paused Harbin").unwrap();
        assert!(w1 < w2 && w2 < opt);
        assert!(report.contains("Current (week 2)"));
    }

    #[test]
    fn select_strategy_is_last_write_wins() {
        let (_dir, tracker) = tracker();
        tracker
            .select_strategy("East push", vec!["杭州".to_string()], 6_000, day(1))
            .unwrap();
        tracker
            .select_strategy("South push", vec!["广州".to_string(), "深圳".to_string()], 8_000, day(2))
            .unwrap();

        let selected = tracker.selected_strategy().unwrap().unwrap();
        assert_eq!(selected.name, "South push");
        assert_eq!(selected.budget, 8_000);
        assert_eq!(selected.cities.len(), 2);
        assert_eq!(selected.selected_date, day(2));
    }

    #[test]
    fn negative_improvement_is_signed() {
        let (_dir, tracker) = tracker();
        let outcome = tracker.record_week(week(1, 6.0), day(1)).unwrap();
        assert!(outcome.progress.roi_improvement < 0.0);
        assert!(tracker.report().unwrap().to_string().contains("(-11.4%)"));
    }
}
