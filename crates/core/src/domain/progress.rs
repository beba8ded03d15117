use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed starting snapshot every improvement percentage is measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    #[serde(rename = "baseline")]
    pub metrics: BaselineMetrics,
    pub target: BaselineTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineMetrics {
    pub total_sales: f64,
    pub total_cost: f64,
    pub avg_roi: f64,
    pub daily_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineTarget {
    pub roi: f64,
    pub improvement: String,
}

impl Baseline {
    /// The three-month spring campaign plan: ROI 6.77 to 12.0.
    pub fn spring_campaign() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2026, 2, 16).unwrap_or_default(),
            target_date: NaiveDate::from_ymd_opt(2026, 5, 16).unwrap_or_default(),
            metrics: BaselineMetrics {
                total_sales: 22_514_750.0,
                total_cost: 3_327_720.0,
                avg_roi: 6.77,
                daily_sales: 750_492.0,
            },
            target: BaselineTarget {
                roi: 12.0,
                improvement: "77%".to_string(),
            },
        }
    }

    /// Percentage change of `actual_roi` over the baseline ROI, one decimal.
    pub fn roi_improvement(&self, actual_roi: f64) -> f64 {
        let base = self.metrics.avg_roi;
        round1((actual_roi - base) / base * 100.0)
    }
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    pub week: u32,
    pub date: NaiveDate,
    pub strategy: String,
    pub actual_roi: f64,
    pub actual_sales: f64,
    pub roi_improvement: f64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRecord {
    pub date: NaiveDate,
    pub problem: String,
    pub solution: String,
    pub effect: String,
}

/// Threshold keyed on the number of weekly entries recorded so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Milestone {
    pub week: u32,
    pub target_roi: f64,
    pub message: &'static str,
}

impl Milestone {
    pub fn predefined() -> Vec<Milestone> {
        vec![
            Milestone {
                week: 2,
                target_roi: 8.0,
                message: "Week 2: ROI raised to 8.0",
            },
            Milestone {
                week: 4,
                target_roi: 10.0,
                message: "Week 4: ROI raised to 10.0",
            },
            Milestone {
                week: 8,
                target_roi: 12.0,
                message: "Week 8: ROI raised to 12.0",
            },
            Milestone {
                week: 12,
                target_roi: 12.0,
                message: "Week 12: ROI holding at 12.0+",
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievedMilestone {
    pub week: u32,
    pub achieved: bool,
    pub roi: f64,
    pub message: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedStrategy {
    pub name: String,
    pub cities: Vec<String>,
    pub budget: u64,
    pub selected_date: NaiveDate,
}

/// The tracker's aggregate, persisted and rewritten as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub baseline: Baseline,
    #[serde(default)]
    pub weekly_progress: Vec<WeeklyProgress>,
    #[serde(default)]
    pub optimizations: Vec<OptimizationRecord>,
    #[serde(default)]
    pub milestones: Vec<AchievedMilestone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_strategy: Option<SelectedStrategy>,
}

impl ProgressRecord {
    pub fn new(baseline: Baseline) -> Self {
        Self {
            baseline,
            weekly_progress: Vec::new(),
            optimizations: Vec::new(),
            milestones: Vec::new(),
            selected_strategy: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improvement_is_relative_to_baseline_roi() {
        let baseline = Baseline::spring_campaign();
        assert_eq!(baseline.roi_improvement(7.5), 10.8);
        assert_eq!(baseline.roi_improvement(6.77), 0.0);
        assert!(baseline.roi_improvement(6.0) < 0.0);
    }

    #[test]
    fn record_json_nests_baseline_metrics() {
        let record = ProgressRecord::new(Baseline::spring_campaign());
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["baseline"]["baseline"]["avg_roi"], 6.77);
        assert_eq!(v["baseline"]["start_date"], "2026-02-16");
        assert!(v["weekly_progress"].as_array().unwrap().is_empty());
        assert!(v.get("selected_strategy").is_none());
    }
}
