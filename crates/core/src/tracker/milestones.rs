use crate::domain::progress::{AchievedMilestone, Milestone, ProgressRecord};
use chrono::NaiveDate;

/// Milestones reached by the entry that brought the record to its current count.
///
/// Keyed on how many weekly entries exist, not on the caller's week number. A
/// milestone whose count passes without meeting its threshold is never
/// revisited on later entries.
pub fn newly_achieved(
    milestones: &[Milestone],
    record: &ProgressRecord,
    current_roi: f64,
    today: NaiveDate,
) -> Vec<AchievedMilestone> {
    let count = record.weekly_progress.len();

    milestones
        .iter()
        .filter(|m| m.week as usize == count)
        .filter(|m| m.target_roi <= current_roi)
        .filter(|m| {
            !record
                .milestones
                .iter()
                .any(|a| a.week == m.week && a.message == m.message)
        })
        .map(|m| AchievedMilestone {
            week: m.week,
            achieved: true,
            roi: current_roi,
            message: m.message.to_string(),
            date: today,
        })
        .collect()
}
