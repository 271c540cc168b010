//! Adherence counters for the medication summary card.

use serde::{Deserialize, Serialize};

use crate::models::Medication;

/// Taken/total counters with a guarded, rounded percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceSummary {
    pub taken_count: u32,
    pub total_count: u32,
    /// Rounded half-up; 0 when there is nothing to track.
    pub percentage: u32,
}

impl AdherenceSummary {
    pub fn from_medications(medications: &[Medication]) -> Self {
        let taken_count = medications.iter().filter(|m| m.taken).count() as u32;
        let total_count = medications.len() as u32;
        Self {
            taken_count,
            total_count,
            percentage: rounded_percentage(taken_count, total_count),
        }
    }

    /// Doses still to take today.
    pub fn remaining_count(&self) -> u32 {
        self.total_count - self.taken_count
    }

    /// "1 / 3" style ratio; "0 / 0" for an empty list.
    pub fn ratio_label(&self) -> String {
        format!("{} / {}", self.taken_count, self.total_count)
    }

    /// Width of the progress bar in percent, always within 0..=100.
    pub fn progress_width(&self) -> u32 {
        self.percentage.min(100)
    }

    pub fn is_complete(&self) -> bool {
        self.total_count > 0 && self.taken_count == self.total_count
    }
}

/// `round(part / whole * 100)` in integer arithmetic, 0 when `whole` is 0.
pub(crate) fn rounded_percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (u64::from(part), u64::from(whole));
    ((200 * part + whole) / (2 * whole)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(id: i64, taken: bool) -> Medication {
        Medication {
            taken,
            ..Medication::new(id, format!("med-{id}"), "08:00", "1정")
        }
    }

    #[test]
    fn one_of_three_rounds_to_33() {
        let meds = vec![med(1, true), med(2, false), med(3, false)];
        let summary = AdherenceSummary::from_medications(&meds);
        assert_eq!(summary.taken_count, 1);
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.percentage, 33);
        assert_eq!(summary.remaining_count(), 2);
        assert_eq!(summary.ratio_label(), "1 / 3");
    }

    #[test]
    fn two_of_three_rounds_up() {
        let meds = vec![med(1, true), med(2, true), med(3, false)];
        assert_eq!(AdherenceSummary::from_medications(&meds).percentage, 67);
    }

    #[test]
    fn empty_list_is_guarded() {
        let summary = AdherenceSummary::from_medications(&[]);
        assert_eq!(summary.taken_count, 0);
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.percentage, 0);
        assert_eq!(summary.progress_width(), 0);
        assert_eq!(summary.ratio_label(), "0 / 0");
        assert!(!summary.is_complete());
    }

    #[test]
    fn all_taken_is_complete() {
        let meds = vec![med(1, true), med(2, true)];
        let summary = AdherenceSummary::from_medications(&meds);
        assert_eq!(summary.percentage, 100);
        assert!(summary.is_complete());
    }

    #[test]
    fn half_rounds_up() {
        assert_eq!(rounded_percentage(1, 8), 13);
        assert_eq!(rounded_percentage(1, 2), 50);
        assert_eq!(rounded_percentage(0, 5), 0);
    }
}
