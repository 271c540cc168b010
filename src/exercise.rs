//! Exercise summaries derived from the tracker record.

use serde::{Deserialize, Serialize};

use crate::adherence::rounded_percentage;
use crate::models::{DailyExercise, ExerciseRecord};

/// Leading integer of a duration label such as "25분"; 0 when absent.
pub fn parse_duration_minutes(label: &str) -> u32 {
    let digits: String = label
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Today's card values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
    pub steps: u32,
    pub step_goal: u32,
    pub goal_percentage: u32,
    /// Progress bar width, capped at 100.
    pub progress_width: u32,
    pub distance: String,
    pub duration: String,
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub day: String,
    pub steps: u32,
    pub duration: String,
    pub goal_percentage: u32,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub total_steps: u32,
    pub average_steps: u32,
    pub total_minutes: u32,
    pub days: Vec<DaySummary>,
}

pub fn summarize_today(record: &ExerciseRecord, step_goal: u32) -> TodaySummary {
    let goal_percentage = rounded_percentage(record.today.steps, step_goal);
    TodaySummary {
        steps: record.today.steps,
        step_goal,
        goal_percentage,
        progress_width: goal_percentage.min(100),
        distance: record.today.distance.clone(),
        duration: record.today.duration.clone(),
        calories: record.today.calories,
    }
}

/// Weekly totals. The last entry is treated as today.
pub fn summarize_week(weekly: &[DailyExercise], step_goal: u32) -> WeeklySummary {
    let total_steps: u32 = weekly.iter().map(|d| d.steps).sum();
    let total_minutes = weekly.iter().map(|d| parse_duration_minutes(&d.duration)).sum();
    let average_steps = rounded_division(total_steps, weekly.len() as u32);

    let last = weekly.len().saturating_sub(1);
    let days = weekly
        .iter()
        .enumerate()
        .map(|(i, d)| DaySummary {
            day: d.day.clone(),
            steps: d.steps,
            duration: d.duration.clone(),
            goal_percentage: rounded_percentage(d.steps, step_goal),
            is_today: i == last,
        })
        .collect();

    WeeklySummary {
        total_steps,
        average_steps,
        total_minutes,
        days,
    }
}

fn rounded_division(total: u32, count: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    let (total, count) = (u64::from(total), u64::from(count));
    ((2 * total + count) / (2 * count)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseToday;

    fn day(label: &str, steps: u32, duration: &str) -> DailyExercise {
        DailyExercise {
            day: label.into(),
            steps,
            duration: duration.into(),
        }
    }

    fn record() -> ExerciseRecord {
        ExerciseRecord {
            today: ExerciseToday {
                steps: 3240,
                distance: "2.1km".into(),
                calories: 156,
                duration: "25분".into(),
            },
            weekly: vec![
                day("월", 2800, "20분"),
                day("화", 3200, "25분"),
                day("수", 2900, "22분"),
                day("목", 3500, "28분"),
                day("금", 3100, "24분"),
                day("토", 2800, "20분"),
                day("일", 3240, "25분"),
            ],
        }
    }

    #[test]
    fn today_against_goal() {
        let today = summarize_today(&record(), 5000);
        assert_eq!(today.goal_percentage, 65);
        assert_eq!(today.progress_width, 65);
    }

    #[test]
    fn progress_is_capped() {
        let mut rec = record();
        rec.today.steps = 7500;
        let today = summarize_today(&rec, 5000);
        assert_eq!(today.goal_percentage, 150);
        assert_eq!(today.progress_width, 100);
    }

    #[test]
    fn weekly_totals() {
        let week = summarize_week(&record().weekly, 5000);
        assert_eq!(week.total_steps, 21540);
        assert_eq!(week.average_steps, 3077);
        assert_eq!(week.total_minutes, 164);
        assert_eq!(week.days[3].goal_percentage, 70);
        assert!(week.days[6].is_today);
        assert!(!week.days[0].is_today);
    }

    #[test]
    fn empty_week_is_zeroed() {
        let week = summarize_week(&[], 5000);
        assert_eq!(week.total_steps, 0);
        assert_eq!(week.average_steps, 0);
        assert!(week.days.is_empty());
    }

    #[test]
    fn duration_parsing() {
        assert_eq!(parse_duration_minutes("25분"), 25);
        assert_eq!(parse_duration_minutes(" 7 분"), 7);
        assert_eq!(parse_duration_minutes("분"), 0);
    }
}
