//! Home dashboard snapshot with everything the landing page shows.
//!
//! Pure derivation: (state snapshot, now) in, serialisable view out.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::adherence::AdherenceSummary;
use crate::auth::User;
use crate::diet::MealLog;
use crate::exercise::{summarize_today, summarize_week, TodaySummary, WeeklySummary};
use crate::medications::{build_cards, MedicationCard};
use crate::models::{ExerciseRecord, Meal, Medication};
use crate::next_dose::{next_dose, NextDose};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Medication section shared by the dashboard and the medication page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationOverview {
    pub summary: AdherenceSummary,
    pub next_dose: NextDose,
    pub next_dose_message: String,
    pub remaining_message: String,
    pub cards: Vec<MedicationCard>,
}

impl MedicationOverview {
    pub fn build(medications: &[Medication], now: NaiveDateTime) -> Self {
        let summary = AdherenceSummary::from_medications(medications);
        let next_dose = next_dose(medications, now);
        Self {
            next_dose_message: next_dose.message(),
            remaining_message: format!(
                "다음 복용 시간까지 {}개 남았습니다",
                summary.remaining_count()
            ),
            summary,
            next_dose,
            cards: build_cards(medications, now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseOverview {
    pub today: TodaySummary,
    pub week: WeeklySummary,
}

/// Everything rendered on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub date_label: String,
    pub greeting: String,
    pub medication: MedicationOverview,
    pub meals_today: Vec<Meal>,
    pub exercise: ExerciseOverview,
}

/// Borrowed inputs for one dashboard render.
pub struct DashboardInputs<'a> {
    pub user: &'a User,
    pub medications: &'a [Medication],
    pub meals: &'a MealLog,
    pub exercise: &'a ExerciseRecord,
    pub step_goal: u32,
}

impl DashboardView {
    pub fn build(inputs: DashboardInputs<'_>, now: NaiveDateTime) -> Self {
        let today = now.format("%Y-%m-%d").to_string();
        Self {
            date_label: korean_date_label(now.date()),
            greeting: format!("안녕하세요, {}님!", inputs.user.name),
            medication: MedicationOverview::build(inputs.medications, now),
            meals_today: inputs.meals.meals_on(&today).into_iter().cloned().collect(),
            exercise: ExerciseOverview {
                today: summarize_today(inputs.exercise, inputs.step_goal),
                week: summarize_week(&inputs.exercise.weekly, inputs.step_goal),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
        Weekday::Sun => "일요일",
    }
}

/// "2024년 1월 15일 월요일"
pub fn korean_date_label(date: NaiveDate) -> String {
    format!(
        "{}년 {}월 {}일 {}",
        date.year(),
        date.month(),
        date.day(),
        weekday_label(date.weekday())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data::MockDataset;
    use crate::models::MealKind;

    fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn user() -> User {
        User {
            id: "1".into(),
            name: "테스트 사용자".into(),
        }
    }

    #[test]
    fn date_label_in_korean() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(korean_date_label(date), "2024년 1월 15일 월요일");
        let date = NaiveDate::from_ymd_opt(2024, 9, 14).unwrap();
        assert_eq!(korean_date_label(date), "2024년 9월 14일 토요일");
    }

    #[test]
    fn medication_overview_from_mock_data() {
        let data = MockDataset::load().unwrap();
        let overview = MedicationOverview::build(&data.medications, at(2024, 1, 15, 10, 0));

        assert_eq!(overview.summary.ratio_label(), "1 / 3");
        assert_eq!(overview.summary.percentage, 33);
        assert_eq!(overview.next_dose_message, "2시간 0분 남았습니다");
        assert_eq!(overview.remaining_message, "다음 복용 시간까지 2개 남았습니다");
        assert_eq!(overview.cards.len(), 3);
    }

    #[test]
    fn empty_medication_list_renders() {
        let overview = MedicationOverview::build(&[], at(2024, 1, 15, 10, 0));
        assert_eq!(overview.summary.ratio_label(), "0 / 0");
        assert_eq!(overview.summary.progress_width(), 0);
        assert_eq!(overview.next_dose, NextDose::AllTaken);
        assert!(overview.cards.is_empty());
    }

    #[test]
    fn dashboard_snapshot() {
        let data = MockDataset::load().unwrap();
        let mut meals = MealLog::new(data.meals.clone());
        let now = at(2024, 9, 14, 20, 0);
        meals.add(MealKind::Snack, "사과", now).unwrap();

        let user = user();
        let view = DashboardView::build(
            DashboardInputs {
                user: &user,
                medications: &data.medications,
                meals: &meals,
                exercise: &data.exercise,
                step_goal: 5000,
            },
            now,
        );

        assert_eq!(view.date_label, "2024년 9월 14일 토요일");
        assert_eq!(view.greeting, "안녕하세요, 테스트 사용자님!");
        assert_eq!(view.meals_today.len(), 4);
        assert_eq!(view.medication.next_dose_message, "16시간 0분 남았습니다");
        assert_eq!(view.exercise.today.goal_percentage, 65);
        assert_eq!(view.exercise.week.total_minutes, 164);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["medication"]["summary"]["takenCount"], 1);
    }
}
