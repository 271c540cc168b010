//! Countdown to the nearest untaken dose, wrapping past midnight.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::Medication;
use crate::schedule::{minutes_of_day, parse_dose_time};

const MINUTES_PER_DAY: u32 = 24 * 60;

pub const ALL_TAKEN_MESSAGE: &str = "오늘 복용할 약을 모두 드셨습니다";
pub const UNSCHEDULED_MESSAGE: &str = "복용 시간을 확인할 수 없습니다";

/// Outcome of scanning the untaken doses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextDose {
    /// Nothing left to take.
    AllTaken,
    /// Untaken doses exist but none has a readable time.
    Unscheduled,
    Upcoming {
        medication_id: i64,
        name: String,
        minutes_until: u32,
        /// Every untaken dose has passed today; this is tomorrow's occurrence.
        tomorrow: bool,
    },
}

impl NextDose {
    pub fn message(&self) -> String {
        match self {
            Self::AllTaken => ALL_TAKEN_MESSAGE.to_string(),
            Self::Unscheduled => UNSCHEDULED_MESSAGE.to_string(),
            Self::Upcoming { minutes_until, .. } => format_wait(*minutes_until),
        }
    }
}

/// Find the next untaken dose strictly after `now`'s minute.
///
/// A dose at exactly the current minute counts as already due. Doses
/// sharing a time keep their list order.
pub fn next_dose(medications: &[Medication], now: NaiveDateTime) -> NextDose {
    let untaken: Vec<&Medication> = medications.iter().filter(|m| !m.taken).collect();
    if untaken.is_empty() {
        return NextDose::AllTaken;
    }

    let mut scheduled: Vec<(u32, &Medication)> = untaken
        .into_iter()
        .filter_map(|med| match parse_dose_time(&med.time) {
            Ok(time) => Some((minutes_of_day(time), med)),
            Err(e) => {
                tracing::warn!(id = med.id, "Skipping medication in next-dose scan: {e}");
                None
            }
        })
        .collect();
    scheduled.sort_by_key(|(minutes, _)| *minutes);

    let now_minutes = minutes_of_day(now.time());

    let (minutes_until, tomorrow, med) = match scheduled.iter().find(|(m, _)| *m > now_minutes) {
        Some((m, med)) => (m - now_minutes, false, *med),
        None => match scheduled.first() {
            Some((m, med)) => ((MINUTES_PER_DAY - now_minutes) + m, true, *med),
            None => return NextDose::Unscheduled,
        },
    };

    NextDose::Upcoming {
        medication_id: med.id,
        name: med.name.clone(),
        minutes_until,
        tomorrow,
    }
}

/// Convenience wrapper returning only the display text.
pub fn next_dose_message(medications: &[Medication], now: NaiveDateTime) -> String {
    next_dose(medications, now).message()
}

/// "2시간 0분 남았습니다" from an hour up, "45분 남았습니다" below.
pub fn format_wait(minutes: u32) -> String {
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{hours}시간 {minutes}분 남았습니다")
    } else {
        format!("{minutes}분 남았습니다")
    }
}
