//! Dose timing: status derivation and countdown text.
//!
//! Every function takes `now` explicitly so callers (and tests) control
//! the wall clock. Times are `HH:MM` strings anchored to `now`'s calendar
//! day; a dose is never re-anchored to yesterday, so a late-evening time
//! viewed shortly after midnight reads as `Upcoming` again.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

use crate::config::OVERDUE_AFTER_HOURS;
use crate::models::DoseStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid dose time (expected HH:MM): {0}")]
    InvalidTime(String),
}

/// Parse an `H:MM` or `HH:MM` 24-hour time.
pub fn parse_dose_time(time: &str) -> Result<NaiveTime, ScheduleError> {
    let invalid = || ScheduleError::InvalidTime(time.to_string());

    let (hours, minutes) = time.trim().split_once(':').ok_or_else(invalid)?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
}

/// Minutes since midnight, ignoring seconds.
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Classify a dose time against `now`.
///
/// `diff = now - today@time`: negative is upcoming, under one hour is
/// current, anything later is overdue.
pub fn dose_status(time: &str, now: NaiveDateTime) -> Result<DoseStatus, ScheduleError> {
    let med_time = now.date().and_time(parse_dose_time(time)?);
    let diff = now - med_time;

    Ok(if diff < Duration::zero() {
        DoseStatus::Upcoming
    } else if diff < Duration::hours(OVERDUE_AFTER_HOURS) {
        DoseStatus::Current
    } else {
        DoseStatus::Overdue
    })
}

/// Relative countdown used on reminder chips: "지금", "15분 후", "2시간 5분 후", "내일".
///
/// A time earlier than `now` rolls over to tomorrow.
pub fn format_time_remaining(time: &str, now: NaiveDateTime) -> Result<String, ScheduleError> {
    let mut target = now.date().and_time(parse_dose_time(time)?);
    if target < now {
        target += Duration::days(1);
    }

    let diff = target - now;
    let hours = diff.num_hours();
    let minutes = (diff - Duration::hours(hours)).num_minutes();

    Ok(match (hours, minutes) {
        (0, 0) => "지금".to_string(),
        (0, m) => format!("{m}분 후"),
        (h, m) if h < 24 => format!("{h}시간 {m}분 후"),
        _ => "내일".to_string(),
    })
}
