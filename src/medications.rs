//! Medication list: the in-memory store, the add form, and card views.
//!
//! `MedicationStore` exclusively owns the ordered list for the lifetime of
//! a session. Mutations are synchronous; views are rebuilt from a snapshot
//! and the current time on every render.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::IdAllocator;
use crate::models::{DoseStatus, Medication};
use crate::schedule::dose_status;

// ═══════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════

pub const WEEKDAYS: &[&str] = &["월", "화", "수", "목", "금", "토", "일"];

pub const TIME_SLOTS: &[&str] = &["아침", "점심", "저녁", "취침 전"];

/// Representative clock time for a time-slot label.
pub fn time_for_slot(slot: &str) -> &'static str {
    if slot.contains("아침") {
        "08:00"
    } else if slot.contains("점심") {
        "12:00"
    } else if slot.contains("저녁") {
        "18:00"
    } else {
        "21:00"
    }
}

// ═══════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════

/// Add-form validation failures. `Display` is the inline message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MedicationError {
    #[error("약 이름을 입력해주세요.")]
    MissingName,

    #[error("복용량을 입력해주세요.")]
    MissingDosage,

    #[error("복용 요일을 하나 이상 선택해주세요.")]
    NoDaysSelected,

    #[error("복용 시간을 하나 이상 선택해주세요.")]
    NoTimeSlots,
}

// ═══════════════════════════════════════════
// Add form
// ═══════════════════════════════════════════

/// Draft state behind the "add medication" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicationDraft {
    pub name: String,
    pub daily_dosage: String,
    pub days_of_week: Vec<String>,
    pub time_slots: Vec<String>,
    pub description: String,
    pub medication_guide: String,
    pub memo: String,
}

impl MedicationDraft {
    /// Clear every field. Stored medications are unaffected.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Select or deselect a weekday, keeping selection order.
    pub fn toggle_day(&mut self, day: &str) {
        toggle_entry(&mut self.days_of_week, day);
    }

    pub fn toggle_time_slot(&mut self, slot: &str) {
        toggle_entry(&mut self.time_slots, slot);
    }

    /// Check required fields in form order; the first failure wins.
    pub fn validate(&self) -> Result<(), MedicationError> {
        if self.name.trim().is_empty() {
            return Err(MedicationError::MissingName);
        }
        if self.daily_dosage.trim().is_empty() {
            return Err(MedicationError::MissingDosage);
        }
        if self.days_of_week.is_empty() {
            return Err(MedicationError::NoDaysSelected);
        }
        if self.time_slots.is_empty() {
            return Err(MedicationError::NoTimeSlots);
        }
        Ok(())
    }
}

fn toggle_entry(entries: &mut Vec<String>, value: &str) {
    if let Some(pos) = entries.iter().position(|e| e == value) {
        entries.remove(pos);
    } else {
        entries.push(value.to_string());
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ═══════════════════════════════════════════
// Store
// ═══════════════════════════════════════════

/// Ordered medication list with add / toggle / remove.
#[derive(Debug, Clone)]
pub struct MedicationStore {
    medications: Vec<Medication>,
    ids: IdAllocator,
}

impl Default for MedicationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MedicationStore {
    pub fn new() -> Self {
        Self::with_medications(Vec::new())
    }

    /// Seed the store. Later duplicates of an id are dropped so ids stay unique.
    pub fn with_medications(seed: Vec<Medication>) -> Self {
        let mut medications: Vec<Medication> = Vec::with_capacity(seed.len());
        for med in seed {
            if medications.iter().any(|m| m.id == med.id) {
                tracing::warn!(id = med.id, "Dropping seeded medication with duplicate id");
                continue;
            }
            medications.push(med);
        }
        let last = medications.iter().map(|m| m.id).max().unwrap_or(0);
        Self {
            medications,
            ids: IdAllocator::after(last),
        }
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn get(&self, id: i64) -> Option<&Medication> {
        self.medications.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.medications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medications.is_empty()
    }

    /// Validate the draft and append a new, untaken medication.
    ///
    /// The canonical `time` comes from the first selected slot. Returns the
    /// new id; on error nothing is stored.
    pub fn add(&mut self, draft: &MedicationDraft) -> Result<i64, MedicationError> {
        if let Err(e) = draft.validate() {
            tracing::warn!(reason = %e, "Rejected medication draft");
            return Err(e);
        }

        let daily_dosage = draft.daily_dosage.trim().to_string();
        let time = draft
            .time_slots
            .first()
            .map(|slot| time_for_slot(slot))
            .unwrap_or("21:00");

        let medications = &self.medications;
        let id = self.ids.next(|id| medications.iter().any(|m| m.id == id));
        let medication = Medication {
            description: non_blank(&draft.description),
            daily_dosage: Some(daily_dosage.clone()),
            medication_guide: non_blank(&draft.medication_guide),
            memo: non_blank(&draft.memo),
            days_of_week: draft.days_of_week.clone(),
            time_slots: draft.time_slots.clone(),
            ..Medication::new(id, draft.name.trim(), time, daily_dosage)
        };

        tracing::debug!(id, name = %medication.name, time, "Medication added");
        self.medications.push(medication);
        Ok(id)
    }

    /// Flip `taken`. Returns the new value, or `None` for an unknown id.
    pub fn toggle(&mut self, id: i64) -> Option<bool> {
        match self.medications.iter_mut().find(|m| m.id == id) {
            Some(med) => {
                med.taken = !med.taken;
                tracing::debug!(id, taken = med.taken, "Medication toggled");
                Some(med.taken)
            }
            None => {
                tracing::debug!(id, "Toggle ignored: unknown medication id");
                None
            }
        }
    }

    /// Remove by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.medications.len();
        self.medications.retain(|m| m.id != id);
        let removed = self.medications.len() != before;
        if removed {
            tracing::debug!(id, "Medication removed");
        } else {
            tracing::debug!(id, "Remove ignored: unknown medication id");
        }
        removed
    }
}

// ═══════════════════════════════════════════
// View types rendered by the medication page
// ═══════════════════════════════════════════

/// A medication card with derived status and badge text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationCard {
    pub medication: Medication,
    /// `None` when the stored time cannot be read.
    pub status: Option<DoseStatus>,
    pub show_overdue_warning: bool,
    pub status_badge: String,
    pub action_label: String,
}

impl MedicationCard {
    pub fn build(medication: &Medication, now: NaiveDateTime) -> Self {
        let status = match dose_status(&medication.time, now) {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!(id = medication.id, "Card rendered without status: {e}");
                None
            }
        };

        Self {
            medication: medication.clone(),
            status,
            show_overdue_warning: status == Some(DoseStatus::Overdue) && !medication.taken,
            status_badge: if medication.taken { "복용완료" } else { "미복용" }.to_string(),
            action_label: if medication.taken { "복용 취소" } else { "복용하기" }.to_string(),
        }
    }
}

/// Cards for every medication, in store order.
pub fn build_cards(medications: &[Medication], now: NaiveDateTime) -> Vec<MedicationCard> {
    medications
        .iter()
        .map(|med| MedicationCard::build(med, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn valid_draft() -> MedicationDraft {
        MedicationDraft {
            name: "혈압약".into(),
            daily_dosage: "1정".into(),
            days_of_week: vec!["월".into(), "수".into()],
            time_slots: vec!["점심".into(), "저녁".into()],
            memo: "  ".into(),
            ..Default::default()
        }
    }

    fn seeded() -> MedicationStore {
        MedicationStore::with_medications(vec![
            Medication {
                taken: true,
                ..Medication::new(1, "혈압약", "08:00", "1정")
            },
            Medication::new(2, "당뇨약", "12:00", "1정"),
            Medication::new(3, "비타민", "18:00", "1정"),
        ])
    }

    #[test]
    fn slot_table_maps_labels() {
        assert_eq!(time_for_slot("아침"), "08:00");
        assert_eq!(time_for_slot("점심 식후"), "12:00");
        assert_eq!(time_for_slot("저녁"), "18:00");
        assert_eq!(time_for_slot("취침 전"), "21:00");
        assert_eq!(time_for_slot(""), "21:00");
    }

    #[test]
    fn add_appends_with_derived_time() {
        let mut store = seeded();
        let id = store.add(&valid_draft()).unwrap();

        assert_eq!(store.len(), 4);
        let added = store.medications().last().unwrap();
        assert_eq!(added.id, id);
        assert_eq!(added.time, "12:00");
        assert!(!added.taken);
        assert_eq!(added.display_dosage(), "1정");
        assert_eq!(added.memo, None);
        assert_eq!(added.time_slots, vec!["점심", "저녁"]);
    }

    #[test]
    fn add_with_empty_name_leaves_store_unchanged() {
        let mut store = seeded();
        let before = store.medications().to_vec();
        let draft = MedicationDraft {
            name: "   ".into(),
            ..valid_draft()
        };

        assert_eq!(store.add(&draft), Err(MedicationError::MissingName));
        assert_eq!(store.medications(), before.as_slice());
    }

    #[test]
    fn add_rejects_each_missing_field() {
        let mut store = MedicationStore::new();
        let cases = [
            (
                MedicationDraft {
                    daily_dosage: "".into(),
                    ..valid_draft()
                },
                MedicationError::MissingDosage,
            ),
            (
                MedicationDraft {
                    days_of_week: vec![],
                    ..valid_draft()
                },
                MedicationError::NoDaysSelected,
            ),
            (
                MedicationDraft {
                    time_slots: vec![],
                    ..valid_draft()
                },
                MedicationError::NoTimeSlots,
            ),
        ];
        for (draft, expected) in cases {
            assert_eq!(store.add(&draft), Err(expected));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn validation_message_is_user_facing() {
        assert_eq!(MedicationError::MissingName.to_string(), "약 이름을 입력해주세요.");
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut store = MedicationStore::new();
        let a = store.add(&valid_draft()).unwrap();
        let b = store.add(&valid_draft()).unwrap();
        let c = store.add(&valid_draft()).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn ids_stay_above_seeded_ids() {
        let far_future = Utc::now().timestamp_millis() + 1_000_000;
        let mut store = MedicationStore::with_medications(vec![Medication::new(
            far_future, "A", "08:00", "1정",
        )]);
        let id = store.add(&valid_draft()).unwrap();
        assert_eq!(id, far_future + 1);
    }

    #[test]
    fn add_after_max_seeded_id_reuses_free_id() {
        let mut store = MedicationStore::with_medications(vec![
            Medication::new(1, "A", "08:00", "1정"),
            Medication::new(i64::MAX, "B", "12:00", "1정"),
        ]);
        let first = store.add(&valid_draft()).unwrap();
        let second = store.add(&valid_draft()).unwrap();

        assert_eq!(first, 2);
        assert_eq!(second, 3);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn duplicate_seed_ids_are_dropped() {
        let store = MedicationStore::with_medications(vec![
            Medication::new(1, "A", "08:00", "1정"),
            Medication::new(1, "B", "09:00", "1정"),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().name, "A");
    }

    #[test]
    fn toggle_twice_restores_original() {
        let mut store = seeded();
        assert_eq!(store.toggle(2), Some(true));
        assert_eq!(store.toggle(2), Some(false));
        assert!(!store.get(2).unwrap().taken);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut store = seeded();
        let before = store.medications().to_vec();
        assert_eq!(store.toggle(99), None);
        assert_eq!(store.medications(), before.as_slice());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = seeded();
        assert!(store.remove(2));
        assert!(!store.remove(2));
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.medications().iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn draft_toggles_and_reset() {
        let mut draft = MedicationDraft::default();
        draft.toggle_day("월");
        draft.toggle_day("화");
        draft.toggle_day("월");
        draft.toggle_time_slot("아침");
        assert_eq!(draft.days_of_week, vec!["화"]);
        assert_eq!(draft.time_slots, vec!["아침"]);

        draft.name = "비타민".into();
        draft.reset();
        assert_eq!(draft, MedicationDraft::default());
    }

    #[test]
    fn reset_does_not_touch_store() {
        let mut store = seeded();
        let mut draft = valid_draft();
        store.add(&draft).unwrap();
        draft.reset();
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn overdue_warning_only_for_untaken() {
        let store = seeded();
        let cards = build_cards(store.medications(), at(13, 30));

        // 08:00 taken: overdue status but no warning.
        assert_eq!(cards[0].status, Some(DoseStatus::Overdue));
        assert!(!cards[0].show_overdue_warning);
        assert_eq!(cards[0].status_badge, "복용완료");
        assert_eq!(cards[0].action_label, "복용 취소");

        // 12:00 untaken, 1.5h later: warning shown.
        assert!(cards[1].show_overdue_warning);
        assert_eq!(cards[1].action_label, "복용하기");

        // 18:00 still upcoming.
        assert_eq!(cards[2].status, Some(DoseStatus::Upcoming));
        assert!(!cards[2].show_overdue_warning);
    }

    #[test]
    fn card_with_unreadable_time_has_no_status() {
        let med = Medication::new(9, "A", "soon", "1정");
        let card = MedicationCard::build(&med, at(10, 0));
        assert_eq!(card.status, None);
        assert!(!card.show_overdue_warning);
    }
}
