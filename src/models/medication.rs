use serde::{Deserialize, Serialize};

/// A tracked medication with a single daily reminder time.
///
/// `time` is the canonical `HH:MM` anchor used for status derivation.
/// The extended fields come from the newer add form and take precedence
/// over `dosage`/`note` for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: i64,
    pub name: String,
    pub time: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub taken: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication_guide: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_slots: Vec<String>,
}

impl Medication {
    /// A legacy-shape record: untaken, no note, no extended fields.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        time: impl Into<String>,
        dosage: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            time: time.into(),
            dosage: dosage.into(),
            note: None,
            taken: false,
            description: None,
            daily_dosage: None,
            medication_guide: None,
            memo: None,
            days_of_week: Vec::new(),
            time_slots: Vec::new(),
        }
    }

    /// Dosage text for display: `dailyDosage` when present, else the legacy `dosage`.
    pub fn display_dosage(&self) -> &str {
        self.daily_dosage.as_deref().unwrap_or(&self.dosage)
    }

    /// Note text for display: `memo` when present, else the legacy `note`.
    pub fn display_note(&self) -> Option<&str> {
        self.memo.as_deref().or(self.note.as_deref())
    }

    /// Reminder times for display: the selected slots, or the single `time`.
    pub fn display_times(&self) -> String {
        if self.time_slots.is_empty() {
            self.time.clone()
        } else {
            self.time_slots.join(", ")
        }
    }
}
