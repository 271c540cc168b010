//! Built-in sample dataset used in place of a backend.

use serde::Deserialize;

use crate::models::{ChatMessage, ExerciseRecord, Meal, Medication};

const MOCK_DATA_JSON: &str = r#"{
  "medications": [
    { "id": 1, "name": "혈압약", "time": "08:00", "taken": true, "dosage": "1정", "note": "식전 복용" },
    { "id": 2, "name": "당뇨약", "time": "12:00", "taken": false, "dosage": "1정", "note": "식후 복용" },
    { "id": 3, "name": "비타민", "time": "18:00", "taken": false, "dosage": "1정", "note": "식후 복용" }
  ],
  "exercise": {
    "today": { "steps": 3240, "distance": "2.1km", "calories": 156, "duration": "25분" },
    "weekly": [
      { "day": "월", "steps": 2800, "duration": "20분" },
      { "day": "화", "steps": 3200, "duration": "25분" },
      { "day": "수", "steps": 2900, "duration": "22분" },
      { "day": "목", "steps": 3500, "duration": "28분" },
      { "day": "금", "steps": 3100, "duration": "24분" },
      { "day": "토", "steps": 2800, "duration": "20분" },
      { "day": "일", "steps": 3240, "duration": "25분" }
    ]
  },
  "chatHistory": [
    { "id": 1, "type": "user", "message": "오늘 약을 먹었는지 확인해주세요", "timestamp": "2024-01-15 10:30" },
    { "id": 2, "type": "ai", "message": "네, 확인해드리겠습니다. 오늘 아침 혈압약은 복용하셨고, 점심 당뇨약과 저녁 비타민은 아직 복용하지 않으셨습니다.", "timestamp": "2024-01-15 10:31" },
    { "id": 3, "type": "user", "message": "운동은 얼마나 했나요?", "timestamp": "2024-01-15 10:32" },
    { "id": 4, "type": "ai", "message": "오늘은 3,240보를 걸으셨고, 2.1km를 이동하셨습니다. 총 25분간 운동하셨네요. 정말 좋습니다!", "timestamp": "2024-01-15 10:33" }
  ],
  "meals": [
    { "id": 1, "name": "아침: 계란후라이, 토스트", "time": "08:00", "date": "2024-09-14" },
    { "id": 2, "name": "점심: 김치찌개, 밥", "time": "12:30", "date": "2024-09-14" },
    { "id": 3, "name": "저녁: 연어구이, 샐러드", "time": "18:00", "date": "2024-09-14" }
  ]
}"#;

/// Initial state for every page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockDataset {
    pub medications: Vec<Medication>,
    pub exercise: ExerciseRecord,
    pub chat_history: Vec<ChatMessage>,
    pub meals: Vec<Meal>,
}

impl MockDataset {
    /// Parse the embedded dataset.
    pub fn load() -> Result<Self, serde_json::Error> {
        Self::from_json(MOCK_DATA_JSON)
    }

    /// Parse a dataset with the same shape, e.g. a fixture file.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
