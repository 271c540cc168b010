use serde::{Deserialize, Serialize};

/// Today's activity totals as reported by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseToday {
    pub steps: u32,
    pub distance: String,
    pub calories: u32,
    pub duration: String,
}

/// One day of the weekly history. `day` is the short weekday label (월..일).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyExercise {
    pub day: String,
    pub steps: u32,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub today: ExerciseToday,
    pub weekly: Vec<DailyExercise>,
}
