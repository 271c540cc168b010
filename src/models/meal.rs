use serde::{Deserialize, Serialize};

/// A logged meal. `name` carries the kind label prefix, e.g. "점심: 김치찌개, 밥".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub time: String,
    pub date: String,
}
