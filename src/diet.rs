//! Meal log for the diet page.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::ids::IdAllocator;
use crate::models::{Meal, MealKind};

pub const EMPTY_LOG_MESSAGE: &str = "아직 기록된 식사가 없습니다. 첫 식사를 추가해보세요!";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DietError {
    #[error("식사 내용을 입력해주세요.")]
    EmptyMeal,
}

/// Ordered list of logged meals.
#[derive(Debug, Clone, Default)]
pub struct MealLog {
    meals: Vec<Meal>,
    ids: IdAllocator,
}

impl MealLog {
    pub fn new(seed: Vec<Meal>) -> Self {
        let last = seed.iter().map(|m| m.id).max().unwrap_or(0);
        Self {
            meals: seed,
            ids: IdAllocator::after(last),
        }
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Placeholder shown by the diet page while nothing is logged.
    pub fn empty_notice(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_LOG_MESSAGE)
    }

    /// Meals recorded on `date` (`YYYY-MM-DD`).
    pub fn meals_on(&self, date: &str) -> Vec<&Meal> {
        self.meals.iter().filter(|m| m.date == date).collect()
    }

    /// Record a meal of `kind`. The stored name carries the kind label.
    pub fn add(
        &mut self,
        kind: MealKind,
        name: &str,
        now: NaiveDateTime,
    ) -> Result<i64, DietError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DietError::EmptyMeal);
        }

        let meals = &self.meals;
        let id = self.ids.next(|id| meals.iter().any(|m| m.id == id));
        self.meals.push(Meal {
            id,
            name: format!("{}: {}", kind.label(), name),
            time: kind.default_time().to_string(),
            date: now.format("%Y-%m-%d").to_string(),
        });
        tracing::debug!(id, kind = %kind, "Meal added");
        Ok(id)
    }

    /// Delete by id; unknown ids are ignored.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.meals.len();
        self.meals.retain(|m| m.id != id);
        before != self.meals.len()
    }
}
