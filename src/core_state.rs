//! Application state shared by every page.
//!
//! `CoreState` is built once at the root and handed down as
//! `Arc<CoreState>`. Each page operation takes the lock it needs, applies
//! one synchronous mutation or derivation, and releases it before
//! returning. Page operations require an authenticated session.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::auth::{
    guard, AuthError, AuthSession, AuthState, MemoryCookieJar, Route, RouteDecision, SignupForm,
    User,
};
use crate::chat::ChatSession;
use crate::config::DashboardConfig;
use crate::dashboard::{DashboardInputs, DashboardView, MedicationOverview};
use crate::diet::{DietError, MealLog};
use crate::medications::{MedicationDraft, MedicationError, MedicationStore};
use crate::mock_data::MockDataset;
use crate::models::{ChatMessage, ExerciseRecord, Meal, MealKind, Medication};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Internal lock poisoned")]
    LockPoisoned,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error(transparent)]
    Medication(#[from] MedicationError),

    #[error(transparent)]
    Diet(#[from] DietError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Mock dataset is malformed: {0}")]
    Dataset(#[from] serde_json::Error),
}

/// Session-wide state: medication list, login, meal log, activity data.
pub struct CoreState {
    config: DashboardConfig,
    auth: RwLock<AuthSession<MemoryCookieJar>>,
    medications: RwLock<MedicationStore>,
    meals: RwLock<MealLog>,
    exercise: ExerciseRecord,
    chat_history: Vec<ChatMessage>,
}

impl CoreState {
    pub fn new(config: DashboardConfig, dataset: MockDataset, cookies: MemoryCookieJar) -> Self {
        let secure = config.secure_cookies;
        Self {
            config,
            auth: RwLock::new(AuthSession::new(cookies, secure)),
            medications: RwLock::new(MedicationStore::with_medications(dataset.medications)),
            meals: RwLock::new(MealLog::new(dataset.meals)),
            exercise: dataset.exercise,
            chat_history: dataset.chat_history,
        }
    }

    /// State seeded from the embedded mock dataset with an empty cookie jar.
    pub fn from_mock_data(config: DashboardConfig) -> Result<Self, CoreError> {
        Ok(Self::new(config, MockDataset::load()?, MemoryCookieJar::new()))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    // ── Lock helpers ────────────────────────────────────────

    fn read_auth(&self) -> Result<RwLockReadGuard<'_, AuthSession<MemoryCookieJar>>, CoreError> {
        self.auth.read().map_err(|_| CoreError::LockPoisoned)
    }

    fn write_auth(&self) -> Result<RwLockWriteGuard<'_, AuthSession<MemoryCookieJar>>, CoreError> {
        self.auth.write().map_err(|_| CoreError::LockPoisoned)
    }

    fn read_medications(&self) -> Result<RwLockReadGuard<'_, MedicationStore>, CoreError> {
        self.medications.read().map_err(|_| CoreError::LockPoisoned)
    }

    fn write_medications(&self) -> Result<RwLockWriteGuard<'_, MedicationStore>, CoreError> {
        self.medications.write().map_err(|_| CoreError::LockPoisoned)
    }

    fn read_meals(&self) -> Result<RwLockReadGuard<'_, MealLog>, CoreError> {
        self.meals.read().map_err(|_| CoreError::LockPoisoned)
    }

    fn write_meals(&self) -> Result<RwLockWriteGuard<'_, MealLog>, CoreError> {
        self.meals.write().map_err(|_| CoreError::LockPoisoned)
    }

    // ── Authentication ──────────────────────────────────────

    /// Resolve `Initializing` from the stored cookie.
    pub fn restore_session(&self) -> Result<AuthState, CoreError> {
        Ok(self.write_auth()?.restore().clone())
    }

    pub fn auth_state(&self) -> Result<AuthState, CoreError> {
        Ok(self.read_auth()?.state().clone())
    }

    pub fn login(&self, username: &str, password: &str) -> Result<User, CoreError> {
        Ok(self.write_auth()?.login(username, password)?)
    }

    pub fn signup(&self, form: &SignupForm) -> Result<User, CoreError> {
        Ok(self.write_auth()?.signup(form)?)
    }

    pub fn logout(&self) -> Result<(), CoreError> {
        self.write_auth()?.logout();
        Ok(())
    }

    /// Decide what a navigation to `path` renders.
    pub fn route(&self, path: &str) -> Result<RouteDecision, CoreError> {
        Ok(guard(Route::from_path(path), self.read_auth()?.state()))
    }

    fn require_user(&self) -> Result<User, CoreError> {
        self.read_auth()?
            .user()
            .cloned()
            .ok_or(CoreError::NotAuthenticated)
    }

    // ── Medications ─────────────────────────────────────────

    pub fn medications(&self) -> Result<Vec<Medication>, CoreError> {
        self.require_user()?;
        Ok(self.read_medications()?.medications().to_vec())
    }

    pub fn add_medication(&self, draft: &MedicationDraft) -> Result<i64, CoreError> {
        self.require_user()?;
        Ok(self.write_medications()?.add(draft)?)
    }

    /// New `taken` value, or `None` when the id is unknown.
    pub fn toggle_medication(&self, id: i64) -> Result<Option<bool>, CoreError> {
        self.require_user()?;
        Ok(self.write_medications()?.toggle(id))
    }

    pub fn remove_medication(&self, id: i64) -> Result<bool, CoreError> {
        self.require_user()?;
        Ok(self.write_medications()?.remove(id))
    }

    pub fn medication_overview(&self, now: NaiveDateTime) -> Result<MedicationOverview, CoreError> {
        self.require_user()?;
        let store = self.read_medications()?;
        Ok(MedicationOverview::build(store.medications(), now))
    }

    // ── Meals ───────────────────────────────────────────────

    pub fn meals(&self) -> Result<Vec<Meal>, CoreError> {
        self.require_user()?;
        Ok(self.read_meals()?.meals().to_vec())
    }

    pub fn add_meal(
        &self,
        kind: MealKind,
        name: &str,
        now: NaiveDateTime,
    ) -> Result<i64, CoreError> {
        self.require_user()?;
        Ok(self.write_meals()?.add(kind, name, now)?)
    }

    pub fn delete_meal(&self, id: i64) -> Result<bool, CoreError> {
        self.require_user()?;
        Ok(self.write_meals()?.delete(id))
    }

    // ── Views ───────────────────────────────────────────────

    pub fn dashboard(&self, now: NaiveDateTime) -> Result<DashboardView, CoreError> {
        let user = self.require_user()?;
        let store = self.read_medications()?;
        let meals = self.read_meals()?;
        Ok(DashboardView::build(
            DashboardInputs {
                user: &user,
                medications: store.medications(),
                meals: &meals,
                exercise: &self.exercise,
                step_goal: self.config.step_goal,
            },
            now,
        ))
    }

    /// Open a chat view seeded with the stored transcript.
    pub fn open_chat(&self) -> Result<ChatSession, CoreError> {
        self.require_user()?;
        Ok(ChatSession::new(self.chat_history.clone(), self.config.chat_typing_delay))
    }
}
