//! Key/value preference document.
//!
//! Every slot is a top-level key of one JSON object. Reads of a slot that is
//! missing or fails to decode fall back to the slot's default; writes
//! replace only their own key.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveTime;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::settings::{Language, LengthUnit, Settings, TemperatureUnit};
use crate::storage::{read_document, write_document};
use crate::types::ReminderTask;

pub const TASKS_KEY: &str = "tasks";
pub const PREFERRED_WATERING_TIME_KEY: &str = "preferredWateringTime";
pub const FIRST_TIME_REMINDER_KEY: &str = "isFirstTimeReminderPage";
pub const LANGUAGE_KEY: &str = "language";
pub const TEMPERATURE_UNIT_KEY: &str = "temperatureUnit";
pub const LENGTH_UNIT_KEY: &str = "lengthUnit";
pub const NOTIFICATIONS_KEY: &str = "notificationsEnabled";

#[derive(Clone, Debug)]
pub struct Preferences {
    storage_path: PathBuf,
    guard: Arc<Mutex<()>>,
}

impl Preferences {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_path(config.preferences_path())
    }

    pub fn with_path(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
            guard: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let _lock = self.lock();
        let value = self.read_map().remove(key)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring undecodable preference");
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let _lock = self.lock();
        let mut map = self.read_map();
        map.insert(key.to_string(), serde_json::to_value(value)?);
        write_document(&self.storage_path, &map)
    }

    pub fn remove(&self, key: &str) -> StoreResult<()> {
        let _lock = self.lock();
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            write_document(&self.storage_path, &map)?;
        }
        Ok(())
    }

    pub fn tasks(&self) -> Vec<ReminderTask> {
        self.get(TASKS_KEY).unwrap_or_default()
    }

    pub fn set_tasks(&self, tasks: &[ReminderTask]) -> StoreResult<()> {
        self.set(TASKS_KEY, tasks)
    }

    pub fn preferred_watering_time(&self) -> Option<NaiveTime> {
        self.get(PREFERRED_WATERING_TIME_KEY)
    }

    pub fn set_preferred_watering_time(&self, time: NaiveTime) -> StoreResult<()> {
        self.set(PREFERRED_WATERING_TIME_KEY, &time)
    }

    /// True once a preferred watering time has been saved. Stored under
    /// `isFirstTimeReminderPage`, whose name reads the other way round.
    pub fn watering_prompt_done(&self) -> bool {
        self.get(FIRST_TIME_REMINDER_KEY).unwrap_or(false)
    }

    pub fn set_watering_prompt_done(&self, done: bool) -> StoreResult<()> {
        self.set(FIRST_TIME_REMINDER_KEY, &done)
    }

    pub fn language(&self) -> Language {
        self.get(LANGUAGE_KEY).unwrap_or_default()
    }

    pub fn set_language(&self, language: Language) -> StoreResult<()> {
        self.set(LANGUAGE_KEY, &language)
    }

    /// Seeds the language from a locale tag the first time round and
    /// returns the language in effect.
    pub fn initialize_language(&self, locale: &str) -> StoreResult<Language> {
        if let Some(language) = self.get::<Language>(LANGUAGE_KEY) {
            return Ok(language);
        }
        let language = Language::from_locale(locale);
        self.set_language(language)?;
        tracing::debug!(code = language.code(), "language initialized from locale");
        Ok(language)
    }

    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            language: self.language(),
            temperature_unit: self
                .get::<TemperatureUnit>(TEMPERATURE_UNIT_KEY)
                .unwrap_or(defaults.temperature_unit),
            length_unit: self
                .get::<LengthUnit>(LENGTH_UNIT_KEY)
                .unwrap_or(defaults.length_unit),
            notifications_enabled: self
                .get(NOTIFICATIONS_KEY)
                .unwrap_or(defaults.notifications_enabled),
        }
    }

    pub fn set_temperature_unit(&self, unit: TemperatureUnit) -> StoreResult<()> {
        self.set(TEMPERATURE_UNIT_KEY, &unit)
    }

    pub fn set_length_unit(&self, unit: LengthUnit) -> StoreResult<()> {
        self.set(LENGTH_UNIT_KEY, &unit)
    }

    pub fn set_notifications_enabled(&self, enabled: bool) -> StoreResult<()> {
        self.set(NOTIFICATIONS_KEY, &enabled)
    }

    fn read_map(&self) -> Map<String, Value> {
        match read_document::<Map<String, Value>>(&self.storage_path) {
            Ok(map) => map.unwrap_or_default(),
            Err(StoreError::Decode { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "preference document malformed, using defaults");
                Map::new()
            }
            Err(e) => {
                tracing::warn!(path = %self.storage_path.display(), error = %e, "preference document unreadable, using defaults");
                Map::new()
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
