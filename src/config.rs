use std::path::PathBuf;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

pub const PLANTS_FILE: &str = "plants.json";
pub const PREFERENCES_FILE: &str = "preferences.json";
pub const DEFAULT_WATERING_INTERVAL_DAYS: u32 = 7;
pub const MAX_WATERING_INTERVAL_DAYS: u32 = 3650;

/// Where the store keeps its documents and how reminders are spaced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub watering_interval_days: u32,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            watering_interval_days: DEFAULT_WATERING_INTERVAL_DAYS,
        }
    }

    pub fn with_watering_interval(mut self, days: u32) -> Self {
        self.watering_interval_days = days;
        self
    }

    pub fn plants_path(&self) -> PathBuf {
        self.data_dir.join(PLANTS_FILE)
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join(PREFERENCES_FILE)
    }

    pub fn watering_interval(&self) -> Duration {
        Duration::days(i64::from(self.watering_interval_days))
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(StoreError::Config("data directory cannot be empty".to_string()));
        }
        if self.watering_interval_days == 0 {
            return Err(StoreError::Config(
                "watering interval must be at least one day".to_string(),
            ));
        }
        if self.watering_interval_days > MAX_WATERING_INTERVAL_DAYS {
            return Err(StoreError::Config(format!(
                "watering interval cannot exceed {MAX_WATERING_INTERVAL_DAYS} days"
            )));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join("plant-planner");
        Self::new(data_dir)
    }
}
