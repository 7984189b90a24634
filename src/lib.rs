//! Local plant catalogue and watering reminder store.
//!
//! Plants live in one JSON array document ([`storage::PlantStore`]);
//! reminder tasks, the preferred watering time and display settings live in
//! a key/value preference document ([`preferences::Preferences`]). Reminder
//! derivation and grouping is in [`reminders`].

pub mod catalogue;
pub mod config;
pub mod error;
pub mod preferences;
pub mod reminders;
pub mod settings;
pub mod storage;
pub mod types;

pub use catalogue::FlowerKind;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use preferences::Preferences;
pub use reminders::{ReminderPlanner, ReminderView, TaskBoard};
pub use settings::{Language, LengthUnit, Settings, TemperatureUnit};
pub use storage::PlantStore;
pub use types::{Coordinate, FlowerTemplate, Measurement, PlantRecord, ReminderTask, TaskState};

pub mod metadata {
    pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
    pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
}
