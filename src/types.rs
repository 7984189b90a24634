use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;
use uuid::Uuid;

use crate::catalogue::{FlowerKind, optional_kind};

pub const DEFAULT_UNIT: &str = "M";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn set_latitude(&mut self, latitude: f64) {
        self.latitude = latitude;
    }

    pub fn set_longitude(&mut self, longitude: f64) {
        self.longitude = longitude;
    }
}

/// A size value. Dimension and unit are always stored together; the unit is
/// a display hint and is not validated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub dimension: f64,
    pub unit: String,
}

impl Measurement {
    pub fn new(dimension: f64, unit: impl Into<String>) -> Self {
        Self {
            dimension,
            unit: unit.into(),
        }
    }
}

impl Default for Measurement {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_UNIT)
    }
}

/// Catalogue metadata for a flower, shared between plant records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FlowerTemplate {
    pub id: i64,
    #[serde(rename = "greenHouseName", default)]
    greenhouse_name: String,
    #[serde(default)]
    pub position: Coordinate,
    #[serde(default)]
    size: Measurement,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "optional_kind",
        skip_serializing_if = "Option::is_none"
    )]
    kind: Option<FlowerKind>,
}

impl FlowerTemplate {
    pub fn new(id: i64, greenhouse_name: impl Into<String>, kind: Option<FlowerKind>) -> Self {
        Self {
            id,
            greenhouse_name: greenhouse_name.into(),
            position: Coordinate::default(),
            size: Measurement::default(),
            kind,
        }
    }

    pub fn greenhouse_name(&self) -> &str {
        &self.greenhouse_name
    }

    pub fn set_greenhouse_name(&mut self, greenhouse_name: impl Into<String>) {
        self.greenhouse_name = greenhouse_name.into();
    }

    pub fn size(&self) -> &Measurement {
        &self.size
    }

    pub fn set_size(&mut self, size: Measurement) {
        self.size = size;
    }

    pub fn kind(&self) -> Option<FlowerKind> {
        self.kind
    }

    pub fn set_kind(&mut self, kind: Option<FlowerKind>) {
        self.kind = kind;
    }

    /// Label of the kind, or an empty string when none was chosen.
    pub fn display_name(&self) -> &'static str {
        self.kind.map(FlowerKind::label).unwrap_or_default()
    }
}

/// A plant owned by the user. Identity is `id`; `name` is the key reminders
/// are grouped under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "plant", default)]
    pub template: FlowerTemplate,
    pub planting_date: DateTime<Utc>,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vase_type: Option<String>,
    #[serde(default)]
    pub last_watered_date: Option<DateTime<Utc>>,
}

impl PlantRecord {
    pub fn new(
        name: impl Into<String>,
        template: FlowerTemplate,
        planting_date: DateTime<Utc>,
        size: impl Into<String>,
        vase_type: Option<String>,
    ) -> Self {
        Self {
            id: Ulid::new().to_string(),
            name: name.into(),
            template,
            planting_date,
            size: size.into(),
            vase_type,
            last_watered_date: None,
        }
    }

    /// Last watering, falling back to the planting date for plants that
    /// were never watered.
    pub fn last_watered(&self) -> DateTime<Utc> {
        self.last_watered_date.unwrap_or(self.planting_date)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderTask {
    pub id: Uuid,
    pub name: String,
    pub flower_name: String,
    pub is_completed: bool,
    pub due_date: DateTime<Utc>,
    pub last_watering_date: DateTime<Utc>,
    pub next_watering_date: DateTime<Utc>,
}

impl ReminderTask {
    pub fn state(&self) -> TaskState {
        if self.is_completed {
            TaskState::Completed
        } else {
            TaskState::Pending
        }
    }
}
