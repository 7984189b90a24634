//! Watering reminders derived from the plant collection.
//!
//! Tasks are persisted in the preference store, grouped by plant name for
//! display, and reordered so pending tasks come first whenever one is
//! toggled.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::preferences::Preferences;
use crate::storage::PlantStore;
use crate::types::{PlantRecord, ReminderTask};

/// Builds the task list for `plants`.
///
/// Existing tasks are kept in their stored order as long as a plant with
/// their `flower_name` still exists. A kept task whose plant was watered
/// since it was derived is rescheduled from the new watering date, keeping
/// its id and completion state. Every plant without a task gets a new
/// pending one appended, due `interval` after its last watering at
/// `preferred_time`.
pub fn derive_tasks(
    plants: &[PlantRecord],
    existing: &[ReminderTask],
    preferred_time: NaiveTime,
    interval: Duration,
) -> StoreResult<Vec<ReminderTask>> {
    let mut by_name: HashMap<&str, &PlantRecord> = HashMap::new();
    for plant in plants {
        by_name.entry(plant.name.as_str()).or_insert(plant);
    }

    let mut tasks = Vec::with_capacity(existing.len().max(plants.len()));
    for task in existing {
        let Some(plant) = by_name.get(task.flower_name.as_str()) else {
            tracing::debug!(flower = %task.flower_name, "dropping task for removed plant");
            continue;
        };
        let mut task = task.clone();
        if task.last_watering_date != plant.last_watered() {
            schedule(&mut task, plant, preferred_time, interval)?;
        }
        tasks.push(task);
    }

    let mut covered: HashSet<String> = tasks.iter().map(|t| t.flower_name.clone()).collect();
    for plant in plants {
        if !covered.insert(plant.name.clone()) {
            continue;
        }
        let mut task = ReminderTask {
            id: Uuid::new_v4(),
            name: format!("Water {}", plant.name),
            flower_name: plant.name.clone(),
            is_completed: false,
            due_date: plant.last_watered(),
            last_watering_date: plant.last_watered(),
            next_watering_date: plant.last_watered(),
        };
        schedule(&mut task, plant, preferred_time, interval)?;
        tasks.push(task);
    }
    Ok(tasks)
}

fn schedule(
    task: &mut ReminderTask,
    plant: &PlantRecord,
    preferred_time: NaiveTime,
    interval: Duration,
) -> StoreResult<()> {
    let last = plant.last_watered();
    let next = last.checked_add_signed(interval).ok_or_else(|| {
        StoreError::DateOutOfRange(format!("{last} + {} days", interval.num_days()))
    })?;
    task.last_watering_date = last;
    task.next_watering_date = next;
    task.due_date = next.date_naive().and_time(preferred_time).and_utc();
    Ok(())
}

/// Partitions tasks by `flower_name`. Keys iterate in lexicographic order
/// and each group keeps the input order.
pub fn group_by_flower_name(tasks: &[ReminderTask]) -> BTreeMap<String, Vec<ReminderTask>> {
    let mut groups: BTreeMap<String, Vec<ReminderTask>> = BTreeMap::new();
    for task in tasks {
        groups
            .entry(task.flower_name.clone())
            .or_default()
            .push(task.clone());
    }
    groups
}

/// Flips the task with `id` and moves all pending tasks ahead of completed
/// ones. The sort is stable, so each partition keeps its previous order.
/// Returns false when no task has that id.
pub fn toggle_task_completion(tasks: &mut [ReminderTask], id: Uuid) -> bool {
    let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
        return false;
    };
    task.is_completed = !task.is_completed;
    tasks.sort_by_key(|t| t.is_completed);
    true
}

/// Calendar days from the day of `from` to the day of `to`. Negative when
/// `to` falls on an earlier day.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    to.date_naive()
        .signed_duration_since(from.date_naive())
        .num_days()
}

pub fn days_until_next_watering(date: DateTime<Utc>) -> i64 {
    days_between(Utc::now(), date)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroup {
    pub flower_name: String,
    pub tasks: Vec<ReminderTask>,
    /// Days until the first task's next watering.
    pub days_until_next_watering: Option<i64>,
}

/// Tasks grouped for display, groups ordered by plant name.
#[derive(Clone, Debug, PartialEq, Serialize, Default)]
pub struct TaskBoard {
    pub groups: Vec<TaskGroup>,
}

impl TaskBoard {
    pub fn build(tasks: &[ReminderTask], now: DateTime<Utc>) -> Self {
        let groups = group_by_flower_name(tasks)
            .into_iter()
            .map(|(flower_name, tasks)| {
                let days = tasks
                    .first()
                    .map(|t| days_between(now, t.next_watering_date));
                TaskGroup {
                    flower_name,
                    tasks,
                    days_until_next_watering: days,
                }
            })
            .collect();
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn task_count(&self) -> usize {
        self.groups.iter().map(|g| g.tasks.len()).sum()
    }
}

/// What the reminder page should show.
#[derive(Clone, Debug, PartialEq)]
pub enum ReminderView {
    NoPlants,
    WateringTimePrompt,
    Tasks(TaskBoard),
}

/// Reminder page state over the plant store and the preference store.
#[derive(Clone, Debug)]
pub struct ReminderPlanner {
    plants: PlantStore,
    preferences: Preferences,
    interval: Duration,
}

impl ReminderPlanner {
    pub fn new(plants: PlantStore, preferences: Preferences, config: &StoreConfig) -> Self {
        Self {
            plants,
            preferences,
            interval: config.watering_interval(),
        }
    }

    pub fn view(&self) -> StoreResult<ReminderView> {
        self.view_at(Utc::now())
    }

    /// Re-derives and persists the task list before grouping it, so the
    /// board always matches the current garden. The prompt is shown until
    /// both the flag and a watering time are stored.
    pub fn view_at(&self, now: DateTime<Utc>) -> StoreResult<ReminderView> {
        let plants = self.plants.load_all();
        if plants.is_empty() {
            return Ok(ReminderView::NoPlants);
        }
        let Some(time) = self.preferred_time_if_prompted() else {
            return Ok(ReminderView::WateringTimePrompt);
        };
        let tasks = self.derive_and_store(&plants, time)?;
        Ok(ReminderView::Tasks(TaskBoard::build(&tasks, now)))
    }

    /// Stores the chosen time, derives the task list straight away and
    /// marks the prompt as done once both are written.
    pub fn save_preferred_watering_time(&self, time: NaiveTime) -> StoreResult<TaskBoard> {
        self.preferences.set_preferred_watering_time(time)?;
        let tasks = self.derive_and_store(&self.plants.load_all(), time)?;
        self.preferences.set_watering_prompt_done(true)?;
        tracing::info!(%time, "preferred watering time saved");
        Ok(TaskBoard::build(&tasks, Utc::now()))
    }

    /// Re-derives tasks from the current plants and persists them. Does
    /// nothing until a watering time has been chosen.
    pub fn refresh_tasks(&self) -> StoreResult<Vec<ReminderTask>> {
        match self.preferred_time_if_prompted() {
            Some(time) => self.derive_and_store(&self.plants.load_all(), time),
            None => Ok(self.preferences.tasks()),
        }
    }

    fn preferred_time_if_prompted(&self) -> Option<NaiveTime> {
        if !self.preferences.watering_prompt_done() {
            return None;
        }
        self.preferences.preferred_watering_time()
    }

    fn derive_and_store(
        &self,
        plants: &[PlantRecord],
        time: NaiveTime,
    ) -> StoreResult<Vec<ReminderTask>> {
        let tasks = derive_tasks(plants, &self.preferences.tasks(), time, self.interval)?;
        self.preferences.set_tasks(&tasks)?;
        tracing::debug!(count = tasks.len(), "tasks refreshed");
        Ok(tasks)
    }

    pub fn toggle(&self, id: Uuid) -> StoreResult<ReminderTask> {
        let mut tasks = self.preferences.tasks();
        if !toggle_task_completion(&mut tasks, id) {
            return Err(StoreError::TaskNotFound(id.to_string()));
        }
        self.preferences.set_tasks(&tasks)?;
        tasks
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id.to_string()))
    }
}

/// Parses `HH:MM` or `HH:MM:SS`.
pub fn parse_watering_time(input: &str) -> StoreResult<NaiveTime> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| StoreError::InvalidTime(input.to_string()))
}
