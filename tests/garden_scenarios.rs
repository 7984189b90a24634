use std::fs;

use chrono::{Duration, NaiveTime, TimeZone, Utc};
use plant_planner::reminders::{days_between, derive_tasks, group_by_flower_name};
use plant_planner::{
    FlowerKind, FlowerTemplate, Measurement, PlantRecord, PlantStore, Preferences,
    ReminderPlanner, ReminderView, StoreConfig,
};
use tempfile::TempDir;

fn record(name: &str, kind: FlowerKind) -> PlantRecord {
    let mut template = FlowerTemplate::new(1, "Back yard", Some(kind));
    template.set_size(Measurement::new(0.4, "M"));
    PlantRecord::new(
        name,
        template,
        Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap(),
        "40 cm",
        Some("ceramic".to_string()),
    )
}

#[test]
fn empty_document_reads_as_empty_garden() {
    let temp = TempDir::new().unwrap();
    let config = StoreConfig::new(temp.path());
    fs::write(config.plants_path(), "").unwrap();

    let store = PlantStore::new(&config);
    assert!(store.load_all().is_empty());
    assert!(store.try_load_all().unwrap().is_empty());

    let planner = ReminderPlanner::new(store, Preferences::new(&config), &config);
    assert_eq!(planner.view().unwrap(), ReminderView::NoPlants);
}

#[test]
fn deleting_middle_record_keeps_order() {
    let temp = TempDir::new().unwrap();
    let store = PlantStore::new(&StoreConfig::new(temp.path()));
    let first = record("Carla", FlowerKind::Carnation);
    let second = record("Gina", FlowerKind::Gerbera);
    let third = record("Tina", FlowerKind::Tulip);
    for plant in [&first, &second, &third] {
        store.save(plant).unwrap();
    }

    store.delete(&second).unwrap();

    let names: Vec<String> = store.load_all().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["Carla", "Tina"]);
}

#[test]
fn saved_record_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let config = StoreConfig::new(temp.path());
    let plant = record("Sunny", FlowerKind::Sunflower);
    PlantStore::new(&config).save(&plant).unwrap();

    let reopened = PlantStore::new(&config).load_all();
    assert_eq!(reopened, vec![plant]);
}

#[test]
fn legacy_document_with_unset_kind_loads() {
    let temp = TempDir::new().unwrap();
    let config = StoreConfig::new(temp.path());
    let legacy = r#"[{
        "id": "01J0000000000000000000000A",
        "name": "Mystery",
        "plant": {"id": 4, "greenHouseName": "", "size": {"dimension": 0.0, "unit": "M"}, "type": ""},
        "plantingDate": "2026-05-01T08:00:00Z",
        "size": "small"
    }]"#;
    fs::write(config.plants_path(), legacy).unwrap();

    let plants = PlantStore::new(&config).try_load_all().unwrap();
    assert_eq!(plants.len(), 1);
    assert_eq!(plants[0].template.kind(), None);
    assert_eq!(plants[0].vase_type, None);
}

#[test]
fn reminders_follow_the_garden() {
    let temp = TempDir::new().unwrap();
    let config = StoreConfig::new(temp.path()).with_watering_interval(3);
    let store = PlantStore::new(&config);
    let prefs = Preferences::new(&config);
    let planner = ReminderPlanner::new(store.clone(), prefs.clone(), &config);

    let rose = record("Rosa", FlowerKind::Rose);
    store.save(&rose).unwrap();
    store.save(&record("Peony", FlowerKind::Peony)).unwrap();
    let board = planner
        .save_preferred_watering_time(NaiveTime::from_hms_opt(8, 15, 0).unwrap())
        .unwrap();
    let keys: Vec<&str> = board.groups.iter().map(|g| g.flower_name.as_str()).collect();
    assert_eq!(keys, ["Peony", "Rosa"]);

    store.delete(&rose).unwrap();
    match planner.view().unwrap() {
        ReminderView::Tasks(board) => assert_eq!(board.task_count(), 1),
        other => panic!("expected task board, got {other:?}"),
    }
    let tasks = prefs.tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].flower_name, "Peony");
    assert_eq!(
        days_between(tasks[0].last_watering_date, tasks[0].next_watering_date),
        3
    );
}

#[test]
fn derivation_is_repeatable() {
    let plants = vec![record("B", FlowerKind::Statice), record("A", FlowerKind::Rose)];
    let tasks = derive_tasks(&plants, &[], NaiveTime::MIN, Duration::days(7)).unwrap();
    let again = derive_tasks(&plants, &tasks, NaiveTime::MIN, Duration::days(7)).unwrap();
    assert_eq!(tasks, again);

    let keys: Vec<String> = group_by_flower_name(&again).into_keys().collect();
    assert_eq!(keys, ["A", "B"]);
}
