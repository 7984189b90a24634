mod cli;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use colored::Colorize;
use dialoguer::Input;
use plant_planner::reminders::parse_watering_time;
use plant_planner::{
    FlowerKind, FlowerTemplate, Language, LengthUnit, PlantRecord, PlantStore, Preferences, ReminderPlanner,
    ReminderView, StoreConfig, TaskBoard, TaskState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::cli::{AddArgs, Cli, Command, PlantCommand, ReminderCommand, SettingsCommand, Toggle};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> CliResult {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.store.to_config()?;
    tracing::debug!(data_dir = %config.data_dir.display(), "using data directory");

    let store = PlantStore::new(&config);
    let preferences = Preferences::new(&config);
    let locale = std::env::var("LANG").unwrap_or_default();
    preferences.initialize_language(&locale)?;

    match cli.command {
        Command::Plants(cmd) => run_plants(cmd, &store, &preferences, &config).await,
        Command::Reminders(cmd) => run_reminders(cmd, &store, &preferences, &config),
        Command::Settings(cmd) => run_settings(cmd, &preferences),
        Command::Flowers => {
            for kind in FlowerKind::ALL {
                println!("{:<14} {}", kind.key(), kind.label().bold());
            }
            Ok(())
        }
    }
}

async fn run_plants(
    cmd: PlantCommand,
    store: &PlantStore,
    preferences: &Preferences,
    config: &StoreConfig,
) -> CliResult {
    match cmd {
        PlantCommand::List { search } => {
            let plants = store.search(search.as_deref().unwrap_or(""));
            if plants.is_empty() {
                println!("{}", "No plants found. Add one with `plants add`.".yellow());
            }
            for plant in plants {
                println!(
                    "{}  {}  {}",
                    plant.id.dimmed(),
                    plant.name.bold(),
                    plant.template.display_name()
                );
            }
        }
        PlantCommand::Show { id } => match store.get(&id) {
            Some(plant) => print_plant(&plant, preferences.settings().length_unit),
            None => println!("{}", format!("No plant with id {id}").yellow()),
        },
        PlantCommand::Add(args) => {
            let plant = build_plant(args, store)?;
            store.save_async(plant.clone()).await?;
            println!("{} {} ({})", "Added".green(), plant.name.bold(), plant.id);
            ReminderPlanner::new(store.clone(), preferences.clone(), config).refresh_tasks()?;
        }
        PlantCommand::Remove { id } => match store.get(&id) {
            Some(plant) => {
                store.delete_async(plant.clone()).await?;
                println!("{} {}", "Removed".green(), plant.name.bold());
                ReminderPlanner::new(store.clone(), preferences.clone(), config).refresh_tasks()?;
            }
            None => println!("{}", format!("No plant with id {id}").yellow()),
        },
        PlantCommand::Water { id } => {
            let plant = store.mark_watered(&id, Utc::now())?;
            println!("{} {}", "Watered".green(), plant.name.bold());
            ReminderPlanner::new(store.clone(), preferences.clone(), config).refresh_tasks()?;
        }
    }
    Ok(())
}

fn build_plant(args: AddArgs, store: &PlantStore) -> Result<PlantRecord, Box<dyn std::error::Error>> {
    let kind = args.kind.as_deref().map(str::parse::<FlowerKind>).transpose()?;
    let planting_date = match args.planted.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")?
            .and_time(chrono::NaiveTime::MIN)
            .and_utc(),
        None => Utc::now(),
    };
    let next_template_id = store
        .load_all()
        .iter()
        .map(|p| p.template.id)
        .max()
        .unwrap_or(0)
        + 1;
    let template = FlowerTemplate::new(next_template_id, args.greenhouse, kind);
    Ok(PlantRecord::new(
        args.name,
        template,
        planting_date,
        args.size,
        args.vase,
    ))
}

fn print_plant(plant: &PlantRecord, length_unit: LengthUnit) {
    println!("{}'s Pot", plant.name.bold());
    let kind = plant.template.display_name();
    if !kind.is_empty() {
        println!("  Flower:        {kind}");
    }
    if !plant.template.greenhouse_name().is_empty() {
        println!("  Greenhouse:    {}", plant.template.greenhouse_name());
    }
    println!("  Planting date: {}", plant.planting_date.format("%b %-d, %Y"));
    println!("  Size:          {}", plant.size);
    let measured = plant.template.size();
    if measured.dimension > 0.0 && measured.unit.eq_ignore_ascii_case("M") {
        println!(
            "  Height:        {:.2} {}",
            length_unit.convert_meters(measured.dimension),
            length_unit
        );
    }
    if let Some(vase) = &plant.vase_type {
        println!("  Vase type:     {vase}");
    }
    println!("  Last watered:  {}", plant.last_watered().format("%b %-d, %Y %H:%M"));
}

fn run_reminders(
    cmd: ReminderCommand,
    store: &PlantStore,
    preferences: &Preferences,
    config: &StoreConfig,
) -> CliResult {
    let planner = ReminderPlanner::new(store.clone(), preferences.clone(), config);
    match cmd {
        ReminderCommand::Show => {
            match planner.view()? {
                ReminderView::NoPlants => println!(
                    "{}",
                    "No flowers found. Please add a flower to start receiving watering reminders."
                        .yellow()
                ),
                ReminderView::WateringTimePrompt => println!(
                    "Set your preferred watering time with `reminders set-time` first."
                ),
                ReminderView::Tasks(board) => print_board(&board),
            }
        }
        ReminderCommand::SetTime { time } => {
            let raw = match time {
                Some(raw) => raw,
                None => Input::<String>::new()
                    .with_prompt("Preferred watering time (HH:MM)")
                    .interact_text()?,
            };
            let time = parse_watering_time(&raw)?;
            let board = planner.save_preferred_watering_time(time)?;
            println!("{} {}", "Watering time set to".green(), time.format("%H:%M"));
            print_board(&board);
        }
        ReminderCommand::Toggle { id } => {
            let id = Uuid::parse_str(&id)?;
            let task = planner.toggle(id)?;
            let state = if task.is_completed { "done" } else { "pending" };
            println!("{} is now {}", task.name.bold(), state);
        }
    }
    Ok(())
}

fn print_board(board: &TaskBoard) {
    if board.is_empty() {
        println!("{}", "No reminders yet.".yellow());
        return;
    }
    for group in &board.groups {
        println!("{}", group.flower_name.bold());
        for task in &group.tasks {
            match task.state() {
                TaskState::Pending => println!("  [ ] {}  {}", task.name, task.id),
                TaskState::Completed => {
                    let line = format!("  [x] {}  {}", task.name, task.id);
                    println!("{}", line.dimmed().strikethrough());
                }
            }
        }
        if let Some(days) = group.days_until_next_watering {
            println!("  Days until next watering: {days}");
        }
    }
}

fn run_settings(cmd: SettingsCommand, preferences: &Preferences) -> CliResult {
    match cmd {
        SettingsCommand::Show => {
            let settings = preferences.settings();
            println!("Language:          {} ({})", settings.language, settings.language.code());
            println!("Temperature unit:  {}", settings.temperature_unit);
            println!("Length unit:       {}", settings.length_unit);
            println!(
                "Notifications:     {}",
                if settings.notifications_enabled { "on" } else { "off" }
            );
            if let Some(time) = preferences.preferred_watering_time() {
                println!("Watering time:     {}", time.format("%H:%M"));
            }
        }
        SettingsCommand::Language { code } => {
            let language: Language = code.parse()?;
            preferences.set_language(language)?;
            println!("{} {}", "Language set to".green(), language);
        }
        SettingsCommand::Temperature { unit } => {
            preferences.set_temperature_unit(unit)?;
            println!("{} {}", "Temperature unit set to".green(), unit);
        }
        SettingsCommand::Length { unit } => {
            preferences.set_length_unit(unit)?;
            println!("{} {}", "Length unit set to".green(), unit);
        }
        SettingsCommand::Notifications { state } => {
            let enabled = state == Toggle::On;
            preferences.set_notifications_enabled(enabled)?;
            let label = if enabled { "on" } else { "off" };
            println!("{} {}", "Notifications turned".green(), label);
        }
    }
    Ok(())
}
