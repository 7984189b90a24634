use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use plant_planner::metadata::{PKG_DESCRIPTION, PKG_NAME, PKG_VERSION};
use plant_planner::{LengthUnit, StoreConfig, StoreResult, TemperatureUnit};

#[derive(Parser, Debug, Clone)]
#[command(name = PKG_NAME)]
#[command(version = PKG_VERSION)]
#[command(about = PKG_DESCRIPTION, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub store: StoreArguments,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage the plants in your garden
    #[command(subcommand)]
    Plants(PlantCommand),
    /// Watering reminders
    #[command(subcommand)]
    Reminders(ReminderCommand),
    /// Language and display units
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// List the flower catalogue
    Flowers,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlantCommand {
    /// List plants, optionally filtered by name
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show one plant in detail
    Show { id: String },
    /// Add a new plant
    Add(AddArgs),
    /// Remove a plant
    Remove { id: String },
    /// Record that a plant was watered now
    Water { id: String },
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Name of the plant, also used to group its reminders
    #[arg(short, long)]
    pub name: String,
    /// Pot size, free text
    #[arg(short, long)]
    pub size: String,
    /// Vase type
    #[arg(long)]
    pub vase: Option<String>,
    /// Flower kind, by key or label (see `flowers`)
    #[arg(short, long)]
    pub kind: Option<String>,
    /// Greenhouse the plant lives in
    #[arg(long, default_value = "")]
    pub greenhouse: String,
    /// Planting date as YYYY-MM-DD, defaults to today
    #[arg(long)]
    pub planted: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReminderCommand {
    /// Show the reminder board
    Show,
    /// Set the preferred watering time (prompts when omitted)
    SetTime { time: Option<String> },
    /// Toggle completion of a task
    Toggle { id: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Print the current settings
    Show,
    /// Set the language by two-letter code
    Language { code: String },
    /// Set the temperature unit: celsius or fahrenheit
    Temperature { unit: TemperatureUnit },
    /// Set the length unit: meters, feet or yards
    Length { unit: LengthUnit },
    /// Turn notifications on or off
    Notifications { state: Toggle },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Args, Debug, Clone)]
pub struct StoreArguments {
    /// Directory holding plants.json and preferences.json
    #[arg(long, env = "PLANT_PLANNER_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Days between waterings for newly derived reminders
    #[arg(
        long,
        env = "PLANT_PLANNER_WATERING_INTERVAL_DAYS",
        default_value_t = plant_planner::config::DEFAULT_WATERING_INTERVAL_DAYS,
        global = true
    )]
    pub watering_interval_days: u32,
}

impl StoreArguments {
    /// Resolve CLI/environment-derived arguments into a validated config.
    pub fn to_config(&self) -> StoreResult<StoreConfig> {
        let base = match &self.data_dir {
            Some(dir) => StoreConfig::new(dir),
            None => StoreConfig::default(),
        };
        let config = base.with_watering_interval(self.watering_interval_days);
        config.validate()?;
        Ok(config)
    }
}
