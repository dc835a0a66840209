mod commands;
mod config;
mod menu;

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chow_core::Tracker;

use crate::commands::{
    Prompter, cmd_food_add, cmd_food_list, cmd_log, cmd_profile_init, cmd_profile_show, cmd_today,
    cmd_trend,
};
use crate::config::Config;
use crate::menu::run_menu;

#[derive(Parser)]
#[command(
    name = "chow",
    version,
    about = "A daily calorie tracker",
    long_about = "Track what you eat against your recommended daily intake (TDEE).\n\n\
                  Run without a subcommand for the interactive menu."
)]
struct Cli {
    /// Directory holding the profile, food database and log
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (the default)
    Menu,
    /// Log an amount of a food for today
    Log {
        /// Food name as stored in the food database
        food: String,
        /// Weight eaten in grams (e.g. "150" or "150g")
        weight: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the food log and total against TDEE (defaults to today)
    Today {
        /// Date to show (YYYY-MM-DD or today/yesterday)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show calorie totals for the last 7 days
    Trend {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the food database
    Food {
        #[command(subcommand)]
        command: FoodCommands,
    },
    /// Show or create the user profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
enum FoodCommands {
    /// Add a food, or update its calories if it already exists
    Add {
        /// Food name
        name: String,
        /// Calories per 100g
        #[arg(long)]
        calories: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List/search the food database
    List {
        /// Search query to filter foods
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the profile and recommended intake
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create the profile without prompting
    Init {
        /// Name (default: User)
        #[arg(long, default_value = "User")]
        name: String,
        /// Sex: M or F
        #[arg(long)]
        sex: String,
        /// Height in cm
        #[arg(long)]
        height: f64,
        /// Weight in kg
        #[arg(long)]
        weight: f64,
        /// Age in years
        #[arg(long)]
        age: u32,
        /// Activity level 1-5 (sedentary to extra active)
        #[arg(long, default_value = "1")]
        activity: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Load every store. On first run the profile is prompted for on stderr so
/// stdout stays clean for `--json`.
fn open_tracker(config: &Config) -> Result<Tracker> {
    let mut prompter = Prompter::new(io::stdin().lock(), io::stderr());
    Ok(Tracker::open(&config.paths(), &mut prompter)?)
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.data_dir)?;

    match cli.command {
        None | Some(Commands::Menu) => {
            let mut tracker = open_tracker(&config)?;
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
            run_menu(&mut tracker, &mut prompter)?;
            Ok(())
        }
        Some(Commands::Log { food, weight, json }) => {
            cmd_log(&mut open_tracker(&config)?, &food, &weight, json)
        }
        Some(Commands::Today { date, json }) => cmd_today(&open_tracker(&config)?, date, json),
        Some(Commands::Trend { json }) => cmd_trend(&open_tracker(&config)?, json),
        Some(Commands::Food { command }) => {
            let mut tracker = open_tracker(&config)?;
            match command {
                FoodCommands::Add {
                    name,
                    calories,
                    json,
                } => cmd_food_add(&mut tracker, &name, calories, json),
                FoodCommands::List { search, json } => {
                    cmd_food_list(&tracker, search.as_deref(), json)
                }
            }
        }
        Some(Commands::Profile { command }) => match command {
            ProfileCommands::Show { json } => cmd_profile_show(&open_tracker(&config)?, json),
            ProfileCommands::Init {
                name,
                sex,
                height,
                weight,
                age,
                activity,
                json,
            } => cmd_profile_init(
                &config.paths(),
                &name,
                &sex,
                height,
                weight,
                age,
                &activity,
                json,
            ),
        },
    }
}
