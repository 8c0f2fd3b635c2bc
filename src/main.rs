//! Timetabler - personal class timetable editor
//!
#![doc = "Timetabler - personal class timetable editor"]
#![doc = "Main entry point for the timetabler CLI."]

use anyhow::Result;

use timetabler::cli::{Cli, Commands};
use timetabler::commands::{self, schedule::NewSession};
use timetabler::config::Config;
use timetabler::logging::init_logging;
use timetabler::schedule::ScheduleStore;
use timetabler::theme::load_theme;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let mut config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    init_logging(&config.logging)?;
    for warning in config.take_load_warnings() {
        tracing::warn!("{}", warning);
    }

    let calendar = config.calendar.week_calendar();
    let today = commands::today();

    // Execute command
    match cli.command {
        Commands::Add {
            name,
            code,
            day,
            start,
            end,
            room,
            class_type,
            weeks,
        } => {
            tracing::info!("Adding session");
            let mut store = ScheduleStore::open(commands::open_storage(&config)?);
            commands::schedule::add_session(
                &mut store,
                NewSession {
                    name,
                    code,
                    day,
                    start,
                    end,
                    room,
                    class_type,
                    weeks,
                },
            )?;
            Ok(())
        }
        Commands::Import { file } => {
            tracing::info!("Starting bulk import");
            if let Some(path) = &file {
                tracing::debug!("Reading import text from: {}", path.display());
            }
            let text = commands::import::read_input(file.as_deref())?;
            let mut store = ScheduleStore::open(commands::open_storage(&config)?);
            commands::import::run_import(&mut store, &text, config.import)?;
            Ok(())
        }
        Commands::List { week } => {
            let store = ScheduleStore::open(commands::open_storage(&config)?);
            commands::schedule::list_sessions(&store, &calendar, week, today)
        }
        Commands::Delete { id } => {
            tracing::info!("Deleting session {}", id);
            let mut store = ScheduleStore::open(commands::open_storage(&config)?);
            commands::schedule::delete_session(&mut store, &id)
        }
        Commands::Reset { yes } => {
            let mut store = ScheduleStore::open(commands::open_storage(&config)?);
            commands::schedule::reset_schedule(&mut store, yes)
        }
        Commands::Grid { week } => {
            let storage = commands::open_storage(&config)?;
            let theme = load_theme(&storage)?;
            let store = ScheduleStore::open(storage);
            commands::grid::show_grid(&store, theme, &calendar, week, today)
        }
        Commands::Week { command } => commands::week::handle_week(&calendar, command, today),
        Commands::Theme { command } => {
            let storage = commands::open_storage(&config)?;
            commands::theme::handle_theme(&storage, command)?;
            Ok(())
        }
        Commands::Check { day, start, end } => {
            let store = ScheduleStore::open(commands::open_storage(&config)?);
            if !commands::check::check_slot(&store, day, start, end)? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
