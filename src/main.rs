/// Main entry point for the habit calendar CLI
///
/// This file sets up logging, parses command line arguments, and dispatches
/// to the tracker. With no command it prints the calendar of the last 30 days.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use habit_calendar::commands::{
    add_habits, checkin, habit_status, is_short_command, parse_short_command, remove_habits,
    track_habit, CheckinParams,
};
use habit_calendar::{today, HabitTracker, OutputFormat, TrackerError};

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, io::Error> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|mut p| {
            p.push(".habit_calendar");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("habit_calendar");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("habit_calendar");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".habit_calendar");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if let Ok(()) = std::fs::create_dir_all(potential_path) {
            // Test if we can write to this directory
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("habits.db"));
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("habit_calendar");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("habits.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the habit calendar
///
/// Short commands `+<id> [on <day>]` and `-<id> [on <day>]` mark a habit
/// done or not done; they are recognized before these arguments are parsed.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the calendar as JSON
    #[arg(long)]
    json: bool,

    /// Disable coloured streak markers
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add new habits (comma-separated)
    Add {
        /// Names of habits to add, e.g. "Drink Water,Exercise"
        habits: String,
    },
    /// Remove habits and their tracking history by IDs (comma-separated)
    #[command(visible_alias = "rm")]
    Remove {
        /// IDs of habits to remove, e.g. 1,2,3
        habit_ids: String,
    },
    /// Ask about every habit for today (or a given day)
    Checkin {
        /// Day of the month within the last 30 days
        #[arg(long)]
        day: Option<String>,
    },
    /// Show current and longest streaks
    Status,
}

fn init_logging(args: &Args) {
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_calendar={}", log_level))
        .with_writer(io::stderr) // Keep stdout for the calendar
        .init();
}

fn resolve_database_path(database: Option<PathBuf>) -> Result<PathBuf, io::Error> {
    match database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Ok(path)
        }
        None => get_default_database_path(),
    }
}

/// Global options that consume the following argument as their value
const VALUED_OPTIONS: &[&str] = &["--database"];

/// Split raw arguments into clap arguments and a short track command
///
/// Only the first argument that isn't a global option can start a short
/// command; anything after a subcommand name belongs to that subcommand.
fn split_short_command(raw: &[String]) -> (&[String], &[String]) {
    let mut index = 1;
    while index < raw.len() {
        let arg = raw[index].as_str();
        if is_short_command(arg) {
            return raw.split_at(index);
        }
        if !arg.starts_with('-') || arg == "--" {
            break;
        }
        index += if VALUED_OPTIONS.contains(&arg) { 2 } else { 1 };
    }
    (raw, &[][..])
}

fn run() -> Result<bool, TrackerError> {
    let raw: Vec<String> = std::env::args().collect();
    let (option_args, short_args) = split_short_command(&raw);

    let args = Args::parse_from(option_args);
    init_logging(&args);

    let db_path = resolve_database_path(args.database.clone())?;
    info!("Using database at: {}", db_path.display());
    let tracker = HabitTracker::open(&db_path)?;
    let storage = tracker.storage();

    let success = if !short_args.is_empty() {
        let params = parse_short_command(short_args)?;
        let response = track_habit(storage, params, today())?;
        println!("{}", response.message);
        true
    } else {
        match args.command {
            Some(Command::Add { habits }) => {
                let response = add_habits(storage, &habits)?;
                println!("{}", response.message);
                response.success()
            }
            Some(Command::Remove { habit_ids }) => {
                let response = remove_habits(storage, &habit_ids)?;
                println!("{}", response.message);
                response.success()
            }
            Some(Command::Checkin { day }) => {
                let stdin = io::stdin();
                let response = checkin(
                    storage,
                    CheckinParams { day },
                    today(),
                    stdin.lock(),
                    io::stdout(),
                )?;
                println!("{}", response.message);
                true
            }
            Some(Command::Status) => {
                let response = habit_status(storage, today())?;
                println!("{}", response.message);
                true
            }
            None => {
                let format = if args.json {
                    OutputFormat::Json
                } else if args.no_color {
                    OutputFormat::Plain
                } else {
                    OutputFormat::Ansi
                };
                print!("{}", tracker.render_calendar(format)?);
                if args.json {
                    println!();
                }
                true
            }
        }
    };

    tracker.close()?;
    Ok(success)
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_subcommand_arguments_are_not_short_commands() {
        let raw = argv(&["habit-calendar", "add", "+Stretch"]);
        let (options, short) = split_short_command(&raw);
        assert_eq!(options, raw.as_slice());
        assert!(short.is_empty());

        let raw = argv(&["habit-calendar", "--database", "p.db", "add", "Run,+Gym"]);
        let (options, short) = split_short_command(&raw);
        assert_eq!(options.len(), 5);
        assert!(short.is_empty());

        let args = Args::parse_from(options);
        assert!(matches!(args.command, Some(Command::Add { habits }) if habits == "Run,+Gym"));
    }

    #[test]
    fn test_short_command_after_global_options() {
        let raw = argv(&["habit-calendar", "--database", "p.db", "-d", "+2", "on", "14"]);
        let (options, short) = split_short_command(&raw);
        assert_eq!(options, &raw[..4]);
        assert_eq!(short, &raw[4..]);

        let raw = argv(&["habit-calendar", "-3"]);
        let (options, short) = split_short_command(&raw);
        assert_eq!(options.len(), 1);
        assert_eq!(short, &raw[1..]);
    }

    #[test]
    fn test_database_value_is_not_a_short_command() {
        let raw = argv(&["habit-calendar", "--database", "+1", "status"]);
        let (options, short) = split_short_command(&raw);
        assert_eq!(options, raw.as_slice());
        assert!(short.is_empty());
    }
}
