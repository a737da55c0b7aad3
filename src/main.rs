mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daybook_core::config::DaybookConfig;
use daybook_core::Calendar;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Keep a calendar of timed events in a plain text file")]
struct Cli {
    /// Events file to use instead of the configured one
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Log what daybook is doing to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every scheduled event
    List {
        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the events of one day
    Show {
        /// Day to show (MM/DD/YYYY, defaults to today)
        date: Option<String>,

        /// Move forward this many days
        #[arg(long, conflicts_with = "prev")]
        next: Option<u32>,

        /// Move back this many days
        #[arg(long, conflicts_with = "next")]
        prev: Option<u32>,
    },
    /// Create a new event
    Add {
        /// Event title
        title: String,

        /// Start time (HH:MM, 24-hour)
        #[arg(short, long)]
        start: String,

        /// End time (HH:MM, 24-hour)
        #[arg(short, long)]
        end: String,

        /// Day of the event (MM/DD/YYYY, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Check whether a time slot is free without creating anything
    Check {
        /// Start time (HH:MM, 24-hour)
        #[arg(short, long)]
        start: String,

        /// End time (HH:MM, 24-hour)
        #[arg(short, long)]
        end: String,

        /// Day to check (MM/DD/YYYY, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show a month grid with busy days marked
    Month {
        /// Any day in the month (MM/DD/YYYY, defaults to today)
        date: Option<String>,
    },
    /// Browse and edit the calendar interactively, saving on quit
    Shell {
        /// Day to start on (MM/DD/YYYY, defaults to today)
        date: Option<String>,
    },
    /// Show configuration paths, or choose the events file
    Config {
        /// Store events in this file from now on
        #[arg(long)]
        events_file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = cli.file;
    match cli.command {
        Commands::List { json } => commands::list::run(&open_calendar(file)?, json),
        Commands::Show { date, next, prev } => {
            let cursor = commands::cursor_for(date.as_deref())?;
            commands::show::run(open_calendar(file)?.with_cursor(cursor), next, prev)
        }
        Commands::Add {
            title,
            start,
            end,
            date,
        } => {
            let cursor = commands::cursor_for(date.as_deref())?;
            commands::add::run(open_calendar(file)?, title, cursor.date_key(), start, end)
        }
        Commands::Check { start, end, date } => {
            let cursor = commands::cursor_for(date.as_deref())?;
            commands::check::run(&open_calendar(file)?, cursor.date_key(), start, end)
        }
        Commands::Month { date } => {
            let cursor = commands::cursor_for(date.as_deref())?;
            commands::month::run(&open_calendar(file)?.with_cursor(cursor))
        }
        Commands::Shell { date } => {
            let cursor = commands::cursor_for(date.as_deref())?;
            let calendar = open_calendar(file)?.with_cursor(cursor);
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            commands::shell::run(calendar, stdin.lock(), stdout.lock())
        }
        Commands::Config { events_file } => commands::config::run(events_file),
    }
}

/// Load the calendar from `--file`, or from the configured events file.
fn open_calendar(file: Option<PathBuf>) -> Result<Calendar> {
    let events_path = resolve_events_path(file)?;
    tracing::debug!(path = %events_path.display(), "using events file");

    let mut calendar = Calendar::new(events_path);
    calendar
        .load()
        .with_context(|| format!("Failed to load {}", calendar.events_path().display()))?;
    Ok(calendar)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_events_path(file: Option<PathBuf>) -> Result<PathBuf> {
    match file {
        Some(path) => Ok(path),
        None => {
            let config = DaybookConfig::load().context("Failed to load daybook config")?;
            Ok(config.events_path())
        }
    }
}
