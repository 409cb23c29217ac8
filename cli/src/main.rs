mod report;
mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use parcelcal_core::{
    config, local_today, parse_human_date, parse_month, CalendarService, FileAppDataRepository,
    MonthReportUseCase, YearMonth,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parcelcal")]
#[command(about = "Track daily parcel deliveries against a monthly goal", long_about = None)]
struct Cli {
    /// Directory holding app_data.json and config.toml
    #[arg(long, global = true, env = config::DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Override today's date (YYYY-MM-DD)
    #[arg(long, global = true, hide = true, value_parser = parse_today)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show the calendar, weekly summary and monthly progress
    Show {
        /// Month: YYYY-MM, this, next, prev, +Nm, -Nm
        #[arg(allow_hyphen_values = true)]
        month: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record the delivered count for a date (0 clears it)
    Set {
        /// Date: YYYY-MM-DD, today, yest, tom, +Nd, -Nd
        #[arg(allow_hyphen_values = true)]
        date: String,
        count: u32,
    },
    /// Set the daily goal for a month
    Goal {
        goal: u32,
        #[arg(long, allow_hyphen_values = true)]
        month: Option<String>,
    },
    /// Toggle a date between holiday and working day
    Holiday {
        #[arg(allow_hyphen_values = true)]
        date: String,
    },
    /// List the holidays of a month
    Holidays {
        #[arg(allow_hyphen_values = true)]
        month: Option<String>,
    },
    /// Browse months in the terminal
    Tui {
        #[arg(allow_hyphen_values = true)]
        month: Option<String>,
    },
}

fn parse_today(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| e.to_string())
}

fn resolve_month(input: Option<&str>, today: NaiveDate) -> Result<YearMonth> {
    match input {
        Some(s) => Ok(parse_month(s, today)?),
        None => Ok(YearMonth::of(today)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(local_today);

    let (data_dir, settings) = config::resolve(cli.data_dir)?;
    let repo = FileAppDataRepository::new(Some(data_dir))?;
    tracing::debug!(path = %repo.path().display(), "using snapshot");

    match cli.command {
        Some(Commands::Show { month, json }) => {
            let month = resolve_month(month.as_deref(), today)?;
            let report = MonthReportUseCase::new(&repo).report(month, today)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report::print_report(&report, settings.show_weekly());
            }
        }
        Some(Commands::Set { date, count }) => {
            let date = parse_human_date(&date, today)?;
            CalendarService::new(&repo)
                .record_count(date, count)
                .with_context(|| format!("Could not record count for {}", date))?;
            if count > 0 {
                println!("Recorded {} for {}", count, date);
            } else {
                println!("Cleared count for {}", date);
            }
        }
        Some(Commands::Goal { goal, month }) => {
            let month = resolve_month(month.as_deref(), today)?;
            let stored = CalendarService::new(&repo).set_goal(month, goal)?;
            if stored != goal {
                println!("Goal clamped to {}", stored);
            }
            println!("Daily goal for {} set to {}", month, stored);
        }
        Some(Commands::Holiday { date }) => {
            let date = parse_human_date(&date, today)?;
            let now_holiday = CalendarService::new(&repo).toggle_holiday(date)?;
            let label = if now_holiday { "holiday" } else { "working day" };
            println!("{} ({}) is now a {}", date, date.format("%a"), label);
        }
        Some(Commands::Holidays { month }) => {
            let month = resolve_month(month.as_deref(), today)?;
            let holidays = MonthReportUseCase::new(&repo).holidays_in(month)?;
            report::print_holidays(month, &holidays);
        }
        Some(Commands::Tui { month }) => {
            let month = resolve_month(month.as_deref(), today)?;
            tui::run(&repo, month, today)?;
        }
        None => {
            let report = MonthReportUseCase::new(&repo).report(YearMonth::of(today), today)?;
            report::print_report(&report, settings.show_weekly());
        }
    }
    Ok(())
}
