use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::Level;

use vertrs::calendar::{aggregate_logs_by_date, fill_calendar_range, summarize_period};
use vertrs::config::AppConfig;
use vertrs::diagnosis::{Problem, Severity};
use vertrs::import::ImportManager;
use vertrs::logging::{init_logging, LogLevel};
use vertrs::models::{parse_date, Profile};
use vertrs::report::AthleteReport;
use vertrs::streak::calculate_streak_stats;
use vertrs::{InputError, VertRsError};

/// VertRS - Jump and Strength Analytics CLI
///
/// Scores vertical-jump ability and strength structure from a body profile,
/// and summarises workout-log history into streaks, calendars and a
/// projected jump trend.
#[derive(Parser)]
#[command(name = "vertrs")]
#[command(author = "VertRS Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Jump and Strength Analytics CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score jump ability from a profile
    Jump {
        /// Profile file (JSON or TOML)
        #[arg(short, long)]
        profile: PathBuf,
    },

    /// Assess strength structure from a profile
    Strength {
        #[arg(short, long)]
        profile: PathBuf,
    },

    /// Diagnose training problems from a profile
    Diagnose {
        #[arg(short, long)]
        profile: PathBuf,
    },

    /// Compute the current workout streak
    Streak {
        /// Workout log file (CSV or JSON)
        #[arg(short, long)]
        logs: PathBuf,

        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        today: Option<String>,
    },

    /// Aggregate workout logs per calendar day
    Calendar {
        #[arg(short, long)]
        logs: PathBuf,

        /// Range start (YYYY-MM-DD); fills empty days when given with --to
        #[arg(short, long)]
        from: Option<String>,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Project jump-height progress from workout logs (estimate)
    Progress {
        #[arg(short, long)]
        profile: PathBuf,

        #[arg(short, long)]
        logs: PathBuf,
    },

    /// Run every analysis and print a full report
    Report {
        #[arg(short, long)]
        profile: PathBuf,

        #[arg(short, long)]
        logs: PathBuf,

        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        today: Option<String>,
    },

    /// Manage configuration
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,

        /// Print the active configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl MetricRow {
    fn new(metric: &str, value: impl ToString) -> Self {
        MetricRow {
            metric: metric.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Tabled)]
struct CalendarRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Logs")]
    logs: u32,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Mood")]
    mood: String,
    #[tabled(rename = "Minutes")]
    minutes: u32,
}

#[derive(Tabled)]
struct ProgressRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Jump (cm)")]
    jump_height: f64,
    #[tabled(rename = "Touch (cm)")]
    max_touch_height: f64,
    #[tabled(rename = "Target (cm)")]
    target_height: f64,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        let from_input = err
            .downcast_ref::<InputError>()
            .map(|input_err| VertRsError::from(input_err.clone()));
        let message = match err.downcast_ref::<VertRsError>().or(from_input.as_ref()) {
            Some(vert_err) => {
                if vert_err.severity().to_tracing_level() == Level::WARN {
                    tracing::warn!(error = %err, "Command failed");
                } else {
                    tracing::error!(error = %err, "Command failed");
                }
                vert_err.user_message()
            }
            None => {
                tracing::error!(error = %err, "Command failed");
                format!("{:#}", err)
            }
        };
        eprintln!("{} {}", "✗".red().bold(), message);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.logging.level = LogLevel::from_verbosity(config.logging.level, cli.verbose);
    init_logging(&config.logging)?;

    let importer = ImportManager::new();
    let analysis = &config.analysis;

    match cli.command {
        Commands::Jump { profile } => {
            let profile = load_profile(&importer, &profile)?;
            let jump = analysis.jump_analyzer().analyze(&profile);

            if cli.json {
                return print_json("analysis", &jump);
            }
            println!("{}", "Jump ability".cyan().bold());
            print_table(vec![
                MetricRow::new("Current jump (cm)", jump.current_jump),
                MetricRow::new("Improvement needed (cm)", jump.improvement_needed),
                MetricRow::new("Relative strength", format!("{:.1}", jump.relative_strength)),
                MetricRow::new("Speed strength (%)", jump.speed_strength),
                MetricRow::new("Jump efficiency (%)", jump.jump_efficiency),
            ]);
            print_recommendations(&jump.recommendations);
        }

        Commands::Strength { profile } => {
            let profile = load_profile(&importer, &profile)?;
            let strength = analysis.strength_assessor().assess(&profile);

            if cli.json {
                return print_json("assessment", &strength);
            }
            println!("{}", "Strength structure".cyan().bold());
            print_table(vec![
                MetricRow::new("Overall", strength.overall_score),
                MetricRow::new("Upper body", strength.upper_body_score),
                MetricRow::new("Lower body", strength.lower_body_score),
                MetricRow::new("Core", strength.core_score),
                MetricRow::new("Balance", strength.balance_score),
            ]);
            print_recommendations(&strength.recommendations);
        }

        Commands::Diagnose { profile } => {
            let profile = load_profile(&importer, &profile)?;
            let jump = analysis.jump_analyzer().analyze(&profile);
            let strength = analysis.strength_assessor().assess(&profile);
            let problems = analysis.diagnoser().diagnose(&jump, &strength);

            if cli.json {
                return print_json("problems", &problems);
            }
            print_problems(&problems);
        }

        Commands::Streak { logs, today } => {
            let logs = importer.import_logs(&logs)?;
            let stats = calculate_streak_stats(&logs, resolve_today(today.as_deref())?)?;

            if cli.json {
                return print_json("streak", &stats);
            }
            println!(
                "{} {} day(s)",
                "Current streak:".green().bold(),
                stats.current_streak
            );
            println!("  Longest streak: {} day(s)", stats.longest_streak);
            println!("  Active days:    {}", stats.active_days);
        }

        Commands::Calendar { logs, from, to } => {
            let logs = importer.import_logs(&logs)?;
            let mut days = aggregate_logs_by_date(&logs)?;
            if let (Some(from), Some(to)) = (from.as_deref(), to.as_deref()) {
                days = fill_calendar_range(&days, parse_date("from", from)?, parse_date("to", to)?)?;
            }

            if cli.json {
                return print_json("calendar", &days);
            }
            print_table(
                days.iter()
                    .map(|d| CalendarRow {
                        date: d.date.to_string(),
                        logs: d.log_count,
                        status: d.status_summary.clone().unwrap_or_default(),
                        mood: d.mood_summary.clone().unwrap_or_default(),
                        minutes: d.total_duration_minutes,
                    })
                    .collect(),
            );
            let period = summarize_period(&days);
            println!(
                "{} active day(s), {} log(s), {} minute(s)",
                period.active_days, period.total_logs, period.total_duration_minutes
            );
        }

        Commands::Progress { profile, logs } => {
            let profile = load_profile(&importer, &profile)?;
            let logs = importer.import_logs(&logs)?;
            let points = analysis.progress_projector().project(&profile, &logs)?;

            if cli.json {
                return print_json("progress", &points);
            }
            println!("{}", "Projected jump progress (estimate)".cyan().bold());
            print_table(
                points
                    .iter()
                    .map(|p| ProgressRow {
                        date: p.date.to_string(),
                        jump_height: p.jump_height,
                        max_touch_height: p.max_touch_height,
                        target_height: p.target_height,
                    })
                    .collect(),
            );
        }

        Commands::Report {
            profile,
            logs,
            today,
        } => {
            let profile = load_profile(&importer, &profile)?;
            let logs = importer.import_logs(&logs)?;
            let report =
                AthleteReport::build(&profile, &logs, resolve_today(today.as_deref())?, analysis)?;

            if cli.json {
                return print_json("report", &report);
            }
            println!("{}", "Athlete report".cyan().bold());
            print_table(vec![
                MetricRow::new("Current jump (cm)", report.jump.current_jump),
                MetricRow::new("Jump efficiency (%)", report.jump.jump_efficiency),
                MetricRow::new("Strength overall", report.strength.overall_score),
                MetricRow::new("Current streak (days)", report.streak.current_streak),
                MetricRow::new("Training days", report.calendar.len()),
            ]);
            print_problems(&report.problems);
        }

        Commands::Config { init, show } => {
            let path = cli.config.unwrap_or_else(AppConfig::default_config_path);
            if init {
                let mut fresh = AppConfig::default();
                fresh.save_to_file(&path)?;
                println!("{} {}", "✓ Wrote".green(), path.display());
            }
            if show || !init {
                let toml = toml::to_string_pretty(&config)
                    .context("Failed to serialize configuration")?;
                println!("{}", toml);
            }
        }
    }

    Ok(())
}

fn load_profile(importer: &ImportManager, path: &Path) -> Result<Profile> {
    Ok(importer.import_profile(path)?)
}

fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(value) => Ok(parse_date("today", value)?),
        None => Ok(Local::now().date_naive()),
    }
}

fn print_json<T: Serialize>(key: &str, value: &T) -> Result<()> {
    let mut envelope = serde_json::Map::new();
    envelope.insert("success".to_string(), serde_json::Value::Bool(true));
    envelope.insert(key.to_string(), serde_json::to_value(value)?);
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    println!("{}", Table::new(rows).with(Style::rounded()));
}

fn print_recommendations(recommendations: &[String]) {
    println!("{}", "Recommendations".bold());
    for recommendation in recommendations {
        println!("  • {}", recommendation);
    }
}

fn print_problems(problems: &[Problem]) {
    if problems.is_empty() {
        println!("{}", "✓ No training problems found. Keep it up!".green());
        return;
    }

    for problem in problems {
        let badge = match problem.severity {
            Severity::High => problem.severity.to_string().red().bold(),
            Severity::Medium => problem.severity.to_string().yellow().bold(),
            Severity::Low => problem.severity.to_string().normal(),
        };
        println!("[{}] {}", badge, problem.title.bold());
        println!("  {}", problem.description);
        for recommendation in &problem.recommendations {
            println!("  • {}", recommendation);
        }
    }
}
