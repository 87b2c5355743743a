use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tutor_schedule::config::SchedulerConfig;
use tutor_schedule::error::SchedulerError;
use tutor_schedule::ingest::read_catalog_dir;
use tutor_schedule::render;
use tutor_schedule::scheduler::{ScheduleKpi, Scheduler};

/// Builds a weekly tutoring timetable with a genetic algorithm.
#[derive(Parser, Debug)]
#[command(name = "tutor-schedule", author, version, about, long_about = None)]
struct Cli {
    /// Directory holding SupervisorData.txt, TutorData.txt and RoomData.txt.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// TOML run configuration. Defaults apply to missing keys.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed, overriding the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Generation count, overriding the configuration.
    #[arg(long)]
    generations: Option<usize>,

    /// Write the winning schedule as HTML here instead of printing a table.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), SchedulerError> {
    let mut config = match &cli.config {
        Some(path) => SchedulerConfig::from_toml_file(path)?,
        None => SchedulerConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(generations) = cli.generations {
        config = config.with_generations(generations);
    }
    config.validate()?;

    let catalog = read_catalog_dir(&cli.data_dir, config.layout())?;
    let scheduler = Scheduler::new(catalog, config)?;
    let report = scheduler.run()?;
    let kpi = ScheduleKpi::calculate(&report.best, scheduler.catalog())?;
    info!(
        fitness = report.breakdown.fitness,
        availability = report.breakdown.availability,
        hours_compliance = report.breakdown.hours_compliance,
        sessions = kpi.sessions,
        over_limit = kpi.over_limit,
        idle = kpi.idle,
        "best schedule"
    );

    match &cli.output {
        Some(path) => {
            std::fs::write(path, render::html_document(&report.best, scheduler.catalog())?)?;
            info!(path = %path.display(), "schedule written");
        }
        None => print!("{}", render::text_table(&report.best, scheduler.catalog())?),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
