//! Clinic CLI - Simulates one day of patient flow through a small clinic
//!
//! Patients enter registration, are routed to the dentist, surgeon or
//! therapist by illness category, and leave once served.

mod input;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use clinic_core::application::worker::constants::DEFAULT_TIME_UNIT_MS;
use clinic_core::application::{Clinic, Scheduler, SchedulerConfig};
use clinic_core::port::{LogSink, ServiceClock};
use clinic_infra_system::{ConsoleLogSink, FileLogSink, PatientGenerator, ThreadServiceClock};
use input::PopulationSource;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "clinic")]
#[command(about = "Clinic patient flow simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Patient count [1, 100], or the file holding it when LOG_FILE is given
    input: Option<String>,

    /// Also write the event log to this file
    log_file: Option<PathBuf>,

    #[arg(hide = true)]
    extra: Vec<String>,

    /// Generate a random population and log to LOG_FILE
    #[arg(short = 'g', long = "generate", value_name = "LOG_FILE")]
    generate: Option<PathBuf>,

    /// Real time of one service-duration unit, in milliseconds
    #[arg(long, env = "CLINIC_TIME_UNIT_MS", default_value_t = DEFAULT_TIME_UNIT_MS)]
    time_unit_ms: u64,

    /// Seed for reproducible patient generation
    #[arg(long, env = "CLINIC_SEED")]
    seed: Option<u64>,

    /// Print the run summary as JSON after the day finishes
    #[arg(long)]
    summary_json: bool,
}

/// Resolved run settings
#[derive(Debug, PartialEq, Eq)]
struct RunConfig {
    source: PopulationSource,
    log_file: Option<PathBuf>,
    time_unit: Duration,
    seed: Option<u64>,
    summary_json: bool,
}

impl Cli {
    /// More parameters than any invocation form accepts. `-g <LOG_FILE>`
    /// already fills both slots, so it takes no positionals.
    fn has_surplus_parameters(&self) -> bool {
        !self.extra.is_empty()
            || (self.generate.is_some() && (self.input.is_some() || self.log_file.is_some()))
    }

    fn run_config(&self) -> RunConfig {
        let (source, log_file) = match (&self.generate, &self.input, &self.log_file) {
            (Some(log), _, _) => (PopulationSource::Generated, Some(log.clone())),
            (None, Some(file), Some(log)) => {
                (PopulationSource::File(PathBuf::from(file)), Some(log.clone()))
            }
            (None, Some(count), None) => (PopulationSource::Argument(count.clone()), None),
            (None, None, _) => (PopulationSource::Prompt, None),
        };
        RunConfig {
            source,
            log_file,
            time_unit: Duration::from_millis(self.time_unit_ms),
            seed: self.seed,
            summary_json: self.summary_json,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.has_surplus_parameters() {
        println!("Incorrect number of parameters.");
        return ExitCode::from(1);
    }

    if let Err(e) = logging::init() {
        eprintln!("{:#}", e);
    }

    // Fatal input and log-file errors still exit 0
    if let Err(e) = run(cli.run_config()).await {
        println!("{}", e);
    }
    ExitCode::SUCCESS
}

async fn run(config: RunConfig) -> Result<()> {
    info!("Clinic simulator v{} starting...", VERSION);

    let mut generator = match config.seed {
        Some(seed) => PatientGenerator::with_seed(seed),
        None => PatientGenerator::new(),
    };

    // 1. Patient count (validated before anything else is touched)
    let count = match &config.source {
        PopulationSource::Prompt => {
            input::prompt_count(std::io::stdin().lock(), std::io::stdout())?
        }
        PopulationSource::Argument(raw) => input::parse_count(raw)?,
        PopulationSource::File(path) => input::read_count_from_file(path)?,
        PopulationSource::Generated => generator.population(),
    };
    info!(count, source = ?config.source, "Patient count resolved");

    // 2. Log sink
    let sink: Arc<dyn LogSink> = match &config.log_file {
        Some(path) => {
            let file_sink = FileLogSink::new(path);
            file_sink.truncate()?;
            Arc::new(file_sink)
        }
        None => Arc::new(ConsoleLogSink::new()),
    };

    // 3. Admission
    let clinic = Arc::new(Clinic::new(sink));
    clinic.admit_all(generator.generate(count)?)?;

    // 4. Rounds until every queue is empty
    let clock: Arc<dyn ServiceClock> = Arc::new(ThreadServiceClock::new(config.time_unit));
    let scheduler = Scheduler::new(clinic, clock, SchedulerConfig::default())?;
    let summary = scheduler.run().await?;

    println!("Day finished!");
    if config.summary_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to render run summary")?
        );
    }
    Ok(())
}
