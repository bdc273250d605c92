//! Fixed-parameter entry point: simulate one day and print the report as JSON.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use triage_simulator_core_rs::{GeneratorConfig, Orchestrator, OrchestratorConfig, PatientGenerator};

const DAILY_QUOTA: usize = 144;
const START_TIME: u64 = 0;
const SEED: u64 = 12345;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("simulation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<String, Box<dyn std::error::Error>> {
    let generator_config = GeneratorConfig {
        count: DAILY_QUOTA,
        start_time: START_TIME,
        ..GeneratorConfig::default()
    };
    let patients = PatientGenerator::new(generator_config, SEED)?.generate();
    info!(patients = patients.len(), seed = SEED, "generated patient day");

    let config = OrchestratorConfig {
        daily_quota: DAILY_QUOTA,
        ..OrchestratorConfig::default()
    };
    let mut orchestrator = Orchestrator::new(config, patients)?;
    let report = orchestrator.run()?;

    Ok(serde_json::to_string_pretty(&report)?)
}
