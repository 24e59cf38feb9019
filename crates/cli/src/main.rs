//! Conveyor CLI - runs one bounded producer/consumer session
//!
//! Usage: `conveyor P C N T`
//!
//! Exit codes:
//! - 0: run completed
//! - 1: logging setup failure
//! - 2: usage/parse error (clap)
//! - 3: configuration error (a zero parameter)
//! - 4: queue creation failure
//! - 5: worker thread creation failure
//! - 6: wait failure (a worker panicked)
//! - 7: internal state failure

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use conveyor_core::application::{Orchestrator, RunConfig};
use conveyor_core::AppError;

#[derive(Parser)]
#[command(name = "conveyor")]
#[command(about = "Bounded multi-producer/multi-consumer buffer runner", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of producer threads (P, positive)
    producers: usize,

    /// Number of consumer threads (C, positive)
    consumers: usize,

    /// Queue capacity (N, positive)
    capacity: usize,

    /// Maximum delay between operations in seconds (T, positive)
    max_delay: u64,
}

fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("conveyor=info,conveyor_core=info"))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();
    Ok(())
}

/// One distinct exit code per failure category.
fn exit_code(err: &AppError) -> u8 {
    match err {
        AppError::Config(_) => 3,
        AppError::InvalidCapacity(_) => 4,
        AppError::Spawn { .. } => 5,
        AppError::Join { .. } => 6,
        AppError::InvalidState(_) => 7,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::from(1);
    }

    info!(version = conveyor_core::VERSION, "conveyor starting");

    let config = RunConfig::new(cli.producers, cli.consumers, cli.capacity, cli.max_delay);
    let orchestrator = Orchestrator::new(config);

    match orchestrator.run() {
        Ok(report) => {
            info!(
                produced = report.produced,
                consumed = report.consumed,
                sentinels_received = report.sentinels_received,
                "all workers joined"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(exit_code(&e))
        }
    }
}
