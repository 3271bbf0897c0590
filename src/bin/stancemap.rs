//! stancemap: generate utility profiles from party survey files.
//!
//! Reads every party file in an input folder and writes one
//! `LinearAdditiveUtilitySpace` profile per party plus the shared domain
//! document into an output folder.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use stancemap::{BatchRunner, Config, Correction, Preset};

/// Generate linear additive utility profiles from survey stances.
#[derive(Parser)]
#[command(name = "stancemap")]
#[command(version = stancemap::PKG_VERSION)]
#[command(about = "Generate utility profiles from party survey files")]
struct Args {
    /// Folder of party files with (statement, stance, weight) rows
    input_folder: PathBuf,

    /// Folder where the resulting profiles are stored
    output_folder: PathBuf,

    /// Path to configuration file
    #[arg(short, long, env = "STANCEMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Input convention (overrides delimiter, identifiers and labels from config)
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// Weight rounding correction (overrides config)
    #[arg(long, value_enum)]
    correction: Option<Correction>,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run the batch; `Ok(false)` when at least one party failed.
fn run(args: &Args) -> stancemap::Result<bool> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(preset) = args.preset {
        config.apply_preset(preset);
    }
    if let Some(correction) = args.correction {
        config.weights.correction = correction;
    }

    info!(
        version = stancemap::version_string(),
        domain = %config.domain.name,
        input = %args.input_folder.display(),
        output = %args.output_folder.display(),
        "stancemap starting"
    );

    let runner = BatchRunner::new(config);
    let report = runner.run(&args.input_folder, &args.output_folder)?;

    for failure in &report.failed {
        eprintln!("{}: {}", failure.party, failure.error);
    }
    Ok(report.is_success())
}
