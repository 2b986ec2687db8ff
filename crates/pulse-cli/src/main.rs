//! Pulse circuit runner.
//!
//! Reads a circuit description, reports the HIGH×LOW pulse product over
//! a run of presses, then resets and reports how many presses it takes
//! before the node feeding the output sink emits LOW.
//!
//! # Example
//!
//! ```bash
//! pulse-sim circuit.txt
//! pulse-sim circuit.txt --presses 500 --sink out --verify-periods
//! RUST_LOG=pulse_circuit=debug pulse-sim circuit.txt --skip-periods
//! ```

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pulse::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Pulse circuit simulator
///
/// Deterministic and single-threaded: the same description always gives
/// the same answers.
#[derive(Parser, Debug)]
#[command(name = "pulse-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Circuit description file
    input: PathBuf,

    /// Presses to run when counting pulses
    #[arg(short = 'n', long, default_value = "1000")]
    presses: u64,

    /// Sink whose feeding node is the period extraction target
    #[arg(long, default_value = "rx")]
    sink: String,

    /// Events a single press may deliver before it is aborted
    #[arg(long)]
    max_events_per_press: Option<usize>,

    /// Presses period extraction may run before giving up
    #[arg(long)]
    max_presses: Option<u64>,

    /// Check each feeder fires again exactly one period after its first HIGH
    #[arg(long)]
    verify_periods: bool,

    /// Only count pulses; do not extract periods
    #[arg(long)]
    skip_periods: bool,
}

impl Args {
    fn config(&self) -> SimConfig {
        let defaults = SimConfig::default();
        SimConfig {
            max_events_per_press: self
                .max_events_per_press
                .unwrap_or(defaults.max_events_per_press),
            max_presses: self.max_presses.unwrap_or(defaults.max_presses),
            verify_periods: self.verify_periods,
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&args.input)
        .map_err(|e| format!("{}: {e}", args.input.display()))?;
    let declarations = parse_declarations(&text)?;
    let graph = Graph::from_declarations(&declarations)?;
    info!(nodes = graph.len(), "loaded {}", args.input.display());

    let mut sim = Simulator::new(graph, args.config())?;

    let tally = sim.run_presses(args.presses)?;
    println!(
        "pulses after {} presses: {} high, {} low, product {}",
        args.presses,
        tally.high,
        tally.low,
        tally.product()
    );

    if args.skip_periods {
        return Ok(());
    }

    sim.reset();
    let report = sim.presses_until_sink_low(&args.sink)?;
    for (feeder, period) in &report.periods {
        info!(feeder = %feeder, period, "feeder");
    }
    println!("presses until '{}' receives low: {}", args.sink, report.presses);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,pulse_engine=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
