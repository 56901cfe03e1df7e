//! Phasor - steady-state AC circuit solver
//!
//! Solves a netlist at a single drive frequency, or sweeps it over a range.
//!
//! # Usage
//!
//! ```bash
//! phasor divider.net
//! phasor rc.net --format rect
//! phasor rc.net --sweep 10 100000 25
//! RUST_LOG=debug phasor rc.net
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use phasor_core::{
    circuit::Circuit,
    dsl,
    error::Result,
    report::{self, PhasorFormat},
    AcSolver,
};

/// Steady-state AC circuit solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file
    #[arg(value_name = "CIRCUIT_FILE")]
    circuit_file: PathBuf,

    /// Drive frequency in Hz, overriding the netlist's `.freq`
    #[arg(short, long)]
    frequency: Option<f64>,

    /// How phasors are printed
    #[arg(long, value_enum, default_value_t = PhasorFormat::Polar)]
    format: PhasorFormat,

    /// Sweep the drive frequency: START STOP POINTS
    #[arg(long, num_args = 3, value_names = ["START", "STOP", "POINTS"])]
    sweep: Option<Vec<f64>>,
}

fn load(args: &Args) -> Result<Circuit> {
    let ast = dsl::parse_file(&args.circuit_file)?;
    let mut circuit = Circuit::from_ast(ast)?;
    if let Some(f) = args.frequency {
        circuit.frequency_hz = f;
    }
    Ok(circuit)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let circuit = match load(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let solver = AcSolver::new();

    if let Some(sweep) = &args.sweep {
        let points = sweep[2].max(0.0) as usize;
        let frequencies = report::sweep_points(sweep[0], sweep[1], points);
        let results = solver.sweep(&circuit, &frequencies);
        print!("{}", report::render_sweep(&circuit, &results));
        return if results.iter().all(|(_, r)| r.is_ok()) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    match solver.solve(&circuit) {
        Ok(result) => {
            print!("{}", report::render(&circuit, &result, args.format));
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::debug!("solve failed: {:?}", e);
            print!("{}", report::render_failure(&circuit, &e));
            ExitCode::FAILURE
        }
    }
}
