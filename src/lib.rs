//! # Phasor Core
//!
//! A steady-state AC circuit solver for linear circuits.
//!
//! This library provides:
//! - Complex (phasor) arithmetic with guarded division
//! - A circuit model of two-terminal elements joined by wires
//! - Net discovery with a union-find over terminals
//! - Modified Nodal Analysis (MNA) over complex numbers with a pivoted
//!   Gauss-Jordan solve
//! - A small text netlist format
//!
//! ## Architecture
//!
//! - [`complex`] - Complex value type and checked division
//! - [`circuit`] - Circuit snapshot, editing, validation and net builder
//! - [`components`] - Element kinds, sources and admittances
//! - [`solver`] - MNA assembly, elimination and derived outputs
//! - [`dsl`] - Parser for the netlist format
//! - [`report`] - Text tables for the CLI
//!
//! ## Usage
//!
//! ```no_run
//! use phasor_core::{AcSolver, Circuit, Element, Source};
//!
//! let circuit = Circuit::new(50.0)
//!     .with_element(Element::voltage_source("V1", Source::new(12.0)))?
//!     .with_element(Element::resistor("R1", 10.0))?
//!     .wire(("V1", "a"), ("R1", "a"))
//!     .wire(("R1", "b"), ("V1", "b"));
//!
//! let result = AcSolver::new().solve(&circuit)?;
//! let i = result.current("R1");
//! # Ok::<(), phasor_core::PhasorError>(())
//! ```
//!
//! ## Solution Method
//!
//! Every element is reduced to a complex admittance or a source stamp at the
//! drive frequency ω = 2πf:
//!
//! 1. Find nets by merging wired terminals
//! 2. Assemble the system matrix A and source vector z
//! 3. Solve Ax = z for net voltages and voltage-source branch currents
//! 4. Derive every element's voltage, current and power
//!
//! All phasors are RMS.

pub mod circuit;
pub mod complex;
pub mod components;
pub mod dsl;
pub mod error;
pub mod solver;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use complex::Complex;
pub use components::{Element, ElementKind, Source};
pub use error::{PhasorError, Result};
pub use solver::{AcSolver, SolveResult, SolverConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmAcSolver;

/// Drive frequency used when a netlist has no `.freq` line, in Hz
pub const DEFAULT_FREQUENCY_HZ: f64 = 50.0;

/// Solve a circuit with the default solver configuration.
pub fn solve(circuit: &Circuit) -> Result<SolveResult> {
    AcSolver::new().solve(circuit)
}
