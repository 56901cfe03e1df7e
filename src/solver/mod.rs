//! Complex MNA (Modified Nodal Analysis) solver.
//!
//! This module provides the numerical engine for steady-state AC analysis.
//!
//! ## Modified Nodal Analysis
//!
//! MNA assembles a system of equations Ax = z where:
//! - x contains net voltage phasors and voltage-source branch currents
//! - A is the complex admittance/coefficient matrix
//! - z is the source vector
//!
//! The matrix structure is:
//! ```text
//! [ Y   B ] [ v ]   [ i ]
//! [ C   0 ] [ j ] = [ e ]
//! ```
//!
//! where:
//! - Y is the admittance matrix (net equations), evaluated at w = 2*pi*f
//! - B, C connect voltage sources to nets (+1 at terminal a, -1 at terminal b)
//! - v is the vector of net voltages (reference net excluded)
//! - j is the vector of voltage source currents
//! - i is the sum of current sources into each net
//! - e is the vector of voltage source phasors
//!
//! All phasors are RMS. The system is solved by Gauss-Jordan elimination with
//! partial pivoting; a vanishing pivot is reported as
//! [`PhasorError::SingularSystem`](crate::error::PhasorError::SingularSystem).

mod ac;
mod mna;
mod result;

pub use ac::{AcSolver, SolverConfig};
pub use mna::ComplexMna;
pub use result::{BranchResult, SolveResult};

/// Singular-pivot threshold on `|pivot|²`.
pub const DEFAULT_PIVOT_EPSILON: f64 = 1e-12;

/// Resistance standing in for an ideal ammeter (ohms).
pub const DEFAULT_AMMETER_RESISTANCE: f64 = 1e-2;

/// Resistance standing in for an ideal voltmeter (ohms).
pub const DEFAULT_VOLTMETER_RESISTANCE: f64 = 1e7;
