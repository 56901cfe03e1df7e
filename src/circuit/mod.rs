//! Circuit representation, validation and net construction.
//!
//! A [`Circuit`] is the caller's description: two-terminal elements plus
//! wires that declare terminals electrically identical. [`NetList`] groups
//! terminals into nets with a union-find pass; net 0 is the reference.

mod graph;
mod netlist;
mod types;
mod validate;

pub use graph::Circuit;
pub use netlist::{DisjointSet, NetList};
pub use types::*;
pub use validate::validate_circuit;
