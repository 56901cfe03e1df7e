//! Solve results.

use crate::circuit::{NetId, NetList, TerminalId, TerminalRef};
use crate::complex::{Complex, ZERO};
use crate::components::ElementKind;

/// Electrical quantities of one element.
///
/// `voltage` is `V(a) - V(b)` and `current` flows from terminal `a` through
/// the element to terminal `b`. A source delivering power therefore reports
/// a current whose real part opposes its voltage.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchResult {
    /// Element id
    pub id: String,
    pub kind: ElementKind,
    /// Terminal names, `[a, b]`
    pub terminals: [String; 2],
    /// Nets of terminals `a` and `b`
    pub nets: [NetId; 2],
    /// Voltage across the element, `V(a) - V(b)`
    pub voltage: Complex,
    /// Current from `a` to `b` through the element
    pub current: Complex,
    /// Stamped admittance for passive elements and meters
    pub admittance: Option<Complex>,
}

impl BranchResult {
    /// Complex power absorbed by the element, `S = V * conj(I)`.
    pub fn power(&self) -> Complex {
        self.voltage * self.current.conj()
    }
}

/// Result of one steady-state solve. All phasors are RMS.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    /// Drive frequency in Hz
    pub frequency_hz: f64,
    /// Angular drive frequency in rad/s
    pub omega: f64,
    /// Terminal-to-net mapping used for this solve
    pub netlist: NetList,
    /// Voltage of each net, indexed by `NetId`
    pub net_voltages: Vec<Complex>,
    /// Per-element results in input order
    pub branches: Vec<BranchResult>,
}

impl SolveResult {
    /// Number of nets, including the reference.
    pub fn net_count(&self) -> usize {
        self.netlist.net_count()
    }

    /// Voltage of a net relative to the reference.
    pub fn net_voltage(&self, net: NetId) -> Complex {
        self.net_voltages.get(net.0).copied().unwrap_or(ZERO)
    }

    /// Results for an element.
    pub fn branch(&self, id: &str) -> Option<&BranchResult> {
        self.branches.iter().find(|b| b.id == id)
    }

    /// Current through an element, from `a` to `b`.
    pub fn current(&self, id: &str) -> Option<Complex> {
        self.branch(id).map(|b| b.current)
    }

    /// Voltage across an element, `V(a) - V(b)`.
    pub fn voltage_across(&self, id: &str) -> Option<Complex> {
        self.branch(id).map(|b| b.voltage)
    }

    /// Complex power absorbed by an element.
    pub fn power(&self, id: &str) -> Option<Complex> {
        self.branch(id).map(BranchResult::power)
    }

    /// What a meter displays: current for an ammeter, voltage for a
    /// voltmeter. `None` for anything else.
    pub fn meter_reading(&self, id: &str) -> Option<Complex> {
        let b = self.branch(id)?;
        match b.kind {
            ElementKind::Ammeter => Some(b.current),
            ElementKind::Voltmeter => Some(b.voltage),
            _ => None,
        }
    }

    /// Net of a terminal.
    pub fn net_of(&self, terminal: &TerminalRef) -> Option<NetId> {
        let (idx, b) = self
            .branches
            .iter()
            .enumerate()
            .find(|(_, b)| b.id == terminal.element)?;
        let side = b.terminals.iter().position(|t| *t == terminal.terminal)?;
        Some(self.netlist.net_of(TerminalId::new(idx, side)))
    }

    /// Branch currents of the voltage sources, in source order.
    pub fn voltage_source_currents(&self) -> impl Iterator<Item = (&str, Complex)> {
        self.branches
            .iter()
            .filter(|b| matches!(b.kind, ElementKind::VoltageSource(_)))
            .map(|b| (b.id.as_str(), b.current))
    }

    /// Sum of all branch currents leaving a net. Zero (to rounding) for every
    /// net of a valid solution.
    pub fn kcl_residual(&self, net: NetId) -> Complex {
        self.branches.iter().fold(ZERO, |acc, b| {
            let mut acc = acc;
            if b.nets[0] == net {
                acc += b.current;
            }
            if b.nets[1] == net {
                acc -= b.current;
            }
            acc
        })
    }
}
