//! Core types for circuit representation.

use std::fmt;

/// Index of an electrically distinct net.
/// Net 0 is always the reference (ground).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetId(pub usize);

impl NetId {
    /// The reference net (always index 0).
    pub const REFERENCE: NetId = NetId(0);

    /// Check if this is the reference net.
    pub fn is_reference(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_reference() {
            write!(f, "GND")
        } else {
            write!(f, "N{}", self.0)
        }
    }
}

/// Arena index of an element terminal.
///
/// Terminal `side` (0 or 1) of the element at position `e` in the circuit is
/// `TerminalId(2 * e + side)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalId(pub usize);

impl TerminalId {
    /// Terminal of an element by element index and side.
    pub fn new(element_index: usize, side: usize) -> Self {
        debug_assert!(side < 2, "elements have exactly two terminals");
        TerminalId(2 * element_index + side)
    }

    /// Index of the owning element.
    pub fn element_index(&self) -> usize {
        self.0 / 2
    }

    /// Side (0 for the first terminal, 1 for the second).
    pub fn side(&self) -> usize {
        self.0 % 2
    }
}

/// Index for extra variables in the MNA matrix (voltage source currents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchId(pub usize);

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{}", self.0)
    }
}

/// Variable index in the MNA solution vector.
/// Can be either a net voltage or a branch current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarIndex {
    /// Net voltage variable
    Voltage(NetId),
    /// Branch current variable (voltage sources)
    Current(BranchId),
}

impl VarIndex {
    /// Get the raw index into the solution vector.
    /// Net voltages come first (excluding the reference), then branch currents.
    pub fn to_index(&self, num_nets: usize) -> usize {
        match self {
            // Net 0 is not in the matrix, so subtract 1
            VarIndex::Voltage(NetId(n)) => {
                debug_assert!(*n > 0, "Reference net should not be in solution vector");
                n - 1
            }
            VarIndex::Current(BranchId(b)) => (num_nets - 1) + b,
        }
    }
}

/// Caller-facing reference to one terminal of one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TerminalRef {
    /// Element id
    pub element: String,
    /// Terminal name as declared by the element
    pub terminal: String,
}

impl TerminalRef {
    /// Create a terminal reference.
    pub fn new(element: impl Into<String>, terminal: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            terminal: terminal.into(),
        }
    }
}

impl fmt::Display for TerminalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.element, self.terminal)
    }
}

/// An unordered pair of terminals that are electrically identical.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub from: TerminalRef,
    pub to: TerminalRef,
}

impl Wire {
    /// Create a wire between two terminals.
    pub fn new(from: TerminalRef, to: TerminalRef) -> Self {
        Self { from, to }
    }

    /// Check whether either end belongs to the given element.
    pub fn touches(&self, element: &str) -> bool {
        self.from.element == element || self.to.element == element
    }
}
