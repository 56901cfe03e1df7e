//! Abstract Syntax Tree types for the netlist DSL.

use std::collections::HashMap;

use crate::circuit::TerminalRef;

/// Complete AST representation of a parsed netlist.
#[derive(Debug, Clone, Default)]
pub struct CircuitAst {
    /// All element instances, in file order
    pub elements: Vec<ElementDef>,
    /// Wire lines
    pub wires: Vec<WireDef>,
    /// Drive frequency from `.freq`
    pub frequency_hz: Option<f64>,
    /// Reference terminal from `.ground`
    pub reference: Option<TerminalRef>,
}

impl CircuitAst {
    /// Create a new empty circuit AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// An element definition from the DSL.
#[derive(Debug, Clone)]
pub struct ElementDef {
    /// Element type (R, C, L, V, I, A, M)
    pub element_type: ElementType,
    /// Unique element name
    pub name: String,
    /// Element value (resistance, capacitance, RMS magnitude, ...)
    pub value: Option<f64>,
    /// Additional `key=value` parameters (`phase`, `freq`)
    pub params: HashMap<String, f64>,
    /// Custom terminal names, `(a b)`
    pub terminals: Option<[String; 2]>,
    /// Source line number for error reporting
    pub line: usize,
}

/// A `.wire` line. All listed terminals end up in the same net.
#[derive(Debug, Clone)]
pub struct WireDef {
    pub terminals: Vec<TerminalRef>,
    pub line: usize,
}

/// Element types supported by the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// Resistor
    Resistor,
    /// Capacitor
    Capacitor,
    /// Inductor
    Inductor,
    /// Voltage Source
    VoltageSource,
    /// Current Source
    CurrentSource,
    /// Ideal Ammeter
    Ammeter,
    /// Ideal Voltmeter
    Voltmeter,
}

impl ElementType {
    /// Parse an element type from its DSL prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'R' => Some(Self::Resistor),
            'C' => Some(Self::Capacitor),
            'L' => Some(Self::Inductor),
            'V' => Some(Self::VoltageSource),
            'I' => Some(Self::CurrentSource),
            'A' => Some(Self::Ammeter),
            'M' => Some(Self::Voltmeter),
            _ => None,
        }
    }

    /// Parse an element type from a keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "AMMETER" => Some(Self::Ammeter),
            "VOLTMETER" => Some(Self::Voltmeter),
            _ => None,
        }
    }

    /// Whether `key=value` is meaningful for this element type.
    pub fn accepts_param(&self, key: &str) -> bool {
        match self {
            Self::VoltageSource | Self::CurrentSource => {
                matches!(key, "phase" | "freq" | "frequency")
            }
            _ => false,
        }
    }

    /// Whether a value is required on the element line.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::Ammeter | Self::Voltmeter)
    }
}
