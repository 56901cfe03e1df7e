//! Element models for AC circuit solving.
//!
//! This module provides the circuit elements a caller can place:
//! - Linear: Resistor, Capacitor, Inductor
//! - Sources: Voltage Source, Current Source
//! - Ideal meters: Ammeter, Voltmeter
//!
//! Every element has exactly two named terminals. Passive elements and
//! meters are stamped as admittances; sources are stamped by the solver.

mod linear;
mod sources;

pub use linear::{capacitor_admittance, impedance, inductor_admittance, resistor_admittance};
pub use sources::Source;

use std::fmt;

use crate::dsl::{ElementDef, ElementType};
use crate::error::{PhasorError, Result};

/// Default name of an element's first terminal.
pub const TERMINAL_A: &str = "a";

/// Default name of an element's second terminal.
pub const TERMINAL_B: &str = "b";

/// What an element is, together with its defining value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementKind {
    Resistor { ohms: f64 },
    Capacitor { farads: f64 },
    Inductor { henries: f64 },
    VoltageSource(Source),
    CurrentSource(Source),
    /// Ideal ammeter, modelled as a very small resistance
    Ammeter,
    /// Ideal voltmeter, modelled as a very large resistance
    Voltmeter,
}

impl ElementKind {
    /// Short human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Resistor { .. } => "resistor",
            ElementKind::Capacitor { .. } => "capacitor",
            ElementKind::Inductor { .. } => "inductor",
            ElementKind::VoltageSource(_) => "voltage source",
            ElementKind::CurrentSource(_) => "current source",
            ElementKind::Ammeter => "ammeter",
            ElementKind::Voltmeter => "voltmeter",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A circuit element instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Unique id within the circuit
    pub id: String,
    pub kind: ElementKind,
    /// Terminal names, `[a, b]`
    pub terminals: [String; 2],
}

impl Element {
    /// Create an element with the default terminal names `a` and `b`.
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            terminals: [TERMINAL_A.to_string(), TERMINAL_B.to_string()],
        }
    }

    /// Rename the two terminals (e.g. `left`/`right`).
    pub fn with_terminals(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.terminals = [a.into(), b.into()];
        self
    }

    pub fn resistor(id: impl Into<String>, ohms: f64) -> Self {
        Self::new(id, ElementKind::Resistor { ohms })
    }

    pub fn capacitor(id: impl Into<String>, farads: f64) -> Self {
        Self::new(id, ElementKind::Capacitor { farads })
    }

    pub fn inductor(id: impl Into<String>, henries: f64) -> Self {
        Self::new(id, ElementKind::Inductor { henries })
    }

    pub fn voltage_source(id: impl Into<String>, source: Source) -> Self {
        Self::new(id, ElementKind::VoltageSource(source))
    }

    pub fn current_source(id: impl Into<String>, source: Source) -> Self {
        Self::new(id, ElementKind::CurrentSource(source))
    }

    pub fn ammeter(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Ammeter)
    }

    pub fn voltmeter(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Voltmeter)
    }

    /// Side (0 or 1) of a terminal name, if the element has it.
    pub fn terminal_side(&self, name: &str) -> Option<usize> {
        self.terminals.iter().position(|t| t == name)
    }

    /// Check the element's terminals and defining value.
    ///
    /// Passive values must be finite and strictly positive; source values
    /// must be finite. Meters carry no value of their own.
    pub fn validate(&self) -> Result<()> {
        if self.terminals[0] == self.terminals[1] {
            return Err(PhasorError::DuplicateTerminal {
                element: self.id.clone(),
                terminal: self.terminals[0].clone(),
            });
        }

        let positive = |value: f64, what: &str| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(PhasorError::degenerate(
                    &self.id,
                    format!("{} must be finite and positive, got {}", what, value),
                ))
            }
        };

        match &self.kind {
            ElementKind::Resistor { ohms } => positive(*ohms, "resistance"),
            ElementKind::Capacitor { farads } => positive(*farads, "capacitance"),
            ElementKind::Inductor { henries } => positive(*henries, "inductance"),
            ElementKind::VoltageSource(s) | ElementKind::CurrentSource(s) => {
                if s.is_finite() {
                    Ok(())
                } else {
                    Err(PhasorError::degenerate(
                        &self.id,
                        "source magnitude and phase must be finite",
                    ))
                }
            }
            ElementKind::Ammeter | ElementKind::Voltmeter => Ok(()),
        }
    }

    /// Create an element from a DSL definition.
    pub fn from_def(def: &ElementDef) -> Result<Self> {
        let require_value = |what: &str| {
            def.value.ok_or_else(|| {
                PhasorError::invalid_element(&def.name, def.line, format!("{} requires a value", what))
            })
        };

        let source = |value: f64| {
            let mut s = Source::new(value);
            if let Some(phase) = def.params.get("phase") {
                s = s.with_phase(*phase);
            }
            if let Some(freq) = def.params.get("freq").or(def.params.get("frequency")) {
                s = s.with_frequency(*freq);
            }
            s
        };

        let kind = match def.element_type {
            ElementType::Resistor => ElementKind::Resistor {
                ohms: require_value("resistor")?,
            },
            ElementType::Capacitor => ElementKind::Capacitor {
                farads: require_value("capacitor")?,
            },
            ElementType::Inductor => ElementKind::Inductor {
                henries: require_value("inductor")?,
            },
            ElementType::VoltageSource => {
                ElementKind::VoltageSource(source(require_value("voltage source")?))
            }
            ElementType::CurrentSource => {
                ElementKind::CurrentSource(source(require_value("current source")?))
            }
            ElementType::Ammeter => ElementKind::Ammeter,
            ElementType::Voltmeter => ElementKind::Voltmeter,
        };

        let mut element = Element::new(def.name.clone(), kind);
        if let Some([a, b]) = &def.terminals {
            element = element.with_terminals(a.clone(), b.clone());
        }
        Ok(element)
    }
}
