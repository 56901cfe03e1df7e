//! Circuit snapshot: elements, wires and the shared drive frequency.

use std::collections::HashMap;

use super::netlist::NetList;
use super::types::{TerminalId, TerminalRef, Wire};
use crate::components::Element;
use crate::dsl::CircuitAst;
use crate::error::{PhasorError, Result};

/// A complete circuit description, passed to the solver as an immutable
/// snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    /// All elements, in input order
    pub elements: Vec<Element>,

    /// Terminal equivalences
    pub wires: Vec<Wire>,

    /// Shared AC drive frequency in Hz
    pub frequency_hz: f64,

    /// Terminal whose net is the reference (ground). When `None`, the net of
    /// the first element's first terminal is the reference.
    pub reference: Option<TerminalRef>,
}

impl Circuit {
    /// Create an empty circuit driven at `frequency_hz`.
    pub fn new(frequency_hz: f64) -> Self {
        Self {
            elements: Vec::new(),
            wires: Vec::new(),
            frequency_hz,
            reference: None,
        }
    }

    /// Build a circuit from a parsed AST.
    pub fn from_ast(ast: CircuitAst) -> Result<Self> {
        let mut circuit = Circuit::new(ast.frequency_hz.unwrap_or(crate::DEFAULT_FREQUENCY_HZ));

        for def in &ast.elements {
            circuit.add_element(Element::from_def(def)?)?;
        }

        for wire in ast.wires {
            // A multi-terminal wire line chains all its terminals into one net
            for pair in wire.terminals.windows(2) {
                circuit.connect(pair[0].clone(), pair[1].clone());
            }
        }

        circuit.reference = ast.reference;
        Ok(circuit)
    }

    /// Add an element. Fails if the id is already taken.
    pub fn add_element(&mut self, element: Element) -> Result<()> {
        if self.element_index(&element.id).is_some() {
            return Err(PhasorError::DuplicateElement { id: element.id });
        }
        self.elements.push(element);
        Ok(())
    }

    /// Builder-style [`add_element`](Self::add_element).
    pub fn with_element(mut self, element: Element) -> Result<Self> {
        self.add_element(element)?;
        Ok(self)
    }

    /// Wire two terminals together.
    pub fn connect(&mut self, from: TerminalRef, to: TerminalRef) {
        self.wires.push(Wire::new(from, to));
    }

    /// Builder-style [`connect`](Self::connect) using `element:terminal`
    /// pairs.
    pub fn wire(mut self, from: (&str, &str), to: (&str, &str)) -> Self {
        self.connect(TerminalRef::new(from.0, from.1), TerminalRef::new(to.0, to.1));
        self
    }

    /// Remove an element together with every wire that references it.
    pub fn remove_element(&mut self, id: &str) -> Option<Element> {
        let idx = self.element_index(id)?;
        let removed = self.elements.remove(idx);
        self.wires.retain(|w| !w.touches(id));
        if self.reference.as_ref().is_some_and(|r| r.element == id) {
            self.reference = None;
        }
        Some(removed)
    }

    /// Designate the terminal whose net is the reference.
    pub fn set_reference(&mut self, terminal: TerminalRef) {
        self.reference = Some(terminal);
    }

    /// Find an element by id.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Find an element by id for editing.
    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Position of an element in input order.
    pub fn element_index(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Angular drive frequency in rad/s.
    pub fn omega(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.frequency_hz
    }

    /// Resolve a terminal reference into its arena index.
    pub fn resolve_terminal(&self, terminal: &TerminalRef) -> Result<TerminalId> {
        let idx = self
            .element_index(&terminal.element)
            .ok_or_else(|| PhasorError::UnknownElement {
                element: terminal.element.clone(),
            })?;
        let side = self.elements[idx]
            .terminal_side(&terminal.terminal)
            .ok_or_else(|| PhasorError::UnknownTerminal {
                element: terminal.element.clone(),
                terminal: terminal.terminal.clone(),
            })?;
        Ok(TerminalId::new(idx, side))
    }

    /// Resolve every wire into a pair of arena indices.
    pub fn resolve_wires(&self) -> Result<Vec<(TerminalId, TerminalId)>> {
        // Index once instead of scanning elements for every wire end
        let index: HashMap<&str, usize> = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.as_str(), i))
            .collect();

        let resolve = |t: &TerminalRef| -> Result<TerminalId> {
            let idx = *index
                .get(t.element.as_str())
                .ok_or_else(|| PhasorError::UnknownElement {
                    element: t.element.clone(),
                })?;
            let side = self.elements[idx].terminal_side(&t.terminal).ok_or_else(|| {
                PhasorError::UnknownTerminal {
                    element: t.element.clone(),
                    terminal: t.terminal.clone(),
                }
            })?;
            Ok(TerminalId::new(idx, side))
        };

        self.wires
            .iter()
            .map(|w| -> Result<(TerminalId, TerminalId)> {
                Ok((resolve(&w.from)?, resolve(&w.to)?))
            })
            .collect()
    }

    /// Compute the nets of this circuit.
    ///
    /// Fails if a wire or the reference designation points at a missing
    /// element or terminal.
    pub fn build_nets(&self) -> Result<NetList> {
        let wires = self.resolve_wires()?;
        let reference = self
            .reference
            .as_ref()
            .map(|r| self.resolve_terminal(r))
            .transpose()?;
        Ok(NetList::build(self.elements.len(), &wires, reference))
    }

    /// Caller-facing reference for an arena terminal.
    pub fn terminal_ref(&self, terminal: TerminalId) -> TerminalRef {
        let e = &self.elements[terminal.element_index()];
        TerminalRef::new(e.id.clone(), e.terminals[terminal.side()].clone())
    }
}
