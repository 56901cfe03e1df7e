//! Circuit validation.

use std::collections::HashSet;

use crate::error::{PhasorError, Result};

use super::Circuit;

/// Validate a circuit before solving.
///
/// Checks:
/// - The circuit has at least one element
/// - Element ids are unique
/// - The drive frequency is finite and non-negative
/// - Every element has two distinct terminal names and a usable value
///
/// Wire targets are checked when nets are built.
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    if circuit.elements.is_empty() {
        return Err(PhasorError::EmptyCircuit);
    }

    if !circuit.frequency_hz.is_finite() || circuit.frequency_hz < 0.0 {
        return Err(PhasorError::InvalidFrequency {
            frequency_hz: circuit.frequency_hz,
        });
    }

    // Ids can collide through direct edits that bypass `add_element`
    let mut seen = HashSet::with_capacity(circuit.elements.len());
    for element in &circuit.elements {
        if !seen.insert(element.id.as_str()) {
            return Err(PhasorError::DuplicateElement {
                id: element.id.clone(),
            });
        }
        element.validate()?;
    }

    Ok(())
}
