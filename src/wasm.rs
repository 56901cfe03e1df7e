//! WASM bindings for Phasor Core.
//!
//! This module provides JavaScript-friendly bindings for solving a netlist
//! in a browser page. Quantities that could not be computed come back as
//! `undefined` so the page can show a placeholder.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmAcSolver } from 'phasor_core';
//!
//! await init();
//!
//! const solver = new WasmAcSolver(`
//!   V1 12
//!   R1 10
//!   .wire V1:a R1:a
//!   .wire R1:b V1:b
//! `);
//!
//! solver.set_frequency(60);
//! if (solver.solve()) {
//!   console.log(solver.current_magnitude("R1"));
//! } else {
//!   console.log(solver.last_error());
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{Circuit, NetId};
use crate::complex::ComplexExt;
use crate::dsl;
use crate::solver::{AcSolver, SolveResult};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible AC solver holding one circuit and its latest result.
#[wasm_bindgen]
pub struct WasmAcSolver {
    circuit: Circuit,
    solver: AcSolver,
    result: Option<SolveResult>,
    last_error: Option<String>,
}

#[wasm_bindgen]
impl WasmAcSolver {
    /// Create a solver from a netlist string.
    ///
    /// # Returns
    /// A new `WasmAcSolver` or an error if the netlist does not parse.
    #[wasm_bindgen(constructor)]
    pub fn new(netlist: &str) -> Result<WasmAcSolver, JsValue> {
        let ast = dsl::parse(netlist).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let circuit = Circuit::from_ast(ast).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmAcSolver {
            circuit,
            solver: AcSolver::new(),
            result: None,
            last_error: None,
        })
    }

    /// Change the shared drive frequency. Clears the previous result.
    #[wasm_bindgen]
    pub fn set_frequency(&mut self, frequency_hz: f64) {
        self.circuit.frequency_hz = frequency_hz;
        self.result = None;
    }

    /// Current drive frequency in Hz.
    #[wasm_bindgen(getter)]
    pub fn frequency(&self) -> f64 {
        self.circuit.frequency_hz
    }

    /// Solve the circuit. Returns `false` on failure; see [`last_error`].
    ///
    /// [`last_error`]: WasmAcSolver::last_error
    #[wasm_bindgen]
    pub fn solve(&mut self) -> bool {
        match self.solver.solve(&self.circuit) {
            Ok(result) => {
                self.result = Some(result);
                self.last_error = None;
                true
            }
            Err(e) => {
                self.result = None;
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// Message of the last failed solve.
    #[wasm_bindgen]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.clone()
    }

    /// Number of nets, including the reference.
    #[wasm_bindgen]
    pub fn net_count(&self) -> Option<usize> {
        self.result.as_ref().map(SolveResult::net_count)
    }

    /// Voltage magnitude of a net (RMS).
    #[wasm_bindgen]
    pub fn net_voltage_magnitude(&self, net: usize) -> Option<f64> {
        let r = self.result.as_ref()?;
        (net < r.net_count()).then(|| r.net_voltage(NetId(net)).norm())
    }

    /// Voltage phase of a net in degrees.
    #[wasm_bindgen]
    pub fn net_voltage_phase(&self, net: usize) -> Option<f64> {
        let r = self.result.as_ref()?;
        (net < r.net_count()).then(|| r.net_voltage(NetId(net)).phase_degrees())
    }

    /// Current magnitude through an element (RMS).
    #[wasm_bindgen]
    pub fn current_magnitude(&self, id: &str) -> Option<f64> {
        self.result.as_ref()?.current(id).map(|i| i.norm())
    }

    /// Current phase through an element in degrees.
    #[wasm_bindgen]
    pub fn current_phase(&self, id: &str) -> Option<f64> {
        self.result.as_ref()?.current(id).map(|i| i.phase_degrees())
    }

    /// Voltage magnitude across an element (RMS).
    #[wasm_bindgen]
    pub fn voltage_magnitude(&self, id: &str) -> Option<f64> {
        self.result.as_ref()?.voltage_across(id).map(|v| v.norm())
    }

    /// Magnitude a meter displays: amps for an ammeter, volts for a
    /// voltmeter.
    #[wasm_bindgen]
    pub fn meter_reading(&self, id: &str) -> Option<f64> {
        self.result.as_ref()?.meter_reading(id).map(|z| z.norm())
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
