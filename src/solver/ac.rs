//! Steady-state AC solver interface.

use crate::circuit::{validate_circuit, BranchId, Circuit, NetId, NetList, VarIndex};
use crate::complex::{Complex, ZERO};
use crate::components::{
    capacitor_admittance, inductor_admittance, resistor_admittance, ElementKind,
};
use crate::error::{PhasorError, Result};

use super::mna::ComplexMna;
use super::result::{BranchResult, SolveResult};
use super::{DEFAULT_AMMETER_RESISTANCE, DEFAULT_PIVOT_EPSILON, DEFAULT_VOLTMETER_RESISTANCE};

/// Configuration for the solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Smallest acceptable squared pivot magnitude.
    ///
    /// The threshold is absolute. With the default `1e-12`, a net whose
    /// only path to the rest of the circuit is above 1 MΩ has a pivot below
    /// it and the solve reports a singular system.
    pub pivot_epsilon: f64,
    /// Resistance used for ideal ammeters (ohms).
    pub ammeter_resistance: f64,
    /// Resistance used for ideal voltmeters (ohms).
    pub voltmeter_resistance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_epsilon: DEFAULT_PIVOT_EPSILON,
            ammeter_resistance: DEFAULT_AMMETER_RESISTANCE,
            voltmeter_resistance: DEFAULT_VOLTMETER_RESISTANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the singular-pivot threshold (compared against `|pivot|²`).
    ///
    /// The default rejects any net reached only through more than 1 MΩ;
    /// circuits made of such impedances need a smaller threshold.
    pub fn with_pivot_epsilon(mut self, pivot_epsilon: f64) -> Self {
        self.pivot_epsilon = pivot_epsilon;
        self
    }

    /// Set the resistance that stands in for an ideal ammeter.
    pub fn with_ammeter_resistance(mut self, ohms: f64) -> Self {
        self.ammeter_resistance = ohms;
        self
    }

    /// Set the resistance that stands in for an ideal voltmeter.
    pub fn with_voltmeter_resistance(mut self, ohms: f64) -> Self {
        self.voltmeter_resistance = ohms;
        self
    }
}

/// How one element enters the MNA system. Computed once per solve and used
/// for both stamping and deriving currents.
#[derive(Debug, Clone, Copy)]
enum ElementStamp {
    Admittance(Complex),
    VoltageSource { branch: BranchId, phasor: Complex },
    CurrentSource(Complex),
}

/// Steady-state AC circuit solver.
///
/// The solver holds only its configuration; every call to [`solve`](Self::solve)
/// is independent and works on the snapshot it is given.
#[derive(Debug, Clone, Default)]
pub struct AcSolver {
    config: SolverConfig,
}

impl AcSolver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve a circuit at its drive frequency.
    pub fn solve(&self, circuit: &Circuit) -> Result<SolveResult> {
        validate_circuit(circuit)?;
        let netlist = circuit.build_nets()?;
        let omega = circuit.omega();
        let plan = self.plan(circuit, omega)?;

        let num_nets = netlist.net_count();
        let num_branches = plan
            .iter()
            .filter(|s| matches!(s, ElementStamp::VoltageSource { .. }))
            .count();
        let size = (num_nets - 1) + num_branches;

        log::debug!(
            "solving {} elements at {} Hz: {} nets, {} voltage sources, system size {}",
            circuit.elements.len(),
            circuit.frequency_hz,
            num_nets,
            num_branches,
            size
        );

        let mut matrix = ComplexMna::new(size);
        for (idx, stamp) in plan.iter().enumerate() {
            let [na, nb] = netlist.element_nets(idx);
            let ia = netlist.unknown_index(na);
            let ib = netlist.unknown_index(nb);
            match *stamp {
                ElementStamp::Admittance(y) => matrix.stamp_admittance(ia, ib, y),
                ElementStamp::VoltageSource { branch, phasor } => {
                    let br = VarIndex::Current(branch).to_index(num_nets);
                    matrix.stamp_voltage_source(ia, ib, br, phasor);
                }
                ElementStamp::CurrentSource(phasor) => matrix.stamp_current_source(ia, ib, phasor),
            }
        }

        let x = matrix.solve(self.config.pivot_epsilon)?;
        Ok(Self::derive(circuit, netlist, omega, &plan, &x))
    }

    /// Solve the same circuit at each of the given frequencies.
    ///
    /// Each point is an independent solve; a failure at one frequency does
    /// not affect the others.
    pub fn sweep(&self, circuit: &Circuit, frequencies: &[f64]) -> Vec<(f64, Result<SolveResult>)> {
        let mut snapshot = circuit.clone();
        frequencies
            .iter()
            .map(|&f| {
                snapshot.frequency_hz = f;
                (f, self.solve(&snapshot))
            })
            .collect()
    }

    /// Classify every element and compute its admittance or source phasor.
    fn plan(&self, circuit: &Circuit, omega: f64) -> Result<Vec<ElementStamp>> {
        let mut next_branch = 0usize;
        let meter = |id: &str, ohms: f64, what: &str| -> Result<Complex> {
            if ohms.is_finite() && ohms > 0.0 {
                Ok(resistor_admittance(ohms))
            } else {
                Err(PhasorError::degenerate(
                    id,
                    format!("{} resistance must be finite and positive, got {}", what, ohms),
                ))
            }
        };

        circuit
            .elements
            .iter()
            .map(|element| -> Result<ElementStamp> {
                let stamp = match &element.kind {
                    ElementKind::Resistor { ohms } => {
                        ElementStamp::Admittance(resistor_admittance(*ohms))
                    }
                    ElementKind::Capacitor { farads } => {
                        ElementStamp::Admittance(capacitor_admittance(*farads, omega))
                    }
                    ElementKind::Inductor { henries } => {
                        let y = inductor_admittance(*henries, omega).ok_or_else(|| {
                            PhasorError::singular(
                                0,
                                format!(
                                    "inductor '{}' has no finite admittance at {} Hz",
                                    element.id, circuit.frequency_hz
                                ),
                            )
                        })?;
                        ElementStamp::Admittance(y)
                    }
                    ElementKind::Ammeter => ElementStamp::Admittance(meter(
                        &element.id,
                        self.config.ammeter_resistance,
                        "ammeter",
                    )?),
                    ElementKind::Voltmeter => ElementStamp::Admittance(meter(
                        &element.id,
                        self.config.voltmeter_resistance,
                        "voltmeter",
                    )?),
                    ElementKind::VoltageSource(source) => {
                        if source.frequency_mismatch(circuit.frequency_hz) {
                            log::warn!(
                                "source '{}' is set to {:?} Hz but the circuit is solved at {} Hz",
                                element.id,
                                source.frequency_hz,
                                circuit.frequency_hz
                            );
                        }
                        let branch = BranchId(next_branch);
                        next_branch += 1;
                        ElementStamp::VoltageSource {
                            branch,
                            phasor: source.phasor(),
                        }
                    }
                    ElementKind::CurrentSource(source) => {
                        if source.frequency_mismatch(circuit.frequency_hz) {
                            log::warn!(
                                "source '{}' is set to {:?} Hz but the circuit is solved at {} Hz",
                                element.id,
                                source.frequency_hz,
                                circuit.frequency_hz
                            );
                        }
                        ElementStamp::CurrentSource(source.phasor())
                    }
                };
                Ok(stamp)
            })
            .collect()
    }

    /// Turn the solution vector into per-net and per-element quantities.
    fn derive(
        circuit: &Circuit,
        netlist: NetList,
        omega: f64,
        plan: &[ElementStamp],
        x: &[Complex],
    ) -> SolveResult {
        let num_nets = netlist.net_count();
        let net_voltages: Vec<Complex> = (0..num_nets)
            .map(|n| match netlist.unknown_index(NetId(n)) {
                Some(i) => x[i],
                None => ZERO,
            })
            .collect();

        let branches = circuit
            .elements
            .iter()
            .zip(plan)
            .enumerate()
            .map(|(idx, (element, stamp))| {
                let nets = netlist.element_nets(idx);
                let voltage = net_voltages[nets[0].0] - net_voltages[nets[1].0];
                let (current, admittance) = match *stamp {
                    ElementStamp::Admittance(y) => (voltage * y, Some(y)),
                    ElementStamp::VoltageSource { branch, .. } => {
                        (x[VarIndex::Current(branch).to_index(num_nets)], None)
                    }
                    ElementStamp::CurrentSource(phasor) => (phasor, None),
                };
                BranchResult {
                    id: element.id.clone(),
                    kind: element.kind,
                    terminals: element.terminals.clone(),
                    nets,
                    voltage,
                    current,
                    admittance,
                }
            })
            .collect();

        SolveResult {
            frequency_hz: circuit.frequency_hz,
            omega,
            netlist,
            net_voltages,
            branches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::TerminalRef;
    use crate::complex::ComplexExt;
    use crate::components::{Element, Source};
    use crate::error::ErrorKind;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn solve(circuit: &Circuit) -> Result<SolveResult> {
        AcSolver::new().solve(circuit)
    }

    /// Voltage source and resistors wired in one loop: V1.a -> R1 -> R2 ... -> V1.b
    fn series_loop(volts: f64, resistors: &[f64]) -> Circuit {
        let mut c = Circuit::new(50.0)
            .with_element(Element::voltage_source("V1", Source::new(volts)))
            .unwrap();
        let mut prev = ("V1".to_string(), "a");
        for (i, r) in resistors.iter().enumerate() {
            let id = format!("R{}", i + 1);
            c.add_element(Element::resistor(id.clone(), *r)).unwrap();
            c.connect(TerminalRef::new(prev.0.clone(), prev.1), TerminalRef::new(id.clone(), "a"));
            prev = (id, "b");
        }
        c.connect(TerminalRef::new(prev.0, prev.1), TerminalRef::new("V1", "b"));
        c
    }

    /// Resistors all connected across one voltage source.
    fn parallel(volts: f64, resistors: &[f64]) -> Circuit {
        let mut c = Circuit::new(50.0)
            .with_element(Element::voltage_source("V1", Source::new(volts)))
            .unwrap();
        for (i, r) in resistors.iter().enumerate() {
            let id = format!("R{}", i + 1);
            c.add_element(Element::resistor(id.clone(), *r)).unwrap();
            c.connect(TerminalRef::new("V1", "a"), TerminalRef::new(id.clone(), "a"));
            c.connect(TerminalRef::new("V1", "b"), TerminalRef::new(id, "b"));
        }
        c
    }

    fn assert_kcl(result: &SolveResult) {
        for n in 1..result.net_count() {
            let r = result.kcl_residual(NetId(n));
            assert!(r.norm() < 1e-9, "KCL violated at net {}: {}", n, r);
        }
    }

    #[test]
    fn test_series_two_resistors() {
        let result = solve(&series_loop(12.0, &[10.0, 10.0])).unwrap();
        let i = result.current("R1").unwrap();
        assert_abs_diff_eq!(i.norm(), 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(i.phase_degrees(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.voltage_across("R1").unwrap().norm(), 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.voltage_across("R2").unwrap().norm(), 6.0, epsilon = 1e-12);

        // Source current flows a -> b through the source, opposite to the load current
        let (id, i_src) = result.voltage_source_currents().next().unwrap();
        assert_eq!(id, "V1");
        assert_abs_diff_eq!(i_src.re, -0.6, epsilon = 1e-12);
        assert_kcl(&result);
    }

    #[test]
    fn test_series_reduction() {
        let rs = [4.7, 22.0, 100.0, 1.0, 68.0];
        let result = solve(&series_loop(9.0, &rs)).unwrap();
        let total: f64 = rs.iter().sum();
        let expected = 9.0 / total;
        for (i, r) in rs.iter().enumerate() {
            let id = format!("R{}", i + 1);
            assert_abs_diff_eq!(result.current(&id).unwrap().re, expected, epsilon = 1e-12);
            assert_abs_diff_eq!(result.voltage_across(&id).unwrap().re, expected * r, epsilon = 1e-10);
        }
        assert_kcl(&result);
    }

    #[test]
    fn test_parallel_two_resistors() {
        let result = solve(&parallel(12.0, &[10.0, 10.0])).unwrap();
        let i_src = result.current("V1").unwrap();
        assert_abs_diff_eq!(i_src.norm(), 2.4, epsilon = 1e-12);
        assert_abs_diff_eq!(result.current("R1").unwrap().norm(), 1.2, epsilon = 1e-12);
        assert_abs_diff_eq!(result.current("R2").unwrap().norm(), 1.2, epsilon = 1e-12);
        // Equivalent resistance 5 ohms
        assert_abs_diff_eq!(12.0 / i_src.norm(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_reduction() {
        let rs = [10.0, 33.0, 47.0, 150.0];
        let result = solve(&parallel(5.0, &rs)).unwrap();
        let g: f64 = rs.iter().map(|r| 1.0 / r).sum();
        assert_abs_diff_eq!(result.current("V1").unwrap().norm(), 5.0 * g, epsilon = 1e-12);
        assert_kcl(&result);
    }

    #[test]
    fn test_ground_invariant() {
        let mut c = series_loop(12.0, &[10.0, 20.0]);
        assert_eq!(solve(&c).unwrap().net_voltage(NetId::REFERENCE), ZERO);

        c.set_reference(TerminalRef::new("R1", "b"));
        let result = solve(&c).unwrap();
        assert_eq!(result.net_voltages[0], ZERO);
        let net = result.net_of(&TerminalRef::new("R2", "a")).unwrap();
        assert_eq!(net, NetId::REFERENCE);
    }

    #[test]
    fn test_reference_choice_does_not_change_currents() {
        let mut c = series_loop(12.0, &[10.0, 20.0, 30.0]);
        let a = solve(&c).unwrap();
        c.set_reference(TerminalRef::new("R3", "a"));
        let b = solve(&c).unwrap();
        for id in ["V1", "R1", "R2", "R3"] {
            let d = a.current(id).unwrap() - b.current(id).unwrap();
            assert!(d.norm() < 1e-12);
            let d = a.voltage_across(id).unwrap() - b.voltage_across(id).unwrap();
            assert!(d.norm() < 1e-12);
        }
    }

    #[test]
    fn test_rlc_resonance() {
        let (r, l, cap): (f64, f64, f64) = (10.0, 0.1, 10e-6);
        let f0 = 1.0 / (2.0 * PI * (l * cap).sqrt());
        let mut c = Circuit::new(f0)
            .with_element(Element::voltage_source("V1", Source::new(12.0)))
            .unwrap()
            .with_element(Element::resistor("R1", r))
            .unwrap()
            .with_element(Element::inductor("L1", l))
            .unwrap()
            .with_element(Element::capacitor("C1", cap))
            .unwrap()
            .wire(("V1", "a"), ("R1", "a"))
            .wire(("R1", "b"), ("L1", "a"))
            .wire(("L1", "b"), ("C1", "a"))
            .wire(("C1", "b"), ("V1", "b"));
        let result = solve(&c).unwrap();

        let y_l = result.branch("L1").unwrap().admittance.unwrap();
        let y_c = result.branch("C1").unwrap().admittance.unwrap();
        let x_l = impedance_of(y_l).im;
        let x_c = impedance_of(y_c).im;
        assert_abs_diff_eq!(x_l, -x_c, epsilon = 1e-9);

        let i = result.current("R1").unwrap();
        assert_abs_diff_eq!(i.norm(), 12.0 / r, epsilon = 1e-9);
        assert_abs_diff_eq!(i.phase_degrees(), 0.0, epsilon = 1e-6);
        assert_kcl(&result);

        // Off resonance the current lags (inductive side)
        c.frequency_hz = 2.0 * f0;
        let i = solve(&c).unwrap().current("R1").unwrap();
        assert!(i.norm() < 12.0 / r);
        assert!(i.phase_degrees() < 0.0);
    }

    fn impedance_of(y: Complex) -> Complex {
        crate::components::impedance(y).unwrap()
    }

    #[test]
    fn test_current_source_into_resistor() {
        let c = Circuit::new(50.0)
            .with_element(Element::current_source("I1", Source::new(1.0)))
            .unwrap()
            .with_element(Element::resistor("R1", 10.0))
            .unwrap()
            .wire(("I1", "a"), ("R1", "a"))
            .wire(("I1", "b"), ("R1", "b"));
        let result = solve(&c).unwrap();
        let b_net = result.net_of(&TerminalRef::new("R1", "b")).unwrap();
        assert_abs_diff_eq!(result.net_voltage(b_net).re, 10.0, epsilon = 1e-12);
        assert_eq!(result.current("I1").unwrap(), Complex::new(1.0, 0.0));
        assert_abs_diff_eq!(result.current("R1").unwrap().re, -1.0, epsilon = 1e-12);
        assert_kcl(&result);
    }

    #[test]
    fn test_kcl_mixed_circuit() {
        // Two sources with different phases driving an RLC bridge
        let c = Circuit::new(60.0)
            .with_element(Element::voltage_source("V1", Source::new(10.0).with_phase(30.0)))
            .unwrap()
            .with_element(Element::current_source("I1", Source::new(0.2).with_phase(-45.0)))
            .unwrap()
            .with_element(Element::resistor("R1", 50.0))
            .unwrap()
            .with_element(Element::resistor("R2", 75.0))
            .unwrap()
            .with_element(Element::capacitor("C1", 22e-6))
            .unwrap()
            .with_element(Element::inductor("L1", 0.2))
            .unwrap()
            .with_element(Element::ammeter("A1"))
            .unwrap()
            .wire(("V1", "a"), ("R1", "a"))
            .wire(("R1", "b"), ("C1", "a"))
            .wire(("C1", "a"), ("L1", "a"))
            .wire(("C1", "b"), ("A1", "a"))
            .wire(("A1", "b"), ("V1", "b"))
            .wire(("L1", "b"), ("R2", "a"))
            .wire(("R2", "b"), ("V1", "b"))
            .wire(("I1", "a"), ("V1", "b"))
            .wire(("I1", "b"), ("L1", "b"));
        let result = solve(&c).unwrap();
        assert_kcl(&result);

        // Passive currents match V * Y with the stamped admittance
        for b in &result.branches {
            if let Some(y) = b.admittance {
                assert!((b.current - b.voltage * y).norm() < 1e-15);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let c = series_loop(12.0, &[10.0, 15.0, 33.0]);
        let solver = AcSolver::new();
        let a = solver.solve(&c).unwrap();
        let b = solver.solve(&c).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_isolated_terminal() {
        // R3 hangs off the middle net with its other end unconnected
        let c = series_loop(12.0, &[10.0, 10.0])
            .with_element(Element::resistor("R3", 100.0))
            .unwrap()
            .wire(("R1", "b"), ("R3", "a"));
        let result = solve(&c).unwrap();
        assert_eq!(result.net_count(), 4);
        let free = result.net_of(&TerminalRef::new("R3", "b")).unwrap();
        assert_eq!(result.netlist.terminals_in(free).len(), 1);
        assert!(result.current("R3").unwrap().norm() < 1e-12);
        assert_abs_diff_eq!(result.current("R1").unwrap().re, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_shorted_source_is_singular() {
        let c = Circuit::new(50.0)
            .with_element(Element::voltage_source("V1", Source::new(12.0)))
            .unwrap()
            .with_element(Element::resistor("R1", 10.0))
            .unwrap()
            .wire(("V1", "a"), ("R1", "a"))
            .wire(("R1", "b"), ("V1", "b"))
            .wire(("V1", "a"), ("V1", "b"));
        let err = solve(&c).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SingularSystem);
    }

    #[test]
    fn test_conflicting_voltage_sources_are_singular() {
        let c = parallel(12.0, &[10.0])
            .with_element(Element::voltage_source("V2", Source::new(6.0)))
            .unwrap()
            .wire(("V1", "a"), ("V2", "a"))
            .wire(("V1", "b"), ("V2", "b"));
        assert_eq!(solve(&c).unwrap_err().kind(), ErrorKind::SingularSystem);
    }

    #[test]
    fn test_floating_island_is_singular() {
        let c = series_loop(12.0, &[10.0])
            .with_element(Element::resistor("R8", 5.0))
            .unwrap()
            .with_element(Element::resistor("R9", 5.0))
            .unwrap()
            .wire(("R8", "a"), ("R9", "a"))
            .wire(("R8", "b"), ("R9", "b"));
        assert_eq!(solve(&c).unwrap_err().kind(), ErrorKind::SingularSystem);
    }

    #[test]
    fn test_inductor_at_dc_is_singular() {
        let mut c = series_loop(5.0, &[10.0])
            .with_element(Element::inductor("L1", 0.01))
            .unwrap()
            .wire(("R1", "a"), ("L1", "a"))
            .wire(("R1", "b"), ("L1", "b"));
        c.frequency_hz = 0.0;
        let err = solve(&c).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SingularSystem);
    }

    #[test]
    fn test_capacitor_at_dc_is_open() {
        let mut c = series_loop(5.0, &[10.0])
            .with_element(Element::capacitor("C1", 1e-6))
            .unwrap();
        // Put C1 in series: R1.b -> C1 -> V1.b
        c.wires.pop();
        c.connect(TerminalRef::new("R1", "b"), TerminalRef::new("C1", "a"));
        c.connect(TerminalRef::new("C1", "b"), TerminalRef::new("V1", "b"));
        c.frequency_hz = 0.0;
        let result = solve(&c).unwrap();
        assert!(result.current("R1").unwrap().norm() < 1e-12);
        assert_abs_diff_eq!(result.voltage_across("C1").unwrap().re, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_value_rejected() {
        let c = series_loop(12.0, &[10.0, 0.0]);
        assert_eq!(solve(&c).unwrap_err().kind(), ErrorKind::DegenerateComponent);

        let solver = AcSolver::with_config(SolverConfig::new().with_ammeter_resistance(0.0));
        let c = series_loop(12.0, &[10.0])
            .with_element(Element::ammeter("A1"))
            .unwrap();
        assert_eq!(
            solver.solve(&c).unwrap_err().kind(),
            ErrorKind::DegenerateComponent
        );
    }

    #[test]
    fn test_meter_readings() {
        // V1 -> A1 -> R1 -> R2 -> V1, voltmeter across R2
        let c = Circuit::new(50.0)
            .with_element(Element::voltage_source("V1", Source::new(12.0)))
            .unwrap()
            .with_element(Element::ammeter("A1"))
            .unwrap()
            .with_element(Element::resistor("R1", 10.0))
            .unwrap()
            .with_element(Element::resistor("R2", 10.0))
            .unwrap()
            .with_element(Element::voltmeter("M1"))
            .unwrap()
            .wire(("V1", "a"), ("A1", "a"))
            .wire(("A1", "b"), ("R1", "a"))
            .wire(("R1", "b"), ("R2", "a"))
            .wire(("R2", "b"), ("V1", "b"))
            .wire(("M1", "a"), ("R2", "a"))
            .wire(("M1", "b"), ("R2", "b"));
        let result = solve(&c).unwrap();
        assert_abs_diff_eq!(result.meter_reading("A1").unwrap().norm(), 0.6, epsilon = 1e-2);
        assert_abs_diff_eq!(result.meter_reading("M1").unwrap().norm(), 6.0, epsilon = 1e-2);
        assert!(result.meter_reading("R1").is_none());
        assert!(result.meter_reading("nope").is_none());
    }

    #[test]
    fn test_power() {
        let result = solve(&series_loop(12.0, &[10.0, 10.0])).unwrap();
        let p_r1 = result.power("R1").unwrap();
        assert_abs_diff_eq!(p_r1.re, 0.36 * 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p_r1.im, 0.0, epsilon = 1e-12);
        // The source delivers what the resistors absorb
        let p_src = result.power("V1").unwrap();
        assert_abs_diff_eq!(p_src.re, -7.2, epsilon = 1e-12);
    }

    #[test]
    fn test_source_frequency_mismatch_still_solves() {
        let mut c = series_loop(12.0, &[10.0, 10.0]);
        if let Some(e) = c.element_mut("V1") {
            e.kind = ElementKind::VoltageSource(Source::new(12.0).with_frequency(60.0));
        }
        let result = solve(&c).unwrap();
        assert_abs_diff_eq!(result.frequency_hz, 50.0);
        assert_abs_diff_eq!(result.current("R1").unwrap().re, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_sweep_rc_low_pass() {
        let c = Circuit::new(50.0)
            .with_element(Element::voltage_source("V1", Source::new(1.0)))
            .unwrap()
            .with_element(Element::resistor("R1", 1000.0))
            .unwrap()
            .with_element(Element::capacitor("C1", 1e-6))
            .unwrap()
            .wire(("V1", "a"), ("R1", "a"))
            .wire(("R1", "b"), ("C1", "a"))
            .wire(("C1", "b"), ("V1", "b"));
        let freqs = [10.0, 100.0, 1000.0, 10000.0];
        let points = AcSolver::new().sweep(&c, &freqs);
        assert_eq!(points.len(), 4);

        let gains: Vec<f64> = points
            .iter()
            .map(|(_, r)| r.as_ref().unwrap().voltage_across("C1").unwrap().norm())
            .collect();
        assert!(gains.windows(2).all(|w| w[1] < w[0]));

        // Corner frequency: |H| = 1/sqrt(2)
        let fc = 1.0 / (2.0 * PI * 1000.0 * 1e-6);
        let at_fc = AcSolver::new().sweep(&c, &[fc]);
        let v = at_fc[0].1.as_ref().unwrap().voltage_across("C1").unwrap();
        assert_abs_diff_eq!(v.norm(), 1.0 / 2f64.sqrt(), epsilon = 1e-9);
        assert_abs_diff_eq!(v.phase_degrees(), -45.0, epsilon = 1e-6);
    }

    #[test]
    fn test_malformed_wire_fails_before_solving() {
        let c = series_loop(12.0, &[10.0]).wire(("R1", "a"), ("GONE", "a"));
        assert_eq!(solve(&c).unwrap_err().kind(), ErrorKind::MalformedCircuit);
    }

    #[test]
    fn test_high_impedance_needs_smaller_pivot_epsilon() {
        let c = Circuit::new(50.0)
            .with_element(Element::current_source("I1", Source::new(1e-6)))
            .unwrap()
            .with_element(Element::resistor("R1", 2e6))
            .unwrap()
            .wire(("I1", "a"), ("R1", "a"))
            .wire(("I1", "b"), ("R1", "b"));

        let err = solve(&c).unwrap_err();
        assert!(matches!(err, PhasorError::SingularSystem { step: 0, .. }));

        let solver = AcSolver::with_config(SolverConfig::new().with_pivot_epsilon(1e-20));
        let result = solver.solve(&c).unwrap();
        assert_abs_diff_eq!(result.voltage_across("R1").unwrap().norm(), 2.0, epsilon = 1e-9);
        assert_kcl(&result);
    }
}
