//! Plain-text result tables for the command line.

use std::fmt::Write;

use crate::circuit::{Circuit, NetId};
use crate::complex::{Complex, ComplexExt};
use crate::error::PhasorError;
use crate::solver::SolveResult;

/// Placeholder for a quantity that could not be computed.
pub const PLACEHOLDER: &str = "--";

/// How phasors are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PhasorFormat {
    /// Magnitude and angle in degrees
    #[default]
    Polar,
    /// Real and imaginary parts
    Rect,
}

/// Format one phasor.
pub fn format_phasor(z: Complex, format: PhasorFormat) -> String {
    match format {
        PhasorFormat::Polar => format!("{:.4} ∠ {:.2}°", z.norm(), z.phase_degrees()),
        PhasorFormat::Rect => {
            let sign = if z.im.is_sign_negative() { '-' } else { '+' };
            format!("{:.4} {} {:.4}j", z.re, sign, z.im.abs())
        }
    }
}

/// Render net voltages, net membership and per-element quantities of a
/// solved circuit.
pub fn render(circuit: &Circuit, result: &SolveResult, format: PhasorFormat) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "f = {} Hz", result.frequency_hz);

    let _ = writeln!(out, "\nNets");
    for n in 0..result.net_count() {
        let net = NetId(n);
        let members: Vec<String> = result
            .netlist
            .terminals_in(net)
            .into_iter()
            .map(|t| circuit.terminal_ref(t).to_string())
            .collect();
        let _ = writeln!(
            out,
            "  {:<6} {:<26} {}",
            net.to_string(),
            format_phasor(result.net_voltage(net), format),
            members.join(" ")
        );
    }

    let _ = writeln!(
        out,
        "\n  {:<10} {:<10} {:<26} {:<26} {}",
        "Element", "Kind", "Voltage", "Current", "Power (VA)"
    );
    for b in &result.branches {
        let _ = writeln!(
            out,
            "  {:<10} {:<10} {:<26} {:<26} {}",
            b.id,
            b.kind.label(),
            format_phasor(b.voltage, format),
            format_phasor(b.current, format),
            format_phasor(b.power(), PhasorFormat::Rect),
        );
    }

    out
}

/// Render a failed solve: the error followed by placeholder rows.
pub fn render_failure(circuit: &Circuit, err: &PhasorError) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "error: {}", err);
    let _ = writeln!(out, "\n  {:<10} {:<10} {:<26} {}", "Element", "Kind", "Voltage", "Current");
    for e in &circuit.elements {
        let _ = writeln!(
            out,
            "  {:<10} {:<10} {:<26} {}",
            e.id,
            e.kind.label(),
            PLACEHOLDER,
            PLACEHOLDER
        );
    }
    out
}

/// Render a frequency sweep as one row per frequency with the current
/// magnitude of each element.
pub fn render_sweep(
    circuit: &Circuit,
    points: &[(f64, crate::Result<SolveResult>)],
) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>12}", "f (Hz)");
    for e in &circuit.elements {
        let _ = write!(out, " {:>12}", format!("|I({})|", e.id));
    }
    out.push('\n');

    for (f, result) in points {
        let _ = write!(out, "{:>12.4}", f);
        for e in &circuit.elements {
            let cell = match result {
                Ok(r) => r
                    .current(&e.id)
                    .map(|i| format!("{:.6}", i.norm()))
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                Err(_) => PLACEHOLDER.to_string(),
            };
            let _ = write!(out, " {:>12}", cell);
        }
        out.push('\n');
    }
    out
}

/// Logarithmically spaced frequencies from `start` to `stop`, inclusive.
/// Falls back to linear spacing when either end is not positive.
pub fn sweep_points(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let steps = (points - 1) as f64;
            if start > 0.0 && stop > 0.0 {
                let (ls, le) = (start.log10(), stop.log10());
                (0..points)
                    .map(|k| 10f64.powf(ls + (le - ls) * k as f64 / steps))
                    .collect()
            } else {
                (0..points)
                    .map(|k| start + (stop - start) * k as f64 / steps)
                    .collect()
            }
        }
    }
}
