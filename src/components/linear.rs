//! Linear passive admittances: resistor, capacitor, inductor, ideal meters.
//!
//! All functions take the angular drive frequency `omega = 2*pi*f` and return
//! the complex admittance `Y = 1/Z` that is stamped into the MNA matrix and
//! later reused to derive branch currents.

use crate::complex::{Complex, ComplexExt, ONE};

/// Admittance of a resistor: `1/R`.
pub fn resistor_admittance(ohms: f64) -> Complex {
    Complex::new(1.0 / ohms, 0.0)
}

/// Admittance of a capacitor: `jwC`.
///
/// At `omega = 0` this is an open circuit (zero admittance).
pub fn capacitor_admittance(farads: f64, omega: f64) -> Complex {
    Complex::new(0.0, omega * farads)
}

/// Admittance of an inductor: `1/(jwL) = -j/(wL)`.
///
/// Returns `None` when `wL` vanishes (a DC short has no finite admittance).
pub fn inductor_admittance(henries: f64, omega: f64) -> Option<Complex> {
    ONE.checked_div(Complex::new(0.0, omega * henries))
}

/// Impedance `Z = 1/Y`, `None` for a zero admittance (open circuit).
pub fn impedance(admittance: Complex) -> Option<Complex> {
    ONE.checked_div(admittance)
}
