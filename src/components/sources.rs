//! Independent AC sources.

use crate::complex::{Complex, ComplexExt};

/// Parameters shared by voltage and current sources.
///
/// Magnitudes are RMS. Terminal `a` is the positive terminal: a voltage
/// source enforces `V(a) - V(b) = phasor()`, a current source drives
/// `phasor()` from `a` to `b` through itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Source {
    /// RMS magnitude (volts or amps)
    pub rms: f64,
    /// Phase angle in degrees
    pub phase_degrees: f64,
    /// Frequency the source was configured with, for display only.
    /// The solver always uses the circuit's shared drive frequency.
    pub frequency_hz: Option<f64>,
}

impl Source {
    /// Create a zero-phase source.
    pub fn new(rms: f64) -> Self {
        Self {
            rms,
            phase_degrees: 0.0,
            frequency_hz: None,
        }
    }

    /// Set the phase angle in degrees.
    pub fn with_phase(mut self, phase_degrees: f64) -> Self {
        self.phase_degrees = phase_degrees;
        self
    }

    /// Set the display frequency.
    pub fn with_frequency(mut self, frequency_hz: f64) -> Self {
        self.frequency_hz = Some(frequency_hz);
        self
    }

    /// The source value as an RMS phasor.
    pub fn phasor(&self) -> Complex {
        Complex::from_polar_degrees(self.rms, self.phase_degrees)
    }

    /// Check that magnitude and phase are usable.
    pub fn is_finite(&self) -> bool {
        self.rms.is_finite() && self.phase_degrees.is_finite()
    }

    /// Check whether the display frequency disagrees with the drive frequency.
    pub fn frequency_mismatch(&self, drive_hz: f64) -> bool {
        match self.frequency_hz {
            Some(f) => (f - drive_hz).abs() > 1e-9 * drive_hz.abs().max(1.0),
            None => false,
        }
    }
}
