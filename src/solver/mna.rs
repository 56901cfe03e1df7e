//! Complex MNA matrix assembly and solving.

use crate::complex::{Complex, ComplexExt, ONE, ZERO};
use crate::error::{PhasorError, Result};

/// Complex MNA system Ax = z.
#[derive(Debug, Clone)]
pub struct ComplexMna {
    /// System matrix A (row-major)
    pub a: Vec<Complex>,
    /// Source vector z
    pub z: Vec<Complex>,
    /// Matrix dimension
    pub size: usize,
}

impl ComplexMna {
    /// Create a zeroed system of the given dimension.
    pub fn new(size: usize) -> Self {
        Self {
            a: vec![ZERO; size * size],
            z: vec![ZERO; size],
            size,
        }
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Complex {
        self.a[row * self.size + col]
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: Complex) {
        self.a[row * self.size + col] += value;
    }

    /// Add to source vector element.
    pub fn add_source(&mut self, row: usize, value: Complex) {
        self.z[row] += value;
    }

    /// Stamp an admittance between two nets.
    /// For an admittance Y between unknowns i and j:
    ///   A[i,i] += Y
    ///   A[j,j] += Y
    ///   A[i,j] -= Y
    ///   A[j,i] -= Y
    /// `None` is the reference net and contributes nothing.
    pub fn stamp_admittance(&mut self, n1: Option<usize>, n2: Option<usize>, y: Complex) {
        if let Some(i) = n1 {
            self.add(i, i, y);
        }
        if let Some(j) = n2 {
            self.add(j, j, y);
        }
        if let (Some(i), Some(j)) = (n1, n2) {
            self.add(i, j, -y);
            self.add(j, i, -y);
        }
    }

    /// Stamp a voltage source between two nets with branch current at index br.
    /// V[n+] - V[n-] = E
    pub fn stamp_voltage_source(
        &mut self,
        n_pos: Option<usize>,
        n_neg: Option<usize>,
        br: usize,
        voltage: Complex,
    ) {
        if let Some(i) = n_pos {
            self.add(br, i, ONE);
            self.add(i, br, ONE);
        }
        if let Some(j) = n_neg {
            self.add(br, j, -ONE);
            self.add(j, br, -ONE);
        }
        self.z[br] = voltage;
    }

    /// Stamp a current source between two nets.
    /// Current flows from n+ through the source to n-.
    pub fn stamp_current_source(&mut self, n_pos: Option<usize>, n_neg: Option<usize>, current: Complex) {
        // Current leaves n+ and enters n-
        if let Some(i) = n_pos {
            self.add_source(i, -current);
        }
        if let Some(j) = n_neg {
            self.add_source(j, current);
        }
    }

    /// Check that no stamped entry is NaN or infinite.
    pub fn check_finite(&self) -> Result<()> {
        if let Some(pos) = self.a.iter().position(|v| !v.is_finite_value()) {
            return Err(PhasorError::singular(
                0,
                format!(
                    "non-finite matrix entry at ({}, {})",
                    pos / self.size,
                    pos % self.size
                ),
            ));
        }
        if let Some(row) = self.z.iter().position(|v| !v.is_finite_value()) {
            return Err(PhasorError::singular(
                0,
                format!("non-finite source entry in row {}", row),
            ));
        }
        Ok(())
    }

    /// Solve the system by Gauss-Jordan elimination with partial pivoting.
    ///
    /// At each step the row with the largest `|A[r][k]|²` is swapped into
    /// place, normalised, and its column eliminated from every other row, so
    /// the source vector ends up holding the solution. A pivot whose squared
    /// magnitude is below `pivot_epsilon`, or any non-finite intermediate, is
    /// reported as a singular system.
    pub fn solve(mut self, pivot_epsilon: f64) -> Result<Vec<Complex>> {
        let n = self.size;
        self.check_finite()?;

        for k in 0..n {
            // Find pivot
            let mut max_val = self.a[k * n + k].mag_sq();
            let mut max_row = k;
            for i in (k + 1)..n {
                let val = self.a[i * n + k].mag_sq();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if !(max_val >= pivot_epsilon) {
                return Err(PhasorError::singular(
                    k,
                    format!("pivot |a|^2 = {:.3e} below {:.1e}", max_val, pivot_epsilon),
                ));
            }

            // Swap rows if needed
            if max_row != k {
                for j in 0..n {
                    self.a.swap(k * n + j, max_row * n + j);
                }
                self.z.swap(k, max_row);
            }

            // Normalise the pivot row
            let pivot = self.a[k * n + k];
            let inv = ONE
                .checked_div(pivot)
                .ok_or_else(|| PhasorError::singular(k, "pivot not invertible"))?;
            for j in k..n {
                self.a[k * n + j] *= inv;
            }
            self.z[k] *= inv;

            // Eliminate column k from every other row
            for i in 0..n {
                if i == k {
                    continue;
                }
                let factor = self.a[i * n + k];
                if factor == ZERO {
                    continue;
                }
                for j in k..n {
                    let v = self.a[k * n + j];
                    self.a[i * n + j] -= factor * v;
                }
                let zk = self.z[k];
                self.z[i] -= factor * zk;
                if !self.z[i].is_finite_value() {
                    return Err(PhasorError::singular(
                        k,
                        format!("non-finite value in row {}", i),
                    ));
                }
            }

            log::trace!("elimination step {}: pivot row {} |p|^2={:.3e}", k, max_row, max_val);
        }

        if let Some(row) = self.z.iter().position(|v| !v.is_finite_value()) {
            return Err(PhasorError::singular(
                n,
                format!("non-finite solution in row {}", row),
            ));
        }

        Ok(self.z)
    }
}
