use crate::error::{Result, SimError};
use crate::gate::GateMatrix;
use num_complex::Complex;
use serde::Serialize;

/// Amplitudes over the `2^n` computational basis states. Qubit 0 is the
/// least significant bit of the basis index.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// |0...0⟩. Callers bound `num_qubits` first; see `GateSequenceBuilder`.
    pub(crate) fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits; // 2^num_qubits
        let mut amplitudes = vec![Complex::new(0.0, 0.0); size];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Self {
            num_qubits,
            amplitudes,
        }
    }

    /// Wraps amplitudes computed elsewhere. The length must be a power of
    /// two and the vector must be normalized to within `tolerance`.
    pub fn from_amplitudes(amplitudes: Vec<Complex<f64>>, tolerance: f64) -> Result<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(SimError::Validation(format!(
                "statevector length {} is not a power of two >= 2",
                len
            )));
        }
        let state = Self {
            num_qubits: len.trailing_zeros() as usize,
            amplitudes,
        };
        let norm_sqr = state.norm_sqr();
        if (norm_sqr - 1.0).abs() > tolerance {
            return Err(SimError::Validation(format!(
                "statevector is not normalized (|psi|^2 = {})",
                norm_sqr
            )));
        }
        Ok(state)
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Complex<f64>> {
        self.amplitudes.iter()
    }

    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Applies a 2x2 unitary to `target_qubit`. Each pair of indices that
    /// differ only in the target bit is read fully before either slot is
    /// written.
    pub(crate) fn apply_single_qubit_gate(
        &mut self,
        gate_matrix: &GateMatrix,
        target_qubit: usize,
    ) {
        let k = 1 << target_qubit;

        for i in 0..self.amplitudes.len() {
            if (i & k) == 0 {
                let j = i | k;
                let amp_i = self.amplitudes[i];
                let amp_j = self.amplitudes[j];

                self.amplitudes[i] = gate_matrix[0][0] * amp_i + gate_matrix[0][1] * amp_j;
                self.amplitudes[j] = gate_matrix[1][0] * amp_i + gate_matrix[1][1] * amp_j;
            }
        }
    }

    /// Applies `diag(phase0, phase1)` to `target_qubit`.
    pub(crate) fn apply_diagonal(
        &mut self,
        phase0: Complex<f64>,
        phase1: Complex<f64>,
        target_qubit: usize,
    ) {
        let k = 1 << target_qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if (i & k) == 0 { phase0 } else { phase1 };
        }
    }

    pub(crate) fn apply_cx(&mut self, control_qubit: usize, target_qubit: usize) {
        let control_mask = 1 << control_qubit;
        let target_mask = 1 << target_qubit;

        for i in 0..self.amplitudes.len() {
            if (i & control_mask) != 0 && (i & target_mask) == 0 {
                let j = i | target_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }
}
