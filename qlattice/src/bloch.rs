//! Per-qubit Bloch vectors obtained by tracing out the rest of the register.
//!
//! For qubit `i` the reduced density matrix is
//!
//! ```text
//! ρ00 = Σ |a_k|²            over k with bit i = 0
//! ρ11 = Σ |a_k|²            over k with bit i = 1
//! ρ01 = Σ a_k · conj(a_k')  over k with bit i = 0, k' = k | (1 << i)
//! ρ10 = conj(ρ01)
//! ```
//!
//! and the Bloch vector is `x = 2 Re ρ01`, `y = 2 Im ρ10`, `z = ρ00 − ρ11`.
//! With this sign choice `(|0⟩ + i|1⟩)/√2` sits at `y = +1`.

use crate::state::StateVector;
use num_complex::Complex;
use serde::Serialize;

/// A point in the Bloch ball. Unit length for a qubit that is not entangled
/// with the rest of the register, shorter otherwise.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BlochVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// True when the reduced state is pure, i.e. the qubit is unentangled.
    pub fn is_pure(&self, tolerance: f64) -> bool {
        (self.magnitude() - 1.0).abs() < tolerance
    }
}

/// 2x2 reduced density matrix of one qubit, `[[ρ00, ρ01], [ρ10, ρ11]]`.
pub type ReducedDensityMatrix = [[Complex<f64>; 2]; 2];

pub fn reduced_density_matrix(state: &StateVector, qubit: usize) -> ReducedDensityMatrix {
    let mask = 1 << qubit;
    let amplitudes = state.amplitudes();

    let mut rho00 = 0.0;
    let mut rho11 = 0.0;
    let mut rho01 = Complex::new(0.0, 0.0);
    for (k, amp) in amplitudes.iter().enumerate() {
        if k & mask == 0 {
            rho00 += amp.norm_sqr();
            rho01 += amp * amplitudes[k | mask].conj();
        } else {
            rho11 += amp.norm_sqr();
        }
    }

    [
        [Complex::new(rho00, 0.0), rho01],
        [rho01.conj(), Complex::new(rho11, 0.0)],
    ]
}

/// Bloch vector of `qubit`. Panics if `qubit >= state.num_qubits()`.
pub fn reduce_qubit(state: &StateVector, qubit: usize) -> BlochVector {
    assert!(
        qubit < state.num_qubits(),
        "qubit {} out of range for a {}-qubit state",
        qubit,
        state.num_qubits()
    );
    let rho = reduced_density_matrix(state, qubit);
    BlochVector {
        x: (2.0 * rho[0][1].re).clamp(-1.0, 1.0),
        y: (2.0 * rho[1][0].im).clamp(-1.0, 1.0),
        z: (rho[0][0].re - rho[1][1].re).clamp(-1.0, 1.0),
    }
}

/// One Bloch vector per qubit, indexed by qubit.
pub fn reduce(state: &StateVector) -> Vec<BlochVector> {
    (0..state.num_qubits())
        .map(|qubit| reduce_qubit(state, qubit))
        .collect()
}
