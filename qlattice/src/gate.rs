use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// A validated gate. Only the builder hands these to a `Circuit`, so indices
/// are always in range and a CNOT never targets its own control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateOp {
    H { target: usize },
    RX { target: usize, angle: f64 },
    RZ { target: usize, angle: f64 },
    CNOT { control: usize, target: usize },
}

impl GateOp {
    /// Descriptor name, as accepted in gate lists.
    pub fn name(&self) -> &'static str {
        match self {
            GateOp::H { .. } => "H",
            GateOp::RX { .. } => "RX",
            GateOp::RZ { .. } => "RZ",
            GateOp::CNOT { .. } => "CNOT",
        }
    }

    pub fn target(&self) -> usize {
        match *self {
            GateOp::H { target }
            | GateOp::RX { target, .. }
            | GateOp::RZ { target, .. }
            | GateOp::CNOT { target, .. } => target,
        }
    }

    pub fn control(&self) -> Option<usize> {
        match *self {
            GateOp::CNOT { control, .. } => Some(control),
            _ => None,
        }
    }

    pub fn angle(&self) -> Option<f64> {
        match *self {
            GateOp::RX { angle, .. } | GateOp::RZ { angle, .. } => Some(angle),
            _ => None,
        }
    }

    /// Every qubit index the gate touches.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            GateOp::CNOT { control, target } => vec![control, target],
            _ => vec![self.target()],
        }
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GateOp::H { target } => write!(f, "H(q{})", target),
            GateOp::RX { target, angle } => write!(f, "RX(q{}, {:.6})", target, angle),
            GateOp::RZ { target, angle } => write!(f, "RZ(q{}, {:.6})", target, angle),
            GateOp::CNOT { control, target } => write!(f, "CNOT(q{} -> q{})", control, target),
        }
    }
}

// custom type for gate matrices
pub type GateMatrix = [[Complex<f64>; 2]; 2];

pub const HADAMARD: GateMatrix = [
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(FRAC_1_SQRT_2, 0.0),
    ],
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(-FRAC_1_SQRT_2, 0.0),
    ],
];

/// Rx(θ) = cos(θ/2) I - i sin(θ/2) X
pub fn rx_matrix(theta: f64) -> GateMatrix {
    let (st, ct) = (theta * 0.5).sin_cos();
    [
        [Complex::new(ct, 0.0), Complex::new(0.0, -st)],
        [Complex::new(0.0, -st), Complex::new(ct, 0.0)],
    ]
}

/// Diagonal of Rz(θ) = diag(e^{-iθ/2}, e^{+iθ/2}).
pub fn rz_phases(theta: f64) -> (Complex<f64>, Complex<f64>) {
    let half = theta * 0.5;
    (Complex::from_polar(1.0, -half), Complex::from_polar(1.0, half))
}
