/// Everything that can go wrong between a gate list and an export record.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid circuit: {0}")]
    Validation(String),
    #[error("Invalid qubit index {qubit} for a {num_qubits}-qubit circuit")]
    QubitOutOfRange { qubit: i64, num_qubits: usize },
    #[error("Unsupported gate type: {0:?}")]
    UnsupportedGate(String),
    #[error("CNOT control and target are both qubit {0}")]
    SelfTarget(usize),
    #[error("Statevector norm drifted: |psi|^2 = {norm_sqr}, tolerance {tolerance}")]
    NumericalInstability { norm_sqr: f64, tolerance: f64 },
    #[error("QASM parse error on line {line}: {message}")]
    Qasm { line: usize, message: String },
}

impl SimError {
    /// True for errors raised while building a circuit from its description.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SimError::Validation(_) | SimError::QubitOutOfRange { .. } | SimError::Qasm { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
