/// Knobs shared by the builder and the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    /// Largest accepted `| |psi|^2 - 1 |` after a run.
    pub norm_tolerance: f64,
    /// Upper bound on circuit width; the state vector holds `2^max_qubits`
    /// amplitudes. Never effective above [`HARD_MAX_QUBITS`].
    pub max_qubits: usize,
}

pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_MAX_QUBITS: usize = 24;
/// 2^30 amplitudes take 16 GiB; wider circuits are refused whatever the config says.
pub const HARD_MAX_QUBITS: usize = 30;

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            norm_tolerance: DEFAULT_NORM_TOLERANCE,
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }
}

impl SimulatorConfig {
    pub fn with_norm_tolerance(mut self, norm_tolerance: f64) -> Self {
        self.norm_tolerance = norm_tolerance;
        self
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// The cap the builder actually enforces.
    pub fn effective_max_qubits(&self) -> usize {
        self.max_qubits.min(HARD_MAX_QUBITS)
    }
}
