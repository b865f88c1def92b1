use crate::bloch::{self, BlochVector};
use crate::circuit::Circuit;
use crate::config::SimulatorConfig;
use crate::error::{Result, SimError};
use crate::events::{CompletionInfo, Event, GateInfo, SimulationStartInfo};
use crate::gate::{GateOp, HADAMARD, rx_matrix, rz_phases};
use crate::state::StateVector;
use tracing::{debug, warn};

pub trait Simulator {
    /// Runs the whole circuit from |0...0⟩ and returns the final state.
    fn simulate(&self, circuit: &Circuit) -> Result<Simulation>;
}

/// Output of a successful run. The only way to obtain one is through a
/// [`Simulator`], so reducing a state that was never simulated cannot happen.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    state: StateVector,
}

impl Simulation {
    pub fn statevector(&self) -> &StateVector {
        &self.state
    }

    pub fn bloch_vectors(&self) -> Vec<BlochVector> {
        bloch::reduce(&self.state)
    }
}

/// Dense statevector backend: `O(gates * 2^n)` time, `2^n` amplitudes of memory.
#[derive(Debug, Clone, Default)]
pub struct StatevectorSimulator {
    config: SimulatorConfig,
}

impl StatevectorSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Like [`Simulator::simulate`], also returning one event per gate.
    pub fn simulate_traced(&self, circuit: &Circuit) -> Result<(Simulation, Vec<Event>)> {
        let mut events = Vec::with_capacity(circuit.len() + 2);
        let simulation = self.run(circuit, Some(&mut events))?;
        Ok((simulation, events))
    }

    fn run(&self, circuit: &Circuit, mut events: Option<&mut Vec<Event>>) -> Result<Simulation> {
        if let Some(events) = events.as_deref_mut() {
            events.push(Event::SimulationStart(SimulationStartInfo {
                num_qubits: circuit.num_qubits(),
                num_gates: circuit.len(),
            }));
        }

        let mut state = StateVector::new(circuit.num_qubits());
        for (i, gate) in circuit.iter().enumerate() {
            apply_gate(&mut state, gate);
            debug!(step = i + 1, %gate, "applied gate");
            if let Some(events) = events.as_deref_mut() {
                events.push(Event::GateApplication(GateInfo {
                    step: i + 1,
                    gate: gate.to_string(),
                    norm_sqr: state.norm_sqr(),
                }));
            }
        }

        let norm_sqr = state.norm_sqr();
        if let Some(events) = events {
            events.push(Event::SimulationComplete(CompletionInfo { norm_sqr }));
        }
        self.check_norm(norm_sqr)?;
        Ok(Simulation { state })
    }

    fn check_norm(&self, norm_sqr: f64) -> Result<()> {
        let tolerance = self.config.norm_tolerance;
        if !((norm_sqr - 1.0).abs() <= tolerance) {
            warn!(norm_sqr, tolerance, "statevector norm check failed");
            return Err(SimError::NumericalInstability {
                norm_sqr,
                tolerance,
            });
        }
        Ok(())
    }
}

impl Simulator for StatevectorSimulator {
    fn simulate(&self, circuit: &Circuit) -> Result<Simulation> {
        self.run(circuit, None)
    }
}

fn apply_gate(state: &mut StateVector, gate: &GateOp) {
    match *gate {
        GateOp::H { target } => state.apply_single_qubit_gate(&HADAMARD, target),
        GateOp::RX { target, angle } => state.apply_single_qubit_gate(&rx_matrix(angle), target),
        GateOp::RZ { target, angle } => {
            let (phase0, phase1) = rz_phases(angle);
            state.apply_diagonal(phase0, phase1, target)
        }
        GateOp::CNOT { control, target } => state.apply_cx(control, target),
    }
}
