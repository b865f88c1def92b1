use crate::bloch::BlochVector;
use crate::builder::{GateSequenceBuilder, parse_qasm};
use crate::cid::ContentId;
use crate::circuit::Circuit;
use crate::config::SimulatorConfig;
use crate::error::Result;
use crate::events::Event;
use crate::export;
use crate::simulator::{Simulator, StatevectorSimulator};
use qlattice_types::{ExportRecord, GateDescriptor};
use tracing::info;

/// Where the gates of a run come from.
#[derive(Debug, Clone, PartialEq)]
pub enum GateSource {
    /// One generated gate per qubit.
    Fibonacci { num_qubits: usize },
    Descriptors {
        num_qubits: usize,
        gates: Vec<GateDescriptor>,
    },
    /// OpenQASM 2.0 text; the width comes from its `qreg`.
    Qasm(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub source: GateSource,
    pub seed: u64,
    /// Collect a per-gate event trace.
    pub trace: bool,
}

impl RunRequest {
    pub fn new(source: GateSource, seed: u64) -> Self {
        Self {
            source,
            seed,
            trace: false,
        }
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub circuit: Circuit,
    pub seed: u64,
    pub cid: ContentId,
    pub bloch: Vec<BlochVector>,
    pub record: ExportRecord,
    /// Empty unless the request asked for a trace.
    pub events: Vec<Event>,
}

pub fn build_circuit(source: &GateSource, config: &SimulatorConfig) -> Result<Circuit> {
    let circuit = match source {
        GateSource::Fibonacci { num_qubits } => {
            GateSequenceBuilder::with_config(*num_qubits, config)?.fibonacci().build()
        }
        GateSource::Descriptors { num_qubits, gates } => {
            GateSequenceBuilder::with_config(*num_qubits, config)?
                .descriptors(gates)?
                .build()
        }
        GateSource::Qasm(qasm) => parse_qasm(qasm, config)?,
    };
    Ok(circuit)
}

/// build -> simulate -> reduce -> identify -> export.
pub fn run(request: &RunRequest, config: &SimulatorConfig) -> Result<RunOutput> {
    let circuit = build_circuit(&request.source, config)?;
    let simulator = StatevectorSimulator::new(*config);
    let (simulation, events) = if request.trace {
        simulator.simulate_traced(&circuit)?
    } else {
        (simulator.simulate(&circuit)?, Vec::new())
    };

    let bloch = simulation.bloch_vectors();
    let cid = ContentId::compute(&circuit, request.seed);
    let record = export::assemble(&circuit, request.seed, simulation.statevector(), &cid);
    info!(
        num_qubits = circuit.num_qubits(),
        num_gates = circuit.len(),
        seed = request.seed,
        cid = %cid,
        "run complete"
    );

    Ok(RunOutput {
        circuit,
        seed: request.seed,
        cid,
        bloch,
        record,
        events,
    })
}
