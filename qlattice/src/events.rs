use serde::Serialize;
use std::io::{self, Write};

/// Step-by-step record of a simulation run, emitted when tracing is asked for.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "eventType")]
pub enum Event {
    SimulationStart(SimulationStartInfo),
    GateApplication(GateInfo),
    SimulationComplete(CompletionInfo),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStartInfo {
    pub num_qubits: usize,
    pub num_gates: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GateInfo {
    pub step: usize,
    pub gate: String,
    pub norm_sqr: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionInfo {
    pub norm_sqr: f64,
}

/// Writes one event as a single JSON line.
pub fn emit_event(event: &Event, writer: &mut impl Write) -> io::Result<()> {
    let json_output = serde_json::to_string(event)?;
    writeln!(writer, "{}", json_output)
}
