use crate::cid::ContentId;
use crate::circuit::Circuit;
use crate::state::StateVector;
use qlattice_types::{AmplitudeRecord, ExportRecord};

/// Fixed closing line carried by every export.
pub const INVOCATION: &str = "Valhalla rises on silver wings\u{2014}amen.";

/// Snapshots a finished run into the plain record handed to persistence and
/// rendering collaborators. Performs no I/O.
pub fn assemble(
    circuit: &Circuit,
    seed: u64,
    state: &StateVector,
    cid: &ContentId,
) -> ExportRecord {
    ExportRecord {
        num_qubits: circuit.num_qubits(),
        seed,
        statevector: state
            .iter()
            .map(|a| AmplitudeRecord {
                real: a.re,
                imag: a.im,
            })
            .collect(),
        cid: cid.to_string(),
        invocation: INVOCATION.to_string(),
    }
}
