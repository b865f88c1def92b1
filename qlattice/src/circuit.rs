use crate::gate::GateOp;
use std::fmt::Write;

/// A fixed-width circuit and its gates in application order.
///
/// Built by [`crate::builder::GateSequenceBuilder`]; once built it cannot be
/// changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<GateOp>,
}

impl Circuit {
    pub(crate) fn from_parts(num_qubits: usize, gates: Vec<GateOp>) -> Self {
        Self { num_qubits, gates }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn gates(&self) -> &[GateOp] {
        &self.gates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GateOp> {
        self.gates.iter()
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Renders the circuit as OpenQASM 2.0. Angles use the shortest
    /// representation that parses back to the same `f64`.
    pub fn to_qasm(&self) -> String {
        let mut qasm = String::new();
        qasm.push_str("OPENQASM 2.0;\n");
        qasm.push_str("include \"qelib1.inc\";\n");
        let _ = writeln!(qasm, "qreg q[{}];", self.num_qubits);
        for gate in &self.gates {
            let _ = match *gate {
                GateOp::H { target } => writeln!(qasm, "h q[{}];", target),
                GateOp::RX { target, angle } => writeln!(qasm, "rx({}) q[{}];", angle, target),
                GateOp::RZ { target, angle } => writeln!(qasm, "rz({}) q[{}];", angle, target),
                GateOp::CNOT { control, target } => {
                    writeln!(qasm, "cx q[{}],q[{}];", control, target)
                }
            };
        }
        qasm
    }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a GateOp;
    type IntoIter = std::slice::Iter<'a, GateOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.gates.iter()
    }
}
