use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One entry of a gate list as it arrives from callers, e.g.
/// `{ "type": "RX", "target": 1, "params": { "angle": 2.22 } }`.
///
/// Nothing here is validated; indices are signed so that a negative index
/// reaches the circuit builder and is reported there instead of failing
/// inside the JSON decoder.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct GateDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub target: i64,
    #[serde(default, skip_serializing_if = "GateParams::is_empty")]
    pub params: GateParams,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
pub struct GateParams {
    /// Rotation angle in radians (RX, RZ).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Control qubit (CNOT).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<i64>,
}

impl GateParams {
    pub fn is_empty(&self) -> bool {
        self.angle.is_none() && self.control.is_none()
    }
}

impl GateDescriptor {
    pub fn new(kind: impl Into<String>, target: i64) -> Self {
        Self {
            kind: kind.into(),
            target,
            params: GateParams::default(),
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.params.angle = Some(angle);
        self
    }

    pub fn with_control(mut self, control: i64) -> Self {
        self.params.control = Some(control);
        self
    }
}

/// A complex amplitude split into its real and imaginary parts.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, JsonSchema)]
pub struct AmplitudeRecord {
    pub real: f64,
    pub imag: f64,
}

/// Snapshot of a finished run, handed to whatever persists or renders it.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub num_qubits: usize,
    pub seed: u64,
    pub statevector: Vec<AmplitudeRecord>,
    pub cid: String,
    pub invocation: String,
}
