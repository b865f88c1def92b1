use crate::circuit::Circuit;
use crate::error::{Result, SimError};
use crate::gate::GateOp;
use sha2::{Digest, Sha256};
use std::fmt::{self, Write};

/// Appended to every hex digest.
pub const CID_SUFFIX: &str = "\u{2014}amen";

/// Hash-derived label of a `(circuit, seed)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentId(String);

impl ContentId {
    pub fn compute(circuit: &Circuit, seed: u64) -> Self {
        let canonical = canonical_form(circuit, seed);
        let digest = Sha256::digest(canonical.as_bytes());
        ContentId(format!("{}{}", hex::encode(digest), CID_SUFFIX))
    }

    /// Accepts a string previously produced by [`ContentId::compute`].
    pub fn parse(s: &str) -> Result<Self> {
        let digest = s
            .strip_suffix(CID_SUFFIX)
            .ok_or_else(|| SimError::Validation(format!("content id {:?} lacks suffix", s)))?;
        let well_formed = digest.len() == 64
            && digest
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(SimError::Validation(format!(
                "content id {:?} is not 64 lowercase hex digits",
                s
            )));
        }
        Ok(ContentId(s.to_string()))
    }

    /// The 64 hex characters without the suffix.
    pub fn digest_hex(&self) -> &str {
        &self.0[..64]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `q=3;H(0);RX(1,7.853981633974483e-1);CNOT(2,0);seed=369`
///
/// Angles are written in shortest round-trip scientific notation, so two
/// distinct `f64` angles never share a canonical form.
pub fn canonical_form(circuit: &Circuit, seed: u64) -> String {
    let mut out = format!("q={};", circuit.num_qubits());
    for gate in circuit {
        let _ = match *gate {
            GateOp::H { target } => write!(out, "H({})", target),
            GateOp::RX { target, angle } => {
                write!(out, "RX({},{:e})", target, canonical_angle(angle))
            }
            GateOp::RZ { target, angle } => {
                write!(out, "RZ({},{:e})", target, canonical_angle(angle))
            }
            GateOp::CNOT { control, target } => write!(out, "CNOT({},{})", target, control),
        };
        out.push(';');
    }
    let _ = write!(out, "seed={}", seed);
    out
}

fn canonical_angle(angle: f64) -> f64 {
    // -0.0 and 0.0 are the same rotation
    if angle == 0.0 { 0.0 } else { angle }
}
