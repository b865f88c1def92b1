use crate::circuit::Circuit;
use crate::config::SimulatorConfig;
use crate::error::{Result, SimError};
use crate::gate::GateOp;
use qlattice_types::GateDescriptor;
use std::f64::consts::{PI, SQRT_2};
use tracing::debug;

const FIBONACCI: [u32; 7] = [1, 1, 2, 3, 5, 8, 13];

/// Rotation used by RX/RZ descriptors that carry no `angle`.
pub const DEFAULT_ANGLE: f64 = PI / SQRT_2;

/// Collects gates for a circuit of fixed width, validating each one as it
/// arrives. Nothing invalid can reach [`Circuit`].
#[derive(Debug, Clone)]
pub struct GateSequenceBuilder {
    num_qubits: usize,
    gates: Vec<GateOp>,
}

impl GateSequenceBuilder {
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_config(num_qubits, &SimulatorConfig::default())
    }

    pub fn with_config(num_qubits: usize, config: &SimulatorConfig) -> Result<Self> {
        if num_qubits == 0 {
            return Err(SimError::Validation(
                "a circuit needs at least one qubit".to_string(),
            ));
        }
        let max_qubits = config.effective_max_qubits();
        if num_qubits > max_qubits {
            return Err(SimError::Validation(format!(
                "{} qubits requested, at most {} supported",
                num_qubits, max_qubits
            )));
        }
        Ok(Self {
            num_qubits,
            gates: Vec::new(),
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Appends one gate per qubit following the Fibonacci pattern: qubit `i`
    /// takes `f = FIBONACCI[i % 7]` and gets `H` when `f` is even, otherwise
    /// `RX(PI / f * SQRT_2)`.
    pub fn fibonacci(mut self) -> Self {
        for i in 0..self.num_qubits {
            let f = FIBONACCI[i % FIBONACCI.len()];
            let gate = if f % 2 == 0 {
                GateOp::H { target: i }
            } else {
                GateOp::RX {
                    target: i,
                    angle: PI / f as f64 * SQRT_2,
                }
            };
            self.gates.push(gate);
        }
        self
    }

    /// Validates and appends a list of descriptors, stopping at the first
    /// bad one.
    pub fn descriptors(mut self, descriptors: &[GateDescriptor]) -> Result<Self> {
        for (i, descriptor) in descriptors.iter().enumerate() {
            let gate = gate_from_descriptor(descriptor, self.num_qubits).inspect_err(|e| {
                debug!(index = i, error = %e, "rejected gate descriptor");
            })?;
            self.gates.push(gate);
        }
        Ok(self)
    }

    pub fn push(&mut self, gate: GateOp) -> Result<&mut Self> {
        validate_gate(&gate, self.num_qubits)?;
        self.gates.push(gate);
        Ok(self)
    }

    pub fn build(self) -> Circuit {
        Circuit::from_parts(self.num_qubits, self.gates)
    }
}

fn qubit_index(raw: i64, num_qubits: usize) -> Result<usize> {
    match usize::try_from(raw) {
        Ok(q) if q < num_qubits => Ok(q),
        _ => Err(SimError::QubitOutOfRange {
            qubit: raw,
            num_qubits,
        }),
    }
}

fn finite_angle(angle: f64) -> Result<f64> {
    if angle.is_finite() {
        Ok(angle)
    } else {
        Err(SimError::Validation(format!(
            "rotation angle must be finite, got {}",
            angle
        )))
    }
}

/// Turns one loosely-typed descriptor into a checked gate.
pub fn gate_from_descriptor(descriptor: &GateDescriptor, num_qubits: usize) -> Result<GateOp> {
    let params = &descriptor.params;
    let gate = match descriptor.kind.as_str() {
        "H" => GateOp::H {
            target: qubit_index(descriptor.target, num_qubits)?,
        },
        "RX" => GateOp::RX {
            target: qubit_index(descriptor.target, num_qubits)?,
            angle: finite_angle(params.angle.unwrap_or(DEFAULT_ANGLE))?,
        },
        "RZ" => GateOp::RZ {
            target: qubit_index(descriptor.target, num_qubits)?,
            angle: finite_angle(params.angle.unwrap_or(DEFAULT_ANGLE))?,
        },
        "CNOT" => GateOp::CNOT {
            control: qubit_index(params.control.unwrap_or(0), num_qubits)?,
            target: qubit_index(descriptor.target, num_qubits)?,
        },
        other => return Err(SimError::UnsupportedGate(other.to_string())),
    };
    validate_gate(&gate, num_qubits)?;
    Ok(gate)
}

fn validate_gate(gate: &GateOp, num_qubits: usize) -> Result<()> {
    for q in gate.qubits() {
        if q >= num_qubits {
            return Err(SimError::QubitOutOfRange {
                qubit: q as i64,
                num_qubits,
            });
        }
    }
    if let Some(angle) = gate.angle() {
        finite_angle(angle)?;
    }
    if let GateOp::CNOT { control, target } = *gate {
        if control == target {
            return Err(SimError::SelfTarget(control));
        }
    }
    Ok(())
}

/// Reads the OpenQASM 2.0 subset this crate can simulate: a single `qreg`
/// followed by `h`, `rx(θ)`, `rz(θ)` and `cx`. A line may hold several
/// `;`-terminated statements. `OPENQASM`, `include`, `creg`, `barrier`,
/// blank lines and `//` comments are skipped. Anything else is an error;
/// instructions are never dropped.
pub fn parse_qasm(qasm_str: &str, config: &SimulatorConfig) -> Result<Circuit> {
    let mut builder: Option<(String, GateSequenceBuilder)> = None;

    for (line_no, line) in qasm_str.lines().enumerate() {
        let line_no = line_no + 1;
        let code = line.split("//").next().unwrap_or("").trim();
        if code.is_empty() {
            continue;
        }
        let mut statements: Vec<&str> = code.split(';').collect();
        // text after the last ';' is an unterminated statement
        if statements.pop().is_some_and(|tail| !tail.trim().is_empty()) {
            return Err(qasm_error(line_no, "missing ';'"));
        }
        for stmt in statements {
            let stmt = stmt.trim();
            if stmt.is_empty() {
                continue;
            }
            parse_statement(stmt, line_no, config, &mut builder)?;
        }
    }

    builder
        .map(|(_, b)| b.build())
        .ok_or_else(|| qasm_error(0, "no qreg declaration found"))
}

fn parse_statement(
    stmt: &str,
    line_no: usize,
    config: &SimulatorConfig,
    builder: &mut Option<(String, GateSequenceBuilder)>,
) -> Result<()> {
    let (head, operands) = split_instruction(stmt);
    let (name, arg) = match head.find('(') {
        Some(open) => {
            let close = head
                .rfind(')')
                .filter(|&close| close > open)
                .ok_or_else(|| qasm_error(line_no, "unclosed parameter list"))?;
            (&head[..open], Some(&head[open + 1..close]))
        }
        None => (head, None),
    };

    match name {
        "OPENQASM" | "include" | "creg" | "barrier" => return Ok(()),
        "qreg" => {
            if builder.is_some() {
                return Err(qasm_error(line_no, "only one qreg is supported"));
            }
            let (reg, size) = parse_register(operands, line_no)?;
            *builder = Some((reg, GateSequenceBuilder::with_config(size, config)?));
            return Ok(());
        }
        "h" | "rx" | "rz" | "cx" => {}
        other => return Err(SimError::UnsupportedGate(other.to_string())),
    }

    let (reg, b) = builder
        .as_mut()
        .ok_or_else(|| qasm_error(line_no, "gate before qreg declaration"))?;
    let reg = reg.as_str();
    let qubits = operands
        .split(',')
        .map(|op| parse_qubit(op.trim(), reg, line_no))
        .collect::<Result<Vec<i64>>>()?;
    let num_qubits = b.num_qubits();

    let gate = match (name, arg, qubits.as_slice()) {
        ("h", None, [t]) => GateOp::H {
            target: qubit_index(*t, num_qubits)?,
        },
        ("rx", Some(a), [t]) => GateOp::RX {
            target: qubit_index(*t, num_qubits)?,
            angle: parse_angle(a).ok_or_else(|| qasm_error(line_no, "bad angle"))?,
        },
        ("rz", Some(a), [t]) => GateOp::RZ {
            target: qubit_index(*t, num_qubits)?,
            angle: parse_angle(a).ok_or_else(|| qasm_error(line_no, "bad angle"))?,
        },
        ("cx", None, [c, t]) => GateOp::CNOT {
            control: qubit_index(*c, num_qubits)?,
            target: qubit_index(*t, num_qubits)?,
        },
        _ => return Err(qasm_error(line_no, "wrong arguments for gate")),
    };
    b.push(gate)?;
    Ok(())
}

fn qasm_error(line: usize, message: &str) -> SimError {
    SimError::Qasm {
        line,
        message: message.to_string(),
    }
}

/// Splits `rx(pi / 2) q[0]` into the gate head and its operand list,
/// allowing whitespace inside the parentheses.
fn split_instruction(stmt: &str) -> (&str, &str) {
    let split_at = match stmt.find(')') {
        Some(close) if stmt.find('(').is_some_and(|open| open < close) => close + 1,
        _ => stmt.find(char::is_whitespace).unwrap_or(stmt.len()),
    };
    let (head, rest) = stmt.split_at(split_at);
    (head.trim(), rest.trim())
}

fn parse_register(decl: &str, line_no: usize) -> Result<(String, usize)> {
    let open = decl
        .find('[')
        .ok_or_else(|| qasm_error(line_no, "malformed qreg"))?;
    let close = decl
        .find(']')
        .filter(|&close| close > open)
        .ok_or_else(|| qasm_error(line_no, "malformed qreg"))?;
    if !decl[close + 1..].trim().is_empty() {
        return Err(qasm_error(line_no, "unexpected text after qreg"));
    }
    let size = decl[open + 1..close]
        .trim()
        .parse::<usize>()
        .map_err(|_| qasm_error(line_no, "qreg size is not a number"))?;
    Ok((decl[..open].trim().to_string(), size))
}

fn parse_qubit(operand: &str, reg: &str, line_no: usize) -> Result<i64> {
    let open = operand
        .find('[')
        .ok_or_else(|| qasm_error(line_no, "expected a qubit like q[0]"))?;
    let close = operand
        .find(']')
        .filter(|&close| close > open)
        .ok_or_else(|| qasm_error(line_no, "expected a qubit like q[0]"))?;
    if operand[..open].trim() != reg {
        return Err(qasm_error(line_no, "unknown register"));
    }
    if !operand[close + 1..].trim().is_empty() {
        return Err(qasm_error(line_no, "unexpected text after qubit operand"));
    }
    operand[open + 1..close]
        .trim()
        .parse::<i64>()
        .map_err(|_| qasm_error(line_no, "qubit index is not a number"))
}

/// Parses `1.5`, `pi`, `-pi/2`, `3*pi/4` and similar products over an
/// optional divisor.
fn parse_angle(expr: &str) -> Option<f64> {
    let expr = expr.trim();
    let (sign, expr) = match expr.strip_prefix('-') {
        Some(rest) => (-1.0, rest.trim()),
        None => (1.0, expr),
    };
    let (numerator, denominator) = match expr.split_once('/') {
        Some((n, d)) => (n, parse_factor(d)?),
        None => (expr, 1.0),
    };
    let mut value = 1.0;
    for factor in numerator.split('*') {
        value *= parse_factor(factor)?;
    }
    let angle = sign * value / denominator;
    angle.is_finite().then_some(angle)
}

fn parse_factor(token: &str) -> Option<f64> {
    match token.trim() {
        "pi" => Some(PI),
        t => t.parse::<f64>().ok(),
    }
}
