use qlattice::pipeline::{self, GateSource, RunRequest};
use qlattice::{
    ContentId, GateSequenceBuilder, SimError, Simulator, SimulatorConfig, StatevectorSimulator,
};
use qlattice_types::{ExportRecord, GateDescriptor};
use std::f64::consts::{FRAC_1_SQRT_2, PI, SQRT_2};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn descriptors(json: &str) -> Vec<GateDescriptor> {
    serde_json::from_str(json).expect("descriptor json")
}

fn fixed_gates() -> Vec<GateDescriptor> {
    vec![
        GateDescriptor::new("H", 0),
        GateDescriptor::new("RX", 1).with_angle(PI / SQRT_2),
        GateDescriptor::new("CNOT", 2).with_control(0),
        GateDescriptor::new("RZ", 1).with_angle(PI / SQRT_2),
    ]
}

fn run_fixed(seed: u64) -> pipeline::RunOutput {
    let request = RunRequest::new(
        GateSource::Descriptors {
            num_qubits: 3,
            gates: fixed_gates(),
        },
        seed,
    );
    pipeline::run(&request, &SimulatorConfig::default()).expect("run")
}

#[test]
fn single_hadamard_points_along_x() {
    let request = RunRequest::new(
        GateSource::Descriptors {
            num_qubits: 1,
            gates: descriptors(r#"[{"type": "H", "target": 0}]"#),
        },
        369,
    );
    let output = pipeline::run(&request, &SimulatorConfig::default()).unwrap();

    let sv = &output.record.statevector;
    assert_eq!(sv.len(), 2);
    assert!(approx_eq(sv[0].real, FRAC_1_SQRT_2, EPSILON) && approx_eq(sv[0].imag, 0.0, EPSILON));
    assert!(approx_eq(sv[1].real, FRAC_1_SQRT_2, EPSILON) && approx_eq(sv[1].imag, 0.0, EPSILON));

    let b = output.bloch[0];
    assert!(approx_eq(b.x, 1.0, EPSILON), "x was {}", b.x);
    assert!(approx_eq(b.y, 0.0, EPSILON), "y was {}", b.y);
    assert!(approx_eq(b.z, 0.0, EPSILON), "z was {}", b.z);
}

#[test]
fn bell_state_reduces_to_origin() {
    let request = RunRequest::new(
        GateSource::Descriptors {
            num_qubits: 2,
            gates: descriptors(
                r#"[
                    {"type": "H", "target": 0},
                    {"type": "CNOT", "target": 1, "params": {"control": 0}}
                ]"#,
            ),
        },
        369,
    );
    let output = pipeline::run(&request, &SimulatorConfig::default()).unwrap();

    let expected = [FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2];
    for (amp, want) in output.record.statevector.iter().zip(expected) {
        assert!(approx_eq(amp.real, want, EPSILON));
        assert!(approx_eq(amp.imag, 0.0, EPSILON));
    }
    for b in &output.bloch {
        assert!(b.magnitude() < EPSILON, "Bloch vector {:?} should vanish", b);
    }
}

#[test]
fn cid_is_stable_and_seed_dependent() {
    let first = run_fixed(369);
    let again = run_fixed(369);
    let other = run_fixed(370);

    assert_eq!(first.record.cid, again.record.cid);
    assert_ne!(first.record.cid, other.record.cid);
    assert_eq!(first.record.statevector, other.record.statevector);
    assert!(ContentId::parse(&first.record.cid).is_ok());
}

#[test]
fn identical_runs_serialize_identically() {
    let a = serde_json::to_string(&run_fixed(369).record).unwrap();
    let b = serde_json::to_string(&run_fixed(369).record).unwrap();
    assert_eq!(a, b);

    let parsed: ExportRecord = serde_json::from_str(&a).unwrap();
    assert_eq!(parsed.num_qubits, 3);
    assert_eq!(parsed.invocation, "Valhalla rises on silver wings\u{2014}amen.");
}

#[test]
fn fixed_sequence_bloch_vectors() {
    // q0 and q2 share a Bell pair; q1 is RZ·RX|0⟩, a pure state
    let output = run_fixed(369);
    let theta = PI / SQRT_2;

    assert!(output.bloch[0].magnitude() < EPSILON);
    assert!(output.bloch[2].magnitude() < EPSILON);

    let q1 = output.bloch[1];
    assert!(q1.is_pure(1e-9));
    assert!(approx_eq(q1.z, theta.cos(), EPSILON));
    // RX(θ)|0⟩ sits at (0, -sin θ, cos θ); RZ(θ) then turns it about z by θ
    assert!(approx_eq(q1.x, theta.sin() * theta.sin(), EPSILON));
    assert!(approx_eq(q1.y, -theta.sin() * theta.cos(), EPSILON));
}

#[test]
fn self_targeting_cnot_is_rejected() {
    let err = GateSequenceBuilder::new(2)
        .unwrap()
        .descriptors(&[GateDescriptor::new("CNOT", 1).with_control(1)])
        .unwrap_err();
    assert_eq!(err, SimError::SelfTarget(1));
}

#[test]
fn unknown_gates_are_never_dropped() {
    let request = RunRequest::new(
        GateSource::Descriptors {
            num_qubits: 1,
            gates: descriptors(r#"[{"type": "H", "target": 0}, {"type": "T", "target": 0}]"#),
        },
        1,
    );
    let err = pipeline::run(&request, &SimulatorConfig::default()).unwrap_err();
    assert!(matches!(err, SimError::UnsupportedGate(ref t) if t == "T"));
}

#[test]
fn out_of_range_target_is_a_validation_error() {
    let err = GateSequenceBuilder::new(2)
        .unwrap()
        .descriptors(&[GateDescriptor::new("RX", 2)])
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn tight_tolerance_still_accepts_exact_runs() {
    let config = SimulatorConfig::default().with_norm_tolerance(1e-12);
    let circuit = GateSequenceBuilder::with_config(5, &config)
        .unwrap()
        .fibonacci()
        .build();
    let sim = StatevectorSimulator::new(config).simulate(&circuit).unwrap();
    assert!(approx_eq(sim.statevector().norm_sqr(), 1.0, 1e-12));
}

#[test]
fn qasm_export_reproduces_cid() {
    let original = run_fixed(369);
    let request = RunRequest::new(GateSource::Qasm(original.circuit.to_qasm()), 369);
    let reparsed = pipeline::run(&request, &SimulatorConfig::default()).unwrap();
    assert_eq!(reparsed.record.cid, original.record.cid);
}

#[test]
fn oversized_width_is_rejected_even_without_a_configured_cap() {
    let config = SimulatorConfig::default().with_max_qubits(usize::MAX);
    for num_qubits in [31, 64, usize::MAX] {
        let request = RunRequest::new(GateSource::Fibonacci { num_qubits }, 369);
        let err = pipeline::run(&request, &config).unwrap_err();
        assert!(err.is_validation(), "{} qubits: {:?}", num_qubits, err);
    }
}
