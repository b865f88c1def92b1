//! Property-based tests for the simulator, Bloch reduction and content ids.

use proptest::prelude::*;
use qlattice::bloch;
use qlattice::{Circuit, ContentId, GateOp, GateSequenceBuilder, Simulator, StatevectorSimulator};

const MAX_QUBITS: usize = 4;

/// Raw gate choices; mapped onto a concrete circuit width afterwards.
fn gate_strategy() -> impl Strategy<Value = (u8, usize, usize, f64)> {
    (0u8..4, 0usize..MAX_QUBITS, 1usize..MAX_QUBITS, -10.0f64..10.0)
}

fn to_gate((kind, target, offset, angle): (u8, usize, usize, f64), num_qubits: usize) -> GateOp {
    let target = target % num_qubits;
    match kind {
        0 => GateOp::H { target },
        1 => GateOp::RX { target, angle },
        2 => GateOp::RZ { target, angle },
        _ if num_qubits > 1 => GateOp::CNOT {
            control: (target + offset % (num_qubits - 1) + 1) % num_qubits,
            target,
        },
        _ => GateOp::H { target },
    }
}

fn build(num_qubits: usize, raw: Vec<(u8, usize, usize, f64)>) -> Circuit {
    let mut builder = GateSequenceBuilder::new(num_qubits).unwrap();
    for r in raw {
        builder.push(to_gate(r, num_qubits)).unwrap();
    }
    builder.build()
}

proptest! {
    /// Property: every valid circuit yields a unit-norm statevector
    #[test]
    fn norm_is_preserved(
        num_qubits in 1usize..=MAX_QUBITS,
        raw in prop::collection::vec(gate_strategy(), 0..24)
    ) {
        let circuit = build(num_qubits, raw);
        let sim = StatevectorSimulator::default().simulate(&circuit).unwrap();
        let norm_sqr = sim.statevector().norm_sqr();
        prop_assert!((norm_sqr - 1.0).abs() < 1e-9, "|psi|^2 = {}", norm_sqr);
    }

    /// Property: Bloch vectors never leave the unit ball
    #[test]
    fn bloch_vectors_stay_in_ball(
        num_qubits in 1usize..=MAX_QUBITS,
        raw in prop::collection::vec(gate_strategy(), 0..24)
    ) {
        let circuit = build(num_qubits, raw);
        let sim = StatevectorSimulator::default().simulate(&circuit).unwrap();
        for v in bloch::reduce(sim.statevector()) {
            let r2 = v.x * v.x + v.y * v.y + v.z * v.z;
            prop_assert!(r2 <= 1.0 + 1e-9, "|r|^2 = {} for {:?}", r2, v);
        }
    }

    /// Property: circuits without CNOT leave every qubit pure
    #[test]
    fn single_qubit_circuits_stay_pure(
        num_qubits in 1usize..=MAX_QUBITS,
        raw in prop::collection::vec(gate_strategy(), 0..16)
    ) {
        let raw: Vec<_> = raw.into_iter().map(|(k, t, o, a)| (k % 3, t, o, a)).collect();
        let circuit = build(num_qubits, raw);
        let sim = StatevectorSimulator::default().simulate(&circuit).unwrap();
        for v in sim.bloch_vectors() {
            prop_assert!(v.is_pure(1e-9), "{:?} is not on the sphere", v);
        }
    }

    /// Property: H applied twice is the identity
    #[test]
    fn hadamard_is_involution(
        num_qubits in 1usize..=MAX_QUBITS,
        raw in prop::collection::vec(gate_strategy(), 0..12),
        target in 0usize..MAX_QUBITS
    ) {
        let target = target % num_qubits;
        let base = build(num_qubits, raw.clone());
        let mut builder = GateSequenceBuilder::new(num_qubits).unwrap();
        for r in raw {
            builder.push(to_gate(r, num_qubits)).unwrap();
        }
        builder.push(GateOp::H { target }).unwrap();
        builder.push(GateOp::H { target }).unwrap();
        let doubled = builder.build();

        let sim = StatevectorSimulator::default();
        let a = sim.simulate(&base).unwrap();
        let b = sim.simulate(&doubled).unwrap();
        for (x, y) in a.statevector().iter().zip(b.statevector().iter()) {
            prop_assert!((x - y).norm() < 1e-9);
        }
    }

    /// Property: the content id is a pure function of circuit and seed
    #[test]
    fn cid_depends_on_seed(
        num_qubits in 1usize..=MAX_QUBITS,
        raw in prop::collection::vec(gate_strategy(), 0..8),
        seed in any::<u64>()
    ) {
        let circuit = build(num_qubits, raw);
        let cid = ContentId::compute(&circuit, seed);
        prop_assert_eq!(&cid, &ContentId::compute(&circuit.clone(), seed));
        prop_assert_ne!(cid, ContentId::compute(&circuit, seed.wrapping_add(1)));
    }
}
