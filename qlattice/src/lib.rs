pub mod bloch;
pub mod builder;
pub mod cid;
pub mod circuit;
pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod gate;
pub mod pipeline;
pub mod simulator;
pub mod state;

// Re-export key components for easier access from the binary or other libraries.
pub use bloch::BlochVector;
pub use builder::GateSequenceBuilder;
pub use cid::ContentId;
pub use circuit::Circuit;
pub use config::SimulatorConfig;
pub use error::SimError;
pub use gate::GateOp;
pub use pipeline::{GateSource, RunOutput, RunRequest, run};
pub use simulator::{Simulation, Simulator, StatevectorSimulator};
pub use state::StateVector;
