use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use qlattice::config::{DEFAULT_MAX_QUBITS, DEFAULT_NORM_TOLERANCE};
use qlattice::events::emit_event;
use qlattice::pipeline::{self, GateSource, RunRequest};
use qlattice::SimulatorConfig;
use qlattice_types::{ExportRecord, GateDescriptor};
use serde_json::json;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Simulate a small circuit and export its statevector, Bloch vectors and content id
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build and simulate a circuit, then write its export record as JSON.
    Run(RunArgs),
    /// Print the circuit that would be simulated as OpenQASM 2.0.
    Qasm(SourceArgs),
    /// Print JSON Schemas for the gate list input and the export record.
    Schema,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Number of qubits (ignored for --qasm-file, which declares its own qreg).
    #[arg(short, long, default_value_t = 3)]
    qubits: usize,

    /// Seed mixed into the content id.
    #[arg(short, long, default_value_t = 369)]
    seed: u64,

    /// JSON file holding a list of gate descriptors, or `-` for stdin.
    /// Without it the Fibonacci sequence is generated.
    #[arg(short, long, conflicts_with = "qasm_file")]
    gates_file: Option<PathBuf>,

    /// OpenQASM 2.0 file, or `-` for stdin.
    #[arg(long)]
    qasm_file: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_MAX_QUBITS)]
    max_qubits: usize,

    /// Largest accepted deviation of |psi|^2 from 1 after simulation.
    #[arg(long, default_value_t = DEFAULT_NORM_TOLERANCE)]
    norm_tolerance: f64,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// The output file to write JSON results to. If not provided, writes to stdout.
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Include per-qubit Bloch vectors next to the record.
    #[arg(long)]
    bloch: bool,

    /// Emit one JSON event per gate on stderr.
    #[arg(long)]
    trace: bool,
}

impl SourceArgs {
    fn config(&self) -> SimulatorConfig {
        SimulatorConfig::default()
            .with_max_qubits(self.max_qubits)
            .with_norm_tolerance(self.norm_tolerance)
    }

    fn gate_source(&self) -> Result<GateSource> {
        if let Some(path) = &self.qasm_file {
            return Ok(GateSource::Qasm(read_input(path)?));
        }
        if let Some(path) = &self.gates_file {
            let text = read_input(path)?;
            let gates: Vec<GateDescriptor> = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse gate list: {}", path.display()))?;
            return Ok(GateSource::Descriptors {
                num_qubits: self.qubits,
                gates,
            });
        }
        Ok(GateSource::Fibonacci {
            num_qubits: self.qubits,
        })
    }
}

fn read_input(path: &Path) -> Result<String> {
    let mut text = String::new();
    if path == Path::new("-") {
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
    } else {
        text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    }
    Ok(text)
}

fn run(args: RunArgs) -> Result<()> {
    let config = args.source.config();
    let request =
        RunRequest::new(args.source.gate_source()?, args.source.seed).with_trace(args.trace);
    let output = pipeline::run(&request, &config)?;

    if args.trace {
        let mut stderr = io::stderr().lock();
        for event in &output.events {
            emit_event(event, &mut stderr)?;
        }
    }

    let json_output = if args.bloch {
        serde_json::to_string_pretty(&json!({
            "record": output.record,
            "bloch": output.bloch,
        }))?
    } else {
        serde_json::to_string_pretty(&output.record)?
    };

    if let Some(output_path) = args.output_file {
        let file = File::create(&output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(json_output.as_bytes())?;
        writer.flush()?;
        info!(path = %output_path.display(), cid = %output.cid, "wrote export record");
    } else {
        println!("{}", json_output);
    }
    Ok(())
}

fn print_qasm(args: SourceArgs) -> Result<()> {
    let circuit = pipeline::build_circuit(&args.gate_source()?, &args.config())?;
    print!("{}", circuit.to_qasm());
    Ok(())
}

fn print_schema() -> Result<()> {
    let schemas = json!({
        "gateList": schemars::schema_for!(Vec<GateDescriptor>),
        "exportRecord": schemars::schema_for!(ExportRecord),
    });
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args),
        Command::Qasm(args) => print_qasm(args),
        Command::Schema => print_schema(),
    }
}
