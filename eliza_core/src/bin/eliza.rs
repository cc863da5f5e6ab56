//! # eliza
//!
//! Console front end: greets, reads lines from stdin, screens them through
//! the input gate and prints the engine's replies until an exit phrase or EOF.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eliza_core::{Engine, GateDecision, ScriptDefinition};
use tracing::info;

/// Talk to the DOCTOR.
#[derive(Parser, Debug)]
#[command(name = "eliza", about = "Rule-driven conversational response engine")]
struct Cli {
    /// Script file (`.toml` or `.json`). Defaults to the bundled DOCTOR script.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Minimum log level; `RUST_LOG` takes precedence.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

fn load_definition(path: Option<&PathBuf>) -> Result<ScriptDefinition> {
    match path {
        Some(path) => ScriptDefinition::load(path)
            .with_context(|| format!("Failed to load script: {}", path.display())),
        None => ScriptDefinition::bundled().context("Failed to load the bundled script"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_subscriber(&cli.log_level);

    let definition = load_definition(cli.script.as_ref())?;
    let engine = Engine::compile(definition).context("Failed to compile script")?;
    let mut session = engine.new_session();
    info!(session = %session.id(), "conversation started");

    let console = engine.console();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    writeln!(stdout, "{}: {}", console.speaker, console.greeting)?;
    loop {
        write!(stdout, "You: ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            break;
        }
        let input = line.trim_end_matches(['\n', '\r']);

        let reply = match engine.gate().classify(input) {
            GateDecision::Exit => break,
            GateDecision::Rejected => console.invalid_input.clone(),
            GateDecision::Accepted => engine.respond(&mut session, input),
        };
        writeln!(stdout, "{}: {}", console.speaker, reply)?;
    }

    writeln!(stdout, "{}: {}", console.speaker, console.farewell)?;
    info!(session = %session.id(), turns = session.turns(), "conversation ended");
    Ok(())
}
