//! Paige — dental-office voice agent worker CLI
//!
//! Loads `.env.local`, `paige.toml` and `PAIGE_*` overrides, prewarms the
//! worker, and runs calls against a console stand-in for the real-time
//! orchestrator.
//!
//! Usage:
//!   cargo run -p paige-agent -- console
//!   cargo run -p paige-agent -- console --sip --room front-desk
//!   cargo run -p paige-agent -- tools
//!   cargo run -p paige-agent -- --config paige.toml check-config

mod console;

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use paige_config::AgentConfig;
use paige_contracts::{
    error::{PaigeError, PaigeResult},
    session::ParticipantKind,
};
use paige_store::InMemoryAppointmentLog;
use paige_worker::{entrypoint, JobRequest, RoomInfo, Worker};

use crate::console::ConsoleOrchestrator;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Paige — a virtual dental office assistant.
#[derive(Parser)]
#[command(
    name = "paige-agent",
    about = "Paige dental-office voice agent",
    long_about = "Runs the Paige dental-office assistant. Configuration comes from\n\
                  paige.toml, .env.local and PAIGE_* environment variables."
)]
struct Cli {
    /// Config file to load instead of ./paige.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one call in the terminal; type `/tool {json}` to call a tool.
    Console {
        /// Room name for the call.
        #[arg(long, default_value = "console")]
        room: String,
        /// Treat the caller as a SIP (telephony) participant.
        #[arg(long)]
        sip: bool,
    },
    /// Print the tool definitions of every profile as JSON.
    Tools,
    /// Print the resolved configuration.
    CheckConfig,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = paige_config::resolve(cli.config.as_deref()).and_then(|config| match cli.command {
        Command::Console { room, sip } => run_console(config, room, sip),
        Command::Tools => print_tools(&config),
        Command::CheckConfig => print_config(&config),
    });

    if let Err(e) = result {
        eprintln!("paige-agent: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_console(config: AgentConfig, room: String, sip: bool) -> PaigeResult<()> {
    let agent_name = config.agent_name.clone();
    let worker = Worker::prewarm(config)?;

    let participant_kind = if sip {
        ParticipantKind::Sip
    } else {
        ParticipantKind::Standard
    };
    let ctx = worker.accept(JobRequest {
        agent_name,
        room: RoomInfo {
            name: room,
            participant_kind,
        },
    })?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = ConsoleOrchestrator::new(stdin.lock(), stdout.lock());
    entrypoint(&ctx, &mut console)?;

    let log = ctx.journal.export_log();
    info!(entries = log.entries.len(), "call journal exported");
    Ok(())
}

fn print_tools(config: &AgentConfig) -> PaigeResult<()> {
    println!("{}", render_tools(config)?);
    Ok(())
}

fn print_config(config: &AgentConfig) -> PaigeResult<()> {
    println!("{}", render_config(config)?);
    Ok(())
}

fn render_tools(config: &AgentConfig) -> PaigeResult<String> {
    // Listing never writes, so no file is opened.
    let sink = Arc::new(InMemoryAppointmentLog::new());
    let profiles: Vec<serde_json::Value> = paige_dental::profiles_for(config.variant, sink)
        .into_iter()
        .map(|profile| {
            serde_json::json!({
                "profile": profile.id,
                "on_enter": profile.on_enter,
                "tools": profile.tools.definitions(),
            })
        })
        .collect();

    serde_json::to_string_pretty(&profiles).map_err(|e| PaigeError::Serialization {
        reason: format!("failed to render tool definitions: {}", e),
    })
}

fn render_config(config: &AgentConfig) -> PaigeResult<String> {
    toml::to_string_pretty(config).map_err(|e| PaigeError::Serialization {
        reason: format!("failed to render config: {}", e),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
