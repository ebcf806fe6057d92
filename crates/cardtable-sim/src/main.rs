use std::path::PathBuf;

use clap::Parser;

use cardtable_core::AppInfo;
use cardtable_sim::config::{ResolvedOutputs, SessionConfig};
use cardtable_sim::logging::init_logging;
use cardtable_sim::session::SessionRunner;

/// Headless card table session: seat, shuffle and run the opening deal.
#[derive(Debug, Parser)]
#[command(
    name = "cardtable-sim",
    author,
    version,
    about = "Runs the animated opening deal without a renderer"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "sim/session.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of non-dealer seats.
    #[arg(long, value_name = "COUNT")]
    players: Option<usize>,

    /// Override the shuffle seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the frame budget.
    #[arg(long, value_name = "TICKS")]
    max_ticks: Option<u64>,

    /// Exit after validating the configuration (no session is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SessionConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(players) = cli.players {
        config.table.players = players;
    }

    if let Some(seed) = cli.seed {
        config.rng.seed = Some(seed);
    }

    if let Some(max_ticks) = cli.max_ticks {
        config.run.max_ticks = max_ticks;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let players = config.table.players;

    println!(
        "{} {}: loaded session '{run_id}' with {players} player{}",
        AppInfo::name(),
        AppInfo::version(),
        if players == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;

    if cli.validate_only {
        println!("Validation-only mode: session skipped.");
        return Ok(());
    }

    let runner = SessionRunner::new(config, outputs);
    let summary = runner.run()?;

    if let Some(warning) = summary.layout_warning.as_ref() {
        println!("Layout warning: {warning}");
    }
    println!(
        "Session '{run_id}' finished after {} ticks: {} cards dealt, {} arrivals, status {}",
        summary.ticks, summary.cards_dealt, summary.arrivals, summary.status
    );
    println!(
        "Transcript: {} ({} rows)",
        summary.transcript_path.display(),
        summary.rows_written
    );
    println!("Snapshot: {}", summary.snapshot_path.display());
    if let Some(guard) = _logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    if !summary.completed() {
        anyhow::bail!("opening deal did not complete: {}", summary.status);
    }

    Ok(())
}
