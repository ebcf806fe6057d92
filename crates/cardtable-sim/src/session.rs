use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use cardtable_core::error::TableError;
use cardtable_core::game::{OpeningStatus, Table, TableSnapshot};
use cardtable_core::model::card::Motion;
use cardtable_core::model::deal::DealRecord;
use cardtable_core::rng::ModuloRng;
use cardtable_core::scene::{FixedViewpoint, RecordingScene};
use glam::Vec3;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, SessionConfig};

/// Drives one table from seating until the opening deal is over.
pub struct SessionRunner {
    config: SessionConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub ticks: u64,
    pub status: OpeningStatus,
    pub cards_dealt: usize,
    pub arrivals: usize,
    pub rows_written: usize,
    pub layout_warning: Option<String>,
    pub transcript_path: PathBuf,
    pub snapshot_path: PathBuf,
}

impl RunSummary {
    pub fn completed(&self) -> bool {
        self.status == OpeningStatus::Complete
    }
}

#[derive(Debug, Serialize)]
struct TranscriptRow<'a> {
    run_id: &'a str,
    tick: u64,
    card: String,
    motion: Motion,
}

#[derive(Debug, Serialize)]
struct SessionReport<'a> {
    run_id: &'a str,
    seed: Option<u64>,
    ticks: u64,
    deals: &'a [DealRecord],
    table: TableSnapshot,
}

impl SessionRunner {
    pub fn new(config: SessionConfig, outputs: ResolvedOutputs) -> Self {
        Self { config, outputs }
    }

    /// Seat, shuffle and tick until the opening is over and, when
    /// `run.settle` is on, every card is at rest. Stops early at the tick
    /// budget.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.transcript.parent())?;
        ensure_parent(self.outputs.snapshot.parent())?;

        let run_id = self.config.run_id.as_str();
        let viewpoint = Rc::new(FixedViewpoint(Vec3::from_array(self.config.run.viewpoint)));
        let mut table = Table::with_layout(self.config.table.layout(), viewpoint);
        let mut scene = RecordingScene::new();
        let players = self.config.table.players;

        match self.config.rng.seed {
            Some(seed) => table.init(players, &mut scene, &mut ModuloRng::seeded(seed))?,
            None => table.init(players, &mut scene, &mut ModuloRng::from_os())?,
        }

        event!(
            target: "cardtable::sim",
            Level::INFO,
            run_id,
            players,
            visuals = scene.added().len(),
            "session started"
        );

        let mut writer = BufWriter::new(File::create(&self.outputs.transcript)?);
        let mut rows_written = 0usize;
        let mut arrivals = 0usize;
        let mut ticks = 0u64;

        while ticks < self.config.run.max_ticks && !self.is_done(&table) {
            table.update();
            ticks += 1;

            let events = table.drain_events();
            let deck = table.deck();
            for card_event in events {
                if card_event.motion == Motion::Arrived {
                    arrivals += 1;
                }
                let row = TranscriptRow {
                    run_id,
                    tick: card_event.tick,
                    card: deck.card(card_event.card).face().to_string(),
                    motion: card_event.motion,
                };
                serde_json::to_writer(&mut writer, &row)?;
                writer.write_all(b"\n")?;
                rows_written += 1;
            }
        }
        writer.flush()?;

        let status = table.opening_status();
        if !status.is_finished() {
            event!(
                target: "cardtable::sim",
                Level::WARN,
                run_id,
                ticks,
                status = %status,
                "tick budget exhausted"
            );
        }

        let deck = table.deck();
        let report = SessionReport {
            run_id,
            seed: self.config.rng.seed,
            ticks,
            deals: deck.history(),
            table: table.snapshot(),
        };
        let mut snapshot = BufWriter::new(File::create(&self.outputs.snapshot)?);
        serde_json::to_writer_pretty(&mut snapshot, &report)?;
        snapshot.flush()?;

        event!(
            target: "cardtable::sim",
            Level::INFO,
            run_id,
            ticks,
            dealt = deck.dealt(),
            arrivals,
            status = %status,
            "session finished"
        );

        Ok(RunSummary {
            ticks,
            cards_dealt: deck.dealt(),
            status,
            arrivals,
            rows_written,
            layout_warning: table.layout_overflow().map(ToString::to_string),
            transcript_path: self.outputs.transcript.clone(),
            snapshot_path: self.outputs.snapshot.clone(),
        })
    }

    fn is_done(&self, table: &Table) -> bool {
        table.opening_status().is_finished()
            && (!self.config.run.settle || !table.deck().is_animating())
    }
}

fn ensure_parent(parent: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(parent) = parent {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to serialize session output: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Table(#[from] TableError),
}
