//! CLI command handlers
//!
//! One module per subcommand. Every handler follows the same shape: load
//! the store, mutate or query it, save, then mirror the mutation to the
//! configured audit sinks (fire-and-forget, after the local save).

pub mod equipment;
pub mod history;
pub mod prep;
pub mod protocol;
pub mod reagent;
pub mod remote;

use std::path::PathBuf;

use labmix::sync::{AuditEvent, AuditSink, NdjsonSink, SinkSet};
use labmix::{Config, LabResult, LabStore};

/// Shared command context: data directory, config, and output/mirror sinks
pub struct Ctx {
    pub data_dir: PathBuf,
    pub config: Config,
    sinks: SinkSet,
    out: Option<NdjsonSink>,
    pub verbose: u8,
}

impl Ctx {
    pub fn new(json: bool, verbose: u8) -> LabResult<Self> {
        let data_dir = labmix::data_dir();
        let config = Config::load(&data_dir)?;
        let sinks = SinkSet::from_config(&config.sync);
        if verbose > 0 {
            eprintln!("data dir: {}", data_dir.display());
        }
        Ok(Self {
            data_dir,
            config,
            sinks,
            out: json.then(NdjsonSink::stdout),
            verbose,
        })
    }

    /// Whether NDJSON mode is active
    pub fn json(&self) -> bool {
        self.out.is_some()
    }

    pub fn load_store(&self) -> LabResult<LabStore> {
        LabStore::load(&self.data_dir)
    }

    pub fn save_store(&self, store: &LabStore) -> LabResult<()> {
        store.save(&self.data_dir)
    }

    /// Mirror an event to NDJSON output and the configured external sinks
    pub fn emit(&self, event: AuditEvent) {
        if let Some(out) = &self.out {
            out.emit(&event);
        }
        self.sinks.emit(&event);
    }

    /// Write a summary line in NDJSON mode (no-op otherwise)
    pub fn line(&self, value: serde_json::Value) {
        if let Some(out) = &self.out {
            out.line(value);
        }
    }
}
