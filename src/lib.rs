//! LabMix - laboratory reagent-mix calculator and inventory tracker
//!
//! LabMix keeps reagent stock, reusable mix protocols (reagent-to-target
//! concentration recipes), computes per-reaction and batch pipetting
//! volumes, and freezes each confirmed batch into an immutable preparation
//! record that can be mirrored to a remote table store and an audit
//! spreadsheet webhook.

pub mod calculator;
pub mod config;
pub mod error;
pub mod models;
pub mod record;
pub mod store;
pub mod sync;

// Re-exports for convenience
pub use calculator::{
    calculate_batch, BatchResult, CalcWarning, ComponentVolume, ReagentLookup, Strictness,
};
pub use config::{data_dir, Config};
pub use error::{LabError, LabResult};
pub use models::{
    Equipment, EquipmentCategory, EquipmentId, MixProtocol, ProtocolId, Reagent, ReagentId,
    ReagentRequirement, RecordId,
};
pub use record::{PreparationRecord, ReagentResult, RecordChecksum};
pub use store::LabStore;
pub use sync::{AuditEvent, AuditSink, NdjsonSink, RemoteStore, SheetWebhook, SinkSet};
