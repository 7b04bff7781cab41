//! Outbound mirroring
//!
//! Every mutation of local state can be mirrored to external sinks: a
//! spreadsheet webhook for compliance auditing, a remote table store, and
//! NDJSON on stdout for automation. Mirroring is fire-and-forget: sinks are
//! independent, unordered, never retried, and a sink failure never fails
//! the local operation.

mod ndjson;
mod remote;
mod webhook;

pub use ndjson::NdjsonSink;
pub use remote::RemoteStore;
pub use webhook::SheetWebhook;

use crate::config::SyncConfig;
use crate::models::{Equipment, EquipmentId, MixProtocol, ProtocolId, Reagent, ReagentId};
use crate::record::PreparationRecord;

/// One state mutation, as seen by the audit sinks
#[derive(Debug, Clone)]
pub enum AuditEvent {
    ReagentUpserted(Reagent),
    ReagentDeleted(ReagentId),
    EquipmentUpserted(Equipment),
    EquipmentDeleted(EquipmentId),
    ProtocolUpserted(MixProtocol),
    ProtocolDeleted(ProtocolId),
    PreparationCreated(Box<PreparationRecord>),
}

impl AuditEvent {
    /// Wire name of the event, matching the audit spreadsheet's dispatch
    /// vocabulary
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReagentUpserted(_) => "reagent_upsert",
            Self::ReagentDeleted(_) => "reagent_delete",
            Self::EquipmentUpserted(_) => "equipment_upsert",
            Self::EquipmentDeleted(_) => "equipment_delete",
            Self::ProtocolUpserted(_) => "template_upsert",
            Self::ProtocolDeleted(_) => "template_delete",
            Self::PreparationCreated(_) => "preparation_created",
        }
    }

    /// JSON payload carried under `data`
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::ReagentUpserted(r) => serde_json::to_value(r),
            Self::ReagentDeleted(id) => Ok(serde_json::json!({ "id": id })),
            Self::EquipmentUpserted(e) => serde_json::to_value(e),
            Self::EquipmentDeleted(id) => Ok(serde_json::json!({ "id": id })),
            Self::ProtocolUpserted(p) => serde_json::to_value(p),
            Self::ProtocolDeleted(id) => Ok(serde_json::json!({ "id": id })),
            Self::PreparationCreated(record) => serde_json::to_value(record),
        }
        .unwrap_or(serde_json::Value::Null)
    }
}

/// A one-way destination for audit events
///
/// Implementations must absorb their own failures (log and continue);
/// `emit` is infallible by contract.
pub trait AuditSink {
    fn emit(&self, event: &AuditEvent);
}

/// Fan-out over the configured sinks
#[derive(Default)]
pub struct SinkSet {
    sinks: Vec<Box<dyn AuditSink>>,
}

impl SinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the sink set a config asks for. Mirroring disabled or no
    /// endpoints configured means an empty set.
    pub fn from_config(sync: &SyncConfig) -> Self {
        let mut set = Self::new();
        if !sync.enabled {
            return set;
        }
        if let Some(url) = &sync.webhook_url {
            set.push(Box::new(SheetWebhook::new(url)));
        }
        if let Some(remote) = RemoteStore::from_config(sync) {
            set.push(Box::new(remote));
        }
        set
    }

    pub fn push(&mut self, sink: Box<dyn AuditSink>) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Emit to every sink, in registration order, independently
    pub fn emit(&self, event: &AuditEvent) {
        for sink in &self.sinks {
            sink.emit(event);
        }
    }
}
