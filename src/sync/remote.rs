//! Remote table store
//!
//! Mirrors local state to a hosted table store speaking the PostgREST
//! dialect (`/rest/v1/{table}` with `apikey` + bearer headers). Four
//! tables: `reagents`, `equipment`, `templates`, `history`. Used two ways:
//! as an `AuditSink` (one row per event, best-effort) and by the `push` /
//! `pull` commands (full-state mirror, errors surfaced).

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{AuditEvent, AuditSink};
use crate::config::SyncConfig;
use crate::error::{LabError, LabResult};
use crate::models::{Equipment, MixProtocol, Reagent, ReagentRequirement};
use crate::record::PreparationRecord;
use crate::store::LabStore;

/// Row shape of the `reagents` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReagentRow {
    pub id: String,
    pub name: String,
    pub initial_concentration: f64,
    pub unit: String,
    pub lot_number: String,
}

impl From<&Reagent> for ReagentRow {
    fn from(r: &Reagent) -> Self {
        Self {
            id: r.id.to_string(),
            name: r.name.clone(),
            initial_concentration: r.initial_concentration,
            unit: r.unit.clone(),
            lot_number: r.lot_number.clone(),
        }
    }
}

impl From<ReagentRow> for Reagent {
    fn from(row: ReagentRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            initial_concentration: row.initial_concentration,
            unit: row.unit,
            lot_number: row.lot_number,
        }
    }
}

/// Row shape of the `equipment` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRow {
    pub id: String,
    pub category: String,
    pub name: String,
}

impl From<&Equipment> for EquipmentRow {
    fn from(e: &Equipment) -> Self {
        Self {
            id: e.id.to_string(),
            category: e.category.to_string(),
            name: e.name.clone(),
        }
    }
}

impl From<EquipmentRow> for Equipment {
    fn from(row: EquipmentRow) -> Self {
        Self {
            id: row.id.into(),
            category: row.category.into(),
            name: row.name,
        }
    }
}

/// Row shape of the `templates` table; requirements ride along as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub reagents_json: Vec<ReagentRequirement>,
    pub created_at: DateTime<Utc>,
}

impl From<&MixProtocol> for TemplateRow {
    fn from(p: &MixProtocol) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            description: p.description.clone(),
            reagents_json: p.requirements.clone(),
            created_at: p.created_at,
        }
    }
}

impl From<TemplateRow> for MixProtocol {
    fn from(row: TemplateRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            requirements: row.reagents_json,
        }
    }
}

/// Row shape of the `history` table: a few queryable columns plus the full
/// record as JSON so the audit artifact round-trips losslessly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub id: String,
    pub template_name: String,
    pub total_volume: f64,
    pub timestamp: DateTime<Utc>,
    pub analyst: String,
    pub full_record_json: PreparationRecord,
}

impl From<&PreparationRecord> for HistoryRow {
    fn from(r: &PreparationRecord) -> Self {
        Self {
            id: r.id().to_string(),
            template_name: r.template_name().to_string(),
            total_volume: r.total_volume(),
            timestamp: r.timestamp(),
            analyst: r.analyst().to_string(),
            full_record_json: r.clone(),
        }
    }
}

/// Counts reported by a full-state push
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushSummary {
    pub reagents: usize,
    pub equipment: usize,
    pub protocols: usize,
    pub records: usize,
}

/// Client for the remote table store
pub struct RemoteStore {
    base_url: String,
    key: String,
    client: reqwest::blocking::Client,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            key: key.into(),
            client,
        }
    }

    /// Build from config; requires both URL and key
    pub fn from_config(sync: &SyncConfig) -> Option<Self> {
        match (&sync.remote_url, &sync.remote_key) {
            (Some(url), Some(key)) => Some(Self::new(url, key)),
            _ => None,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn upsert<T: Serialize>(&self, table: &str, rows: &[T]) -> LabResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        self.client
            .post(self.table_url(table))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "resolution=merge-duplicates")
            .json(rows)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| LabError::Remote(format!("upsert into {table} failed: {e}")))?;
        Ok(())
    }

    /// History rows are append-only; existing ids are left untouched
    fn insert_records(&self, rows: &[HistoryRow]) -> LabResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        self.client
            .post(self.table_url("history"))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "resolution=ignore-duplicates")
            .json(rows)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| LabError::Remote(format!("insert into history failed: {e}")))?;
        Ok(())
    }

    fn delete_row(&self, table: &str, id: &str) -> LabResult<()> {
        self.client
            .delete(format!("{}?id=eq.{}", self.table_url(table), id))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| LabError::Remote(format!("delete from {table} failed: {e}")))?;
        Ok(())
    }

    fn fetch<T: DeserializeOwned>(&self, table: &str, order: &str) -> LabResult<Vec<T>> {
        self.client
            .get(format!("{}?select=*&order={}", self.table_url(table), order))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| LabError::Remote(format!("fetch of {table} failed: {e}")))?
            .json()
            .map_err(|e| LabError::Remote(format!("decode of {table} failed: {e}")))
    }

    /// Mirror the whole local store to the remote tables
    pub fn push_store(&self, store: &LabStore) -> LabResult<PushSummary> {
        let reagents: Vec<ReagentRow> = store.reagents().iter().map(Into::into).collect();
        let equipment: Vec<EquipmentRow> = store.equipment().iter().map(Into::into).collect();
        let templates: Vec<TemplateRow> = store.protocols().iter().map(Into::into).collect();
        let records: Vec<HistoryRow> = store.history().iter().map(Into::into).collect();

        self.upsert("reagents", &reagents)?;
        self.upsert("equipment", &equipment)?;
        self.upsert("templates", &templates)?;
        self.insert_records(&records)?;

        Ok(PushSummary {
            reagents: reagents.len(),
            equipment: equipment.len(),
            protocols: templates.len(),
            records: records.len(),
        })
    }

    /// Rebuild a full store from the remote tables
    pub fn pull_store(&self) -> LabResult<LabStore> {
        let reagents: Vec<ReagentRow> = self.fetch("reagents", "name.asc")?;
        let equipment: Vec<EquipmentRow> = self.fetch("equipment", "name.asc")?;
        let templates: Vec<TemplateRow> = self.fetch("templates", "created_at.desc")?;
        let records: Vec<HistoryRow> = self.fetch("history", "timestamp.desc")?;

        Ok(LabStore::from_parts(
            reagents.into_iter().map(Into::into).collect(),
            equipment.into_iter().map(Into::into).collect(),
            templates.into_iter().map(Into::into).collect(),
            records.into_iter().map(|r| r.full_record_json).collect(),
        ))
    }
}

impl AuditSink for RemoteStore {
    fn emit(&self, event: &AuditEvent) {
        let result = match event {
            AuditEvent::ReagentUpserted(r) => self.upsert("reagents", &[ReagentRow::from(r)]),
            AuditEvent::ReagentDeleted(id) => self.delete_row("reagents", id.as_str()),
            AuditEvent::EquipmentUpserted(e) => {
                self.upsert("equipment", &[EquipmentRow::from(e)])
            }
            AuditEvent::EquipmentDeleted(id) => self.delete_row("equipment", id.as_str()),
            AuditEvent::ProtocolUpserted(p) => self.upsert("templates", &[TemplateRow::from(p)]),
            AuditEvent::ProtocolDeleted(id) => self.delete_row("templates", id.as_str()),
            AuditEvent::PreparationCreated(record) => {
                self.insert_records(&[HistoryRow::from(record.as_ref())])
            }
        };
        if let Err(e) = result {
            eprintln!("warning: remote mirror failed: {e}");
        }
    }
}
