//! Preparation records - the immutable audit artifacts
//!
//! A `PreparationRecord` freezes one executed batch: every referenced value
//! (reagent fields, equipment roster) is copied at finalization time, never
//! re-resolved, so later edits to stock or equipment can never alter
//! history. Fields are private with read-only accessors; there is no
//! mutating API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::{BatchResult, ComponentVolume};
use crate::error::{LabError, LabResult};
use crate::models::{Equipment, MixProtocol, RecordId};

/// Integrity checksum value object
///
/// Wraps a SHA-256 hash string with the `sha256:` prefix, computed over the
/// record's canonical JSON body. Lets an auditor detect a tampered state
/// file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordChecksum(String);

impl RecordChecksum {
    /// Prefix for SHA-256 checksums
    pub const PREFIX: &'static str = "sha256:";

    /// Compute the checksum of a canonical JSON body
    pub fn from_content(content: &str) -> Self {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(content.as_bytes());
        Self(format!("{}{:x}", Self::PREFIX, hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordChecksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Frozen per-reagent result inside a preparation record
///
/// Unlike a `ComponentVolume` this carries no reagent id: the record is
/// self-contained and must survive reagent deletion without dangling
/// references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReagentResult {
    pub name: String,
    pub lot_number: String,
    pub initial_concentration: f64,
    pub target_concentration: f64,
    pub unit: String,
    pub volume_per_reaction: f64,
    pub total_volume: f64,
}

impl From<&ComponentVolume> for ReagentResult {
    fn from(c: &ComponentVolume) -> Self {
        Self {
            name: c.name.clone(),
            lot_number: c.lot_number.clone(),
            initial_concentration: c.initial_concentration,
            target_concentration: c.target_concentration,
            unit: c.unit.clone(),
            volume_per_reaction: c.volume_per_reaction,
            total_volume: c.total_volume,
        }
    }
}

/// The immutable result of executing a protocol for a specific batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparationRecord {
    id: RecordId,
    template_name: String,
    num_reactions: f64,
    extra_reactions: f64,
    reaction_volume: f64,
    total_volume: f64,
    reagents: Vec<ReagentResult>,
    equipment: Vec<Equipment>,
    water_volume: f64,
    timestamp: DateTime<Utc>,
    analyst: String,
    checksum: RecordChecksum,
}

impl PreparationRecord {
    /// Freeze a calculated batch into an audit record.
    ///
    /// Refused outright when the trimmed analyst signature is empty or the
    /// batch covers zero reactions: no record is produced and no identity
    /// is assigned. On success the analyst is uppercased, a fresh id and
    /// timestamp are assigned, and every referenced value is snapshotted by
    /// copy.
    pub fn finalize(
        batch: &BatchResult,
        protocol: &MixProtocol,
        equipment: &[Equipment],
        analyst: &str,
        num_reactions: f64,
        extra_reactions: f64,
        reaction_volume: f64,
    ) -> LabResult<Self> {
        let analyst = analyst.trim();
        if analyst.is_empty() {
            return Err(LabError::MissingAnalyst);
        }
        let total_reactions = num_reactions + extra_reactions;
        if !(total_reactions > 0.0) {
            return Err(LabError::EmptyBatch { total_reactions });
        }

        let mut record = Self {
            id: RecordId::generate(),
            template_name: protocol.name.clone(),
            num_reactions,
            extra_reactions,
            reaction_volume,
            total_volume: total_reactions * reaction_volume,
            reagents: batch.components.iter().map(ReagentResult::from).collect(),
            equipment: equipment.to_vec(),
            water_volume: batch.total_water,
            timestamp: Utc::now(),
            analyst: analyst.to_uppercase(),
            checksum: RecordChecksum::from_content(""),
        };
        record.checksum = record.compute_checksum();
        Ok(record)
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn num_reactions(&self) -> f64 {
        self.num_reactions
    }

    pub fn extra_reactions(&self) -> f64 {
        self.extra_reactions
    }

    /// Requested reactions plus overage
    pub fn total_reactions(&self) -> f64 {
        self.num_reactions + self.extra_reactions
    }

    pub fn reaction_volume(&self) -> f64 {
        self.reaction_volume
    }

    pub fn total_volume(&self) -> f64 {
        self.total_volume
    }

    pub fn reagents(&self) -> &[ReagentResult] {
        &self.reagents
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn water_volume(&self) -> f64 {
        self.water_volume
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn analyst(&self) -> &str {
        &self.analyst
    }

    pub fn checksum(&self) -> &RecordChecksum {
        &self.checksum
    }

    /// Recompute the checksum over the current body and compare
    pub fn verify(&self) -> bool {
        self.compute_checksum() == self.checksum
    }

    fn compute_checksum(&self) -> RecordChecksum {
        // Canonical body: every field except the checksum itself, in fixed
        // order. Relies on serde_json's stable field ordering for structs.
        let body = serde_json::json!({
            "id": self.id,
            "template_name": self.template_name,
            "num_reactions": self.num_reactions,
            "extra_reactions": self.extra_reactions,
            "reaction_volume": self.reaction_volume,
            "total_volume": self.total_volume,
            "reagents": self.reagents,
            "equipment": self.equipment,
            "water_volume": self.water_volume,
            "timestamp": self.timestamp,
            "analyst": self.analyst,
        });
        RecordChecksum::from_content(&body.to_string())
    }
}
