//! Local state store
//!
//! `LabStore` holds the whole local state - inventory, equipment roster,
//! protocols and preparation history - and persists it as pretty JSON in a
//! single file under the data directory. Loading tolerates a missing file
//! (fresh empty store); a file that exists but does not parse is surfaced
//! as a corrupt-state error rather than silently discarded, because the
//! history in it is an audit trail.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::calculator::ReagentLookup;
use crate::error::{LabError, LabResult};
use crate::models::{
    Equipment, EquipmentId, MixProtocol, ProtocolId, Reagent, ReagentId, RecordId,
};
use crate::record::PreparationRecord;

const STORE_FILE: &str = "store.json";

/// All local state: reagent stock, equipment, protocols, history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabStore {
    #[serde(default)]
    reagents: Vec<Reagent>,

    #[serde(default)]
    equipment: Vec<Equipment>,

    #[serde(default)]
    protocols: Vec<MixProtocol>,

    /// Newest first, append-only
    #[serde(default)]
    history: Vec<PreparationRecord>,
}

impl LabStore {
    /// Assemble a store from already-validated parts (used when rebuilding
    /// from the remote table store)
    pub fn from_parts(
        reagents: Vec<Reagent>,
        equipment: Vec<Equipment>,
        protocols: Vec<MixProtocol>,
        history: Vec<PreparationRecord>,
    ) -> Self {
        Self {
            reagents,
            equipment,
            protocols,
            history,
        }
    }

    /// Path of the state file inside a data directory
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(STORE_FILE)
    }

    /// Load the store from `data_dir`, or an empty store if no state file
    /// exists yet
    pub fn load(data_dir: &Path) -> LabResult<Self> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| LabError::CorruptState {
            path,
            message: e.to_string(),
        })
    }

    /// Save the store to `data_dir`, creating the directory if needed
    pub fn save(&self, data_dir: &Path) -> LabResult<()> {
        fs::create_dir_all(data_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(Self::path(data_dir), content)?;
        Ok(())
    }

    // --- reagents ---

    pub fn reagents(&self) -> &[Reagent] {
        &self.reagents
    }

    pub fn reagent(&self, id: &ReagentId) -> Option<&Reagent> {
        self.reagents.iter().find(|r| &r.id == id)
    }

    /// Resolve a reagent by exact id or (case-insensitive) name
    pub fn find_reagent(&self, needle: &str) -> Option<&Reagent> {
        self.reagents
            .iter()
            .find(|r| r.id.as_str() == needle)
            .or_else(|| {
                self.reagents
                    .iter()
                    .find(|r| r.name.eq_ignore_ascii_case(needle))
            })
    }

    /// Insert or replace a reagent (matched by id)
    pub fn upsert_reagent(&mut self, reagent: Reagent) {
        match self.reagents.iter_mut().find(|r| r.id == reagent.id) {
            Some(existing) => *existing = reagent,
            None => self.reagents.push(reagent),
        }
    }

    /// Delete a reagent by id. Does not cascade: protocols still holding
    /// the id keep it as an unresolved reference.
    pub fn delete_reagent(&mut self, id: &ReagentId) -> LabResult<Reagent> {
        match self.reagents.iter().position(|r| &r.id == id) {
            Some(pos) => Ok(self.reagents.remove(pos)),
            None => Err(LabError::NotFound {
                kind: "reagent",
                id: id.to_string(),
            }),
        }
    }

    // --- equipment ---

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn upsert_equipment(&mut self, item: Equipment) {
        match self.equipment.iter_mut().find(|e| e.id == item.id) {
            Some(existing) => *existing = item,
            None => self.equipment.push(item),
        }
    }

    pub fn delete_equipment(&mut self, id: &EquipmentId) -> LabResult<Equipment> {
        match self.equipment.iter().position(|e| &e.id == id) {
            Some(pos) => Ok(self.equipment.remove(pos)),
            None => Err(LabError::NotFound {
                kind: "equipment",
                id: id.to_string(),
            }),
        }
    }

    // --- protocols ---

    pub fn protocols(&self) -> &[MixProtocol] {
        &self.protocols
    }

    pub fn protocol(&self, id: &ProtocolId) -> Option<&MixProtocol> {
        self.protocols.iter().find(|p| &p.id == id)
    }

    /// Resolve a protocol by exact id or (case-insensitive) name
    pub fn find_protocol(&self, needle: &str) -> Option<&MixProtocol> {
        self.protocols
            .iter()
            .find(|p| p.id.as_str() == needle)
            .or_else(|| {
                self.protocols
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(needle))
            })
    }

    /// Insert or replace a protocol. A protocol with no requirements is
    /// rejected even if it was constructed by hand.
    pub fn upsert_protocol(&mut self, protocol: MixProtocol) -> LabResult<()> {
        if protocol.requirements.is_empty() {
            return Err(LabError::EmptyProtocol {
                name: protocol.name,
            });
        }
        match self.protocols.iter_mut().find(|p| p.id == protocol.id) {
            Some(existing) => *existing = protocol,
            None => self.protocols.push(protocol),
        }
        Ok(())
    }

    pub fn delete_protocol(&mut self, id: &ProtocolId) -> LabResult<MixProtocol> {
        match self.protocols.iter().position(|p| &p.id == id) {
            Some(pos) => Ok(self.protocols.remove(pos)),
            None => Err(LabError::NotFound {
                kind: "protocol",
                id: id.to_string(),
            }),
        }
    }

    // --- history ---

    /// Preparation records, newest first
    pub fn history(&self) -> &[PreparationRecord] {
        &self.history
    }

    pub fn record(&self, id: &RecordId) -> Option<&PreparationRecord> {
        self.history.iter().find(|r| r.id() == id)
    }

    /// Append a finalized record. Records are never edited or removed.
    pub fn push_record(&mut self, record: PreparationRecord) {
        self.history.insert(0, record);
    }
}

impl ReagentLookup for LabStore {
    fn reagent(&self, id: &ReagentId) -> Option<&Reagent> {
        LabStore::reagent(self, id)
    }
}
