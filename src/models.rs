//! Core data models for LabMix
//!
//! Defines the fundamental data structures used throughout LabMix:
//! - `Reagent`: a stock solution with concentration, unit and lot number
//! - `Equipment`: a registered instrument attached to preparations
//! - `MixProtocol`: a reusable recipe of reagent-to-target-concentration pairs
//! - Supporting id newtypes: `ReagentId`, `EquipmentId`, `ProtocolId`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random id
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

id_type!(
    /// Identity of a stock reagent
    ReagentId
);
id_type!(
    /// Identity of a registered piece of equipment
    EquipmentId
);
id_type!(
    /// Identity of a mix protocol
    ProtocolId
);
id_type!(
    /// Identity of a preparation record
    RecordId
);

/// Default lot number when none was recorded
pub const DEFAULT_LOT: &str = "N/A";

fn default_lot() -> String {
    DEFAULT_LOT.to_string()
}

/// A stock reagent in the inventory
///
/// Protocols reference reagents by id only; editing the stock concentration
/// retroactively changes future calculations that resolve this reagent.
/// Deleting a reagent does not cascade to protocols that still reference it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reagent {
    pub id: ReagentId,

    /// Display name (e.g., "Taq Polymerase")
    pub name: String,

    /// Stock concentration (C1 in C1·V1 = C2·V2)
    pub initial_concentration: f64,

    /// Free-form concentration unit (e.g., "mM", "X", "ng/uL").
    /// No unit conversion is performed anywhere; unit consistency between
    /// stock and target is the operator's responsibility.
    pub unit: String,

    /// Lot number, "N/A" when absent
    #[serde(default = "default_lot")]
    pub lot_number: String,
}

impl Reagent {
    /// Create a new reagent with a generated id and default lot number
    pub fn new(name: impl Into<String>, initial_concentration: f64, unit: impl Into<String>) -> Self {
        Self {
            id: ReagentId::generate(),
            name: name.into(),
            initial_concentration,
            unit: unit.into(),
            lot_number: default_lot(),
        }
    }

    pub fn with_lot(mut self, lot_number: impl Into<String>) -> Self {
        self.lot_number = lot_number.into();
        self
    }
}

/// Category of a registered piece of equipment
///
/// A small fixed vocabulary plus a free-text escape hatch. Serialized as a
/// plain string either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EquipmentCategory {
    Chamber,
    Pipette,
    Vortex,
    Centrifuge,
    Thermocycler,
    Other(String),
}

impl From<String> for EquipmentCategory {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "chamber" => Self::Chamber,
            "pipette" => Self::Pipette,
            "vortex" => Self::Vortex,
            "centrifuge" => Self::Centrifuge,
            "thermocycler" => Self::Thermocycler,
            _ => Self::Other(s),
        }
    }
}

impl From<EquipmentCategory> for String {
    fn from(c: EquipmentCategory) -> Self {
        c.to_string()
    }
}

impl std::fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chamber => write!(f, "chamber"),
            Self::Pipette => write!(f, "pipette"),
            Self::Vortex => write!(f, "vortex"),
            Self::Centrifuge => write!(f, "centrifuge"),
            Self::Thermocycler => write!(f, "thermocycler"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

impl std::str::FromStr for EquipmentCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

/// A registered instrument
///
/// All registered equipment is attached to every new preparation record;
/// there is no per-protocol equipment selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub category: EquipmentCategory,
    pub name: String,
}

impl Equipment {
    /// Create a new piece of equipment with a generated id
    pub fn new(category: EquipmentCategory, name: impl Into<String>) -> Self {
        Self {
            id: EquipmentId::generate(),
            category,
            name: name.into(),
        }
    }
}

/// One line of a mix protocol: a reagent reference plus the target final
/// concentration it should reach in the reaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReagentRequirement {
    pub reagent_id: ReagentId,

    /// Target final concentration (C2), in the reagent's own unit
    pub target_concentration: f64,
}

impl ReagentRequirement {
    pub fn new(reagent_id: impl Into<ReagentId>, target_concentration: f64) -> Self {
        Self {
            reagent_id: reagent_id.into(),
            target_concentration,
        }
    }
}

/// A reusable mix recipe ("template")
///
/// Requirements keep their authoring order; duplicate reagent ids are
/// permitted and stay independent line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixProtocol {
    pub id: ProtocolId,
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub created_at: DateTime<Utc>,
    pub requirements: Vec<ReagentRequirement>,
}

impl MixProtocol {
    /// Create a new protocol with a generated id and creation timestamp.
    ///
    /// A protocol with no requirements is not savable.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        requirements: Vec<ReagentRequirement>,
    ) -> LabResult<Self> {
        let name = name.into();
        if requirements.is_empty() {
            return Err(LabError::EmptyProtocol { name });
        }
        Ok(Self {
            id: ProtocolId::generate(),
            name,
            description: description.into(),
            created_at: Utc::now(),
            requirements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reagent_new_defaults_lot() {
        let r = Reagent::new("MgCl2", 25.0, "mM");
        assert_eq!(r.name, "MgCl2");
        assert_eq!(r.initial_concentration, 25.0);
        assert_eq!(r.unit, "mM");
        assert_eq!(r.lot_number, "N/A");
    }

    #[test]
    fn test_reagent_with_lot() {
        let r = Reagent::new("Taq", 5.0, "U/uL").with_lot("L-2024-07");
        assert_eq!(r.lot_number, "L-2024-07");
    }

    #[test]
    fn test_reagent_deserialize_missing_lot_defaults() {
        let json = r#"{"id":"r1","name":"Buffer","initial_concentration":10.0,"unit":"X"}"#;
        let r: Reagent = serde_json::from_str(json).unwrap();
        assert_eq!(r.lot_number, "N/A");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(ReagentId::generate(), ReagentId::generate());
    }

    #[test]
    fn test_equipment_category_known_vocabulary() {
        let c: EquipmentCategory = "thermocycler".parse().unwrap();
        assert_eq!(c, EquipmentCategory::Thermocycler);
        assert_eq!(c.to_string(), "thermocycler");
    }

    #[test]
    fn test_equipment_category_free_text() {
        let c: EquipmentCategory = "spectrophotometer".parse().unwrap();
        assert_eq!(c, EquipmentCategory::Other("spectrophotometer".to_string()));
        assert_eq!(c.to_string(), "spectrophotometer");
    }

    #[test]
    fn test_equipment_category_serde_round_trip() {
        let c = EquipmentCategory::Centrifuge;
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"centrifuge\"");
        let back: EquipmentCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_protocol_requires_at_least_one_requirement() {
        let result = MixProtocol::new("qPCR Master", "", vec![]);
        assert!(matches!(result, Err(LabError::EmptyProtocol { .. })));
    }

    #[test]
    fn test_protocol_keeps_requirement_order() {
        let reqs = vec![
            ReagentRequirement::new("r-a", 1.0),
            ReagentRequirement::new("r-b", 0.5),
            ReagentRequirement::new("r-a", 0.25),
        ];
        let p = MixProtocol::new("Mix", "desc", reqs).unwrap();
        assert_eq!(p.requirements.len(), 3);
        assert_eq!(p.requirements[0].reagent_id.as_str(), "r-a");
        assert_eq!(p.requirements[2].reagent_id.as_str(), "r-a");
        assert_eq!(p.requirements[2].target_concentration, 0.25);
    }

    #[test]
    fn test_protocol_serde_round_trip() {
        let p = MixProtocol::new(
            "PCR Mix",
            "standard 20uL",
            vec![ReagentRequirement::new("r-1", 1.0)],
        )
        .unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: MixProtocol = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
