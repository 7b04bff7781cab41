//! Batch dilution calculator
//!
//! Pure domain logic for turning a mix protocol into per-reaction and batch
//! pipetting volumes. This is the C1·V1 = C2·V2 stock-dilution relation
//! solved for V1, plus a water top-off to bring each reaction up to its
//! total volume. No I/O, no hidden state: same inputs always produce the
//! same output.
//!
//! The calculator takes its reagent lookup as an explicit capability, never
//! via ambient state, and does not validate or convert units; unit
//! consistency between stock and target is the operator's responsibility.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};
use crate::models::{MixProtocol, Reagent, ReagentId};

/// Capability to resolve a reagent id to a stock reagent
pub trait ReagentLookup {
    fn reagent(&self, id: &ReagentId) -> Option<&Reagent>;
}

impl ReagentLookup for HashMap<ReagentId, Reagent> {
    fn reagent(&self, id: &ReagentId) -> Option<&Reagent> {
        self.get(id)
    }
}

impl ReagentLookup for [Reagent] {
    fn reagent(&self, id: &ReagentId) -> Option<&Reagent> {
        self.iter().find(|r| &r.id == id)
    }
}

impl ReagentLookup for Vec<Reagent> {
    fn reagent(&self, id: &ReagentId) -> Option<&Reagent> {
        self.as_slice().reagent(id)
    }
}

/// How calculation anomalies are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Record anomalies as warnings and keep going (observed source behavior)
    #[default]
    Lenient,
    /// Promote the first anomaly to an error
    Strict,
}

impl std::str::FromStr for Strictness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown strictness '{other}' (expected lenient or strict)")),
        }
    }
}

/// Anomaly detected during calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalcWarning {
    /// A requirement's reagent id has no matching reagent in the lookup;
    /// the line was excluded from the result and the used-volume sum
    MissingReagent { reagent_id: ReagentId },
    /// Component volumes sum to more than the reaction volume;
    /// water was clamped to zero
    OverVolume { excess_per_reaction: f64 },
}

impl std::fmt::Display for CalcWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingReagent { reagent_id } => {
                write!(f, "reagent '{reagent_id}' not in inventory, line skipped")
            }
            Self::OverVolume { excess_per_reaction } => write!(
                f,
                "components exceed reaction volume by {excess_per_reaction} uL, water clamped to 0"
            ),
        }
    }
}

/// Computed volumes for one resolved protocol line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentVolume {
    pub reagent_id: ReagentId,
    pub name: String,
    pub lot_number: String,
    pub initial_concentration: f64,
    pub target_concentration: f64,
    pub unit: String,
    pub volume_per_reaction: f64,
    pub total_volume: f64,
}

/// Result of a batch calculation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchResult {
    /// Resolved components in the protocol's requirement order
    pub components: Vec<ComponentVolume>,
    /// Water top-off per reaction (never negative)
    pub water_per_reaction: f64,
    /// Water top-off for the whole batch
    pub total_water: f64,
    /// Anomalies recorded along the way (empty under strict mode, which
    /// errors instead)
    pub warnings: Vec<CalcWarning>,
}

impl BatchResult {
    /// The empty result: no components, zero water
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Sum of component volumes for one reaction (excludes water)
    pub fn used_per_reaction(&self) -> f64 {
        self.components.iter().map(|c| c.volume_per_reaction).sum()
    }
}

/// Compute pipetting volumes for a batch of `total_reactions` reactions of
/// `per_reaction_volume` each.
///
/// Per resolved requirement:
/// `volume_per_reaction = target × per_reaction_volume / stock` and
/// `total_volume = volume_per_reaction × total_reactions`. Water fills the
/// remainder, clamped at zero.
///
/// Non-positive `total_reactions` or `per_reaction_volume` yields the empty
/// result regardless of protocol contents. A zero stock concentration is
/// not guarded against and produces an infinite volume, mirroring the
/// field-level-only validation of the original system.
pub fn calculate_batch(
    protocol: &MixProtocol,
    lookup: &impl ReagentLookup,
    total_reactions: f64,
    per_reaction_volume: f64,
    strictness: Strictness,
) -> LabResult<BatchResult> {
    if !(total_reactions > 0.0) || !(per_reaction_volume > 0.0) {
        return Ok(BatchResult::empty());
    }

    let mut components = Vec::with_capacity(protocol.requirements.len());
    let mut warnings = Vec::new();
    let mut used_per_reaction = 0.0;

    for req in &protocol.requirements {
        let Some(reagent) = lookup.reagent(&req.reagent_id) else {
            if strictness == Strictness::Strict {
                return Err(LabError::MissingReagent {
                    reagent_id: req.reagent_id.to_string(),
                });
            }
            warnings.push(CalcWarning::MissingReagent {
                reagent_id: req.reagent_id.clone(),
            });
            continue;
        };

        let volume_per_reaction =
            req.target_concentration * per_reaction_volume / reagent.initial_concentration;
        used_per_reaction += volume_per_reaction;

        components.push(ComponentVolume {
            reagent_id: reagent.id.clone(),
            name: reagent.name.clone(),
            lot_number: reagent.lot_number.clone(),
            initial_concentration: reagent.initial_concentration,
            target_concentration: req.target_concentration,
            unit: reagent.unit.clone(),
            volume_per_reaction,
            total_volume: volume_per_reaction * total_reactions,
        });
    }

    let water_per_reaction = if used_per_reaction > per_reaction_volume {
        if strictness == Strictness::Strict {
            return Err(LabError::OverVolume {
                excess_per_reaction: used_per_reaction - per_reaction_volume,
            });
        }
        warnings.push(CalcWarning::OverVolume {
            excess_per_reaction: used_per_reaction - per_reaction_volume,
        });
        0.0
    } else {
        per_reaction_volume - used_per_reaction
    };

    Ok(BatchResult {
        components,
        water_per_reaction,
        total_water: water_per_reaction * total_reactions,
        warnings,
    })
}
