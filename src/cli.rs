use clap::{Parser, Subcommand};

use labmix::EquipmentCategory;

/// LabMix - laboratory reagent-mix calculator and inventory tracker
#[derive(Parser, Debug)]
#[command(name = "labmix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI/automation
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage reagent stock
    Reagent {
        #[command(subcommand)]
        action: ReagentAction,
    },

    /// Manage the equipment roster
    Equipment {
        #[command(subcommand)]
        action: EquipmentAction,
    },

    /// Manage mix protocols (templates)
    Protocol {
        #[command(subcommand)]
        action: ProtocolAction,
    },

    /// Calculate pipetting volumes for a batch and register the preparation
    Prep {
        /// Protocol id or name
        #[arg(short, long)]
        protocol: String,

        /// Number of reactions
        #[arg(short, long)]
        reactions: f64,

        /// Extra fractional reactions to cover pipetting loss
        #[arg(long, default_value_t = 0.0)]
        overage: f64,

        /// Volume of one reaction in uL
        #[arg(long, default_value_t = 20.0)]
        volume: f64,

        /// Analyst signature (initials)
        #[arg(short, long)]
        analyst: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Calculate and print without registering anything
        #[arg(long)]
        dry_run: bool,

        /// Treat calculation anomalies as errors (overrides config)
        #[arg(long)]
        strict: bool,
    },

    /// Browse the preparation audit trail
    History {
        /// Show the full detail of one record by id
        #[arg(long)]
        show: Option<String>,

        /// Maximum records to list
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Mirror the whole local state to the remote table store
    Push,

    /// Rebuild local state from the remote table store (overwrites local)
    Pull {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReagentAction {
    /// Register a reagent
    Add {
        #[arg(short, long)]
        name: String,

        /// Stock concentration
        #[arg(short, long)]
        concentration: f64,

        /// Concentration unit (e.g., mM, X, ng/uL)
        #[arg(short, long)]
        unit: String,

        /// Lot number (defaults to N/A)
        #[arg(long)]
        lot: Option<String>,
    },

    /// List the inventory
    List,

    /// Edit a reagent in place (same id, new field values)
    Edit {
        /// Reagent id or name
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        concentration: Option<f64>,

        #[arg(long)]
        unit: Option<String>,

        #[arg(long)]
        lot: Option<String>,
    },

    /// Delete a reagent (does not touch protocols referencing it)
    Rm {
        /// Reagent id or name
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum EquipmentAction {
    /// Register a piece of equipment
    Add {
        /// Category: chamber, pipette, vortex, centrifuge, thermocycler,
        /// or free text
        #[arg(short, long)]
        category: EquipmentCategory,

        #[arg(short, long)]
        name: String,
    },

    /// List registered equipment
    List,

    /// Remove a piece of equipment
    Rm {
        /// Equipment id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProtocolAction {
    /// Create a protocol from component specs
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Component as REAGENT:TARGET_CONCENTRATION (repeatable;
        /// REAGENT is an id or name, resolved at creation time)
        #[arg(short = 'r', long = "component", value_parser = parse_component)]
        components: Vec<(String, f64)>,
    },

    /// List protocols
    List,

    /// Show one protocol with its requirements
    Show {
        /// Protocol id or name
        id: String,
    },

    /// Delete a protocol
    Rm {
        /// Protocol id or name
        id: String,
    },
}

/// Parse `REAGENT:TARGET` component specs (split on the last colon so
/// reagent names may contain colons)
pub fn parse_component(s: &str) -> Result<(String, f64), String> {
    let (reagent, target) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected REAGENT:TARGET, got '{s}'"))?;
    if reagent.is_empty() {
        return Err(format!("missing reagent in component '{s}'"));
    }
    let target: f64 = target
        .parse()
        .map_err(|_| format!("invalid target concentration '{target}'"))?;
    if target < 0.0 {
        return Err(format!("target concentration must not be negative, got {target}"));
    }
    Ok((reagent.to_string(), target))
}
