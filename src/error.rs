//! Error types for LabMix
//!
//! Uses `thiserror` for library errors; the binary boundary wraps these in
//! `anyhow::Result`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for LabMix operations
pub type LabResult<T> = Result<T, LabError>;

/// Main error type for LabMix operations
#[derive(Error, Debug)]
pub enum LabError {
    /// A protocol requirement references a reagent that is not in stock
    /// (only surfaced under strict calculation)
    #[error("reagent '{reagent_id}' referenced by protocol is not in the inventory")]
    MissingReagent { reagent_id: String },

    /// Component volumes exceed the reaction volume
    /// (only surfaced under strict calculation)
    #[error("components exceed reaction volume by {excess_per_reaction} uL per reaction")]
    OverVolume { excess_per_reaction: f64 },

    /// Finalize was called without an analyst signature
    #[error("analyst signature is required to register a preparation")]
    MissingAnalyst,

    /// Finalize was called for a batch of zero or negative reactions
    #[error("total reactions must be greater than zero (got {total_reactions})")]
    EmptyBatch { total_reactions: f64 },

    /// A protocol must contain at least one reagent requirement
    #[error("protocol '{name}' has no reagent requirements")]
    EmptyProtocol { name: String },

    /// Lookup by id failed
    #[error("no {kind} with id '{id}'")]
    NotFound { kind: &'static str, id: String },

    /// State file exists but cannot be parsed
    #[error("corrupt state file {path}: {message}")]
    CorruptState { path: PathBuf, message: String },

    /// Configuration file cannot be parsed
    #[error("invalid config {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// Remote table store request failed (push/pull only; mirroring
    /// sinks swallow their own errors)
    #[error("remote store error: {0}")]
    Remote(String),

    /// Preparation was aborted by the user at the confirmation prompt
    #[error("preparation aborted by user")]
    Aborted,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
