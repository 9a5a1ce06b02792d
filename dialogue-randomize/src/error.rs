//! Error types for the randomization engine.
//!
//! Donor exhaustion is deliberately *not* here: running out of candidates
//! degrades to Cut semantics on the current synthetic dialogue and the
//! corpus pass continues. Everything below aborts the run.

use dialogue_corpus::{CorpusError, DialogueId};
use thiserror::Error;

/// Errors that abort a randomization run.
#[derive(Debug, Error)]
pub enum RandomizeError {
    /// A configuration combination that can never produce a meaningful
    /// null model, rejected before any sampling begins.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// A required speaker or genre lookup failed mid-run.
    #[error("missing metadata in dialogue '{dialogue}': {detail}")]
    MissingMetadata { dialogue: DialogueId, detail: String },

    /// A corpus-level lookup failed.
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// The synthesized dialogue does not reconcile with its source. This
    /// indicates a transplantation defect and must never silently produce
    /// a corrupted corpus for downstream statistics.
    #[error("structural inconsistency in dialogue '{dialogue}': {detail}")]
    StructuralInconsistency { dialogue: DialogueId, detail: String },
}

/// Result wrapper for engine operations.
pub type RandomizeResult<T> = Result<T, RandomizeError>;
