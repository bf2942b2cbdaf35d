//! Error types for the engine.

use sceneloom_types::{EntityClass, KindId};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No factory registered for a kind id. Recoverable at the snapshot
    /// level: loaders skip the offending bucket and keep going.
    #[error("unknown {class} kind: {kind}")]
    UnknownKind { class: EntityClass, kind: KindId },

    /// Snapshot (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Project file read/write failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
