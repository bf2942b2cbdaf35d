//! Wire envelope for shipping project state between collaborating peers.

use crate::error::EngineResult;
use crate::snapshot::{LoadMode, ProjectSnapshot};
use sceneloom_types::{PeerId, UpdateId};
use serde::{Deserialize, Serialize};

/// One peer-to-peer state update: a project snapshot plus enough
/// metadata to order and deduplicate it on the receiving side.
///
/// Applying an update is always suppressed on the receiver — replayed
/// state must not re-enter the local undo history or echo back onto the
/// bus as a fresh mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUpdate {
    /// Unique id for this update, for receiver-side deduplication.
    pub update_id: UpdateId,
    /// The peer that produced the update.
    pub peer_id: PeerId,
    /// Per-peer monotonic sequence number.
    pub seq: u64,
    /// How the receiver should reconcile the snapshot.
    pub mode: LoadMode,
    /// The state being shipped.
    pub snapshot: ProjectSnapshot,
}

impl SessionUpdate {
    /// Creates an update carrying a complete project image, to be
    /// applied as a replace.
    #[must_use]
    pub fn full(peer_id: PeerId, seq: u64, snapshot: ProjectSnapshot) -> Self {
        Self {
            update_id: UpdateId::new(),
            peer_id,
            seq,
            mode: LoadMode::Replace,
            snapshot,
        }
    }

    /// Creates an update to be merged into the receiver's state.
    #[must_use]
    pub fn diff(peer_id: PeerId, seq: u64, snapshot: ProjectSnapshot) -> Self {
        Self {
            update_id: UpdateId::new(),
            peer_id,
            seq,
            mode: LoadMode::Diff,
            snapshot,
        }
    }

    /// Serializes the update to compact JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes an update from JSON.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
