//! The wire snapshot format and load accounting.
//!
//! A snapshot buckets entity parameter maps by kind id, preserving
//! per-bucket order (the order entities were discovered in the store).
//! The same shape serves both persisted project files and session
//! updates between peers. Readers are tolerant across versions: missing
//! buckets default to empty and unknown kinds are skipped at load time,
//! so a project saved with a newer kind still loads everything else.

use crate::error::EngineResult;
use sceneloom_types::{EntityClass, KindId, Params, ID_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a snapshot is applied to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Drop everything live, then rebuild from the snapshot.
    Replace,
    /// Reconcile: delete stale entities, update matching ones in place,
    /// add new ones.
    Diff,
}

impl LoadMode {
    #[must_use]
    pub const fn is_diff(self) -> bool {
        matches!(self, LoadMode::Diff)
    }

    #[must_use]
    pub const fn is_replace(self) -> bool {
        matches!(self, LoadMode::Replace)
    }
}

/// Kind-bucketed parameter lists for one registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreSnapshot {
    buckets: BTreeMap<KindId, Vec<Params>>,
}

impl StoreSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter map to its kind's bucket.
    pub fn push(&mut self, kind_id: impl Into<KindId>, params: Params) {
        self.buckets.entry(kind_id.into()).or_default().push(params);
    }

    /// Builder-style bucket insert, for assembling snapshots inline.
    #[must_use]
    pub fn with_bucket(mut self, kind_id: impl Into<KindId>, bucket: Vec<Params>) -> Self {
        self.buckets.insert(kind_id.into(), bucket);
        self
    }

    /// The bucket for a kind, if present.
    #[must_use]
    pub fn bucket(&self, kind_id: &str) -> Option<&[Params]> {
        self.buckets.get(kind_id).map(Vec::as_slice)
    }

    /// Whether the bucket for `kind_id` holds a parameter map with this
    /// entity id. This is the membership test reconciliation dooms
    /// against: an entity whose id moved to another kind counts as gone.
    #[must_use]
    pub fn contains_entity(&self, kind_id: &str, entity_id: &str) -> bool {
        self.buckets
            .get(kind_id)
            .is_some_and(|bucket| bucket.iter().any(|p| p.get_str(ID_KEY) == Some(entity_id)))
    }

    /// Iterates buckets in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (&KindId, &Vec<Params>)> {
        self.buckets.iter()
    }

    /// Kind ids present in the snapshot, in order.
    pub fn kind_ids(&self) -> impl Iterator<Item = &KindId> {
        self.buckets.keys()
    }

    /// Total parameter maps across all buckets.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// One snapshot per registry class — the persisted-project and
/// network-sync format. Every field defaults so older files load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub textures: StoreSnapshot,
    #[serde(default)]
    pub materials: StoreSnapshot,
    #[serde(default)]
    pub assets: StoreSnapshot,
    #[serde(default)]
    pub components: StoreSnapshot,
    #[serde(default)]
    pub systems: StoreSnapshot,
}

impl ProjectSnapshot {
    /// Creates an empty project snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The snapshot for one registry class.
    #[must_use]
    pub fn store(&self, class: EntityClass) -> &StoreSnapshot {
        match class {
            EntityClass::Asset => &self.assets,
            EntityClass::Component => &self.components,
            EntityClass::Material => &self.materials,
            EntityClass::System => &self.systems,
            EntityClass::Texture => &self.textures,
        }
    }

    /// Mutable access to one class's snapshot.
    pub fn store_mut(&mut self, class: EntityClass) -> &mut StoreSnapshot {
        match class {
            EntityClass::Asset => &mut self.assets,
            EntityClass::Component => &mut self.components,
            EntityClass::Material => &mut self.materials,
            EntityClass::System => &mut self.systems,
            EntityClass::Texture => &mut self.textures,
        }
    }

    /// Total parameter maps across all classes.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        EntityClass::ALL
            .iter()
            .map(|class| self.store(*class).entity_count())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    /// Serializes to pretty-printed JSON, the on-disk project format.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// What one load call did to a store (or, summed, to a whole project).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Entities constructed and inserted.
    pub added: usize,
    /// Live entities updated in place (diff mode only).
    pub updated: usize,
    /// Stale entities deleted.
    pub removed: usize,
    /// Kinds present in the snapshot but unknown to the store; their
    /// buckets were skipped.
    pub skipped_kinds: Vec<KindId>,
}

impl LoadReport {
    /// Folds another report into this one.
    pub fn absorb(&mut self, other: LoadReport) {
        self.added += other.added;
        self.updated += other.updated;
        self.removed += other.removed;
        self.skipped_kinds.extend(other.skipped_kinds);
    }

    /// True when every bucket was understood.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped_kinds.is_empty()
    }

    /// Total live-store mutations (adds + removes, not in-place updates).
    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.added + self.removed
    }
}
