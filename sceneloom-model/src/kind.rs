//! Kind definitions and the kind→factory table.

use crate::SharedEntity;
use sceneloom_types::{KindId, Params};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Constructor for one entity kind. Factories are pure: they build the
/// entity from its parameters and nothing else — insertion into a store
/// is the caller's job.
pub type KindFactory = Arc<dyn Fn(Params) -> SharedEntity + Send + Sync>;

/// Where a kind definition came from, which decides whether it survives
/// a project reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindSource {
    /// Compiled into the editor; always available.
    Builtin,
    /// Loaded from project content (e.g. a user-uploaded asset pack);
    /// pruned when the project that carried it is unloaded.
    Dynamic,
}

/// A registered entity kind: id, provenance, and factory.
#[derive(Clone)]
pub struct KindDef {
    id: KindId,
    source: KindSource,
    factory: KindFactory,
}

impl KindDef {
    /// Creates a kind definition.
    pub fn new(
        id: impl Into<KindId>,
        source: KindSource,
        factory: impl Fn(Params) -> SharedEntity + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            source,
            factory: Arc::new(factory),
        }
    }

    /// Shorthand for a built-in kind.
    pub fn builtin(
        id: impl Into<KindId>,
        factory: impl Fn(Params) -> SharedEntity + Send + Sync + 'static,
    ) -> Self {
        Self::new(id, KindSource::Builtin, factory)
    }

    /// Shorthand for a content-loaded kind.
    pub fn dynamic(
        id: impl Into<KindId>,
        factory: impl Fn(Params) -> SharedEntity + Send + Sync + 'static,
    ) -> Self {
        Self::new(id, KindSource::Dynamic, factory)
    }

    /// The kind's registration id.
    #[must_use]
    pub fn id(&self) -> &KindId {
        &self.id
    }

    /// The kind's provenance.
    #[must_use]
    pub fn source(&self) -> KindSource {
        self.source
    }

    /// Runs the factory on a parameter set.
    #[must_use]
    pub fn construct(&self, params: Params) -> SharedEntity {
        (self.factory)(params)
    }

    /// Clones out the factory handle.
    #[must_use]
    pub fn factory(&self) -> KindFactory {
        Arc::clone(&self.factory)
    }
}

impl fmt::Debug for KindDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindDef")
            .field("id", &self.id)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Kind→factory table for one registry.
///
/// Registration is last-wins: re-registering an id replaces the previous
/// definition (hot-swapping live entities onto a new definition is
/// unsupported; existing entities keep behaving as constructed).
#[derive(Debug, Default)]
pub struct KindTable {
    kinds: HashMap<KindId, KindDef>,
}

impl KindTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a kind definition, replacing any previous one for the
    /// same id.
    pub fn register(&mut self, def: KindDef) {
        let id = def.id().clone();
        if let Some(previous) = self.kinds.insert(id.clone(), def) {
            warn!(
                "Replaced {:?} kind definition {} (last registration wins)",
                previous.source(),
                id
            );
        }
    }

    /// Looks up a kind definition by id.
    #[must_use]
    pub fn get(&self, kind_id: &str) -> Option<&KindDef> {
        self.kinds.get(kind_id)
    }

    /// Whether a kind id is registered.
    #[must_use]
    pub fn contains(&self, kind_id: &str) -> bool {
        self.kinds.contains_key(kind_id)
    }

    /// Drops every [`KindSource::Dynamic`] definition, returning how many
    /// were removed. Built-in kinds are unaffected.
    pub fn prune_dynamic(&mut self) -> usize {
        let before = self.kinds.len();
        self.kinds.retain(|_, def| def.source() == KindSource::Builtin);
        let removed = before - self.kinds.len();
        if removed > 0 {
            debug!("Pruned {} dynamic kind definition(s)", removed);
        }
        removed
    }

    /// Registered kind ids, sorted for deterministic iteration.
    #[must_use]
    pub fn ids(&self) -> Vec<KindId> {
        let mut ids: Vec<KindId> = self.kinds.keys().cloned().collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
