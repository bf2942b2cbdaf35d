//! The per-class entity registry.
//!
//! Each store owns two id→entity maps. The *live* map holds what is
//! currently in the project and is the only map mutation touches. The
//! *session* map is an append-only superset: an entity lands there on
//! first add and stays through deletion, so undo commands already on the
//! stack and async messages captured before a delete can still resolve
//! it by id. Only [`EntityStore::reset`] (a full project reload) clears
//! the session map. Live ⊆ session holds at all times, and an id is
//! never reused after deletion within one session.
//!
//! Every mutation states its [`MutationOrigin`] once; the store derives
//! from it whether to record an inverse command and whether to publish.
//! Snapshot loads run fully suppressed: nothing they do may reach the
//! undo history or the bus, or two peers would replay each other's
//! updates forever.

use crate::bus::{Delivery, EventBus, TOPIC_DELIMITER};
use crate::command::{InsertEntity, RemoveEntity};
use crate::error::{EngineError, EngineResult};
use crate::event::SceneEvent;
use crate::history::EditHistory;
use crate::snapshot::{LoadMode, LoadReport, StoreSnapshot};
use parking_lot::RwLock;
use sceneloom_model::{KindDef, KindTable, SharedEntity};
use sceneloom_types::{EntityClass, EntityId, KindId, MutationOrigin, OwnerId, Params};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

struct StoreInner {
    kinds: KindTable,
    live: HashMap<EntityId, SharedEntity>,
    /// Live ids in discovery order; export and reconciliation iterate
    /// this, never the map.
    order: Vec<EntityId>,
    session: HashMap<EntityId, SharedEntity>,
}

/// Cheap-to-clone handle to one registry. Recorded undo commands hold a
/// clone, which is how replay finds its way back to the right store.
#[derive(Clone)]
pub struct EntityStore {
    class: EntityClass,
    owner: OwnerId,
    inner: Arc<RwLock<StoreInner>>,
    history: EditHistory,
    bus: EventBus<SceneEvent>,
}

impl EntityStore {
    /// Creates an empty store for one registry class, wired to the
    /// project's shared history and bus.
    #[must_use]
    pub fn new(class: EntityClass, history: EditHistory, bus: EventBus<SceneEvent>) -> Self {
        Self {
            class,
            owner: OwnerId::new(format!("{}-store", class.label())),
            inner: Arc::new(RwLock::new(StoreInner {
                kinds: KindTable::new(),
                live: HashMap::new(),
                order: Vec::new(),
                session: HashMap::new(),
            })),
            history,
            bus,
        }
    }

    /// The registry class this store serves.
    #[must_use]
    pub fn class(&self) -> EntityClass {
        self.class
    }

    // ── Kind registration ─────────────────────────────────────────

    /// Registers one kind definition (last registration wins).
    pub fn register_kind(&self, def: KindDef) {
        self.inner.write().kinds.register(def);
    }

    /// Registers a batch of kind definitions.
    pub fn register_kinds(&self, defs: impl IntoIterator<Item = KindDef>) {
        let mut inner = self.inner.write();
        for def in defs {
            inner.kinds.register(def);
        }
    }

    /// Whether a kind id has a registered factory.
    #[must_use]
    pub fn has_kind(&self, kind_id: &str) -> bool {
        self.inner.read().kinds.contains(kind_id)
    }

    /// Registered kind ids, sorted.
    #[must_use]
    pub fn kind_ids(&self) -> Vec<KindId> {
        self.inner.read().kinds.ids()
    }

    // ── Mutation ──────────────────────────────────────────────────

    /// Constructs an entity of `kind_id` from `params` and adds it.
    ///
    /// If `params` carries an id that is already live, the existing
    /// entity is returned untouched — no construction, no event. Ids
    /// absent from `params` are generated by the factory.
    pub fn add_new_entity(
        &self,
        kind_id: &str,
        params: Params,
        origin: MutationOrigin,
    ) -> EngineResult<SharedEntity> {
        let factory = {
            let inner = self.inner.read();
            match inner.kinds.get(kind_id) {
                Some(def) => def.factory(),
                None => {
                    return Err(EngineError::UnknownKind {
                        class: self.class,
                        kind: KindId::from(kind_id),
                    });
                }
            }
        };
        if let Some(id) = params.entity_id() {
            if let Some(existing) = self.get_entity(id.as_str()) {
                debug!(
                    "Skipped duplicate {} add for entity {} (kind={})",
                    self.class, id, kind_id
                );
                return Ok(existing);
            }
        }
        let entity = factory(params);
        self.add_entity(Arc::clone(&entity), origin);
        Ok(entity)
    }

    /// Inserts an already-constructed entity into the live and session
    /// maps. A live-id collision is a silent no-op returning false —
    /// required for safe diff replay and out-of-order redelivery.
    pub fn add_entity(&self, entity: SharedEntity, origin: MutationOrigin) -> bool {
        let (id, kind_id) = {
            let guard = entity.read();
            (guard.id().clone(), KindId::from(guard.kind_id()))
        };
        {
            let mut inner = self.inner.write();
            if inner.live.contains_key(&id) {
                return false;
            }
            inner.live.insert(id.clone(), Arc::clone(&entity));
            inner.order.push(id.clone());
            inner.session.insert(id.clone(), Arc::clone(&entity));
        }
        debug!(
            "Added {} entity {} (kind={}, origin={})",
            self.class, id, kind_id, origin
        );
        if origin.records_history() {
            self.history
                .record(Box::new(InsertEntity::new(self.clone(), Arc::clone(&entity))));
        }
        if origin.publishes() {
            let topic = format!("{}{TOPIC_DELIMITER}{kind_id}", self.class.added_topic());
            self.bus.publish(
                &self.owner,
                topic,
                SceneEvent::EntityAdded {
                    class: self.class,
                    kind_id,
                    entity,
                },
                Delivery::Immediate,
            );
        }
        true
    }

    /// Removes an entity from the live map; the session map keeps it.
    /// Deleting an absent id is a silent no-op.
    ///
    /// For local deletes, the published event carries the recorded undo
    /// entry's id so subscribers can splice dependent restores onto the
    /// same transaction.
    pub fn delete_entity(&self, id: &str, origin: MutationOrigin) -> Option<SharedEntity> {
        let entity = {
            let mut inner = self.inner.write();
            let entity = inner.live.remove(id)?;
            inner.order.retain(|o| o.as_str() != id);
            entity
        };
        let kind_id = KindId::from(entity.read().kind_id());
        debug!(
            "Deleted {} entity {} (kind={}, origin={})",
            self.class, id, kind_id, origin
        );
        let command = if origin.records_history() {
            self.history
                .record(Box::new(RemoveEntity::new(self.clone(), Arc::clone(&entity))))
        } else {
            None
        };
        if origin.publishes() {
            let topic = format!("{}{TOPIC_DELIMITER}{kind_id}", self.class.deleted_topic());
            self.bus.publish(
                &self.owner,
                topic,
                SceneEvent::EntityDeleted {
                    class: self.class,
                    kind_id,
                    entity: Arc::clone(&entity),
                    command,
                },
                Delivery::Immediate,
            );
        }
        Some(entity)
    }

    // ── Lookup ────────────────────────────────────────────────────

    /// Live-store lookup.
    #[must_use]
    pub fn get_entity(&self, id: &str) -> Option<SharedEntity> {
        self.inner.read().live.get(id).cloned()
    }

    /// Session-store lookup; succeeds for entities deleted earlier in
    /// this session.
    #[must_use]
    pub fn get_session_entity(&self, id: &str) -> Option<SharedEntity> {
        self.inner.read().session.get(id).cloned()
    }

    /// Whether an id is currently live.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().live.contains_key(id)
    }

    /// Live entities in discovery order.
    #[must_use]
    pub fn live_entities(&self) -> Vec<SharedEntity> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.live.get(id).map(Arc::clone))
            .collect()
    }

    /// Live ids in discovery order.
    #[must_use]
    pub fn live_ids(&self) -> Vec<EntityId> {
        self.inner.read().order.clone()
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().live.is_empty()
    }

    /// Number of entities ever seen this session.
    #[must_use]
    pub fn session_len(&self) -> usize {
        self.inner.read().session.len()
    }

    // ── Snapshots ─────────────────────────────────────────────────

    /// Projects every live entity through `export_params`, bucketed by
    /// kind, discovery order preserved within each bucket.
    #[must_use]
    pub fn export_details(&self) -> StoreSnapshot {
        let mut snapshot = StoreSnapshot::new();
        for entity in self.live_entities() {
            let guard = entity.read();
            snapshot.push(KindId::from(guard.kind_id()), guard.export_params());
        }
        snapshot
    }

    /// Applies a snapshot. Deletions always run before inserts/updates,
    /// so an id reused across delete+recreate within one snapshot lands
    /// on the recreate. Every mutation in here is fully suppressed — a
    /// load never records undo entries and never publishes.
    pub fn load(&self, snapshot: &StoreSnapshot, mode: LoadMode) -> LoadReport {
        let mut report = LoadReport::default();

        let live: Vec<(EntityId, SharedEntity)> = {
            let inner = self.inner.read();
            inner
                .order
                .iter()
                .filter_map(|id| inner.live.get(id).map(|e| (id.clone(), Arc::clone(e))))
                .collect()
        };
        let mut doomed = Vec::new();
        for (id, entity) in &live {
            let keep = match mode {
                LoadMode::Replace => false,
                LoadMode::Diff => {
                    let kind_id = entity.read().kind_id().to_string();
                    snapshot.contains_entity(&kind_id, id.as_str())
                }
            };
            if !keep {
                doomed.push(id.clone());
            }
        }
        for id in &doomed {
            if self
                .delete_entity(id.as_str(), MutationOrigin::RemoteReplay)
                .is_some()
            {
                report.removed += 1;
            }
        }

        for (kind_id, bucket) in snapshot.iter() {
            if !self.has_kind(kind_id.as_str()) {
                warn!(
                    "Skipped unknown {} kind {} ({} entities)",
                    self.class,
                    kind_id,
                    bucket.len()
                );
                report.skipped_kinds.push(kind_id.clone());
                continue;
            }
            for params in bucket {
                let existing = params
                    .entity_id()
                    .and_then(|id| self.get_entity(id.as_str()));
                match existing {
                    Some(entity) if mode.is_diff() => {
                        entity.write().update_from_params(params);
                        report.updated += 1;
                    }
                    _ => match self.add_new_entity(
                        kind_id.as_str(),
                        params.clone(),
                        MutationOrigin::RemoteReplay,
                    ) {
                        Ok(_) => report.added += 1,
                        Err(err) => warn!(
                            "Dropped {} entity during load: {}",
                            self.class, err
                        ),
                    },
                }
            }
        }
        debug!(
            "Loaded {} snapshot ({:?}: {} added, {} updated, {} removed)",
            self.class, mode, report.added, report.updated, report.removed
        );
        report
    }

    /// Deletes every live entity (suppressed), clears both maps, and
    /// prunes dynamic kind definitions. The full project reload
    /// boundary.
    pub fn reset(&self) {
        let doomed: Vec<EntityId> = self.inner.read().order.clone();
        for id in &doomed {
            self.delete_entity(id.as_str(), MutationOrigin::RemoteReplay);
        }
        let pruned = {
            let mut inner = self.inner.write();
            inner.session.clear();
            inner.kinds.prune_dynamic()
        };
        debug!(
            "Reset {} store ({} entities dropped, {} dynamic kinds pruned)",
            self.class,
            doomed.len(),
            pruned
        );
    }
}
