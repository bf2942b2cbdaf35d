use parking_lot::RwLock;
use sceneloom_types::{EntityId, Params};
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// A typed, mutable, identity-bearing scene object.
///
/// Identity is fixed at construction: `id()` never changes, and
/// [`update_from_params`](Self::update_from_params) mutates fields in
/// place without replacing the object. Exported parameter maps always
/// include the entity's own id, and constructors/updaters must tolerate
/// missing fields (default them) and ignore unknown ones, so snapshots
/// written by newer editors still load.
pub trait SceneEntity: Send + Sync + Debug {
    /// The entity's immutable identifier.
    fn id(&self) -> &EntityId;

    /// The kind id this entity was constructed under; routes its
    /// serialized form back to the right factory.
    fn kind_id(&self) -> &str;

    /// Serializable projection of the entity, including its id.
    fn export_params(&self) -> Params;

    /// Applies a new parameter set in place. Never changes identity.
    fn update_from_params(&mut self, params: &Params);

    /// Concrete-type access for consumers that know the kind.
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a live entity. The same handle is held by the store,
/// by recorded undo commands, and by any subscriber that captured it, so
/// undo/redo restores the *same* object rather than a reconstruction.
/// Compare handles with [`Arc::ptr_eq`].
pub type SharedEntity = Arc<RwLock<dyn SceneEntity>>;

/// Wraps a concrete entity in a [`SharedEntity`] handle.
#[must_use]
pub fn share<E: SceneEntity + 'static>(entity: E) -> SharedEntity {
    Arc::new(RwLock::new(entity))
}
