//! Reversible edit commands.
//!
//! A command captures everything needed to take one mutation back and
//! apply it again. The two built-in commands hold the store handle and
//! the entity handle itself — not a serialized copy — so redo restores
//! the exact object that was removed. Replay always re-enters the store
//! with a replay origin; a command that recorded again would grow the
//! history it is replaying.

use crate::registry::EntityStore;
use sceneloom_model::SharedEntity;
use sceneloom_types::MutationOrigin;
use std::sync::Arc;

/// One reversible unit of work in the undo history.
///
/// Implementations outside the engine are how delete subscribers splice
/// dependent restores onto a delete transaction via
/// [`EditHistory::amend`](crate::EditHistory::amend).
pub trait EditCommand: Send {
    /// Short human label, e.g. `"delete material"`, surfaced in undo
    /// menus and log lines.
    fn label(&self) -> &str;

    /// Takes the mutation back.
    fn undo(&mut self);

    /// Applies the mutation again.
    fn redo(&mut self);
}

/// Inverse pair for an entity add: undo deletes, redo re-inserts the
/// same entity handle.
pub(crate) struct InsertEntity {
    store: EntityStore,
    entity: SharedEntity,
    label: String,
}

impl InsertEntity {
    pub(crate) fn new(store: EntityStore, entity: SharedEntity) -> Self {
        let label = format!("add {}", store.class().label());
        Self {
            store,
            entity,
            label,
        }
    }
}

impl EditCommand for InsertEntity {
    fn label(&self) -> &str {
        &self.label
    }

    fn undo(&mut self) {
        let id = self.entity.read().id().clone();
        self.store.delete_entity(id.as_str(), MutationOrigin::UndoReplay);
    }

    fn redo(&mut self) {
        self.store
            .add_entity(Arc::clone(&self.entity), MutationOrigin::UndoReplay);
    }
}

/// Inverse pair for an entity delete: undo restores the original entity
/// handle, redo deletes it again.
pub(crate) struct RemoveEntity {
    store: EntityStore,
    entity: SharedEntity,
    label: String,
}

impl RemoveEntity {
    pub(crate) fn new(store: EntityStore, entity: SharedEntity) -> Self {
        let label = format!("delete {}", store.class().label());
        Self {
            store,
            entity,
            label,
        }
    }
}

impl EditCommand for RemoveEntity {
    fn label(&self) -> &str {
        &self.label
    }

    fn undo(&mut self) {
        self.store
            .add_entity(Arc::clone(&self.entity), MutationOrigin::UndoReplay);
    }

    fn redo(&mut self) {
        let id = self.entity.read().id().clone();
        self.store.delete_entity(id.as_str(), MutationOrigin::UndoReplay);
    }
}
