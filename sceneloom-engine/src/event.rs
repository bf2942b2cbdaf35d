//! Messages carried on the project's event bus.

use crate::history::CommandId;
use crate::snapshot::{LoadMode, LoadReport};
use sceneloom_model::SharedEntity;
use sceneloom_types::{EntityClass, KindId};
use std::fmt;

/// What happened to the project. Add/delete events are published
/// immediately under `<CLASS>_ADDED:<kindId>` / `<CLASS>_DELETED:<kindId>`;
/// project-level events go through the queued lane under `PROJECT:*`.
#[derive(Clone)]
pub enum SceneEvent {
    /// An entity entered a live store.
    EntityAdded {
        class: EntityClass,
        kind_id: KindId,
        entity: SharedEntity,
    },
    /// An entity left a live store. `command` is the undo entry recorded
    /// for the delete (present only for local edits), so subscribers can
    /// splice dependent restores onto the same transaction.
    EntityDeleted {
        class: EntityClass,
        kind_id: KindId,
        entity: SharedEntity,
        command: Option<CommandId>,
    },
    /// The whole project was reset to empty.
    ProjectReset,
    /// A snapshot finished loading across all five stores.
    ProjectLoaded { mode: LoadMode, report: LoadReport },
}

impl SceneEvent {
    /// The entity this event is about, if it is an entity event.
    #[must_use]
    pub fn entity(&self) -> Option<&SharedEntity> {
        match self {
            SceneEvent::EntityAdded { entity, .. }
            | SceneEvent::EntityDeleted { entity, .. } => Some(entity),
            _ => None,
        }
    }

    /// The registry class this event is about, if any.
    #[must_use]
    pub fn class(&self) -> Option<EntityClass> {
        match self {
            SceneEvent::EntityAdded { class, .. }
            | SceneEvent::EntityDeleted { class, .. } => Some(*class),
            _ => None,
        }
    }
}

impl fmt::Debug for SceneEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneEvent::EntityAdded { class, kind_id, .. } => f
                .debug_struct("EntityAdded")
                .field("class", class)
                .field("kind_id", kind_id)
                .finish_non_exhaustive(),
            SceneEvent::EntityDeleted {
                class,
                kind_id,
                command,
                ..
            } => f
                .debug_struct("EntityDeleted")
                .field("class", class)
                .field("kind_id", kind_id)
                .field("command", command)
                .finish_non_exhaustive(),
            SceneEvent::ProjectReset => f.write_str("ProjectReset"),
            SceneEvent::ProjectLoaded { mode, report } => f
                .debug_struct("ProjectLoaded")
                .field("mode", mode)
                .field("report", report)
                .finish(),
        }
    }
}
