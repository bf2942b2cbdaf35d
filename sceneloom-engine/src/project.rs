//! The top-level editing context.
//!
//! A [`Project`] owns one shared event bus, one shared edit history,
//! and one [`EntityStore`] per registry class. Nothing here is global:
//! consumers receive a `Project` (or a clone of one of its handles) and
//! reach everything through it. Because every store pushes onto the
//! same history, undo and redo interleave across classes in true call
//! order.

use crate::bus::{Delivery, EventBus};
use crate::error::EngineResult;
use crate::event::SceneEvent;
use crate::history::EditHistory;
use crate::registry::EntityStore;
use crate::session::SessionUpdate;
use crate::snapshot::{LoadMode, LoadReport, ProjectSnapshot};
use sceneloom_model::KindDef;
use sceneloom_types::{EntityClass, OwnerId, PeerId};
use std::path::Path;
use tracing::{debug, info};

/// Queued notification that a full project reset ran.
pub const TOPIC_PROJECT_RESET: &str = "PROJECT:RESET";
/// Queued notification that a snapshot load finished, carrying the mode
/// and the merged report.
pub const TOPIC_PROJECT_LOADED: &str = "PROJECT:LOADED";

/// One open scene project. Cloning yields another handle onto the same
/// underlying state.
#[derive(Clone)]
pub struct Project {
    bus: EventBus<SceneEvent>,
    history: EditHistory,
    textures: EntityStore,
    materials: EntityStore,
    assets: EntityStore,
    components: EntityStore,
    systems: EntityStore,
    owner: OwnerId,
}

impl Project {
    /// Creates an empty project with no kinds registered.
    #[must_use]
    pub fn new() -> Self {
        let bus = EventBus::new();
        let history = EditHistory::new();
        let store =
            |class| EntityStore::new(class, history.clone(), bus.clone());
        Self {
            textures: store(EntityClass::Texture),
            materials: store(EntityClass::Material),
            assets: store(EntityClass::Asset),
            components: store(EntityClass::Component),
            systems: store(EntityClass::System),
            bus,
            history,
            owner: OwnerId::new("project"),
        }
    }

    // ── Access ────────────────────────────────────────────────────

    /// The store for one registry class.
    #[must_use]
    pub fn store(&self, class: EntityClass) -> &EntityStore {
        match class {
            EntityClass::Asset => &self.assets,
            EntityClass::Component => &self.components,
            EntityClass::Material => &self.materials,
            EntityClass::System => &self.systems,
            EntityClass::Texture => &self.textures,
        }
    }

    #[must_use]
    pub fn assets(&self) -> &EntityStore {
        &self.assets
    }

    #[must_use]
    pub fn components(&self) -> &EntityStore {
        &self.components
    }

    #[must_use]
    pub fn materials(&self) -> &EntityStore {
        &self.materials
    }

    #[must_use]
    pub fn systems(&self) -> &EntityStore {
        &self.systems
    }

    #[must_use]
    pub fn textures(&self) -> &EntityStore {
        &self.textures
    }

    /// The shared event bus.
    #[must_use]
    pub fn bus(&self) -> &EventBus<SceneEvent> {
        &self.bus
    }

    /// The shared edit history.
    #[must_use]
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Registers kind definitions into one class's store.
    pub fn register_kinds(&self, class: EntityClass, defs: impl IntoIterator<Item = KindDef>) {
        self.store(class).register_kinds(defs);
    }

    // ── Editing ───────────────────────────────────────────────────

    /// Steps the edit history back once. Returns false if there was
    /// nothing to undo.
    pub fn undo(&self) -> bool {
        self.history.undo()
    }

    /// Steps the edit history forward once. Returns false if there was
    /// nothing to redo.
    pub fn redo(&self) -> bool {
        self.history.redo()
    }

    /// Flushes queued bus deliveries; call once per tick. Returns how
    /// many queued publishes were delivered.
    pub fn update(&self) -> usize {
        self.bus.flush()
    }

    /// Full project reload boundary: drops every live entity in every
    /// store (reverse dependency order, so referencing classes empty
    /// before the classes they reference), clears session maps, prunes
    /// dynamic kinds, and clears the edit history.
    pub fn reset(&self) {
        for class in EntityClass::LOAD_ORDER.iter().rev() {
            self.store(*class).reset();
        }
        self.history.clear();
        info!("Project reset");
        self.bus.publish(
            &self.owner,
            TOPIC_PROJECT_RESET,
            SceneEvent::ProjectReset,
            Delivery::Queued,
        );
    }

    // ── Snapshots ─────────────────────────────────────────────────

    /// Captures every store into one snapshot.
    #[must_use]
    pub fn export_snapshot(&self) -> ProjectSnapshot {
        let mut snapshot = ProjectSnapshot::new();
        for class in EntityClass::ALL {
            *snapshot.store_mut(class) = self.store(class).export_details();
        }
        snapshot
    }

    /// Applies a snapshot to every store in dependency order, so
    /// entities that reference other classes (a material naming a
    /// texture, a component naming an asset) find their dependencies
    /// already loaded. The whole load is suppressed.
    pub fn load_snapshot(&self, snapshot: &ProjectSnapshot, mode: LoadMode) -> LoadReport {
        let mut report = LoadReport::default();
        for class in EntityClass::LOAD_ORDER {
            report.absorb(self.store(class).load(snapshot.store(class), mode));
        }
        info!(
            "Loaded project snapshot ({:?}: {} added, {} updated, {} removed)",
            mode, report.added, report.updated, report.removed
        );
        self.bus.publish(
            &self.owner,
            TOPIC_PROJECT_LOADED,
            SceneEvent::ProjectLoaded {
                mode,
                report: report.clone(),
            },
            Delivery::Queued,
        );
        report
    }

    /// Writes the project to disk as pretty-printed JSON.
    pub fn save_to(&self, path: impl AsRef<Path>) -> EngineResult<()> {
        let json = self.export_snapshot().to_json()?;
        std::fs::write(path.as_ref(), json)?;
        debug!("Saved project to {}", path.as_ref().display());
        Ok(())
    }

    /// Reads a project file, resets this project, and loads the file's
    /// contents as a replace. Dynamic kinds do not survive the reset;
    /// re-register them before calling this if the file depends on
    /// them.
    pub fn open_from(&self, path: impl AsRef<Path>) -> EngineResult<LoadReport> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let snapshot = ProjectSnapshot::from_json(&json)?;
        self.reset();
        debug!("Opened project from {}", path.as_ref().display());
        Ok(self.load_snapshot(&snapshot, LoadMode::Replace))
    }

    // ── Session sync ──────────────────────────────────────────────

    /// Packages the current state as an update to ship to peers.
    #[must_use]
    pub fn capture_update(&self, peer_id: PeerId, seq: u64, mode: LoadMode) -> SessionUpdate {
        let snapshot = self.export_snapshot();
        match mode {
            LoadMode::Replace => SessionUpdate::full(peer_id, seq, snapshot),
            LoadMode::Diff => SessionUpdate::diff(peer_id, seq, snapshot),
        }
    }

    /// Applies a peer's update. Fully suppressed: nothing in it reaches
    /// the undo history or re-broadcasts.
    pub fn apply_update(&self, update: &SessionUpdate) -> LoadReport {
        debug!(
            "Applying update {} from peer {} (seq={}, mode={:?})",
            update.update_id, update.peer_id, update.seq, update.mode
        );
        self.load_snapshot(&update.snapshot, update.mode)
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}
