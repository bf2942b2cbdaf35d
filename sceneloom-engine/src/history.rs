//! The shared undo/redo history.
//!
//! One history serves every registry in a project, so undo/redo across
//! entity classes interleaves in true call order. Entries live in an
//! arena `Vec` behind a movable cursor: recording truncates everything
//! past the cursor (redo history is lost on a fresh action), undo moves
//! the cursor back, redo moves it forward. Each entry carries one or
//! more [`EditCommand`]s — delete subscribers can splice follow-up
//! commands onto the entry that deleted the entity, so dependent
//! restores ride the same undo step.
//!
//! `disable`/`enable` is reference-counted *presentation* suspension:
//! it hides the undo/redo affordances (`can_undo`/`can_redo`) but does
//! not stop recording. Recording suppression is driven per-mutation by
//! `MutationOrigin` at the store boundary.

use crate::command::EditCommand;
use parking_lot::Mutex;
use sceneloom_types::OwnerId;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle to a recorded history entry, returned by
/// [`EditHistory::record`] and carried by delete events so subscribers
/// can [`amend`](EditHistory::amend) or
/// [`delete_entry`](EditHistory::delete_entry) it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(u64);

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct HistoryEntry {
    id: CommandId,
    label: String,
    commands: Vec<Box<dyn EditCommand>>,
}

struct HistoryInner {
    entries: Vec<HistoryEntry>,
    /// Number of applied entries; entries `[cursor..]` are the redo
    /// chain.
    cursor: usize,
    next_id: u64,
    suspenders: HashSet<OwnerId>,
    replay_depth: u32,
}

/// Cheap-to-clone handle to the shared undo/redo history.
#[derive(Clone)]
pub struct EditHistory {
    inner: Arc<Mutex<HistoryInner>>,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HistoryInner {
                entries: Vec::new(),
                cursor: 0,
                next_id: 0,
                suspenders: HashSet::new(),
                replay_depth: 0,
            })),
        }
    }

    /// Appends a new entry after the cursor, discarding any redo chain.
    ///
    /// Returns `None` (with a warning) when called while a replay is in
    /// flight: commands must re-enter stores with a replay origin, so a
    /// recording here means some caller dropped the suppression contract.
    pub fn record(&self, command: Box<dyn EditCommand>) -> Option<CommandId> {
        let mut inner = self.inner.lock();
        if inner.replay_depth > 0 {
            warn!(
                "Ignored history recording during replay: {}",
                command.label()
            );
            return None;
        }
        let cursor = inner.cursor;
        inner.entries.truncate(cursor);
        let id = CommandId(inner.next_id);
        inner.next_id += 1;
        let label = command.label().to_string();
        debug!("Recorded undo entry {} ({})", id, label);
        inner.entries.push(HistoryEntry {
            id,
            label,
            commands: vec![command],
        });
        inner.cursor = inner.entries.len();
        Some(id)
    }

    /// Splices an extra command onto an existing entry. On undo the
    /// entry's commands run newest-first; on redo, oldest-first.
    pub fn amend(&self, id: CommandId, command: Box<dyn EditCommand>) -> bool {
        let mut inner = self.inner.lock();
        match inner.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.commands.push(command);
                true
            }
            None => {
                warn!("Ignored amend for missing undo entry {}", id);
                false
            }
        }
    }

    /// Excises an entry anywhere in the chain, relinking its neighbors.
    /// Used when an entity whose mutation was recorded is being
    /// permanently purged.
    pub fn delete_entry(&self, id: CommandId) -> bool {
        let mut inner = self.inner.lock();
        let Some(idx) = inner.entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        inner.entries.remove(idx);
        if idx < inner.cursor {
            inner.cursor -= 1;
        }
        debug!("Excised undo entry {}", id);
        true
    }

    /// Undoes the entry at the cursor. Returns false when there is
    /// nothing to undo.
    pub fn undo(&self) -> bool {
        let (id, mut commands) = {
            let mut inner = self.inner.lock();
            if inner.cursor == 0 {
                return false;
            }
            inner.cursor -= 1;
            inner.replay_depth += 1;
            let idx = inner.cursor;
            let entry = &mut inner.entries[idx];
            (entry.id, std::mem::take(&mut entry.commands))
        };
        debug!("Undoing entry {}", id);
        for command in commands.iter_mut().rev() {
            command.undo();
        }
        self.finish_replay(id, commands);
        true
    }

    /// Redoes the entry after the cursor. Returns false when there is
    /// nothing to redo.
    pub fn redo(&self) -> bool {
        let (id, mut commands) = {
            let mut inner = self.inner.lock();
            if inner.cursor == inner.entries.len() {
                return false;
            }
            let idx = inner.cursor;
            inner.cursor += 1;
            inner.replay_depth += 1;
            let entry = &mut inner.entries[idx];
            (entry.id, std::mem::take(&mut entry.commands))
        };
        debug!("Redoing entry {}", id);
        for command in commands.iter_mut() {
            command.redo();
        }
        self.finish_replay(id, commands);
        true
    }

    /// Requests suspension on behalf of `owner`. Suspension is active
    /// while any owner holds a request.
    pub fn disable(&self, owner: impl Into<OwnerId>) {
        self.inner.lock().suspenders.insert(owner.into());
    }

    /// Releases `owner`'s suspension request; undo/redo become visible
    /// again only once every owner has released.
    pub fn enable(&self, owner: &str) -> bool {
        self.inner.lock().suspenders.remove(owner)
    }

    /// Whether any owner currently holds a suspension request.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        !self.inner.lock().suspenders.is_empty()
    }

    /// Whether the undo affordance should be offered: something to undo
    /// and no suspension in force.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        let inner = self.inner.lock();
        inner.suspenders.is_empty() && inner.cursor > 0
    }

    /// Whether the redo affordance should be offered.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        let inner = self.inner.lock();
        inner.suspenders.is_empty() && inner.cursor < inner.entries.len()
    }

    /// Drops every entry and resets the cursor. Suspension owners keep
    /// their claims across the reload boundary.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let dropped = inner.entries.len();
        inner.entries.clear();
        inner.cursor = 0;
        if dropped > 0 {
            debug!("Cleared undo history ({} entries)", dropped);
        }
    }

    /// Total entries, applied and redoable.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Number of applied entries (the cursor position).
    #[must_use]
    pub fn position(&self) -> usize {
        self.inner.lock().cursor
    }

    /// Label of the entry `undo` would apply next, for UI menus.
    #[must_use]
    pub fn undo_label(&self) -> Option<String> {
        let inner = self.inner.lock();
        inner
            .cursor
            .checked_sub(1)
            .and_then(|idx| inner.entries.get(idx))
            .map(|entry| entry.label.clone())
    }

    /// Label of the entry `redo` would apply next.
    #[must_use]
    pub fn redo_label(&self) -> Option<String> {
        let inner = self.inner.lock();
        inner.entries.get(inner.cursor).map(|entry| entry.label.clone())
    }

    /// Puts a replayed entry's commands back. The entry may have been
    /// amended or excised while its commands ran; amendments accrued in
    /// the meantime stay behind the restored originals, and commands of
    /// an excised entry are dropped.
    fn finish_replay(&self, id: CommandId, commands: Vec<Box<dyn EditCommand>>) {
        let mut inner = self.inner.lock();
        inner.replay_depth -= 1;
        if let Some(entry) = inner.entries.iter_mut().find(|entry| entry.id == id) {
            let late = std::mem::take(&mut entry.commands);
            entry.commands = commands;
            entry.commands.extend(late);
        }
    }
}
