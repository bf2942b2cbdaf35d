//! Why a mutation is happening, and what it is allowed to trigger.

use std::fmt;

/// The cause of an add/delete, stated once per top-level call and
/// propagated through every mutation it spawns.
///
/// Replay of already-authoritative state (remote snapshots, undo, redo)
/// must never record new undo commands; remote echo must additionally
/// never re-broadcast, or two peers feed each other's snapshots forever.
/// The combination "record history but suppress events" does not occur
/// and cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOrigin {
    /// A user-initiated edit on this instance: recorded and published.
    Local,
    /// Application of a remote peer's snapshot: neither recorded nor
    /// published.
    RemoteReplay,
    /// Replay of a recorded command during undo/redo: published so the
    /// UI tracks the change, but never recorded again.
    UndoReplay,
}

impl MutationOrigin {
    /// Whether a mutation with this origin records an inverse command.
    #[must_use]
    pub const fn records_history(self) -> bool {
        matches!(self, MutationOrigin::Local)
    }

    /// Whether a mutation with this origin emits add/delete events.
    #[must_use]
    pub const fn publishes(self) -> bool {
        !matches!(self, MutationOrigin::RemoteReplay)
    }

    /// Lowercase label for log lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            MutationOrigin::Local => "local",
            MutationOrigin::RemoteReplay => "remote-replay",
            MutationOrigin::UndoReplay => "undo-replay",
        }
    }
}

impl fmt::Display for MutationOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
