#![allow(dead_code)]

//! Shared fixtures for the engine integration tests.

use parking_lot::Mutex;
use sceneloom_engine::{EditCommand, Envelope, Project};
use sceneloom_types::Params;
use std::sync::Arc;

/// A project with the built-in kind library registered.
pub fn standard_project() -> Project {
    sceneloom_kinds::standard_project()
}

/// Shared ordered log for recording callback and command invocations.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().clone()
}

pub fn push(journal: &Journal, line: impl Into<String>) {
    journal.lock().push(line.into());
}

/// Command that writes its undo/redo invocations into a journal.
pub struct JournalCommand {
    journal: Journal,
    tag: String,
}

impl JournalCommand {
    pub fn boxed(journal: &Journal, tag: impl Into<String>) -> Box<dyn EditCommand> {
        Box::new(Self {
            journal: Arc::clone(journal),
            tag: tag.into(),
        })
    }
}

impl EditCommand for JournalCommand {
    fn label(&self) -> &str {
        &self.tag
    }

    fn undo(&mut self) {
        self.journal.lock().push(format!("undo {}", self.tag));
    }

    fn redo(&mut self) {
        self.journal.lock().push(format!("redo {}", self.tag));
    }
}

/// Bus callback that records each delivered envelope's topic.
pub fn record_topics<M: 'static>(
    journal: &Journal,
) -> impl Fn(&Envelope<M>) + Send + Sync + 'static {
    let journal = Arc::clone(journal);
    move |envelope| journal.lock().push(envelope.topic.clone())
}

pub fn mesh_params(id: &str, mesh: &str) -> Params {
    Params::new().with("id", id).with("mesh", mesh)
}

pub fn material_params(id: &str, roughness: f64) -> Params {
    Params::new().with("id", id).with("roughness", roughness)
}

pub fn texture_params(id: &str, url: &str) -> Params {
    Params::new().with("id", id).with("url", url)
}
