//! SceneLoom engine
//!
//! State management for a collaborative 3D scene editor: typed entity
//! registries with undo/redo, kind-bucketed snapshots, and diff
//! reconciliation against snapshots pushed by remote peers.
//!
//! ## Components
//!
//! - [`EventBus`] — hierarchical topic pub/sub with immediate and
//!   queued delivery
//! - [`EditHistory`] — the shared undo/redo stack, with owner-counted
//!   suspension
//! - [`EntityStore`] — per-class registry owning creation, deletion,
//!   and snapshot reconciliation
//! - [`Project`] — the top-level context tying one bus, one history,
//!   and five stores together
//! - [`SessionUpdate`] — the wire envelope for peer-to-peer state sync
//!
//! Every mutation names a [`MutationOrigin`]: local edits record undo
//! commands and publish events, replayed state does neither (or only
//! publishes), so remote updates can never pollute the local history or
//! re-broadcast in a loop.
//!
//! [`MutationOrigin`]: sceneloom_types::MutationOrigin
//!
//! ## Example
//!
//! ```
//! use sceneloom_types::{MutationOrigin, Params};
//!
//! let project = sceneloom_kinds::standard_project();
//! let params = Params::new().with("id", "cube-1").with("mesh", "cube");
//! project
//!     .assets()
//!     .add_new_entity("MESH_ASSET", params, MutationOrigin::Local)
//!     .unwrap();
//! assert_eq!(project.assets().len(), 1);
//!
//! project.undo();
//! assert!(project.assets().is_empty());
//! project.redo();
//! assert_eq!(project.assets().len(), 1);
//! ```

mod bus;
mod command;
mod error;
mod event;
mod history;
mod project;
mod registry;
mod session;
mod snapshot;

pub use bus::{Delivery, Envelope, EventBus, TOPIC_DELIMITER};
pub use command::EditCommand;
pub use error::{EngineError, EngineResult};
pub use event::SceneEvent;
pub use history::{CommandId, EditHistory};
pub use project::{Project, TOPIC_PROJECT_LOADED, TOPIC_PROJECT_RESET};
pub use registry::EntityStore;
pub use session::SessionUpdate;
pub use snapshot::{LoadMode, LoadReport, ProjectSnapshot, StoreSnapshot};
