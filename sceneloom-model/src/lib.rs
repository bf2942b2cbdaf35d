//! Entity model for SceneLoom.
//!
//! Defines the contract between concrete entity kinds and the engine:
//! - [`SceneEntity`] — the trait every scene object implements (identity,
//!   kind routing, parameter export/import)
//! - [`SharedEntity`] — the shared, lock-guarded handle entities live
//!   behind; handle equality is object identity
//! - [`KindDef`] / [`KindSource`] — a registered kind: its id, whether it
//!   is built in or loaded from project content, and its factory
//! - [`KindTable`] — the per-registry kind→factory map
//!
//! Kind modules register [`KindDef`]s into a store's [`KindTable`]; the
//! engine routes snapshot buckets to factories through it.

mod entity;
mod kind;

pub use entity::{share, SceneEntity, SharedEntity};
pub use kind::{KindDef, KindFactory, KindSource, KindTable};
