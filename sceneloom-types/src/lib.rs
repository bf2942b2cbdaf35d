//! Core types for the SceneLoom editor engine.
//!
//! Defines the vocabulary every other SceneLoom crate speaks:
//! - [`EntityId`], [`KindId`], [`OwnerId`] — string-backed identifiers for
//!   entities, entity kinds, and bus/undo owners
//! - [`PeerId`], [`UpdateId`] — UUID v7 identifiers for session peers and
//!   session updates
//! - [`EntityClass`] — the five entity registries of a scene project
//! - [`MutationOrigin`] — why a mutation is happening, and what it is
//!   allowed to trigger
//! - [`Params`] — the JSON parameter map entities export to and are
//!   constructed from

mod class;
mod ids;
mod origin;
mod params;

pub use class::EntityClass;
pub use ids::{EntityId, KindId, OwnerId, PeerId, UpdateId};
pub use origin::MutationOrigin;
pub use params::{Params, ID_KEY};
