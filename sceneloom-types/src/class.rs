//! The five entity registries of a scene project.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of a project's five registries an entity belongs to.
///
/// Every class gets its own store with its own kind table; all five share
/// one undo history and one event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityClass {
    Asset,
    Component,
    Material,
    System,
    Texture,
}

impl EntityClass {
    /// All classes, in declaration order.
    pub const ALL: [EntityClass; 5] = [
        EntityClass::Asset,
        EntityClass::Component,
        EntityClass::Material,
        EntityClass::System,
        EntityClass::Texture,
    ];

    /// Classes in dependency order for snapshot loading: textures before
    /// the materials that reference them, materials before assets,
    /// assets before the components and systems that target them.
    pub const LOAD_ORDER: [EntityClass; 5] = [
        EntityClass::Texture,
        EntityClass::Material,
        EntityClass::Asset,
        EntityClass::Component,
        EntityClass::System,
    ];

    /// Lowercase singular label, used in log lines and error messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            EntityClass::Asset => "asset",
            EntityClass::Component => "component",
            EntityClass::Material => "material",
            EntityClass::System => "system",
            EntityClass::Texture => "texture",
        }
    }

    /// Base topic for add notifications; the full topic is
    /// `<base>:<kindId>`, so subscribing to the base catches every kind.
    #[must_use]
    pub const fn added_topic(&self) -> &'static str {
        match self {
            EntityClass::Asset => "ASSET_ADDED",
            EntityClass::Component => "COMPONENT_ADDED",
            EntityClass::Material => "MATERIAL_ADDED",
            EntityClass::System => "SYSTEM_ADDED",
            EntityClass::Texture => "TEXTURE_ADDED",
        }
    }

    /// Base topic for delete notifications, same shape as
    /// [`added_topic`](Self::added_topic).
    #[must_use]
    pub const fn deleted_topic(&self) -> &'static str {
        match self {
            EntityClass::Asset => "ASSET_DELETED",
            EntityClass::Component => "COMPONENT_DELETED",
            EntityClass::Material => "MATERIAL_DELETED",
            EntityClass::System => "SYSTEM_DELETED",
            EntityClass::Texture => "TEXTURE_DELETED",
        }
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
