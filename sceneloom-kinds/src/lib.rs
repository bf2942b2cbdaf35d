//! Built-in entity kinds for the SceneLoom editor.
//!
//! Two kinds per registry class, all registered as
//! [`KindSource::Builtin`] so they survive project resets. Factories
//! default every missing or malformed field; they never reject params,
//! so projects saved by other editor versions keep loading.
//!
//! [`KindSource::Builtin`]: sceneloom_model::KindSource::Builtin

pub mod assets;
pub mod components;
pub mod materials;
pub mod systems;
pub mod textures;

mod util;

pub use assets::{LightAsset, MeshAsset};
pub use components::{ScriptComponent, TransformComponent};
pub use materials::{StandardMaterial, UnlitMaterial};
pub use systems::{AnimationSystem, PhysicsSystem};
pub use textures::{CheckerTexture, ImageTexture};

use sceneloom_engine::Project;
use sceneloom_model::KindDef;
use sceneloom_types::EntityClass;

/// The built-in kind definitions for one registry class.
#[must_use]
pub fn standard_kinds(class: EntityClass) -> Vec<KindDef> {
    match class {
        EntityClass::Asset => assets::kind_defs(),
        EntityClass::Component => components::kind_defs(),
        EntityClass::Material => materials::kind_defs(),
        EntityClass::System => systems::kind_defs(),
        EntityClass::Texture => textures::kind_defs(),
    }
}

/// A fresh project with every built-in kind registered.
#[must_use]
pub fn standard_project() -> Project {
    let project = Project::new();
    for class in EntityClass::ALL {
        project.register_kinds(class, standard_kinds(class));
    }
    project
}
