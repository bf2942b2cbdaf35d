//! Built-in system kinds: scene-wide simulation settings. A project
//! usually holds at most one entity of each system kind.

use crate::util::{f32_param, vec3_param};
use sceneloom_model::{share, KindDef, SceneEntity};
use sceneloom_types::{EntityId, Params, ID_KEY};
use std::any::Any;

/// Rigid-body simulation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsSystem {
    pub id: EntityId,
    pub gravity: [f32; 3],
    /// Fixed simulation step in seconds.
    pub timestep: f32,
    pub enabled: bool,
}

impl PhysicsSystem {
    pub const KIND_ID: &'static str = "PHYSICS";

    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            id: params.entity_id().unwrap_or_default(),
            gravity: vec3_param(params, "gravity", [0.0, -9.81, 0.0]),
            timestep: f32_param(params, "timestep", 1.0 / 60.0),
            enabled: params.get_bool("enabled").unwrap_or(true),
        }
    }
}

impl SceneEntity for PhysicsSystem {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn kind_id(&self) -> &str {
        Self::KIND_ID
    }

    fn export_params(&self) -> Params {
        Params::new()
            .with(ID_KEY, self.id.as_str())
            .with("gravity", self.gravity.to_vec())
            .with("timestep", self.timestep)
            .with("enabled", self.enabled)
    }

    fn update_from_params(&mut self, params: &Params) {
        self.gravity = vec3_param(params, "gravity", self.gravity);
        self.timestep = f32_param(params, "timestep", self.timestep);
        if let Some(enabled) = params.get_bool("enabled") {
            self.enabled = enabled;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Timeline playback settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSystem {
    pub id: EntityId,
    pub playing: bool,
    pub speed: f32,
    pub looped: bool,
}

impl AnimationSystem {
    pub const KIND_ID: &'static str = "ANIMATION";

    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            id: params.entity_id().unwrap_or_default(),
            playing: params.get_bool("playing").unwrap_or(false),
            speed: f32_param(params, "speed", 1.0),
            looped: params.get_bool("looped").unwrap_or(true),
        }
    }
}

impl SceneEntity for AnimationSystem {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn kind_id(&self) -> &str {
        Self::KIND_ID
    }

    fn export_params(&self) -> Params {
        Params::new()
            .with(ID_KEY, self.id.as_str())
            .with("playing", self.playing)
            .with("speed", self.speed)
            .with("looped", self.looped)
    }

    fn update_from_params(&mut self, params: &Params) {
        if let Some(playing) = params.get_bool("playing") {
            self.playing = playing;
        }
        self.speed = f32_param(params, "speed", self.speed);
        if let Some(looped) = params.get_bool("looped") {
            self.looped = looped;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The system kinds compiled into the editor.
#[must_use]
pub fn kind_defs() -> Vec<KindDef> {
    vec![
        KindDef::builtin(PhysicsSystem::KIND_ID, |params| {
            share(PhysicsSystem::from_params(&params))
        }),
        KindDef::builtin(AnimationSystem::KIND_ID, |params| {
            share(AnimationSystem::from_params(&params))
        }),
    ]
}
