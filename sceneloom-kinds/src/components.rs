//! Built-in component kinds: behavior and placement attached to assets
//! by target id.

use crate::util::{string_param, vec3_param};
use sceneloom_model::{share, KindDef, SceneEntity};
use sceneloom_types::{EntityId, Params, ID_KEY};
use std::any::Any;

/// Positions an asset in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    pub id: EntityId,
    /// Id of the asset entity this transform places.
    pub target: String,
    pub position: [f32; 3],
    /// Euler angles in degrees.
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl TransformComponent {
    pub const KIND_ID: &'static str = "TRANSFORM";

    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            id: params.entity_id().unwrap_or_default(),
            target: string_param(params, "target", ""),
            position: vec3_param(params, "position", [0.0, 0.0, 0.0]),
            rotation: vec3_param(params, "rotation", [0.0, 0.0, 0.0]),
            scale: vec3_param(params, "scale", [1.0, 1.0, 1.0]),
        }
    }
}

impl SceneEntity for TransformComponent {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn kind_id(&self) -> &str {
        Self::KIND_ID
    }

    fn export_params(&self) -> Params {
        Params::new()
            .with(ID_KEY, self.id.as_str())
            .with("target", self.target.as_str())
            .with("position", self.position.to_vec())
            .with("rotation", self.rotation.to_vec())
            .with("scale", self.scale.to_vec())
    }

    fn update_from_params(&mut self, params: &Params) {
        if let Some(target) = params.get_str("target") {
            self.target = target.to_owned();
        }
        self.position = vec3_param(params, "position", self.position);
        self.rotation = vec3_param(params, "rotation", self.rotation);
        self.scale = vec3_param(params, "scale", self.scale);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Binds a named script to an asset.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptComponent {
    pub id: EntityId,
    /// Id of the asset entity the script drives.
    pub target: String,
    pub source: String,
    pub enabled: bool,
}

impl ScriptComponent {
    pub const KIND_ID: &'static str = "SCRIPT";

    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            id: params.entity_id().unwrap_or_default(),
            target: string_param(params, "target", ""),
            source: string_param(params, "source", ""),
            enabled: params.get_bool("enabled").unwrap_or(true),
        }
    }
}

impl SceneEntity for ScriptComponent {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn kind_id(&self) -> &str {
        Self::KIND_ID
    }

    fn export_params(&self) -> Params {
        Params::new()
            .with(ID_KEY, self.id.as_str())
            .with("target", self.target.as_str())
            .with("source", self.source.as_str())
            .with("enabled", self.enabled)
    }

    fn update_from_params(&mut self, params: &Params) {
        if let Some(target) = params.get_str("target") {
            self.target = target.to_owned();
        }
        if let Some(source) = params.get_str("source") {
            self.source = source.to_owned();
        }
        if let Some(enabled) = params.get_bool("enabled") {
            self.enabled = enabled;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The component kinds compiled into the editor.
#[must_use]
pub fn kind_defs() -> Vec<KindDef> {
    vec![
        KindDef::builtin(TransformComponent::KIND_ID, |params| {
            share(TransformComponent::from_params(&params))
        }),
        KindDef::builtin(ScriptComponent::KIND_ID, |params| {
            share(ScriptComponent::from_params(&params))
        }),
    ]
}
