//! Built-in asset kinds: the objects placed into a scene.
//!
//! Assets describe *what* exists; placement and behavior attach through
//! components that name the asset's id as their target.

use crate::util::{f32_param, string_param, vec3_param};
use sceneloom_model::{share, KindDef, SceneEntity};
use sceneloom_types::{EntityId, Params, ID_KEY};
use std::any::Any;

/// A mesh instance referencing a primitive or imported geometry, plus
/// the material (by entity id) it renders with.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAsset {
    pub id: EntityId,
    pub name: String,
    pub mesh: String,
    /// Id of the material entity this mesh renders with; empty means
    /// the editor's fallback material.
    pub material: String,
    pub visible: bool,
}

impl MeshAsset {
    pub const KIND_ID: &'static str = "MESH_ASSET";

    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            id: params.entity_id().unwrap_or_default(),
            name: string_param(params, "name", "mesh"),
            mesh: string_param(params, "mesh", "cube"),
            material: string_param(params, "material", ""),
            visible: params.get_bool("visible").unwrap_or(true),
        }
    }
}

impl SceneEntity for MeshAsset {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn kind_id(&self) -> &str {
        Self::KIND_ID
    }

    fn export_params(&self) -> Params {
        Params::new()
            .with(ID_KEY, self.id.as_str())
            .with("name", self.name.as_str())
            .with("mesh", self.mesh.as_str())
            .with("material", self.material.as_str())
            .with("visible", self.visible)
    }

    fn update_from_params(&mut self, params: &Params) {
        if let Some(name) = params.get_str("name") {
            self.name = name.to_owned();
        }
        if let Some(mesh) = params.get_str("mesh") {
            self.mesh = mesh.to_owned();
        }
        if let Some(material) = params.get_str("material") {
            self.material = material.to_owned();
        }
        if let Some(visible) = params.get_bool("visible") {
            self.visible = visible;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A light source.
#[derive(Debug, Clone, PartialEq)]
pub struct LightAsset {
    pub id: EntityId,
    pub name: String,
    /// "point", "directional", or "spot".
    pub light: String,
    pub color: [f32; 3],
    pub intensity: f32,
    pub enabled: bool,
}

impl LightAsset {
    pub const KIND_ID: &'static str = "LIGHT_ASSET";

    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            id: params.entity_id().unwrap_or_default(),
            name: string_param(params, "name", "light"),
            light: string_param(params, "light", "point"),
            color: vec3_param(params, "color", [1.0, 1.0, 1.0]),
            intensity: f32_param(params, "intensity", 1.0),
            enabled: params.get_bool("enabled").unwrap_or(true),
        }
    }
}

impl SceneEntity for LightAsset {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn kind_id(&self) -> &str {
        Self::KIND_ID
    }

    fn export_params(&self) -> Params {
        Params::new()
            .with(ID_KEY, self.id.as_str())
            .with("name", self.name.as_str())
            .with("light", self.light.as_str())
            .with("color", self.color.to_vec())
            .with("intensity", self.intensity)
            .with("enabled", self.enabled)
    }

    fn update_from_params(&mut self, params: &Params) {
        if let Some(name) = params.get_str("name") {
            self.name = name.to_owned();
        }
        if let Some(light) = params.get_str("light") {
            self.light = light.to_owned();
        }
        self.color = vec3_param(params, "color", self.color);
        self.intensity = f32_param(params, "intensity", self.intensity);
        if let Some(enabled) = params.get_bool("enabled") {
            self.enabled = enabled;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The asset kinds compiled into the editor.
#[must_use]
pub fn kind_defs() -> Vec<KindDef> {
    vec![
        KindDef::builtin(MeshAsset::KIND_ID, |params| {
            share(MeshAsset::from_params(&params))
        }),
        KindDef::builtin(LightAsset::KIND_ID, |params| {
            share(LightAsset::from_params(&params))
        }),
    ]
}
