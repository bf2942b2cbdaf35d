//! Built-in material kinds.

use crate::util::{f32_param, string_param, vec3_param};
use sceneloom_model::{share, KindDef, SceneEntity};
use sceneloom_types::{EntityId, Params, ID_KEY};
use std::any::Any;

/// Physically-based surface material.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub id: EntityId,
    pub name: String,
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    /// Id of the texture entity sampled for the base color; empty means
    /// flat color.
    pub texture: String,
}

impl StandardMaterial {
    pub const KIND_ID: &'static str = "MAT_STANDARD";

    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            id: params.entity_id().unwrap_or_default(),
            name: string_param(params, "name", "material"),
            color: vec3_param(params, "color", [0.8, 0.8, 0.8]),
            roughness: f32_param(params, "roughness", 0.5),
            metalness: f32_param(params, "metalness", 0.0),
            texture: string_param(params, "texture", ""),
        }
    }
}

impl SceneEntity for StandardMaterial {
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
            .with("color", self.color.to_vec())
            .with("roughness", self.roughness)
            .with("metalness", self.metalness)
            .with("texture", self.texture.as_str())
    }

    fn update_from_params(&mut self, params: &Params) {
        if let Some(name) = params.get_str("name") {
            self.name = name.to_owned();
        }
        self.color = vec3_param(params, "color", self.color);
        self.roughness = f32_param(params, "roughness", self.roughness);
        self.metalness = f32_param(params, "metalness", self.metalness);
        if let Some(texture) = params.get_str("texture") {
            self.texture = texture.to_owned();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Flat-shaded material, unaffected by lighting.
#[derive(Debug, Clone, PartialEq)]
pub struct UnlitMaterial {
    pub id: EntityId,
    pub name: String,
    pub color: [f32; 3],
    pub opacity: f32,
}

impl UnlitMaterial {
    pub const KIND_ID: &'static str = "MAT_UNLIT";

    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            id: params.entity_id().unwrap_or_default(),
            name: string_param(params, "name", "material"),
            color: vec3_param(params, "color", [1.0, 1.0, 1.0]),
            opacity: f32_param(params, "opacity", 1.0),
        }
    }
}

impl SceneEntity for UnlitMaterial {
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
            .with("color", self.color.to_vec())
            .with("opacity", self.opacity)
    }

    fn update_from_params(&mut self, params: &Params) {
        if let Some(name) = params.get_str("name") {
            self.name = name.to_owned();
        }
        self.color = vec3_param(params, "color", self.color);
        self.opacity = f32_param(params, "opacity", self.opacity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The material kinds compiled into the editor.
#[must_use]
pub fn kind_defs() -> Vec<KindDef> {
    vec![
        KindDef::builtin(StandardMaterial::KIND_ID, |params| {
            share(StandardMaterial::from_params(&params))
        }),
        KindDef::builtin(UnlitMaterial::KIND_ID, |params| {
            share(UnlitMaterial::from_params(&params))
        }),
    ]
}
