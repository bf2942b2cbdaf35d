//! Built-in texture kinds.

use crate::util::{string_param, u32_param, vec3_param};
use sceneloom_model::{share, KindDef, SceneEntity};
use sceneloom_types::{EntityId, Params, ID_KEY};
use std::any::Any;

/// A texture sampled from an uploaded or linked image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTexture {
    pub id: EntityId,
    pub name: String,
    pub url: String,
    /// "repeat", "clamp", or "mirror".
    pub wrap: String,
    pub flip_y: bool,
}

impl ImageTexture {
    pub const KIND_ID: &'static str = "IMAGE_TEXTURE";

    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            id: params.entity_id().unwrap_or_default(),
            name: string_param(params, "name", "texture"),
            url: string_param(params, "url", ""),
            wrap: string_param(params, "wrap", "repeat"),
            flip_y: params.get_bool("flip_y").unwrap_or(true),
        }
    }
}

impl SceneEntity for ImageTexture {
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
            .with("url", self.url.as_str())
            .with("wrap", self.wrap.as_str())
            .with("flip_y", self.flip_y)
    }

    fn update_from_params(&mut self, params: &Params) {
        if let Some(name) = params.get_str("name") {
            self.name = name.to_owned();
        }
        if let Some(url) = params.get_str("url") {
            self.url = url.to_owned();
        }
        if let Some(wrap) = params.get_str("wrap") {
            self.wrap = wrap.to_owned();
        }
        if let Some(flip_y) = params.get_bool("flip_y") {
            self.flip_y = flip_y;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Procedural two-color checkerboard, handy as a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerTexture {
    pub id: EntityId,
    pub name: String,
    pub color_a: [f32; 3],
    pub color_b: [f32; 3],
    pub tiles: u32,
}

impl CheckerTexture {
    pub const KIND_ID: &'static str = "CHECKER_TEXTURE";

    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            id: params.entity_id().unwrap_or_default(),
            name: string_param(params, "name", "checker"),
            color_a: vec3_param(params, "color_a", [1.0, 1.0, 1.0]),
            color_b: vec3_param(params, "color_b", [0.0, 0.0, 0.0]),
            tiles: u32_param(params, "tiles", 8),
        }
    }
}

impl SceneEntity for CheckerTexture {
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
            .with("color_a", self.color_a.to_vec())
            .with("color_b", self.color_b.to_vec())
            .with("tiles", self.tiles)
    }

    fn update_from_params(&mut self, params: &Params) {
        if let Some(name) = params.get_str("name") {
            self.name = name.to_owned();
        }
        self.color_a = vec3_param(params, "color_a", self.color_a);
        self.color_b = vec3_param(params, "color_b", self.color_b);
        self.tiles = u32_param(params, "tiles", self.tiles);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The texture kinds compiled into the editor.
#[must_use]
pub fn kind_defs() -> Vec<KindDef> {
    vec![
        KindDef::builtin(ImageTexture::KIND_ID, |params| {
            share(ImageTexture::from_params(&params))
        }),
        KindDef::builtin(CheckerTexture::KIND_ID, |params| {
            share(CheckerTexture::from_params(&params))
        }),
    ]
}
