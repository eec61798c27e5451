//! Phong surface description. GPU upload is the renderer's business; this
//! only names the parameters and the texture handle.

use crate::color::Color;

/// Handle to a texture registered with the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub specular: Color,
    pub emissive: Color,
    pub shininess: f32,
    pub map: Option<TextureId>,
}

impl Material {
    pub fn phong(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn textured(map: TextureId) -> Self {
        Self {
            map: Some(map),
            ..Self::default()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            specular: Color::from_hex(0x111111),
            emissive: Color::BLACK,
            shininess: 30.0,
            map: None,
        }
    }
}
