use crate::Vec3;
use crate::color::Color;

/// Light shining from `position` towards `target`, at infinite distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl DirectionalLight {
    pub fn new(color: Color, intensity: f32, position: Vec3) -> Self {
        Self {
            color,
            intensity,
            position,
            target: Vec3::ZERO,
        }
    }

    /// Unit vector pointing from the surface towards the light.
    pub fn to_light(&self) -> Vec3 {
        (self.position - self.target).normalize_or(Vec3::Y)
    }

    pub fn radiance(&self) -> Color {
        self.color.scaled(self.intensity)
    }
}
