//! Orbit controls: rotate around a target, dolly towards it, pan the pair.

use crate::camera::PerspectiveCamera;
use crate::{Vec2, Vec3};

const MIN_POLAR: f32 = 1e-3;
const MAX_POLAR: f32 = std::f32::consts::PI - 1e-3;
const MIN_DISTANCE: f32 = 0.1;
const DOLLY_STEP: f32 = 0.95;

/// Camera placement in spherical coordinates around `target`.
/// `polar` is measured from +Y, `azimuth` around +Y starting at +Z.
#[derive(Clone, Copy, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub distance: f32,
    pub azimuth: f32,
    pub polar: f32,
    max_distance: f32,
}

impl OrbitControls {
    /// Adopts the camera's current placement and the given target.
    pub fn new(camera: &PerspectiveCamera, target: Vec3) -> Self {
        let offset = camera.position - target;
        let distance = offset.length().max(MIN_DISTANCE);
        Self {
            target,
            distance,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / distance).clamp(-1.0, 1.0).acos(),
            max_distance: camera.far,
        }
    }

    /// `delta` is the pointer movement in pixels; a drag across the whole
    /// surface height turns the camera a full circle.
    pub fn rotate(&mut self, delta: Vec2, surface_height: f32) {
        let h = surface_height.max(1.0);
        let tau = std::f32::consts::TAU;
        self.azimuth -= tau * delta.x / h;
        self.polar = (self.polar - tau * delta.y / h).clamp(MIN_POLAR, MAX_POLAR);
    }

    /// Positive `notches` move towards the target.
    pub fn dolly(&mut self, notches: f32) {
        self.distance =
            (self.distance * DOLLY_STEP.powf(notches)).clamp(MIN_DISTANCE, self.max_distance);
    }

    /// Moves target and camera in the view plane. `delta` in pixels.
    pub fn pan(&mut self, delta: Vec2, camera: &PerspectiveCamera, surface_height: f32) {
        let h = surface_height.max(1.0);
        let world_per_pixel = 2.0 * self.distance * (camera.fov_y_deg.to_radians() / 2.0).tan() / h;
        let forward = (self.target - self.position()).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(camera.up).normalize_or(Vec3::X);
        let up = right.cross(forward);
        self.target += (-right * delta.x + up * delta.y) * world_per_pixel;
    }

    pub fn position(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        self.target + Vec3::new(sp * sa, cp, sp * ca) * self.distance
    }

    pub fn apply(&self, camera: &mut PerspectiveCamera) {
        camera.position = self.position();
        camera.target = self.target;
    }
}
