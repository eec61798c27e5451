use crate::{Mat4, Vec3};

/// Perspective camera (right-handed, wgpu depth range 0..1).
///
/// The projection matrix is cached: changing `fov_y_deg`, `aspect`, `near` or
/// `far` has no effect until [`PerspectiveCamera::update_projection`] runs.
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO - Vec3::Z,
            up: Vec3::Y,
            fov_y_deg,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    #[inline]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Recompute the cached projection from the current parameters.
    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            self.aspect.max(1e-6),
            self.near,
            self.far,
        );
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    #[inline]
    pub fn proj(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.projection * self.view()
    }
}
