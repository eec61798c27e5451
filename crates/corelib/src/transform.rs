use crate::{EulerRot, Mat3, Mat4, Quat, Vec3};

/// Object transform: translation, Euler rotation (radians, XYZ order) and
/// per-axis scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn from_trs(translation: Vec3, rotation_euler: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation_euler,
            scale,
        }
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    #[inline]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    #[inline]
    pub fn with_rotation(mut self, rotation_euler: Vec3) -> Self {
        self.rotation_euler = rotation_euler;
        self
    }

    /// Build matrix = T * R * S (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_euler.x,
            self.rotation_euler.y,
            self.rotation_euler.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, q, self.translation)
    }

    /// Inverse-transpose of the upper 3x3, for transforming normals.
    #[inline]
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.matrix()).inverse().transpose()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_compose() {
        let t = Transform::from_translation(Vec3::new(0.0, 1.0, -5.0))
            .with_uniform_scale(0.5)
            .with_rotation(Vec3::new(0.0, 180.0, 0.0));
        assert_eq!(t.translation, Vec3::new(0.0, 1.0, -5.0));
        assert_eq!(t.scale, Vec3::splat(0.5));
        assert_eq!(t.rotation_euler.y, 180.0);
    }

    #[test]
    fn normal_matrix_undoes_uniform_scale() {
        let t = Transform::identity().with_uniform_scale(0.5);
        let n = t.normal_matrix() * Vec3::Y;
        // Uniform scale only changes length, never direction.
        assert!((n.normalize() - Vec3::Y).length() < 1e-6);
        assert!((n.length() - 2.0).abs() < 1e-5);
    }
}
