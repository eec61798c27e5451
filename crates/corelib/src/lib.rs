//! Core types: math re-exports, transforms, camera, scene graph and the
//! frame loop. Renderer-agnostic; nothing in here touches the GPU.

use thiserror::Error;

pub use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3, vec3};

pub mod animation;
pub mod camera;
pub mod color;
pub mod controls;
pub mod frame;
pub mod light;
pub mod material;
pub mod scene;
pub mod state;
pub mod transform;

use scene::ObjectId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("No scene object with id {0:?}")]
    UnknownObject(ObjectId),
    #[error("A loaded model is already attached to the scene")]
    ModelAlreadyAttached,
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_is_identity_matrix() {
        let t = transform::Transform::identity();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translate_then_scale_matrix() {
        let t = transform::Transform::from_trs(
            vec3(1.0, 2.0, 3.0),
            vec3(0.0, 0.0, 0.0),
            vec3(0.5, 0.5, 0.5),
        );
        // Last column holds the translation, the diagonal holds the scale
        // when there is no rotation.
        let m = t.matrix().to_cols_array();
        assert!((m[12] - 1.0).abs() < 1e-6);
        assert!((m[13] - 2.0).abs() < 1e-6);
        assert!((m[14] - 3.0).abs() < 1e-6);
        assert!((m[0] - 0.5).abs() < 1e-6);
        assert!((m[5] - 0.5).abs() < 1e-6);
        assert!((m[10] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn camera_pv_is_finite() {
        let cam = camera::PerspectiveCamera::new(75.0, 2.0, 0.1, 200.0)
            .with_position(vec3(0.0, 0.0, 2.0));
        let a = cam.proj_view().to_cols_array();
        assert!(a.iter().all(|f| f.is_finite()));
    }

    #[test]
    fn core_error_messages() {
        assert_eq!(
            CoreError::ModelAlreadyAttached.to_string(),
            "A loaded model is already attached to the scene"
        );
        assert!(
            CoreError::UnknownObject(ObjectId(7))
                .to_string()
                .contains("ObjectId(7)")
        );
    }
}
