//! Per-frame motion rules.
//!
//! Cubes are a pure function of elapsed time: every frame overwrites their
//! rotation. The loaded model instead accumulates a fixed step per frame, so
//! its angle depends on how many frames have been drawn.

use crate::CoreResult;
use crate::state::SceneState;

/// Radians added to the model's Y rotation on every frame.
pub const MODEL_SPIN_PER_FRAME: f32 = 0.01;

/// Rotation (radians, both X and Y) of cube `index` at `t` seconds.
#[inline]
pub fn cube_rotation(t: f32, index: usize) -> f32 {
    let speed = 1.0 + index as f32 * 0.1;
    t * speed
}

/// Applies one frame of motion at `t` seconds.
pub fn animate(state: &mut SceneState, t: f32) -> CoreResult<()> {
    for (index, id) in state.cubes.into_iter().enumerate() {
        let rotation = cube_rotation(t, index);
        let transform = state.scene.transform_mut(id)?;
        transform.rotation_euler.x = rotation;
        transform.rotation_euler.y = rotation;
    }

    if let Some(model) = state.model() {
        state.scene.transform_mut(model)?.rotation_euler.y += MODEL_SPIN_PER_FRAME;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::scene::{GeometryId, MaterialId, Scene, SceneObject};
    use crate::transform::Transform;
    use crate::vec3;

    fn state() -> SceneState {
        let mut scene = Scene::new();
        let cubes = [0.0, -2.0, 2.0].map(|x| {
            scene.add(SceneObject::mesh(
                GeometryId(0),
                MaterialId(0),
                Transform::from_translation(vec3(x, 0.0, 0.0)),
            ))
        });
        SceneState::new(scene, PerspectiveCamera::new(75.0, 2.0, 0.1, 200.0), cubes).unwrap()
    }

    fn cube_angles(state: &SceneState) -> Vec<(f32, f32)> {
        state
            .cubes
            .iter()
            .map(|id| {
                let r = state.scene.get(*id).unwrap().transform.rotation_euler;
                (r.x, r.y)
            })
            .collect()
    }

    #[test]
    fn cubes_follow_elapsed_time() {
        let mut s = state();
        animate(&mut s, 1.0).unwrap();
        let angles = cube_angles(&s);
        assert_eq!(angles[0], (1.0, 1.0));
        assert!((angles[1].0 - 1.1).abs() < 1e-6 && (angles[1].1 - 1.1).abs() < 1e-6);
        assert!((angles[2].0 - 1.2).abs() < 1e-6 && (angles[2].1 - 1.2).abs() < 1e-6);
    }

    #[test]
    fn cube_rotation_ignores_previous_frames() {
        let mut fresh = state();
        animate(&mut fresh, 3.25).unwrap();

        let mut replayed = state();
        for t in [0.0, 10.0, 0.5, 99.0, 3.25] {
            animate(&mut replayed, t).unwrap();
        }
        assert_eq!(cube_angles(&fresh), cube_angles(&replayed));
    }

    #[test]
    fn model_spin_is_a_noop_before_attach() {
        let mut s = state();
        let before = s.scene.len();
        animate(&mut s, 0.5).unwrap();
        assert_eq!(s.model(), None);
        assert_eq!(s.scene.len(), before);
    }

    #[test]
    fn model_spin_accumulates_per_frame() {
        let mut s = state();
        let model = s
            .attach_model(SceneObject {
                transform: Transform::identity(),
                parts: Vec::new(),
            })
            .unwrap();
        for frame in 0..250 {
            // Same timestamp every frame: only the frame count matters.
            animate(&mut s, 1.0).unwrap();
            let y = s.scene.get(model).unwrap().transform.rotation_euler.y;
            let expected = MODEL_SPIN_PER_FRAME * (frame + 1) as f32;
            assert!((y - expected).abs() < 1e-4, "frame {frame}: {y} vs {expected}");
        }
    }
}
