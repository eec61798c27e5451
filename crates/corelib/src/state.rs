//! Everything the per-frame tick reads and writes, in one place.

use crate::camera::PerspectiveCamera;
use crate::scene::{ObjectId, Scene, SceneObject};
use crate::{CoreError, CoreResult};

pub const CUBE_COUNT: usize = 3;

pub struct SceneState {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub cubes: [ObjectId; CUBE_COUNT],
    model: Option<ObjectId>,
}

impl SceneState {
    /// Fails if any cube id is not part of `scene`.
    pub fn new(
        scene: Scene,
        camera: PerspectiveCamera,
        cubes: [ObjectId; CUBE_COUNT],
    ) -> CoreResult<Self> {
        if let Some(missing) = cubes.iter().copied().find(|id| !scene.contains(*id)) {
            return Err(CoreError::UnknownObject(missing));
        }
        Ok(Self {
            scene,
            camera,
            cubes,
            model: None,
        })
    }

    /// Inserts the loaded model and records its handle. Only one model may
    /// ever be attached.
    pub fn attach_model(&mut self, object: SceneObject) -> CoreResult<ObjectId> {
        if self.model.is_some() {
            return Err(CoreError::ModelAlreadyAttached);
        }
        let id = self.scene.add(object);
        self.model = Some(id);
        Ok(id)
    }

    #[inline]
    pub fn model(&self) -> Option<ObjectId> {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{GeometryId, MaterialId};
    use crate::transform::Transform;

    fn cube_scene() -> (Scene, [ObjectId; CUBE_COUNT]) {
        let mut scene = Scene::new();
        let cubes = [0, 1, 2].map(|_| {
            scene.add(SceneObject::mesh(
                GeometryId(0),
                MaterialId(0),
                Transform::identity(),
            ))
        });
        (scene, cubes)
    }

    #[test]
    fn rejects_cubes_outside_the_scene() {
        let (scene, mut cubes) = cube_scene();
        cubes[2] = ObjectId(9);
        let cam = PerspectiveCamera::new(75.0, 2.0, 0.1, 200.0);
        assert_eq!(
            SceneState::new(scene, cam, cubes).err(),
            Some(CoreError::UnknownObject(ObjectId(9)))
        );
    }

    #[test]
    fn model_attaches_exactly_once() {
        let (scene, cubes) = cube_scene();
        let cam = PerspectiveCamera::new(75.0, 2.0, 0.1, 200.0);
        let mut state = SceneState::new(scene, cam, cubes).unwrap();
        assert_eq!(state.model(), None);

        let model = SceneObject {
            transform: Transform::identity(),
            parts: Vec::new(),
        };
        let id = state.attach_model(model.clone()).unwrap();
        assert_eq!(state.model(), Some(id));
        assert_eq!(state.scene.len(), 4);

        assert_eq!(
            state.attach_model(model),
            Err(CoreError::ModelAlreadyAttached)
        );
        assert_eq!(state.scene.len(), 4);
    }
}
