//! Scene graph: a flat list of objects plus the lights that illuminate them.

use crate::light::DirectionalLight;
use crate::transform::Transform;
use crate::{CoreError, CoreResult};

/// Object id (dense, index into the object list, never reused).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u32);

/// Handle to geometry registered with the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryId(pub u32);

/// Handle to a material registered with the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// One draw: geometry rendered with a material. Both may be shared with
/// other parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshPart {
    pub geometry: GeometryId,
    pub material: MaterialId,
}

/// Renderable object. Primitives have a single part; loaded models have one
/// part per material group, all moved by the same transform.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub transform: Transform,
    pub parts: Vec<MeshPart>,
}

impl SceneObject {
    pub fn mesh(geometry: GeometryId, material: MaterialId, transform: Transform) -> Self {
        Self {
            transform,
            parts: vec![MeshPart { geometry, material }],
        }
    }
}

#[derive(Default, Debug)]
pub struct Scene {
    objects: Vec<SceneObject>,
    lights: Vec<DirectionalLight>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(object);
        id
    }

    pub fn add_light(&mut self, light: DirectionalLight) {
        self.lights.push(light);
    }

    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        (id.0 as usize) < self.objects.len()
    }

    pub fn get(&self, id: ObjectId) -> CoreResult<&SceneObject> {
        self.objects
            .get(id.0 as usize)
            .ok_or(CoreError::UnknownObject(id))
    }

    /// Mutable access to a transform (for animation).
    pub fn transform_mut(&mut self, id: ObjectId) -> CoreResult<&mut Transform> {
        self.objects
            .get_mut(id.0 as usize)
            .map(|o| &mut o.transform)
            .ok_or(CoreError::UnknownObject(id))
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, o)| (ObjectId(i as u32), o))
    }

    pub fn lights(&self) -> &[DirectionalLight] {
        &self.lights
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;

    #[test]
    fn ids_are_dense_and_stable() {
        let mut scene = Scene::new();
        let a = scene.add(SceneObject::mesh(
            GeometryId(0),
            MaterialId(0),
            Transform::identity(),
        ));
        let b = scene.add(SceneObject::mesh(
            GeometryId(0),
            MaterialId(1),
            Transform::from_translation(vec3(2.0, 0.0, 0.0)),
        ));
        assert_eq!(a, ObjectId(0));
        assert_eq!(b, ObjectId(1));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(b).unwrap().transform.translation.x, 2.0);
        assert_eq!(
            scene.get(b).unwrap().parts[0].geometry,
            scene.get(a).unwrap().parts[0].geometry
        );
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut scene = Scene::new();
        assert_eq!(
            scene.transform_mut(ObjectId(3)).unwrap_err(),
            CoreError::UnknownObject(ObjectId(3))
        );
        assert!(!scene.contains(ObjectId(0)));
    }
}
