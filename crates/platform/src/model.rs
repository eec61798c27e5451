//! Turns a loaded OBJ/MTL pair into a scene object.

use std::collections::HashMap;

use asset::mtl::{MaterialDef, MaterialLibrary};
use asset::sequence::LoadedModel;
use corelib::color::Color;
use corelib::material::{Material, TextureId};
use corelib::scene::{MaterialId, MeshPart, SceneObject};
use corelib::transform::Transform;
use corelib::{Vec3, vec3};
use renderer::ResourceSink;

pub const MODEL_SCALE: f32 = 0.5;
/// Applied as radians, so the model ends up turned by 180 rad about Y.
pub const MODEL_ROTATION: Vec3 = vec3(0.0, 180.0, 0.0);

pub fn model_transform() -> Transform {
    Transform::from_translation(Vec3::ZERO)
        .with_uniform_scale(MODEL_SCALE)
        .with_rotation(MODEL_ROTATION)
}

/// Uploads every group and returns one object whose parts keep the groups'
/// order. Groups naming an unknown material get a plain white one.
pub fn instantiate_model<R: ResourceSink>(resources: &mut R, model: &LoadedModel) -> SceneObject {
    let mut materials: HashMap<Option<&str>, MaterialId> = HashMap::new();
    let mut textures: HashMap<&str, TextureId> = HashMap::new();
    let library = model.materials.as_ref();

    let mut parts = Vec::with_capacity(model.geometry.groups.len());
    for group in &model.geometry.groups {
        if !group.mesh.is_valid() {
            log::warn!("Skipping malformed group '{}'", group.name);
            continue;
        }
        let def = group.material.as_deref().and_then(|name| {
            let def = library.get(name);
            if def.is_none() {
                log::warn!("Group '{}' uses unknown material '{name}'", group.name);
            }
            def
        });
        let key = def.map(|d| d.name.as_str());
        let material = match materials.get(&key) {
            Some(id) => *id,
            None => {
                let converted = match def {
                    Some(def) => convert_material(resources, library, def, &mut textures),
                    None => Material::default(),
                };
                let id = resources.add_material(&converted);
                materials.insert(key, id);
                id
            }
        };
        parts.push(MeshPart {
            geometry: resources.add_geometry(&group.mesh),
            material,
        });
    }

    log::debug!(
        "Model instantiated: {} parts, {} materials, {} textures",
        parts.len(),
        materials.len(),
        textures.len()
    );
    SceneObject {
        transform: model_transform(),
        parts,
    }
}

fn convert_material<'a, R: ResourceSink>(
    resources: &mut R,
    library: &'a MaterialLibrary,
    def: &'a MaterialDef,
    textures: &mut HashMap<&'a str, TextureId>,
) -> Material {
    let srgb = |c: [f32; 3]| Color::from_srgb(c[0], c[1], c[2]);
    let defaults = Material::default();

    let map = def.diffuse_map.as_deref().and_then(|name| {
        if let Some(id) = textures.get(name) {
            return Some(*id);
        }
        let texture = library.texture_for(def)?;
        let id = resources.add_texture(texture);
        textures.insert(name, id);
        Some(id)
    });

    Material {
        color: def.diffuse.map(srgb).unwrap_or(defaults.color),
        specular: def.specular.map(srgb).unwrap_or(defaults.specular),
        emissive: def.emissive.map(srgb).unwrap_or(defaults.emissive),
        shininess: def.shininess.unwrap_or(defaults.shininess),
        map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;
    use asset::obj::load_obj_from_str;
    use asset::texture::TextureData;
    use std::sync::Arc;

    const OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
vt 0 0
vt 1 0
vt 0 1
g body
usemtl Fur
f 1/1 2/2 3/3
g ear
usemtl Fur
f 2/2 4/1 3/3
g eye
usemtl Glass
f 1 2 3
";

    fn loaded(mtl: &str) -> LoadedModel {
        let mut library = MaterialLibrary::parse(mtl).unwrap();
        library
            .textures
            .insert("fur.png".into(), TextureData::solid([200, 100, 50, 255]));
        LoadedModel {
            geometry: load_obj_from_str(OBJ).unwrap(),
            materials: Arc::new(library),
        }
    }

    #[test]
    fn groups_become_parts_and_share_materials() {
        let model = loaded("newmtl Fur\nKd 1 1 1\nmap_Kd fur.png\n");
        let mut sink = RecordingSink::default();
        let object = instantiate_model(&mut sink, &model);

        assert_eq!(object.parts.len(), 3);
        assert_eq!(sink.geometries.len(), 3);
        // Fur is shared by body and ear.
        assert_eq!(object.parts[0].material, object.parts[1].material);
        assert_ne!(object.parts[0].material, object.parts[2].material);
        assert_eq!(sink.materials.len(), 2);
        assert_eq!(sink.textures.len(), 1);

        let fur = sink.materials[object.parts[0].material.0 as usize];
        assert_eq!(fur.map, Some(TextureId(0)));
        // Glass is not in the library.
        let glass = sink.materials[object.parts[2].material.0 as usize];
        assert_eq!(glass, Material::default());
    }

    #[test]
    fn mtl_values_override_defaults() {
        let model = loaded("newmtl Fur\nKd 1 0 0\nKs 0.5 0.5 0.5\nNs 96\n");
        let mut sink = RecordingSink::default();
        let object = instantiate_model(&mut sink, &model);
        let fur = sink.materials[object.parts[0].material.0 as usize];
        assert_eq!(fur.color, Color::from_srgb(1.0, 0.0, 0.0));
        assert_eq!(fur.specular, Color::from_srgb(0.5, 0.5, 0.5));
        assert_eq!(fur.shininess, 96.0);
        assert_eq!(fur.emissive, Color::BLACK);
        assert_eq!(fur.map, None);
    }

    #[test]
    fn transform_is_fixed() {
        let model = loaded("newmtl Fur\n");
        let mut sink = RecordingSink::default();
        let object = instantiate_model(&mut sink, &model);
        assert_eq!(object.transform.translation, Vec3::ZERO);
        assert_eq!(object.transform.scale, Vec3::splat(0.5));
        assert_eq!(object.transform.rotation_euler, vec3(0.0, 180.0, 0.0));
    }
}
