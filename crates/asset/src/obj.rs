//! OBJ parser supporting positions, normals, texture coordinates and
//! per-material groups (`o`, `g`, `usemtl`).

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result, anyhow};

use crate::mesh::{MeshData, MeshVertex};

/// Triangles that share one object name and one material.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjGroup {
    pub name: String,
    /// Name from the last `usemtl`, if any.
    pub material: Option<String>,
    pub mesh: MeshData,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjModel {
    pub groups: Vec<ObjGroup>,
}

impl ObjModel {
    pub fn vertex_count(&self) -> usize {
        self.groups.iter().map(|g| g.mesh.vertices.len()).sum()
    }
}

/// Load an OBJ model from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<ObjModel> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open OBJ file: {}", path.display()))?;
    load_obj_from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse OBJ file: {}", path.display()))
}

/// Load an OBJ model from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<ObjModel> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> Result<ObjModel> {
    parse_obj(io::Cursor::new(contents))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
struct Key(usize, Option<usize>, Option<usize>);

/// Group under construction; vertices are deduplicated per group.
struct GroupBuilder {
    name: String,
    material: Option<String>,
    unique: HashMap<Key, u32>,
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
    /// Parallel to `vertices`: true where the face gave no `vn`.
    missing_normals: Vec<bool>,
}

impl GroupBuilder {
    fn new(name: String, material: Option<String>) -> Self {
        Self {
            name,
            material,
            unique: HashMap::new(),
            vertices: Vec::new(),
            indices: Vec::new(),
            missing_normals: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn finish(self) -> ObjGroup {
        let mut mesh = MeshData::new(self.vertices, self.indices);
        if self.missing_normals.contains(&true) {
            mesh.compute_missing_normals(&self.missing_normals);
        }
        ObjGroup {
            name: self.name,
            material: self.material,
            mesh,
        }
    }
}

fn parse_obj<R: BufRead>(reader: R) -> Result<ObjModel> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut texcoords: Vec<[f32; 2]> = Vec::new();

    let mut groups: Vec<ObjGroup> = Vec::new();
    let mut current = GroupBuilder::new(String::new(), None);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let tag = parts
            .next()
            .ok_or_else(|| anyhow!("Malformed OBJ line {}: '{}'", line_no + 1, trimmed))?;

        match tag {
            "v" => {
                let x = parse_f32(parts.next(), line_no, "x coordinate")?;
                let y = parse_f32(parts.next(), line_no, "y coordinate")?;
                let z = parse_f32(parts.next(), line_no, "z coordinate")?;
                positions.push([x, y, z]);
            }
            "vt" => {
                let u = parse_f32(parts.next(), line_no, "u coordinate")?;
                let v = parse_f32(parts.next(), line_no, "v coordinate")?;
                // OBJ puts v = 0 at the bottom of the image.
                texcoords.push([u, 1.0 - v]);
            }
            "vn" => {
                let nx = parse_f32(parts.next(), line_no, "nx coordinate")?;
                let ny = parse_f32(parts.next(), line_no, "ny coordinate")?;
                let nz = parse_f32(parts.next(), line_no, "nz coordinate")?;
                normals.push([nx, ny, nz]);
            }
            "o" | "g" => {
                let name = parts.collect::<Vec<_>>().join(" ");
                let material = current.material.clone();
                let previous = std::mem::replace(&mut current, GroupBuilder::new(name, material));
                if !previous.is_empty() {
                    groups.push(previous.finish());
                }
            }
            "usemtl" => {
                let material = parts.collect::<Vec<_>>().join(" ");
                if current.material.as_deref() == Some(material.as_str()) {
                    continue;
                }
                if current.is_empty() {
                    current.material = Some(material);
                } else {
                    let name = current.name.clone();
                    let previous =
                        std::mem::replace(&mut current, GroupBuilder::new(name, Some(material)));
                    groups.push(previous.finish());
                }
            }
            "f" => {
                let mut face_indices: Vec<u32> = Vec::new();
                for part in parts {
                    let (vi, vti, vni) = parse_face_vertex(
                        part,
                        positions.len(),
                        texcoords.len(),
                        normals.len(),
                        line_no,
                    )?;
                    let key = Key(vi, vti, vni);
                    let index = match current.unique.get(&key) {
                        Some(&idx) => idx,
                        None => {
                            let position = positions.get(vi).copied().ok_or_else(|| {
                                anyhow!("Position index out of bounds on line {}", line_no + 1)
                            })?;
                            let uv = vti
                                .and_then(|i| texcoords.get(i).copied())
                                .unwrap_or([0.0, 0.0]);
                            let normal = vni.and_then(|i| normals.get(i).copied());

                            let idx = u32::try_from(current.vertices.len())
                                .map_err(|_| anyhow!("Too many vertices in OBJ (>{})", u32::MAX))?;
                            current.missing_normals.push(normal.is_none());
                            current.vertices.push(MeshVertex::new(
                                position,
                                normal.unwrap_or([0.0, 0.0, 1.0]),
                                uv,
                            ));
                            current.unique.insert(key, idx);
                            idx
                        }
                    };
                    face_indices.push(index);
                }

                if face_indices.len() < 3 {
                    continue;
                }
                // Triangulate fan
                for tri in 1..(face_indices.len() - 1) {
                    current.indices.push(face_indices[0]);
                    current.indices.push(face_indices[tri]);
                    current.indices.push(face_indices[tri + 1]);
                }
            }
            _ => {
                // mtllib, s, l, p and friends carry nothing we draw.
            }
        }
    }

    if !current.is_empty() {
        groups.push(current.finish());
    }
    if groups.is_empty() {
        anyhow::bail!("OBJ contained no triangles");
    }

    Ok(ObjModel { groups })
}

fn parse_f32(value: Option<&str>, line_no: usize, what: &str) -> Result<f32> {
    let token = value.ok_or_else(|| anyhow!("Missing {} on line {}", what, line_no + 1))?;
    token
        .parse::<f32>()
        .with_context(|| format!("Failed to parse {} on line {}", what, line_no + 1))
}

fn parse_face_vertex(
    token: &str,
    pos_count: usize,
    tex_count: usize,
    norm_count: usize,
    line_no: usize,
) -> Result<(usize, Option<usize>, Option<usize>)> {
    let mut split = token.split('/');
    let pos = split
        .next()
        .ok_or_else(|| anyhow!("Malformed face element '{}' on line {}", token, line_no + 1))?;
    let pos_idx = resolve_index(pos, pos_count, line_no)?;

    let tex_idx = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, tex_count, line_no)?),
        _ => None,
    };

    let norm_idx = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, norm_count, line_no)?),
        _ => None,
    };

    Ok((pos_idx, tex_idx, norm_idx))
}

/// 1-based OBJ index (negative counts back from the last element) to a
/// 0-based index.
fn resolve_index(token: &str, len: usize, line_no: usize) -> Result<usize> {
    let raw = token
        .parse::<i64>()
        .with_context(|| format!("Invalid index '{}' on line {}", token, line_no + 1))?;
    if raw == 0 {
        anyhow::bail!("OBJ indices are 1-based; found 0 on line {}", line_no + 1);
    }

    let idx = if raw > 0 { raw - 1 } else { len as i64 + raw };
    if idx < 0 || idx as usize >= len {
        anyhow::bail!(
            "OBJ index {} resolved out of bounds (len={}) on line {}",
            raw,
            len,
            line_no + 1
        );
    }

    Ok(idx as usize)
}
