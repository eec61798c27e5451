//! MTL material libraries.
//!
//! Only the Phong subset is read: `Kd`, `Ks`, `Ke`, `Ns` and `map_Kd`.
//! Everything else (`Ka`, `illum`, `d`, other maps) is skipped.

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};

use crate::texture::TextureData;

/// One `newmtl` block. Colors are the raw file values (sRGB, 0..1).
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialDef {
    pub name: String,
    pub diffuse: Option<[f32; 3]>,
    pub specular: Option<[f32; 3]>,
    pub emissive: Option<[f32; 3]>,
    pub shininess: Option<f32>,
    /// Path as written in the file, relative to the library.
    pub diffuse_map: Option<String>,
}

impl MaterialDef {
    fn new(name: String) -> Self {
        Self {
            name,
            diffuse: None,
            specular: None,
            emissive: None,
            shininess: None,
            diffuse_map: None,
        }
    }
}

/// Parsed library plus the decoded `map_Kd` images, keyed by the path
/// string used in the file.
#[derive(Clone, Debug, Default)]
pub struct MaterialLibrary {
    pub materials: Vec<MaterialDef>,
    pub textures: HashMap<String, TextureData>,
}

impl MaterialLibrary {
    /// Parses `path` and decodes every referenced diffuse map relative to
    /// the library's directory. A map that fails to load is logged and
    /// dropped; the material keeps its color.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open MTL file: {}", path.display()))?;
        let materials = parse_mtl(BufReader::new(file))
            .with_context(|| format!("Failed to parse MTL file: {}", path.display()))?;

        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let mut library = Self {
            materials,
            textures: HashMap::new(),
        };
        library.preload(&base);
        Ok(library)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(Self {
            materials: parse_mtl(io::Cursor::new(contents))?,
            textures: HashMap::new(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&MaterialDef> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn texture_for(&self, material: &MaterialDef) -> Option<&TextureData> {
        material
            .diffuse_map
            .as_ref()
            .and_then(|map| self.textures.get(map))
    }

    fn preload(&mut self, base: &Path) {
        for map in self.materials.iter().filter_map(|m| m.diffuse_map.as_ref()) {
            if self.textures.contains_key(map) {
                continue;
            }
            let map_path: PathBuf = base.join(map);
            match TextureData::load(&map_path) {
                Ok(texture) => {
                    self.textures.insert(map.clone(), texture);
                }
                Err(e) => log::warn!("Skipping texture {}: {e:#}", map_path.display()),
            }
        }
    }
}

fn parse_mtl<R: BufRead>(reader: R) -> Result<Vec<MaterialDef>> {
    let mut materials: Vec<MaterialDef> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (tag, rest) = trimmed
            .split_once(char::is_whitespace)
            .map(|(t, r)| (t, r.trim()))
            .unwrap_or((trimmed, ""));

        if tag == "newmtl" {
            if rest.is_empty() {
                anyhow::bail!("newmtl without a name on line {}", line_no + 1);
            }
            materials.push(MaterialDef::new(rest.to_string()));
            continue;
        }

        let Some(current) = materials.last_mut() else {
            anyhow::bail!("'{}' before any newmtl on line {}", tag, line_no + 1);
        };
        match tag {
            "Kd" => current.diffuse = Some(parse_rgb(rest, line_no)?),
            "Ks" => current.specular = Some(parse_rgb(rest, line_no)?),
            "Ke" => current.emissive = Some(parse_rgb(rest, line_no)?),
            "Ns" => {
                let value = rest
                    .parse::<f32>()
                    .with_context(|| format!("Invalid Ns '{}' on line {}", rest, line_no + 1))?;
                current.shininess = Some(value);
            }
            "map_Kd" => {
                // Options like `-s 1 1 1` come before the file name.
                let file = rest
                    .split_whitespace()
                    .last()
                    .ok_or_else(|| anyhow!("map_Kd without a file on line {}", line_no + 1))?;
                current.diffuse_map = Some(file.to_string());
            }
            _ => {}
        }
    }

    Ok(materials)
}

fn parse_rgb(rest: &str, line_no: usize) -> Result<[f32; 3]> {
    let values = rest
        .split_whitespace()
        .map(|t| t.parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid color '{}' on line {}", rest, line_no + 1))?;
    match values.as_slice() {
        [r, g, b, ..] => Ok([*r, *g, *b]),
        // A single value means grey.
        [v] => Ok([*v, *v, *v]),
        [] => anyhow::bail!("Missing color on line {}", line_no + 1),
    }
}
