//! Procedural primitives: box, UV sphere, capped cylinder.
//! All faces wind counter-clockwise when seen from outside.

use std::f32::consts::{PI, TAU};

use crate::mesh::{MeshData, MeshVertex};

/// Axis-aligned box centered on the origin, four vertices per face so every
/// face gets a flat normal and its own 0..1 UV square.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let half = [width / 2.0, height / 2.0, depth / 2.0];
    // (normal, right, up) with right x up = normal.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, right, up) in faces {
        let base = vertices.len() as u32;
        let extent = |axis: [f32; 3]| {
            axis[0].abs() * half[0] + axis[1].abs() * half[1] + axis[2].abs() * half[2]
        };
        let (hn, hr, hu) = (extent(normal), extent(right), extent(up));
        // top-left, top-right, bottom-left, bottom-right
        for (su, sv) in [(-1.0, 1.0), (1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)] {
            let position = [0, 1, 2].map(|k| normal[k] * hn + right[k] * su * hr + up[k] * sv * hu);
            let uv = [(su + 1.0) / 2.0, (1.0 - sv) / 2.0];
            vertices.push(MeshVertex::new(position, normal, uv));
        }
        indices.extend_from_slice(&[base + 2, base + 3, base + 1, base + 2, base + 1, base]);
    }
    MeshData::new(vertices, indices)
}

/// UV sphere. The seam column is duplicated so an equirectangular image
/// wraps once around it; `uv.y` runs from the north pole (0) to the south
/// pole (1).
pub fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);

    let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let (st, ct) = (v * PI).sin_cos();
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let (sp, cp) = (u * TAU).sin_cos();
            let normal = [-cp * st, ct, sp * st];
            let position = normal.map(|n| n * radius);
            vertices.push(MeshVertex::new(position, normal, [u, v]));
        }
    }

    let row = ws + 1;
    let mut indices = Vec::new();
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // The pole rows collapse to a single point; skip the degenerate half.
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    MeshData::new(vertices, indices)
}

/// Cylinder (or cone frustum) centered on the origin along Y, with caps.
pub fn cylinder_mesh(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> MeshData {
    let rs = radial_segments.max(3);
    let half = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side wall: a top ring and a bottom ring.
    for (row, v) in [0.0f32, 1.0].into_iter().enumerate() {
        let radius = v * (radius_bottom - radius_top) + radius_top;
        let y = if row == 0 { half } else { -half };
        for x in 0..=rs {
            let u = x as f32 / rs as f32;
            let (s, c) = (u * TAU).sin_cos();
            let len = (s * s + slope * slope + c * c).sqrt();
            vertices.push(MeshVertex::new(
                [radius * s, y, radius * c],
                [s / len, slope / len, c / len],
                [u, v],
            ));
        }
    }
    let row = rs + 1;
    for x in 0..rs {
        let a = x;
        let b = row + x;
        let c = row + x + 1;
        let d = x + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    push_cap(&mut vertices, &mut indices, radius_top, half, rs, true);
    push_cap(&mut vertices, &mut indices, radius_bottom, -half, rs, false);
    MeshData::new(vertices, indices)
}

fn push_cap(
    vertices: &mut Vec<MeshVertex>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    segments: u32,
    top: bool,
) {
    let sign = if top { 1.0 } else { -1.0 };
    let normal = [0.0, sign, 0.0];

    // One center vertex per segment so each fan triangle keeps its own UVs.
    let center_start = vertices.len() as u32;
    for _ in 0..segments {
        vertices.push(MeshVertex::new([0.0, y, 0.0], normal, [0.5, 0.5]));
    }
    let ring_start = vertices.len() as u32;
    for x in 0..=segments {
        let (s, c) = (x as f32 / segments as f32 * TAU).sin_cos();
        vertices.push(MeshVertex::new(
            [radius * s, y, radius * c],
            normal,
            [c * 0.5 + 0.5, 0.5 - s * 0.5 * sign],
        ));
    }

    for x in 0..segments {
        let center = center_start + x;
        let i = ring_start + x;
        if top {
            indices.extend_from_slice(&[i, i + 1, center]);
        } else {
            indices.extend_from_slice(&[i + 1, i, center]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Normal of triangle `tri` computed from its winding.
    fn winding_normal(mesh: &MeshData, tri: usize) -> [f32; 3] {
        let p = |k: usize| mesh.vertices[mesh.indices[tri * 3 + k] as usize].position;
        let (a, b, c) = (p(0), p(1), p(2));
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ]
    }

    fn assert_outward(mesh: &MeshData) {
        for tri in 0..mesh.triangle_count() {
            let n = winding_normal(mesh, tri);
            let v = mesh.vertices[mesh.indices[tri * 3] as usize];
            let dot = n[0] * v.normal[0] + n[1] * v.normal[1] + n[2] * v.normal[2];
            assert!(dot > 0.0, "triangle {tri} winds inward");
        }
    }

    #[test]
    fn unit_box() {
        let mesh = box_mesh(1.0, 1.0, 1.0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        for v in &mesh.vertices {
            assert!(v.position.iter().all(|c| (c.abs() - 0.5).abs() < 1e-6));
        }
        assert_outward(&mesh);
    }

    #[test]
    fn sky_sphere_counts() {
        let mesh = sphere_mesh(5.0, 10, 10);
        assert_eq!(mesh.vertices.len(), 11 * 11);
        // Pole rows contribute one triangle per segment, the rest two.
        assert_eq!(mesh.triangle_count(), 10 * (2 * 8 + 2));
        for v in &mesh.vertices {
            let p = v.position;
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 5.0).abs() < 1e-4);
        }
        assert_outward(&mesh);
    }

    #[test]
    fn capped_cylinder_counts() {
        let mesh = cylinder_mesh(2.0, 2.0, 2.0, 32);
        assert_eq!(mesh.vertices.len(), 2 * 33 + 2 * (32 + 33));
        assert_eq!(mesh.triangle_count(), 32 * 2 + 32 * 2);
        let ys: Vec<f32> = mesh.vertices.iter().map(|v| v.position[1]).collect();
        assert!(ys.iter().all(|y| (y.abs() - 1.0).abs() < 1e-6));
        assert_outward(&mesh);
    }
}
