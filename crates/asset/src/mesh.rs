//! CPU-side mesh representation used by loaders and generators.

/// Vertex with position/normal/uv. Values are in object space; `uv` has its
/// origin at the top-left of the image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Indexed triangle mesh with tightly-packed vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Replaces all normals with area-weighted averages of the adjacent face
    /// normals.
    pub fn compute_normals(&mut self) {
        let all = vec![true; self.vertices.len()];
        self.compute_missing_normals(&all);
    }

    /// Like [`compute_normals`](Self::compute_normals), but only vertices
    /// flagged in `missing` are overwritten.
    pub fn compute_missing_normals(&mut self, missing: &[bool]) {
        let mut acc = vec![[0.0f32; 3]; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| self.vertices[i as usize].position);
            let e1 = sub(b, a);
            let e2 = sub(c, a);
            let n = cross(e1, e2);
            for &i in tri {
                let slot = &mut acc[i as usize];
                slot[0] += n[0];
                slot[1] += n[1];
                slot[2] += n[2];
            }
        }
        for ((vertex, n), _) in self
            .vertices
            .iter_mut()
            .zip(acc)
            .zip(missing)
            .filter(|(_, missing)| **missing)
        {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            vertex.normal = if len > 0.0 {
                [n[0] / len, n[1] / len, n[2] / len]
            } else {
                [0.0, 0.0, 1.0]
            };
        }
    }
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
