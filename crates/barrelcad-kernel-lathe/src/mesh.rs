//! Indexed triangle mesh output.

use barrelcad_kernel_math::{triangle_normal, Point3, Vec3};

/// Output triangle mesh for rendering and export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of vertex normals, same layout as `vertices`.
    pub normals: Vec<f32>,
    /// Flat array of texture coordinates: `[u0, v0, u1, v1, ...]`.
    pub uvs: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]`.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Position of vertex `i`.
    pub fn position(&self, i: usize) -> Point3 {
        let v = &self.vertices[i * 3..i * 3 + 3];
        Point3::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2]))
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for v in self.vertices.chunks_exact(3) {
            for k in 0..3 {
                min[k] = min[k].min(f64::from(v[k]));
                max[k] = max[k].max(f64::from(v[k]));
            }
        }
        Some((min, max))
    }

    /// Signed enclosed volume (mm³) by the divergence theorem.
    ///
    /// Positive when triangles wind counter-clockwise seen from outside.
    pub fn signed_volume(&self) -> f64 {
        self.indices
            .chunks_exact(3)
            .map(|tri| {
                let a = self.position(tri[0] as usize).coords;
                let b = self.position(tri[1] as usize).coords;
                let c = self.position(tri[2] as usize).coords;
                a.dot(&b.cross(&c))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Recompute vertex normals as the normalized, area-weighted sum of the
    /// normals of every triangle touching each vertex.
    pub fn compute_vertex_normals(&mut self) {
        let mut acc = vec![Vec3::zeros(); self.num_vertices()];
        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let n = triangle_normal(&self.position(i0), &self.position(i1), &self.position(i2));
            acc[i0] += n;
            acc[i1] += n;
            acc[i2] += n;
        }

        self.normals.clear();
        self.normals.reserve(acc.len() * 3);
        for n in acc {
            let n = n.try_normalize(1e-12).unwrap_or_else(Vec3::zeros);
            self.normals.extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
        }
    }
}
