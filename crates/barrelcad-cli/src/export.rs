//! Binary STL output.

use barrelcad_kernel::TriangleMesh;

const TITLE: &[u8] = b"barrelcad STL export";

/// Encode a mesh as binary STL with per-facet normals.
pub fn stl_bytes(mesh: &TriangleMesh) -> Vec<u8> {
    let vertices = &mesh.vertices;
    let num_triangles = mesh.num_triangles();
    let mut data = Vec::with_capacity(84 + num_triangles * 50);

    let mut header = [b' '; 80];
    header[..TITLE.len()].copy_from_slice(TITLE);
    data.extend_from_slice(&header);
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    for tri in mesh.indices.chunks_exact(3) {
        let corner = |i: u32| {
            let i = i as usize * 3;
            [vertices[i], vertices[i + 1], vertices[i + 2]]
        };
        let (v0, v1, v2) = (corner(tri[0]), corner(tri[1]), corner(tri[2]));

        let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
        let nx = e1[1] * e2[2] - e1[2] * e2[1];
        let ny = e1[2] * e2[0] - e1[0] * e2[2];
        let nz = e1[0] * e2[1] - e1[1] * e2[0];
        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        // Sliver facets at the bore bottoms have no usable normal.
        let normal = if len > 1e-10 {
            [nx / len, ny / len, nz / len]
        } else {
            [0.0, 0.0, 1.0]
        };

        for v in [normal, v0, v1, v2] {
            for c in v {
                data.extend_from_slice(&c.to_le_bytes());
            }
        }
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_stl_layout() {
        let bytes = stl_bytes(&triangle());
        assert_eq!(bytes.len(), 84 + 50);
        assert_eq!(&bytes[80..84], &1u32.to_le_bytes());
        // Facet normal is +Z for a counter-clockwise XY triangle.
        let nz = f32::from_le_bytes([bytes[92], bytes[93], bytes[94], bytes[95]]);
        assert_eq!(nz, 1.0);
    }

    #[test]
    fn test_empty_mesh() {
        let bytes = stl_bytes(&TriangleMesh::new());
        assert_eq!(bytes.len(), 84);
        assert_eq!(&bytes[80..84], &0u32.to_le_bytes());
    }
}
