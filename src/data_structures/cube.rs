//! Static cube geometry.
//!
//! Corners are duplicated where two faces need different texture coordinates,
//! which is why the cube has 16 vertices instead of 8.

use super::vertex::Vertex;

pub const VERTICES: [Vertex; 16] = [
    Vertex::new([-0.5, -0.5, -0.5], [0.0, 0.0]), // back bottom left
    Vertex::new([0.5, -0.5, -0.5], [1.0, 0.0]),  // back bottom right
    Vertex::new([0.5, 0.5, -0.5], [1.0, 1.0]),   // back top right
    Vertex::new([-0.5, 0.5, -0.5], [0.0, 1.0]),  // back top left
    Vertex::new([-0.5, -0.5, 0.5], [0.0, 0.0]),
    Vertex::new([0.5, -0.5, 0.5], [1.0, 0.0]),
    Vertex::new([0.5, 0.5, 0.5], [1.0, 1.0]),
    Vertex::new([-0.5, 0.5, 0.5], [0.0, 1.0]),
    Vertex::new([-0.5, 0.5, 0.5], [1.0, 0.0]),
    Vertex::new([-0.5, 0.5, -0.5], [1.0, 1.0]),
    Vertex::new([-0.5, -0.5, -0.5], [0.0, 1.0]),
    Vertex::new([0.5, 0.5, 0.5], [1.0, 0.0]),
    Vertex::new([0.5, -0.5, -0.5], [0.0, 1.0]),
    Vertex::new([0.5, -0.5, 0.5], [0.0, 0.0]),
    Vertex::new([0.5, -0.5, -0.5], [1.0, 1.0]),
    Vertex::new([-0.5, 0.5, 0.5], [0.0, 0.0]),
];

/// Two triangles per face.
pub const INDICES: [u32; 36] = [
    0, 1, 2, 2, 3, 0, // back
    4, 5, 6, 6, 7, 4, // front
    8, 9, 10, 10, 4, 8, // left
    11, 2, 12, 12, 13, 11, // right
    10, 14, 5, 5, 4, 10, // bottom
    3, 2, 11, 11, 15, 3, // top
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_describe_twelve_triangles_within_the_vertex_range() {
        assert_eq!(INDICES.len(), 36);
        assert_eq!(INDICES.len() % 3, 0);
        assert!(INDICES.iter().all(|&i| (i as usize) < VERTICES.len()));
        assert_eq!(*INDICES.iter().max().unwrap(), 15);
    }

    #[test]
    fn every_vertex_is_referenced_and_on_the_unit_cube() {
        for (i, vertex) in VERTICES.iter().enumerate() {
            assert!(INDICES.contains(&(i as u32)), "vertex {i} is never drawn");
            assert!(vertex.position.iter().all(|c| c.abs() == 0.5));
            assert!(vertex.tex_coords.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn geometry_casts_to_tightly_packed_bytes() {
        let bytes: &[u8] = bytemuck::cast_slice(&VERTICES);
        assert_eq!(bytes.len(), 16 * 5 * std::mem::size_of::<f32>());
        let index_bytes: &[u8] = bytemuck::cast_slice(&INDICES);
        assert_eq!(index_bytes.len(), 36 * 4);
    }
}
