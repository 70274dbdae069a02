mod edges;
mod normals;
mod quad_mesh;
mod subdivide;

// Re-exports
pub use {
    edges::{Edge, EdgeGraph},
    quad_mesh::QuadMesh,
    subdivide::{edge_points, face_points, subdivide, subdivide_n, vertex_points},
};
