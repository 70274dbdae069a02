use crate::gm_error::TopologyError;
use nalgebra_glm as glm;

/// Polygon mesh made only of four sided faces. Vertex indices are stable
/// identities and every face lists its corners in a consistent winding.
///
/// The fields are private so that a `QuadMesh` can only be created with
/// valid indices. Subdivision produces a new mesh rather than changing one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuadMesh {
    pub(super) vertices: Vec<glm::Vec3>,
    pub(super) faces: Vec<[usize; 4]>,
}

impl QuadMesh {
    /// # Errors
    /// Returns `TopologyError::MissingVertex` if a face refers to a vertex
    /// that does not exist, or `TopologyError::DegenerateFace` if a face uses
    /// a vertex at more than one corner
    pub fn new(
        vertices: Vec<glm::Vec3>,
        faces: Vec<[usize; 4]>,
    ) -> Result<Self, TopologyError> {
        for (face, corners) in faces.iter().enumerate() {
            if let Some(vertex) = corners.iter().find(|c| **c >= vertices.len()) {
                return Err(TopologyError::MissingVertex {
                    face,
                    vertex: *vertex,
                });
            }
            for (i, c) in corners.iter().enumerate() {
                if corners[i + 1..].contains(c) {
                    return Err(TopologyError::DegenerateFace(face));
                }
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Creates a mesh from general polygons, which must all be quads
    ///
    /// # Errors
    /// Returns `TopologyError::NotQuad` for the first polygon without
    /// exactly four corners, otherwise as for `new`
    pub fn from_polygons<P: AsRef<[usize]>>(
        vertices: Vec<glm::Vec3>,
        polygons: &[P],
    ) -> Result<Self, TopologyError> {
        let faces = polygons
            .iter()
            .enumerate()
            .map(|(face, p)| match *p.as_ref() {
                [a, b, c, d] => Ok([a, b, c, d]),
                ref other => Err(TopologyError::NotQuad {
                    face,
                    corners: other.len(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(vertices, faces)
    }

    /// Closed axis aligned cube centred on the origin with faces wound
    /// counter-clockwise when seen from outside
    #[must_use]
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        let vertices = vec![
            glm::vec3(-h, -h, -h),
            glm::vec3(h, -h, -h),
            glm::vec3(h, h, -h),
            glm::vec3(-h, h, -h),
            glm::vec3(-h, -h, h),
            glm::vec3(h, -h, h),
            glm::vec3(h, h, h),
            glm::vec3(-h, h, h),
        ];
        let faces = vec![
            [0, 3, 2, 1], // -Z
            [4, 5, 6, 7], // +Z
            [0, 1, 5, 4], // -Y
            [3, 7, 6, 2], // +Y
            [0, 4, 7, 3], // -X
            [1, 2, 6, 5], // +X
        ];
        Self { vertices, faces }
    }

    #[must_use]
    pub fn vertices(&self) -> &[glm::Vec3] {
        &self.vertices
    }

    #[must_use]
    pub fn faces(&self) -> &[[usize; 4]] {
        &self.faces
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Splits every quad `(a, b, c, d)` into triangles `(a, b, c)` and
    /// `(a, c, d)`, keeping the winding, for renderers that only take
    /// triangles
    #[must_use]
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.faces
            .iter()
            .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
            .collect()
    }
}
