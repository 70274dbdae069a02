use super::quad_mesh::QuadMesh;
use nalgebra_glm as glm;

impl QuadMesh {
    /// Unit normal of every face, from the cross product of its diagonals so
    /// that slightly bent quads still get a sensible direction. Faces with no
    /// area get a zero vector.
    #[must_use]
    pub fn face_normals(&self) -> Vec<glm::Vec3> {
        self.faces
            .iter()
            .map(|&[a, b, c, d]| {
                let v = &self.vertices;
                let n = glm::cross(&(v[c] - v[a]), &(v[d] - v[b]));
                if glm::length2(&n) > 0.0 {
                    glm::normalize(&n)
                } else {
                    n
                }
            })
            .collect()
    }

    /// Normal of every vertex as the normalized sum of the normals of the
    /// faces that use it. Vertices used by no face get a zero vector.
    #[must_use]
    pub fn vertex_normals(&self) -> Vec<glm::Vec3> {
        let mut normals = vec![glm::Vec3::zeros(); self.vertices.len()];
        for (face, normal) in self.faces.iter().zip(self.face_normals()) {
            for corner in face {
                normals[*corner] += normal;
            }
        }
        for n in &mut normals {
            if glm::length2(n) > 0.0 {
                *n = glm::normalize(n);
            }
        }
        normals
    }
}
