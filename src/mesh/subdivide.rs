use super::{edges::EdgeGraph, quad_mesh::QuadMesh};
use crate::{
    gm_error::TopologyError,
    options::{Boundary, SubdivideOptions},
};
use log::debug;
use nalgebra_glm as glm;
use smallvec::SmallVec;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Average of the four corners of every face, in face order
#[must_use]
pub fn face_points(mesh: &QuadMesh) -> Vec<glm::Vec3> {
    #[cfg(feature = "rayon")]
    let it = (0..mesh.face_count()).into_par_iter();
    #[cfg(not(feature = "rayon"))]
    let it = 0..mesh.face_count();
    it.map(|f| {
        let v = &mesh.vertices;
        let [a, b, c, d] = mesh.faces[f];
        (v[a] + v[b] + v[c] + v[d]) * 0.25
    })
    .collect()
}

/// New point for every edge of `graph`, in edge order. An edge with two
/// faces averages its endpoints and both face points. A boundary edge
/// averages its endpoints and its one face point, or is the plain midpoint
/// for `Boundary::Crease`.
#[must_use]
pub fn edge_points(
    mesh: &QuadMesh,
    graph: &EdgeGraph,
    face_points: &[glm::Vec3],
    boundary: Boundary,
) -> Vec<glm::Vec3> {
    #[cfg(feature = "rayon")]
    let it = (0..graph.len()).into_par_iter();
    #[cfg(not(feature = "rayon"))]
    let it = 0..graph.len();
    it.map(|e| {
        let edge = graph.edges()[e];
        let ends = mesh.vertices[edge.a] + mesh.vertices[edge.b];
        match edge.faces {
            (f0, Some(f1)) => (ends + face_points[f0] + face_points[f1]) * 0.25,
            (_, None) if boundary == Boundary::Crease => ends * 0.5,
            (f0, None) => (ends + face_points[f0]) / 3.0,
        }
    })
    .collect()
}

/// Moved position of every original vertex, in vertex order. With valence
/// `n` this is `(F + 2R + (n - 3)P) / n` where `F` averages the adjacent
/// face points and `R` is the sum of adjacent edge midpoints over `n`.
///
/// For `Boundary::Crease` a vertex on exactly two boundary edges instead
/// follows the boundary curve as `3/4 P + 1/8 (a + b)`. Vertices no face
/// uses stay where they are.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn vertex_points(
    mesh: &QuadMesh,
    graph: &EdgeGraph,
    face_points: &[glm::Vec3],
    boundary: Boundary,
) -> Vec<glm::Vec3> {
    let count = mesh.vertex_count();
    let mut faces_of: Vec<SmallVec<[usize; 6]>> = vec![SmallVec::new(); count];
    let mut edges_of: Vec<SmallVec<[usize; 6]>> = vec![SmallVec::new(); count];
    for (f, corners) in mesh.faces.iter().enumerate() {
        for c in corners {
            faces_of[*c].push(f);
        }
    }
    for (e, edge) in graph.edges().iter().enumerate() {
        edges_of[edge.a].push(e);
        edges_of[edge.b].push(e);
    }

    #[cfg(feature = "rayon")]
    let it = (0..count).into_par_iter();
    #[cfg(not(feature = "rayon"))]
    let it = 0..count;
    it.map(|v| {
        let p = mesh.vertices[v];
        let faces = &faces_of[v];
        if faces.is_empty() {
            return p;
        }

        if boundary == Boundary::Crease {
            let rim: SmallVec<[usize; 2]> = edges_of[v]
                .iter()
                .map(|e| graph.edges()[*e])
                .filter(|e| e.is_boundary())
                .filter_map(|e| e.other(v))
                .collect();
            match rim[..] {
                [] => {}
                [a, b] => {
                    return p * 0.75 + (mesh.vertices[a] + mesh.vertices[b]) * 0.125
                }
                // More than one boundary loop meets here
                _ => return p,
            }
        }

        let n = faces.len() as f32;
        let f = faces
            .iter()
            .fold(glm::Vec3::zeros(), |acc, f| acc + face_points[*f])
            / n;
        let r = edges_of[v].iter().fold(glm::Vec3::zeros(), |acc, e| {
            let edge = graph.edges()[*e];
            acc + (mesh.vertices[edge.a] + mesh.vertices[edge.b]) * 0.5
        }) / n;
        (f + r * 2.0 + p * (n - 3.0)) / n
    })
    .collect()
}

/// One level of Catmull-Clark subdivision. The new vertices are the moved
/// original vertices, then the face points, then the edge points. Every
/// quad becomes four, one per corner, with the original winding.
///
/// # Errors
/// Returns `TopologyError::NonManifoldEdge` if an edge has more than two
/// faces, or `TopologyError::OpenBoundary` for the first boundary edge when
/// `boundary` is `Boundary::Reject`
pub fn subdivide(
    mesh: &QuadMesh,
    boundary: Boundary,
) -> Result<QuadMesh, TopologyError> {
    let graph = EdgeGraph::new(mesh)?;
    if boundary == Boundary::Reject {
        if let Some(edge) = graph.boundary().next() {
            return Err(TopologyError::OpenBoundary {
                a: edge.a,
                b: edge.b,
            });
        }
    }

    let fp = face_points(mesh);
    let ep = edge_points(mesh, &graph, &fp, boundary);
    let mut vertices = vertex_points(mesh, &graph, &fp, boundary);

    let face_base = vertices.len();
    let edge_base = face_base + fp.len();
    vertices.extend(fp);
    vertices.extend(ep);

    let mut faces = Vec::with_capacity(mesh.face_count() * 4);
    for (f, (corners, sides)) in
        mesh.faces.iter().zip(graph.face_edges()).enumerate()
    {
        for j in 0..4 {
            faces.push([
                face_base + f,
                edge_base + sides[(j + 3) % 4],
                corners[j],
                edge_base + sides[j],
            ]);
        }
    }

    debug!(
        "subdivided {} vertices {} faces into {} vertices {} faces",
        mesh.vertex_count(),
        mesh.face_count(),
        vertices.len(),
        faces.len()
    );
    Ok(QuadMesh { vertices, faces })
}

/// Applies `subdivide` `options.levels` times. Zero levels returns a copy.
///
/// # Errors
/// As for `subdivide`, from whichever level fails first
pub fn subdivide_n(
    mesh: &QuadMesh,
    options: &SubdivideOptions,
) -> Result<QuadMesh, TopologyError> {
    (0..options.levels).try_fold(mesh.clone(), |m, _| {
        subdivide(&m, options.boundary)
    })
}

#[cfg(test)]
mod tests {
    use super::{edge_points, face_points, subdivide, subdivide_n, vertex_points};
    use crate::{
        gm_error::TopologyError,
        mesh::{EdgeGraph, QuadMesh},
        options::{Boundary, SubdivideOptions},
    };
    use nalgebra_glm as glm;

    const EPSILON: f32 = 0.0001_f32;

    fn compare(a: &glm::Vec3, b: &glm::Vec3) {
        let c = glm::equal_eps(a, b, EPSILON);
        assert!(c.x && c.y && c.z, "{a:?} != {b:?}");
    }

    fn unit_square() -> QuadMesh {
        QuadMesh::new(
            vec![
                glm::vec3(0.0, 0.0, 0.0),
                glm::vec3(1.0, 0.0, 0.0),
                glm::vec3(1.0, 1.0, 0.0),
                glm::vec3(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn cube_counts() {
        let cube = QuadMesh::cube(2.0);
        let once = subdivide(&cube, Boundary::Average).unwrap();
        assert_eq!(once.vertex_count(), 26);
        assert_eq!(once.face_count(), 24);

        let options = SubdivideOptions {
            levels: 2,
            ..Default::default()
        };
        let twice = subdivide_n(&cube, &options).unwrap();
        assert_eq!(twice.vertex_count(), 98);
        assert_eq!(twice.face_count(), 96);
    }

    #[test]
    fn cube_points() {
        let cube = QuadMesh::cube(2.0);
        let graph = EdgeGraph::new(&cube).unwrap();
        let fp = face_points(&cube);
        compare(&fp[0], &glm::vec3(0.0, 0.0, -1.0));

        let ep = edge_points(&cube, &graph, &fp, Boundary::Average);
        let e = graph.find(0, 1).unwrap();
        compare(&ep[e], &glm::vec3(0.0, -0.75, -0.75));

        let vp = vertex_points(&cube, &graph, &fp, Boundary::Average);
        let k = 5.0 / 9.0;
        compare(&vp[6], &glm::vec3(k, k, k));
        compare(&vp[0], &glm::vec3(-k, -k, -k));
    }

    #[test]
    fn layout_of_new_vertices() {
        let cube = QuadMesh::cube(2.0);
        let once = subdivide(&cube, Boundary::Average).unwrap();
        let graph = EdgeGraph::new(&cube).unwrap();
        let fp = face_points(&cube);
        for (f, p) in fp.iter().enumerate() {
            compare(&once.vertices()[8 + f], p);
        }
        let e = graph.find(0, 1).unwrap();
        compare(&once.vertices()[14 + e], &glm::vec3(0.0, -0.75, -0.75));
    }

    #[test]
    fn keeps_winding_and_topology() {
        let cube = QuadMesh::cube(2.0);
        let once = subdivide(&cube, Boundary::Average).unwrap();
        let graph = EdgeGraph::new(&once).unwrap();
        assert!(graph.is_closed());
        assert_eq!(graph.len(), 48);
        assert_eq!(graph.euler_characteristic(&once), 2);

        // Still outward facing after smoothing
        for (face, normal) in once.faces().iter().zip(once.face_normals()) {
            let centre = face
                .iter()
                .fold(glm::Vec3::zeros(), |acc, i| acc + once.vertices()[*i]);
            assert!(glm::dot(&centre, &normal) > 0.0);
        }
    }

    #[test]
    fn input_is_not_changed() {
        let cube = QuadMesh::cube(2.0);
        let copy = cube.clone();
        let _ = subdivide(&cube, Boundary::Average).unwrap();
        assert_eq!(cube, copy);
        let none = subdivide_n(
            &cube,
            &SubdivideOptions {
                levels: 0,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(none, copy);
    }

    #[test]
    fn open_square() {
        let square = unit_square();

        let average = subdivide(&square, Boundary::Average).unwrap();
        compare(&average.vertices()[0], &glm::vec3(1.5, 1.5, 0.0));
        // Boundary edge points divide by 3
        compare(&average.vertices()[5], &glm::vec3(0.5, 1.0 / 6.0, 0.0));

        let crease = subdivide(&square, Boundary::Crease).unwrap();
        compare(&crease.vertices()[0], &glm::vec3(0.125, 0.125, 0.0));
        compare(&crease.vertices()[5], &glm::vec3(0.5, 0.0, 0.0));

        assert_eq!(
            subdivide(&square, Boundary::Reject),
            Err(TopologyError::OpenBoundary { a: 0, b: 1 })
        );
    }

    #[test]
    fn unused_vertex_stays() {
        let mut vertices = unit_square().vertices().to_vec();
        vertices.push(glm::vec3(7.0, 8.0, 9.0));
        let mesh = QuadMesh::new(vertices, vec![[0, 1, 2, 3]]).unwrap();
        let once = subdivide(&mesh, Boundary::Average).unwrap();
        compare(&once.vertices()[4], &glm::vec3(7.0, 8.0, 9.0));
        assert_eq!(once.vertex_count(), 5 + 1 + 4);
    }

    #[test]
    fn non_manifold() {
        let vertices = (0..8).map(|i| glm::vec3(i as f32, 0.0, 0.0)).collect();
        let mesh = QuadMesh::new(
            vertices,
            vec![[0, 1, 2, 3], [1, 0, 4, 5], [0, 1, 6, 7]],
        )
        .unwrap();
        assert_eq!(
            subdivide(&mesh, Boundary::Average),
            Err(TopologyError::NonManifoldEdge { a: 0, b: 1 })
        );
    }
}
