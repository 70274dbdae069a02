use super::quad_mesh::QuadMesh;
use crate::gm_error::TopologyError;
use ahash::{HashMap, HashMapExt};
use itertools::Itertools;
use log::debug;
use std::collections::hash_map::Entry;

/// Edge between vertices `a < b` with the faces on either side. A boundary
/// edge has only one face and `None` in the second slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub faces: (usize, Option<usize>),
}

impl Edge {
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        self.faces.1.is_none()
    }

    /// The endpoint that is not `vertex`, if `vertex` is an endpoint
    #[must_use]
    pub const fn other(&self, vertex: usize) -> Option<usize> {
        if vertex == self.a {
            Some(self.b)
        } else if vertex == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Edge adjacency derived from a `QuadMesh`. Each edge appears once, in the
/// order it is first met while walking the faces.
#[derive(Clone, Debug)]
pub struct EdgeGraph {
    edges: Vec<Edge>,
    face_edges: Vec<[usize; 4]>,
    lookup: HashMap<(usize, usize), usize>,
}

impl EdgeGraph {
    /// # Errors
    /// Returns `TopologyError::NonManifoldEdge` if an edge is shared by more
    /// than two faces
    pub fn new(mesh: &QuadMesh) -> Result<Self, TopologyError> {
        // A closed quad mesh has two edges per face
        let mut edges: Vec<Edge> = Vec::with_capacity(mesh.face_count() * 2);
        let mut lookup = HashMap::with_capacity(mesh.face_count() * 2);
        let mut face_edges = Vec::with_capacity(mesh.face_count());

        for (face, corners) in mesh.faces().iter().enumerate() {
            let mut sides = [0usize; 4];
            for (side, (&p, &q)) in
                sides.iter_mut().zip(corners.iter().circular_tuple_windows())
            {
                let key = (p.min(q), p.max(q));
                *side = match lookup.entry(key) {
                    Entry::Vacant(v) => {
                        let index = edges.len();
                        edges.push(Edge {
                            a: key.0,
                            b: key.1,
                            faces: (face, None),
                        });
                        v.insert(index);
                        index
                    }
                    Entry::Occupied(o) => {
                        let index = *o.get();
                        let edge = &mut edges[index];
                        if edge.faces.1.is_some() {
                            return Err(TopologyError::NonManifoldEdge {
                                a: key.0,
                                b: key.1,
                            });
                        }
                        edge.faces.1 = Some(face);
                        index
                    }
                };
            }
            face_edges.push(sides);
        }

        debug!(
            "edge graph: {} edges from {} faces",
            edges.len(),
            mesh.face_count()
        );
        Ok(Self {
            edges,
            face_edges,
            lookup,
        })
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// For every face, the edge index of each side. Side `j` runs from
    /// corner `j` to corner `j + 1`, wrapping.
    #[must_use]
    pub fn face_edges(&self) -> &[[usize; 4]] {
        &self.face_edges
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Index of the edge between two vertices, in either order
    #[must_use]
    pub fn find(&self, a: usize, b: usize) -> Option<usize> {
        self.lookup.get(&(a.min(b), a.max(b))).copied()
    }

    pub fn boundary(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.is_boundary())
    }

    /// True when every edge has two faces
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.boundary().next().is_none()
    }

    /// `V - E + F` for the mesh this graph was built from
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn euler_characteristic(&self, mesh: &QuadMesh) -> isize {
        mesh.vertex_count() as isize - self.edges.len() as isize
            + mesh.face_count() as isize
    }
}
