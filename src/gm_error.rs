use std::{error, fmt};

/// An index into a skeleton, a motion table or a ranking was out of range.
/// These are defects in the input data and are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// Channel `index` was read from a frame of `len` channels
    Channel { index: usize, len: usize },
    /// Frame `index` was requested from a table of `count` frames
    Frame { index: usize, count: usize },
    /// Joint `index` does not exist in a skeleton of `len` joints
    Joint { index: usize, len: usize },
    /// Frames hold `len` channels but the skeleton reads `expected`
    FrameLength { expected: usize, len: usize },
    /// A rotation order ranking that is not a permutation of 0, 1, 2
    RotationOrder([usize; 3]),
}

impl error::Error for IndexError {}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Channel { index, len } => {
                write!(f, "channel {index} out of range for {len} channels")
            }
            Self::Frame { index, count } => {
                write!(f, "frame {index} out of range for {count} frames")
            }
            Self::Joint { index, len } => {
                write!(f, "joint {index} out of range for {len} joints")
            }
            Self::FrameLength { expected, len } => {
                write!(f, "frames have {len} channels, skeleton has {expected}")
            }
            Self::RotationOrder(rank) => {
                write!(f, "rotation order {rank:?} is not a permutation")
            }
        }
    }
}

/// Mesh connectivity that Catmull-Clark subdivision can not work with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    /// Face has some number of corners other than 4
    NotQuad { face: usize, corners: usize },
    /// Face refers to a vertex index that is not in the vertex list
    MissingVertex { face: usize, vertex: usize },
    /// Face uses the same vertex at more than one corner
    DegenerateFace(usize),
    /// Edge shared by more than two faces
    NonManifoldEdge { a: usize, b: usize },
    /// Edge with only one face when boundaries are rejected
    OpenBoundary { a: usize, b: usize },
}

impl error::Error for TopologyError {}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotQuad { face, corners } => {
                write!(f, "face {face} has {corners} corners, expected 4")
            }
            Self::MissingVertex { face, vertex } => {
                write!(f, "face {face} refers to missing vertex {vertex}")
            }
            Self::DegenerateFace(face) => {
                write!(f, "face {face} repeats a vertex")
            }
            Self::NonManifoldEdge { a, b } => {
                write!(f, "edge ({a}, {b}) is shared by more than two faces")
            }
            Self::OpenBoundary { a, b } => {
                write!(f, "edge ({a}, {b}) is on an open boundary")
            }
        }
    }
}

/// Unified error type
#[derive(Debug)]
pub enum GmError {
    Index(IndexError),
    Topology(TopologyError),
    InvalidMotion(&'static str),
    InvalidSkeleton(&'static str),
    UnknownChannel(String),
    InvalidSpacing(f32),
    SerdeYamlError(Box<serde_yaml::Error>),
}

impl error::Error for GmError {}

impl fmt::Display for GmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Index(e) => write!(f, "index error: {e}"),
            Self::Topology(e) => write!(f, "topology error: {e}"),
            Self::InvalidMotion(s) => write!(f, "invalid motion: {s}"),
            Self::InvalidSkeleton(s) => write!(f, "invalid skeleton: {s}"),
            Self::UnknownChannel(s) => write!(f, "unknown channel \"{s}\""),
            Self::InvalidSpacing(s) => {
                write!(f, "sample spacing {s} is not positive or too small")
            }
            Self::SerdeYamlError(e) => {
                write!(f, "serde_yaml::Error: {e}")
            }
        }
    }
}

impl From<IndexError> for GmError {
    fn from(e: IndexError) -> Self {
        Self::Index(e)
    }
}

impl From<TopologyError> for GmError {
    fn from(e: TopologyError) -> Self {
        Self::Topology(e)
    }
}

impl From<serde_yaml::Error> for GmError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::SerdeYamlError(Box::new(e))
    }
}
