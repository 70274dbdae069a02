use crate::{
    gm_error::{GmError, IndexError},
    rotation::RotationOrder,
};
use nalgebra_glm as glm;
use smallvec::SmallVec;

/// What a joint reads from each frame of motion data. Only the root
/// translates; other joints are placed by their fixed offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JointKind {
    Root {
        position: [usize; 3],
        rotation: [usize; 3],
        order: RotationOrder,
    },
    Joint {
        rotation: [usize; 3],
        order: RotationOrder,
    },
    EndSite,
}

impl JointKind {
    /// Channel indices used by this joint, position channels first
    #[must_use]
    pub fn channels(&self) -> SmallVec<[usize; 6]> {
        match self {
            Self::Root {
                position, rotation, ..
            } => position.iter().chain(rotation).copied().collect(),
            Self::Joint { rotation, .. } => rotation.iter().copied().collect(),
            Self::EndSite => SmallVec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Joint {
    pub name: String,
    pub offset: glm::Vec3,
    pub parent: Option<usize>,
    pub children: SmallVec<[usize; 4]>,
    pub kind: JointKind,
}

impl Joint {
    #[must_use]
    pub const fn is_end_site(&self) -> bool {
        matches!(self.kind, JointKind::EndSite)
    }
}

/// Joint tree stored as an arena. A joint's identity is its index into
/// `joints`, children are index lists and the parent link is an index only.
/// Create with `SkeletonBuilder`.
#[derive(Clone, Debug)]
pub struct Skeleton {
    pub(super) joints: Vec<Joint>,
    pub(super) root: usize,
    pub(super) channel_count: usize,
}

impl Skeleton {
    #[must_use]
    pub const fn root(&self) -> usize {
        self.root
    }

    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// # Errors
    /// Returns `IndexError::Joint` if there is no joint at `index`
    pub fn joint(&self, index: usize) -> Result<&Joint, IndexError> {
        self.joints.get(index).ok_or(IndexError::Joint {
            index,
            len: self.joints.len(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Index of the first joint with the given name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<usize> {
        self.joints.iter().position(|j| j.name == name)
    }

    /// Number of channels each frame of motion data must provide
    #[must_use]
    pub const fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// Joint indices in depth first order starting at the root, children in
    /// the order they were added
    #[must_use]
    pub fn depth_first(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.joints.len());
        let mut stack = vec![self.root];
        while let Some(index) = stack.pop() {
            order.push(index);
            if let Some(joint) = self.joints.get(index) {
                stack.extend(joint.children.iter().rev());
            }
        }
        order
    }
}

/// Table of recorded channel values, one row per frame. Rows are stored in a
/// single flat buffer so every row has the same length.
#[derive(Clone, Debug)]
pub struct Motion {
    frame_duration: f32,
    frame_count: usize,
    channels: usize,
    data: Vec<f32>,
}

impl Motion {
    /// Creates a motion table from rows of channel values
    ///
    /// # Errors
    /// Returns `GmError::InvalidMotion` if there are no frames, rows have
    /// differing or zero length, or the frame duration is not positive
    pub fn new(frame_duration: f32, frames: Vec<Vec<f32>>) -> Result<Self, GmError> {
        if !(frame_duration > 0.0 && frame_duration.is_finite()) {
            return Err(GmError::InvalidMotion("frame duration must be positive"));
        }
        let channels = frames.first().map_or(0, Vec::len);
        if frames.is_empty() {
            return Err(GmError::InvalidMotion("no frames"));
        }
        if channels == 0 {
            return Err(GmError::InvalidMotion("frames have no channels"));
        }
        if frames.iter().any(|f| f.len() != channels) {
            return Err(GmError::InvalidMotion("frames differ in length"));
        }
        let frame_count = frames.len();
        Ok(Self {
            frame_duration,
            frame_count,
            channels,
            data: frames.into_iter().flatten().collect(),
        })
    }

    #[must_use]
    pub const fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    #[must_use]
    pub const fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Channel values per frame
    #[must_use]
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Length of one pass through all frames in seconds
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }

    /// # Errors
    /// Returns `IndexError::Frame` if `index` is not a valid frame
    pub fn frame(&self, index: usize) -> Result<&[f32], IndexError> {
        let err = IndexError::Frame {
            index,
            count: self.frame_count,
        };
        if index >= self.frame_count {
            return Err(err);
        }
        let start = index * self.channels;
        self.data.get(start..start + self.channels).ok_or(err)
    }

    /// Frame playing at `time` seconds and how far through it, in `[0, 1)`.
    /// Playback loops, and negative times count backwards from the end.
    /// Both parts come from one division so they always agree.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn locate(&self, time: f32) -> (usize, f32) {
        let scaled = time / self.frame_duration;
        let mut frame = scaled.floor();
        let mut fraction = scaled - frame;
        // A tiny negative `scaled` rounds up to a whole frame
        if fraction >= 1.0 {
            frame += 1.0;
            fraction = 0.0;
        }
        let index = frame.rem_euclid(self.frame_count as f32) as usize;
        (index.min(self.frame_count - 1), fraction)
    }

    /// Frame playing at `time` seconds, see `locate`
    #[must_use]
    pub fn frame_index(&self, time: f32) -> usize {
        self.locate(time).0
    }

    /// How far `time` is through its frame, see `locate`
    #[must_use]
    pub fn frame_fraction(&self, time: f32) -> f32 {
        self.locate(time).1
    }

    /// Checks that every frame holds exactly the channels the skeleton
    /// reads
    ///
    /// # Errors
    /// Returns `IndexError::FrameLength` if the frame length differs from
    /// `Skeleton::channel_count`
    pub const fn check(&self, skeleton: &Skeleton) -> Result<(), IndexError> {
        if self.channels == skeleton.channel_count {
            Ok(())
        } else {
            Err(IndexError::FrameLength {
                expected: skeleton.channel_count,
                len: self.channels,
            })
        }
    }
}
