use super::types::{Joint, JointKind, Motion, Skeleton};
use crate::{
    gm_error::{GmError, IndexError},
    options::{PlaybackOptions, Seam},
    rotation::{self, RotationOrder},
};
use log::trace;
use nalgebra_glm as glm;

/// World transform of every joint at one moment, indexed like
/// `Skeleton::joints`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pose(pub Vec<glm::Mat4>);

impl Pose {
    #[must_use]
    pub fn transform(&self, joint: usize) -> Option<&glm::Mat4> {
        self.0.get(joint)
    }

    /// World position of a joint, the translation column of its transform
    #[must_use]
    pub fn position(&self, joint: usize) -> Option<glm::Vec3> {
        self.0.get(joint).map(|m| m.column(3).xyz())
    }

    /// World space (parent, child) position pairs for every parent to child
    /// link, for drawing the skeleton as bones
    #[must_use]
    pub fn bones(&self, skeleton: &Skeleton) -> Vec<(glm::Vec3, glm::Vec3)> {
        skeleton
            .joints()
            .iter()
            .enumerate()
            .filter_map(|(index, joint)| {
                let parent = self.position(joint.parent?)?;
                Some((parent, self.position(index)?))
            })
            .collect()
    }
}

/// The pair of frames a pose is blended from
struct Frames<'a> {
    current: &'a [f32],
    next: &'a [f32],
    fraction: f32,
    interpolate: bool,
}

fn channel(frame: &[f32], index: usize) -> Result<f32, IndexError> {
    frame.get(index).copied().ok_or(IndexError::Channel {
        index,
        len: frame.len(),
    })
}

fn channels(frame: &[f32], indices: [usize; 3]) -> Result<glm::Vec3, IndexError> {
    Ok(glm::vec3(
        channel(frame, indices[0])?,
        channel(frame, indices[1])?,
        channel(frame, indices[2])?,
    ))
}

/// Picks the current and next frame for a time. At the last frame `Seam`
/// decides whether the next frame is the first one or the last one again.
fn select<'a>(
    motion: &'a Motion,
    time: f32,
    options: &PlaybackOptions,
) -> Result<Frames<'a>, IndexError> {
    let (index, fraction) = motion.locate(time);
    let next_index = if index + 1 == motion.frame_count() {
        match options.seam {
            Seam::Hold => index,
            Seam::Wrap => 0,
        }
    } else {
        index + 1
    };
    trace!("time={time} frame={index} next={next_index} fraction={fraction}");
    Ok(Frames {
        current: motion.frame(index)?,
        next: motion.frame(next_index)?,
        fraction,
        interpolate: options.interpolate,
    })
}

/// Translation matrix for a joint. The root reads its position channels,
/// every other joint uses its fixed offset.
fn translation_matrix(joint: &Joint, frames: &Frames) -> Result<glm::Mat4, IndexError> {
    let t = match joint.kind {
        JointKind::Root { position, .. } => {
            let current = channels(frames.current, position)?;
            if frames.interpolate {
                let next = channels(frames.next, position)?;
                glm::lerp(&current, &next, frames.fraction)
            } else {
                current
            }
        }
        JointKind::Joint { .. } | JointKind::EndSite => joint.offset,
    };
    Ok(glm::translation(&t))
}

/// Rotation matrix for a joint's Euler channels. Interpolation goes through
/// quaternions, otherwise the single axis matrices are multiplied directly.
fn rotation_matrix(
    indices: [usize; 3],
    order: RotationOrder,
    frames: &Frames,
) -> Result<glm::Mat4, IndexError> {
    let current = channels(frames.current, indices)?;
    if !frames.interpolate {
        return Ok(rotation::euler_mat4(&current, order));
    }
    let next = channels(frames.next, indices)?;
    let q1 = glm::quat_normalize(&rotation::from_euler(&current, order));
    let q2 = glm::quat_normalize(&rotation::from_euler(&next, order));
    let q = glm::quat_normalize(&rotation::slerp(&q1, &q2, frames.fraction));
    Ok(rotation::to_mat4(&q))
}

// Call with the root joint to recursively calculate world transforms
fn traverse(
    skeleton: &Skeleton,
    index: usize,
    frames: &Frames,
    parent: &glm::Mat4,
    output: &mut [glm::Mat4],
) -> Result<(), GmError> {
    let joint = skeleton.joint(index)?;

    let world = match joint.kind {
        // End sites only mark where the last bone ends
        JointKind::EndSite => parent * glm::translation(&joint.offset),
        JointKind::Root {
            rotation: indices,
            order,
            ..
        }
        | JointKind::Joint {
            rotation: indices,
            order,
        } => {
            parent
                * translation_matrix(joint, frames)?
                * rotation_matrix(indices, order, frames)?
        }
    };

    for child in &joint.children {
        traverse(skeleton, *child, frames, &world, output)?;
    }

    if let Some(out) = output.get_mut(index) {
        *out = world;
    }
    Ok(())
}

/// Returns the world transform of every joint at an arbitrary time. The
/// result only depends on the arguments, so this can be called for any
/// number of times from any number of threads.
///
/// # Errors
/// Returns `GmError::Index` if the skeleton reads a channel the motion table
/// does not have
pub fn animate(
    skeleton: &Skeleton,
    motion: &Motion,
    time: f32,
    options: &PlaybackOptions,
) -> Result<Pose, GmError> {
    let frames = select(motion, time * options.speed, options)?;
    let mut output = vec![glm::Mat4::identity(); skeleton.len()];
    traverse(
        skeleton,
        skeleton.root(),
        &frames,
        &glm::Mat4::identity(),
        &mut output,
    )?;
    Ok(Pose(output))
}
