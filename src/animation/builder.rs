use super::{
    channels::ChannelLayout,
    types::{Joint, JointKind, Skeleton},
};
use crate::gm_error::{GmError, IndexError};
use log::debug;
use nalgebra_glm as glm;
use smallvec::SmallVec;

/// Assembles a `Skeleton` one joint at a time, parents before children.
/// This is what a hierarchy parser drives as it walks its input.
#[derive(Debug, Default)]
pub struct SkeletonBuilder {
    joints: Vec<Joint>,
    root: Option<usize>,
    next_channel: usize,
}

impl SkeletonBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First channel index not yet used by any joint. Useful as the
    /// `first_index` for `ChannelLayout::from_names`.
    #[must_use]
    pub const fn next_channel(&self) -> usize {
        self.next_channel
    }

    /// Adds the root joint, which must have position channels
    ///
    /// # Errors
    /// Returns `GmError::InvalidSkeleton` if there is already a root or the
    /// layout has no position channels
    pub fn root(
        &mut self,
        name: &str,
        offset: glm::Vec3,
        layout: ChannelLayout,
    ) -> Result<usize, GmError> {
        if self.root.is_some() {
            return Err(GmError::InvalidSkeleton("more than one root"));
        }
        let position = layout
            .position
            .ok_or(GmError::InvalidSkeleton("root needs position channels"))?;
        let index = self.push(
            name,
            offset,
            None,
            JointKind::Root {
                position,
                rotation: layout.rotation,
                order: layout.order,
            },
        );
        self.root = Some(index);
        Ok(index)
    }

    /// Adds a rotating joint below `parent`. Position channels in the layout
    /// are counted but not used, only the root translates.
    ///
    /// # Errors
    /// Returns `IndexError::Joint` for a bad parent and
    /// `GmError::InvalidSkeleton` if the parent is an end site
    pub fn joint(
        &mut self,
        parent: usize,
        name: &str,
        offset: glm::Vec3,
        layout: ChannelLayout,
    ) -> Result<usize, GmError> {
        self.check_parent(parent)?;
        if let Some(position) = layout.position {
            debug!("position channels of joint {name} are ignored");
            // They still take up room in every frame
            self.reserve(position);
        }
        Ok(self.push(
            name,
            offset,
            Some(parent),
            JointKind::Joint {
                rotation: layout.rotation,
                order: layout.order,
            },
        ))
    }

    /// Adds a leaf marker below `parent`
    ///
    /// # Errors
    /// Returns `IndexError::Joint` for a bad parent and
    /// `GmError::InvalidSkeleton` if the parent is an end site
    pub fn end_site(
        &mut self,
        parent: usize,
        name: &str,
        offset: glm::Vec3,
    ) -> Result<usize, GmError> {
        self.check_parent(parent)?;
        Ok(self.push(name, offset, Some(parent), JointKind::EndSite))
    }

    /// # Errors
    /// Returns `GmError::InvalidSkeleton` if no root was added
    pub fn build(self) -> Result<Skeleton, GmError> {
        let root = self
            .root
            .ok_or(GmError::InvalidSkeleton("no root joint"))?;
        debug!(
            "skeleton with {} joints and {} channels",
            self.joints.len(),
            self.next_channel
        );
        Ok(Skeleton {
            joints: self.joints,
            root,
            channel_count: self.next_channel,
        })
    }

    fn check_parent(&self, parent: usize) -> Result<(), GmError> {
        let joint = self.joints.get(parent).ok_or(IndexError::Joint {
            index: parent,
            len: self.joints.len(),
        })?;
        if joint.is_end_site() {
            return Err(GmError::InvalidSkeleton("end site can not have children"));
        }
        Ok(())
    }

    fn reserve<I: IntoIterator<Item = usize>>(&mut self, channels: I) {
        if let Some(highest) = channels.into_iter().max() {
            self.next_channel = self.next_channel.max(highest + 1);
        }
    }

    fn push(
        &mut self,
        name: &str,
        offset: glm::Vec3,
        parent: Option<usize>,
        kind: JointKind,
    ) -> usize {
        let index = self.joints.len();
        self.reserve(kind.channels());
        if let Some(p) = parent.and_then(|p| self.joints.get_mut(p)) {
            p.children.push(index);
        }
        self.joints.push(Joint {
            name: name.to_owned(),
            offset,
            parent,
            children: SmallVec::new(),
            kind,
        });
        index
    }
}

#[cfg(test)]
mod tests {
    use super::SkeletonBuilder;
    use crate::{
        animation::ChannelLayout,
        gm_error::{GmError, IndexError},
        rotation::RotationOrder,
    };
    use nalgebra_glm as glm;

    fn root_layout() -> ChannelLayout {
        ChannelLayout::new([3, 4, 5], RotationOrder::XYZ).with_position([0, 1, 2])
    }

    #[test]
    fn build_tree() {
        let mut b = SkeletonBuilder::new();
        let hips = b.root("Hips", glm::Vec3::zeros(), root_layout()).unwrap();
        let layout = ChannelLayout::new([6, 7, 8], RotationOrder::UNITY);
        let spine = b
            .joint(hips, "Spine", glm::vec3(0.0, 1.0, 0.0), layout)
            .unwrap();
        let end = b.end_site(spine, "Head", glm::vec3(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(b.next_channel(), 9);
        let skeleton = b.build().unwrap();

        assert_eq!(skeleton.len(), 3);
        assert_eq!(skeleton.root(), hips);
        assert_eq!(skeleton.channel_count(), 9);
        assert_eq!(skeleton.joint(spine).unwrap().parent, Some(hips));
        assert_eq!(skeleton.joint(hips).unwrap().children.as_slice(), &[spine]);
        assert!(skeleton.joint(end).unwrap().is_end_site());
        assert_eq!(skeleton.find("Spine"), Some(spine));
        assert_eq!(skeleton.depth_first(), vec![hips, spine, end]);
    }

    #[test]
    fn rejects_bad_structure() {
        let mut b = SkeletonBuilder::new();
        let layout = ChannelLayout::new([0, 1, 2], RotationOrder::XYZ);
        assert!(matches!(
            b.root("Hips", glm::Vec3::zeros(), layout),
            Err(GmError::InvalidSkeleton(_))
        ));
        let hips = b.root("Hips", glm::Vec3::zeros(), root_layout()).unwrap();
        assert!(matches!(
            b.root("Again", glm::Vec3::zeros(), root_layout()),
            Err(GmError::InvalidSkeleton(_))
        ));
        assert!(matches!(
            b.joint(9, "Lost", glm::Vec3::zeros(), layout),
            Err(GmError::Index(IndexError::Joint { index: 9, len: 1 }))
        ));
        let end = b.end_site(hips, "End", glm::Vec3::zeros()).unwrap();
        assert!(matches!(
            b.end_site(end, "Beyond", glm::Vec3::zeros()),
            Err(GmError::InvalidSkeleton(_))
        ));
    }

    #[test]
    fn ignored_position_channels_take_room() {
        let mut b = SkeletonBuilder::new();
        let hips = b.root("Hips", glm::Vec3::zeros(), root_layout()).unwrap();
        let layout = ChannelLayout::from_names(
            b.next_channel(),
            &[
                "Zrotation",
                "Xrotation",
                "Yrotation",
                "Xposition",
                "Yposition",
                "Zposition",
            ],
        )
        .unwrap();
        let spine = b
            .joint(hips, "Spine", glm::vec3(0.0, 1.0, 0.0), layout)
            .unwrap();
        assert_eq!(b.next_channel(), 12);

        let layout = ChannelLayout::from_names(
            b.next_channel(),
            &["Zrotation", "Xrotation", "Yrotation"],
        )
        .unwrap();
        assert_eq!(layout.rotation, [13, 14, 12]);
        b.joint(spine, "Neck", glm::vec3(0.0, 1.0, 0.0), layout)
            .unwrap();
        assert_eq!(b.build().unwrap().channel_count(), 15);
    }

    #[test]
    fn build_needs_root() {
        assert!(SkeletonBuilder::new().build().is_err());
    }
}
