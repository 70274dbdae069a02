use crate::{
    gm_error::GmError,
    rotation::{Axis, RotationOrder},
};

/// Channel indices of one joint plus the order its rotations are applied
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChannelLayout {
    pub position: Option<[usize; 3]>,
    pub rotation: [usize; 3],
    pub order: RotationOrder,
}

impl ChannelLayout {
    #[must_use]
    pub const fn new(rotation: [usize; 3], order: RotationOrder) -> Self {
        Self {
            position: None,
            rotation,
            order,
        }
    }

    #[must_use]
    pub const fn with_position(self, position: [usize; 3]) -> Self {
        Self {
            position: Some(position),
            ..self
        }
    }

    /// Builds a layout from channel names as listed in a motion capture
    /// hierarchy, such as `Xposition Yposition Zposition Zrotation Xrotation
    /// Yrotation`. Channels are numbered consecutively from `first_index` and
    /// the rotation order is the order the rotation names appear in.
    ///
    /// # Errors
    /// Returns `GmError::UnknownChannel` for an unrecognized name and
    /// `GmError::InvalidSkeleton` unless there are exactly three rotation
    /// channels and either zero or three position channels
    pub fn from_names<S: AsRef<str>>(
        first_index: usize,
        names: &[S],
    ) -> Result<Self, GmError> {
        let mut position = [None; 3];
        let mut rotation = [None; 3];
        let mut axes = Vec::with_capacity(3);
        for (offset, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let index = first_index + offset;
            let (axis, is_rotation) = parse_name(name)
                .ok_or_else(|| GmError::UnknownChannel(name.to_owned()))?;
            let slot = if is_rotation {
                axes.push(axis);
                &mut rotation[axis.index()]
            } else {
                &mut position[axis.index()]
            };
            if slot.replace(index).is_some() {
                return Err(GmError::InvalidSkeleton("repeated channel"));
            }
        }

        let rotation = complete(rotation)
            .ok_or(GmError::InvalidSkeleton("missing rotation channel"))?;
        let order = match axes.as_slice() {
            [a, b, c] => RotationOrder::from_axes([*a, *b, *c])?,
            _ => return Err(GmError::InvalidSkeleton("missing rotation channel")),
        };
        let position = match complete(position) {
            Some(p) => Some(p),
            None if position.iter().all(Option::is_none) => None,
            None => {
                return Err(GmError::InvalidSkeleton("missing position channel"))
            }
        };
        Ok(Self {
            position,
            rotation,
            order,
        })
    }

    /// Number of channels in this layout
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.position.is_some() {
            6
        } else {
            3
        }
    }

    /// A layout always has rotation channels
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

fn parse_name(name: &str) -> Option<(Axis, bool)> {
    let mut chars = name.chars();
    let axis = match chars.next()? {
        'X' | 'x' => Axis::X,
        'Y' | 'y' => Axis::Y,
        'Z' | 'z' => Axis::Z,
        _ => return None,
    };
    match chars.as_str().to_ascii_lowercase().as_str() {
        "rotation" => Some((axis, true)),
        "position" => Some((axis, false)),
        _ => None,
    }
}

fn complete(slots: [Option<usize>; 3]) -> Option<[usize; 3]> {
    Some([slots[0]?, slots[1]?, slots[2]?])
}

#[cfg(test)]
mod tests {
    use super::ChannelLayout;
    use crate::{gm_error::GmError, rotation::RotationOrder};

    #[test]
    fn root_layout() {
        let layout = ChannelLayout::from_names(
            0,
            &[
                "Xposition",
                "Yposition",
                "Zposition",
                "Zrotation",
                "Xrotation",
                "Yrotation",
            ],
        )
        .unwrap();
        assert_eq!(layout.position, Some([0, 1, 2]));
        // X is the 5th channel, Y the 6th and Z the 4th
        assert_eq!(layout.rotation, [4, 5, 3]);
        assert_eq!(layout.order, RotationOrder::UNITY);
        assert_eq!(layout.len(), 6);
    }

    #[test]
    fn joint_layout() {
        let layout =
            ChannelLayout::from_names(6, &["Xrotation", "Yrotation", "Zrotation"])
                .unwrap();
        assert_eq!(layout.position, None);
        assert_eq!(layout.rotation, [6, 7, 8]);
        assert_eq!(layout.order, RotationOrder::XYZ);
    }

    #[test]
    fn bad_names() {
        assert!(matches!(
            ChannelLayout::from_names(0, &["Wrotation"]),
            Err(GmError::UnknownChannel(_))
        ));
        assert!(matches!(
            ChannelLayout::from_names(0, &["Xrotation", "Yrotation"]),
            Err(GmError::InvalidSkeleton(_))
        ));
        assert!(matches!(
            ChannelLayout::from_names(
                0,
                &["Xposition", "Xrotation", "Yrotation", "Zrotation"]
            ),
            Err(GmError::InvalidSkeleton(_))
        ));
    }
}
