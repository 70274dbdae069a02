mod builder;
mod channels;
mod types;
mod util;

// Re-exports
pub use {
    builder::SkeletonBuilder,
    channels::ChannelLayout,
    types::{Joint, JointKind, Motion, Skeleton},
    util::{animate, Pose},
};
