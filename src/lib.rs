//! Geometry and animation building blocks: skeletal pose playback, cubic
//! Bezier curves with arc length lookup, and Catmull-Clark subdivision of
//! quad meshes.
//!
//! Everything here is a pure computation over immutable inputs. The library
//! logs through the `log` facade and never installs a logger itself.
pub mod animation;
pub mod curve;
pub mod gm_error;
pub mod mesh;
pub mod options;
pub mod rotation;
