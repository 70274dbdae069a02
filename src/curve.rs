mod arc_length;
mod bezier;
mod sampling;

// Re-exports
pub use {
    arc_length::{ArcLengthTable, ArcSample, DEFAULT_STEPS},
    bezier::{BezierCurve, Frame},
    sampling::{sample_points, sample_uniform, CurveSample, MAX_SAMPLES},
};
