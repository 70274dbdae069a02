use super::{
    arc_length::ArcLengthTable,
    bezier::{BezierCurve, Frame},
};
use crate::gm_error::GmError;
use nalgebra_glm as glm;

/// Most samples `sample_uniform` will produce. Spacings that would need
/// more are rejected.
pub const MAX_SAMPLES: usize = 1 << 20;

/// A point placed along a curve together with its frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSample {
    pub t: f32,
    pub length: f32,
    pub position: glm::Vec3,
    pub frame: Frame,
}

/// Returns `steps + 1` points at evenly spaced parameters, including both
/// ends. Spacing in distance is uneven wherever the curve changes speed.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sample_points(curve: &BezierCurve, steps: usize) -> Vec<glm::Vec3> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| curve.point(i as f32 / steps as f32))
        .collect()
}

/// Returns samples every `spacing` units of distance along the curve,
/// starting at the beginning and stopping at the last one that fits. Things
/// placed at these samples are evenly spaced regardless of the curve's
/// speed.
///
/// # Errors
/// Returns `GmError::InvalidSpacing` unless `spacing` is positive and finite
/// and fits the curve at most `MAX_SAMPLES` times
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn sample_uniform(
    curve: &BezierCurve,
    table: &ArcLengthTable,
    spacing: f32,
) -> Result<Vec<CurveSample>, GmError> {
    if !(spacing > 0.0 && spacing.is_finite()) {
        return Err(GmError::InvalidSpacing(spacing));
    }
    let count = (table.total_length() / spacing).floor();
    if !(count < MAX_SAMPLES as f32) {
        return Err(GmError::InvalidSpacing(spacing));
    }
    let count = count as usize;
    Ok((0..=count)
        .map(|i| {
            let length = i as f32 * spacing;
            let t = table.parameter_at(length);
            CurveSample {
                t,
                length,
                position: curve.point(t),
                frame: curve.frame(t),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{sample_points, sample_uniform, MAX_SAMPLES};
    use crate::{curve::BezierCurve, gm_error::GmError};
    use nalgebra_glm as glm;

    fn hook() -> BezierCurve {
        BezierCurve::new(
            glm::vec3(0.0, 0.0, 0.0),
            glm::vec3(1.0, 0.0, 0.0),
            glm::vec3(1.0, 1.0, 0.0),
            glm::vec3(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn points_include_ends() {
        let c = hook();
        let points = sample_points(&c, 4);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], c.p0);
        assert_eq!(points[4], c.p3);
    }

    #[test]
    fn uniform_samples_are_evenly_spaced() {
        let c = hook();
        let table = c.arc_length_table(256);
        let samples = sample_uniform(&c, &table, 0.1).unwrap();
        let expected = (table.total_length() / 0.1).floor() as usize + 1;
        assert_eq!(samples.len(), expected);
        assert!(samples[0].t.abs() < f32::EPSILON);

        // Neighbouring points are 0.1 apart along the curve, which is a
        // little more than the straight line distance between them
        for pair in samples.windows(2) {
            let d = glm::distance(&pair[0].position, &pair[1].position);
            assert!(d > 0.095 && d < 0.1005, "distance {d}");
            assert!(pair[1].t > pair[0].t);
        }
    }

    #[test]
    fn bad_spacing() {
        let c = hook();
        let table = c.arc_length_table(16);
        assert!(matches!(
            sample_uniform(&c, &table, 0.0),
            Err(GmError::InvalidSpacing(_))
        ));
        assert!(sample_uniform(&c, &table, f32::INFINITY).is_err());
    }

    #[test]
    fn too_many_samples() {
        let c = hook();
        let table = c.arc_length_table(16);
        assert!(matches!(
            sample_uniform(&c, &table, 1.0e-30),
            Err(GmError::InvalidSpacing(_))
        ));
        let spacing = table.total_length() / MAX_SAMPLES as f32 * 2.0;
        assert!(sample_uniform(&c, &table, spacing).is_ok());
    }
}
