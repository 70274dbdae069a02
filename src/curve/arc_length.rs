use super::bezier::BezierCurve;
use log::trace;
use nalgebra_glm as glm;

/// Segments used for the lookup table when there is no reason to choose
/// something else
pub const DEFAULT_STEPS: usize = 128;

/// Cumulative length of the curve up to parameter `t`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSample {
    pub t: f32,
    pub length: f32,
}

/// Lookup table from curve parameter to distance travelled along the curve,
/// built by summing straight segments between evenly spaced parameters.
/// Both fields are non-decreasing from `(0, 0)` to `(1, total_length)`.
#[derive(Clone, Debug)]
pub struct ArcLengthTable {
    samples: Vec<ArcSample>,
}

impl ArcLengthTable {
    /// Builds the table from `steps + 1` samples. Zero steps is treated as
    /// one.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(curve: &BezierCurve, steps: usize) -> Self {
        let steps = steps.max(1);
        let mut samples = Vec::with_capacity(steps + 1);
        samples.push(ArcSample {
            t: 0.0,
            length: 0.0,
        });
        let mut previous = curve.point(0.0);
        let mut length = 0.0f32;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let point = curve.point(t);
            length += glm::distance(&previous, &point);
            samples.push(ArcSample { t, length });
            previous = point;
        }
        trace!("arc length table steps={steps} total={length}");
        Self { samples }
    }

    #[must_use]
    pub fn samples(&self) -> &[ArcSample] {
        &self.samples
    }

    /// Approximate length of the whole curve
    #[must_use]
    pub fn total_length(&self) -> f32 {
        self.samples.last().map_or(0.0, |s| s.length)
    }

    /// Parameter at which the curve has covered `length`. Lengths outside
    /// `[0, total_length]` are clamped so probing the ends is always safe.
    #[must_use]
    pub fn parameter_at(&self, length: f32) -> f32 {
        // Also catches NaN
        if !(length > 0.0) {
            return 0.0;
        }
        if length >= self.total_length() {
            return 1.0;
        }

        // First sample at or past the requested length. The first sample has
        // length 0 so this is never the first one.
        let index = self.samples.partition_point(|s| s.length < length);
        let lower = index.checked_sub(1).and_then(|i| self.samples.get(i));
        let (Some(lower), Some(upper)) = (lower, self.samples.get(index)) else {
            return 1.0;
        };

        let span = upper.length - lower.length;
        if span <= f32::EPSILON {
            return upper.t;
        }
        let w = (length - lower.length) / span;
        w.mul_add(upper.t - lower.t, lower.t)
    }
}
