use super::arc_length::ArcLengthTable;
use crate::{gm_error::GmError, rotation::Axis};
use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

/// Squared lengths below this are treated as zero when normalizing
const DEGENERATE: f32 = 1.0e-6;

/// Orthonormal basis travelling with the curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub tangent: glm::Vec3,
    pub normal: glm::Vec3,
    pub binormal: glm::Vec3,
}

/// Cubic Bezier curve defined by four control points. Evaluation is only
/// meaningful for `t` in `[0, 1]`.
///
/// Control points can be read from YAML as three element sequences:
/// ```yaml
/// p0: [0.0, 0.0, 0.0]
/// p1: [1.0, 0.0, 0.0]
/// p2: [1.0, 1.0, 0.0]
/// p3: [0.0, 1.0, 0.0]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BezierCurve {
    pub p0: glm::Vec3,
    pub p1: glm::Vec3,
    pub p2: glm::Vec3,
    pub p3: glm::Vec3,
}

impl Default for BezierCurve {
    fn default() -> Self {
        Self {
            p0: glm::vec3(1.0, 0.0, 1.0),
            p1: glm::vec3(1.0, 0.0, -1.0),
            p2: glm::vec3(-1.0, 0.0, -1.0),
            p3: glm::vec3(-1.0, 0.0, 1.0),
        }
    }
}

impl BezierCurve {
    #[must_use]
    pub const fn new(
        p0: glm::Vec3,
        p1: glm::Vec3,
        p2: glm::Vec3,
        p3: glm::Vec3,
    ) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// # Errors
    /// May return `GmError::SerdeYamlError`
    pub fn from_yaml(yaml: &str) -> Result<Self, GmError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Position on the curve
    #[must_use]
    pub fn point(&self, t: f32) -> glm::Vec3 {
        let s = 1.0 - t;
        self.p0 * (s * s * s)
            + self.p1 * (3.0 * t * s * s)
            + self.p2 * (3.0 * t * t * s)
            + self.p3 * (t * t * t)
    }

    #[must_use]
    pub fn first_derivative(&self, t: f32) -> glm::Vec3 {
        let a = self.p3 - self.p2 * 3.0 + self.p1 * 3.0 - self.p0;
        let b = self.p2 - self.p1 * 2.0 + self.p0;
        (a * (t * t) + b * (2.0 * t) + self.p1 - self.p0) * 3.0
    }

    #[must_use]
    pub fn second_derivative(&self, t: f32) -> glm::Vec3 {
        let a = self.p3 - self.p2 * 3.0 + self.p1 * 3.0 - self.p0;
        let b = self.p2 - self.p1 * 2.0 + self.p0;
        (a * t + b) * 6.0
    }

    /// Unit direction of travel. Where the derivative vanishes the chord
    /// from the first to the last control point is used instead.
    #[must_use]
    pub fn tangent(&self, t: f32) -> glm::Vec3 {
        let d = self.first_derivative(t);
        if glm::length2(&d) > DEGENERATE {
            return glm::normalize(&d);
        }
        let chord = self.p3 - self.p0;
        if glm::length2(&chord) > DEGENERATE {
            glm::normalize(&chord)
        } else {
            Axis::X.unit()
        }
    }

    /// Frenet binormal. On straight stretches the curve does not define one,
    /// so a fixed reference axis stands in: +Y, or +X if the tangent is
    /// close to Y.
    #[must_use]
    pub fn binormal(&self, t: f32) -> glm::Vec3 {
        let tangent = self.tangent(t);
        let bend = self.first_derivative(t) + self.second_derivative(t);
        if glm::length2(&bend) > DEGENERATE {
            let b = glm::cross(&tangent, &glm::normalize(&bend));
            if glm::length2(&b) > DEGENERATE {
                return glm::normalize(&b);
            }
        }
        let reference = if glm::dot(&tangent, &Axis::Y.unit()).abs() > 0.99 {
            Axis::X.unit()
        } else {
            Axis::Y.unit()
        };
        glm::normalize(&glm::cross(&tangent, &reference))
    }

    /// Frenet normal
    #[must_use]
    pub fn normal(&self, t: f32) -> glm::Vec3 {
        glm::normalize(&glm::cross(&self.tangent(t), &self.binormal(t)))
    }

    /// Tangent, normal and binormal together
    #[must_use]
    pub fn frame(&self, t: f32) -> Frame {
        let tangent = self.tangent(t);
        let binormal = self.binormal(t);
        Frame {
            tangent,
            normal: glm::normalize(&glm::cross(&tangent, &binormal)),
            binormal,
        }
    }

    /// Shorthand for `ArcLengthTable::new`
    #[must_use]
    pub fn arc_length_table(&self, steps: usize) -> ArcLengthTable {
        ArcLengthTable::new(self, steps)
    }
}
