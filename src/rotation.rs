use crate::gm_error::IndexError;
use nalgebra_glm as glm;
use std::f32::consts::PI;

/// Below this `sin(theta)` the two quaternions are treated as parallel
pub const EPSILON: f32 = 1.0e-6;

/// One of the three coordinate axes
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    #[must_use]
    pub fn unit(self) -> glm::Vec3 {
        match self {
            Self::X => glm::vec3(1.0, 0.0, 0.0),
            Self::Y => glm::vec3(0.0, 1.0, 0.0),
            Self::Z => glm::vec3(0.0, 0.0, 1.0),
        }
    }
}

/// Order in which the three single axis rotations of an Euler triple are
/// composed.
///
/// The ranking maps each axis (X = 0, Y = 1, Z = 2) to the slot it occupies
/// in the product `slot0 * slot1 * slot2`. So `[1, 2, 0]` puts Z first, then
/// X, then Y, which is the order a BVH file gives with channels listed as
/// `Zrotation Xrotation Yrotation`. It is also the default order of some game
/// engines, hence `UNITY`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RotationOrder([usize; 3]);

impl Default for RotationOrder {
    fn default() -> Self {
        Self::XYZ
    }
}

impl RotationOrder {
    pub const XYZ: Self = Self([0, 1, 2]);
    pub const UNITY: Self = Self([1, 2, 0]);

    /// Creates a rotation order from a ranking
    ///
    /// # Errors
    /// Returns `IndexError::RotationOrder` if `rank` is not a permutation of
    /// 0, 1 and 2
    pub fn new(rank: [usize; 3]) -> Result<Self, IndexError> {
        let mut seen = [false; 3];
        for r in rank {
            match seen.get_mut(r) {
                Some(s) if !*s => *s = true,
                _ => return Err(IndexError::RotationOrder(rank)),
            }
        }
        Ok(Self(rank))
    }

    /// Creates a rotation order from axes listed in application order, as
    /// they appear in the channel list of a motion capture hierarchy
    ///
    /// # Errors
    /// Returns `IndexError::RotationOrder` if an axis is repeated
    pub fn from_axes(axes: [Axis; 3]) -> Result<Self, IndexError> {
        // Start with an impossible ranking so a missing axis is caught
        let mut rank = [3; 3];
        for (slot, axis) in axes.iter().enumerate() {
            rank[axis.index()] = slot;
        }
        Self::new(rank)
    }

    #[must_use]
    pub const fn rank(&self) -> [usize; 3] {
        self.0
    }

    /// Moves per axis items (X, Y, Z) into their application slots
    #[must_use]
    pub fn arrange<T: Copy>(&self, items: [T; 3]) -> [T; 3] {
        let mut out = items;
        for (item, slot) in items.into_iter().zip(self.0) {
            out[slot] = item;
        }
        out
    }
}

/// Hamilton product. Not commutative: `mul(q1, q2)` applies `q2` first when
/// the result rotates a vector.
#[must_use]
pub fn mul(q1: &glm::Quat, q2: &glm::Quat) -> glm::Quat {
    glm::quat(
        q1.w * q2.i + q1.i * q2.w + q1.j * q2.k - q1.k * q2.j,
        q1.w * q2.j + q1.j * q2.w + q1.k * q2.i - q1.i * q2.k,
        q1.w * q2.k + q1.k * q2.w + q1.i * q2.j - q1.j * q2.i,
        q1.w * q2.w - q1.i * q2.i - q1.j * q2.j - q1.k * q2.k,
    )
}

#[must_use]
pub fn conjugate(q: &glm::Quat) -> glm::Quat {
    glm::quat(-q.i, -q.j, -q.k, q.w)
}

/// Rotates a vector by a unit quaternion using `q * v * q'`
#[must_use]
pub fn rotate_vector(q: &glm::Quat, v: &glm::Vec3) -> glm::Vec3 {
    let pure = glm::quat(v.x, v.y, v.z, 0.0);
    let r = mul(&mul(q, &pure), &conjugate(q));
    glm::vec3(r.i, r.j, r.k)
}

/// Quaternion for a rotation of `degrees` around `axis`. The axis does not
/// need to be normalized. A zero length axis gives the identity.
#[must_use]
pub fn axis_angle(axis: &glm::Vec3, degrees: f32) -> glm::Quat {
    let len = glm::length(axis);
    if len < EPSILON {
        return glm::Quat::identity();
    }
    let half = degrees.to_radians() * 0.5;
    let v = axis * (half.sin() / len);
    glm::quat_normalize(&glm::quat(v.x, v.y, v.z, half.cos()))
}

/// Quaternion for Euler angles in degrees applied in the given order
#[must_use]
pub fn from_euler(euler: &glm::Vec3, order: RotationOrder) -> glm::Quat {
    let [a, b, c] = order.arrange([
        axis_angle(&Axis::X.unit(), euler.x),
        axis_angle(&Axis::Y.unit(), euler.y),
        axis_angle(&Axis::Z.unit(), euler.z),
    ]);
    mul(&mul(&a, &b), &c)
}

/// Half of the angle between two unit quaternions, folded onto the shorter
/// arc so the result is in `[0, pi/2]`
#[must_use]
pub fn half_angle(q1: &glm::Quat, q2: &glm::Quat) -> f32 {
    let diff = mul(q1, &conjugate(q2));
    let theta = 2.0 * diff.w.clamp(-1.0, 1.0).acos();
    if theta > PI {
        theta.mul_add(-0.5, PI)
    } else {
        theta * 0.5
    }
}

/// Spherical linear interpolation for `t` in `[0, 1]` along the shorter arc.
/// The result is not normalized. When the quaternions are (nearly) parallel
/// `q1` is returned unchanged.
#[must_use]
pub fn slerp(q1: &glm::Quat, q2: &glm::Quat, t: f32) -> glm::Quat {
    let theta = half_angle(q1, q2);
    let sin_theta = theta.sin();
    if sin_theta.abs() < EPSILON {
        return *q1;
    }
    // `half_angle` measures to whichever of q2 and -q2 is closer, so blend
    // towards that one. An exact half turn (dot of zero) keeps q2 as given.
    let q2 = if glm::quat_dot(q1, q2) < -EPSILON {
        -*q2
    } else {
        *q2
    };
    let a = ((1.0 - t) * theta).sin() / sin_theta;
    let b = (t * theta).sin() / sin_theta;
    *q1 * a + q2 * b
}

/// Rotation matrix for a unit quaternion
#[must_use]
pub fn to_mat4(q: &glm::Quat) -> glm::Mat4 {
    glm::quat_to_mat4(q)
}

/// Rotation matrix for a single axis rotation in degrees
#[must_use]
pub fn axis_mat4(axis: Axis, degrees: f32) -> glm::Mat4 {
    glm::rotate(&glm::Mat4::identity(), degrees.to_radians(), &axis.unit())
}

/// Rotation matrix for Euler angles in degrees composed by matrix products
/// in the given order. Matches `to_mat4(&from_euler(euler, order))`.
#[must_use]
pub fn euler_mat4(euler: &glm::Vec3, order: RotationOrder) -> glm::Mat4 {
    let [a, b, c] = order.arrange([
        axis_mat4(Axis::X, euler.x),
        axis_mat4(Axis::Y, euler.y),
        axis_mat4(Axis::Z, euler.z),
    ]);
    a * b * c
}
