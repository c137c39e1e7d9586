//! Rigid-body pose: world position plus orientation.

use crate::{Quat, Vec3};

/// Position and orientation of a rigid frame in world coordinates.
///
/// `rot` transforms vectors from the frame's local coordinates into world
/// coordinates and must be a unit rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position of the frame origin in world coordinates.
    pub pos: Vec3,
    /// Orientation of the frame (local to world).
    pub rot: Quat,
}

impl Pose {
    /// Create a pose from position and orientation.
    pub fn new(pos: Vec3, rot: Quat) -> Self {
        Self { pos, rot }
    }

    /// Identity pose: origin, no rotation.
    pub fn identity() -> Self {
        Self {
            pos: Vec3::zeros(),
            rot: Quat::identity(),
        }
    }

    /// Pose with a translation only.
    pub fn from_translation(pos: Vec3) -> Self {
        Self {
            pos,
            rot: Quat::identity(),
        }
    }

    /// Rotate a local-frame vector into the world frame.
    pub fn transform_vector(&self, v: &Vec3) -> Vec3 {
        self.rot.rotate(v)
    }

    /// Rotate a world-frame vector into the local frame.
    pub fn inverse_transform_vector(&self, v: &Vec3) -> Vec3 {
        self.rot.rotate_inverse(v)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_identity() {
        let p = Pose::identity();
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!((p.transform_vector(&v) - v).norm() < EPS);
        assert!((p.inverse_transform_vector(&v) - v).norm() < EPS);
    }

    #[test]
    fn test_transform_roundtrip() {
        let rot = Quat::from_axis_angle(&Vec3::new(0.0, 1.0, 0.0), 1.1);
        let p = Pose::new(Vec3::new(1.0, -2.0, 0.5), rot);
        let v = Vec3::new(0.3, 0.7, -0.4);
        let back = p.inverse_transform_vector(&p.transform_vector(&v));
        assert!((back - v).norm() < EPS);
    }
}
