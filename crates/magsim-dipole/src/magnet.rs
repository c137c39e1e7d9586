//! Magnet descriptors: a dipole moment plus its mounting transform.

use magsim_math::{Pose, Vec3};

/// A fixed point dipole rigidly attached to a host body.
///
/// Both fields are set once at configuration time and never change for the
/// lifetime of the pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnet {
    /// Dipole moment in the magnet's own local frame (A·m²).
    pub moment: Vec3,
    /// Fixed transform from the magnet's local frame to its host body's
    /// reference frame.
    pub offset: Pose,
}

impl Magnet {
    /// Create a magnet from its local moment and mounting offset.
    pub fn new(moment: Vec3, offset: Pose) -> Self {
        Self { moment, offset }
    }

    /// Rotate the local moment into the world frame using the magnet's
    /// resolved dipole pose.
    pub fn world_moment(&self, dipole_pose: &Pose) -> Vec3 {
        dipole_pose.rot.rotate(&self.moment)
    }
}

impl Default for Magnet {
    fn default() -> Self {
        Self {
            moment: Vec3::zeros(),
            offset: Pose::identity(),
        }
    }
}

/// Two magnets attached to two distinct host bodies.
///
/// Structurally immutable after construction; only the host body poses vary
/// between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetPair {
    /// Magnet attached to the parent body.
    pub parent: Magnet,
    /// Magnet attached to the child body.
    pub child: Magnet,
}

impl MagnetPair {
    /// Create a pair from its two magnets.
    pub fn new(parent: Magnet, child: Magnet) -> Self {
        Self { parent, child }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magsim_math::Quat;

    #[test]
    fn world_moment_follows_pose() {
        let magnet = Magnet::new(Vec3::new(1.0, 0.0, 0.0), Pose::identity());
        let pose = Pose::new(
            Vec3::zeros(),
            Quat::from_axis_angle(&Vec3::new(0.0, 0.0, 1.0), std::f64::consts::FRAC_PI_2),
        );
        let m = magnet.world_moment(&pose);
        assert!((m - Vec3::new(0.0, 1.0, 0.0)).norm() < 1e-10);
    }

    #[test]
    fn default_is_inert() {
        let magnet = Magnet::default();
        assert_eq!(magnet.moment, Vec3::zeros());
        assert_eq!(magnet.offset, Pose::identity());
    }
}
