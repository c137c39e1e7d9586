//! Resolution of a dipole's effective world pose from its host body.

use magsim_math::Pose;

/// Compute the world pose of a dipole rigidly offset from its host body.
///
/// `offset` is the fixed transform from the magnet's local frame to the
/// body's reference frame. The result must be recomputed every tick since
/// the body pose changes every tick.
pub fn dipole_world_pose(body: &Pose, offset: &Pose) -> Pose {
    Pose {
        pos: body.pos - body.rot.rotate(&offset.pos),
        rot: body.rot.mul(&offset.rot.conjugate()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magsim_math::{Quat, Vec3};

    const EPS: f64 = 1e-10;

    #[test]
    fn identity_offset_is_body_pose() {
        let body = Pose::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_axis_angle(&Vec3::new(0.0, 0.0, 1.0), 0.5),
        );
        let dipole = dipole_world_pose(&body, &Pose::identity());
        assert!((dipole.pos - body.pos).norm() < EPS);
        assert!((dipole.rot.w - body.rot.w).abs() < EPS);
        assert!((dipole.rot.v - body.rot.v).norm() < EPS);
    }

    #[test]
    fn translation_offset_unrotated_body() {
        let body = Pose::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let offset = Pose::from_translation(Vec3::new(0.0, 0.5, 0.0));
        let dipole = dipole_world_pose(&body, &offset);
        // With identity body orientation the offset subtracts directly.
        assert!((dipole.pos - Vec3::new(1.0, -0.5, 0.0)).norm() < EPS);
    }

    #[test]
    fn translation_offset_rotates_with_body() {
        // Body yawed 90 degrees: a local +X offset points along world +Y.
        let body = Pose::new(
            Vec3::zeros(),
            Quat::from_axis_angle(&Vec3::new(0.0, 0.0, 1.0), std::f64::consts::FRAC_PI_2),
        );
        let offset = Pose::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let dipole = dipole_world_pose(&body, &offset);
        assert!((dipole.pos - Vec3::new(0.0, -1.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn rotation_offset_composes_inverse() {
        let yaw = std::f64::consts::FRAC_PI_2;
        let body = Pose::new(
            Vec3::zeros(),
            Quat::from_axis_angle(&Vec3::new(0.0, 0.0, 1.0), yaw),
        );
        let offset = Pose::new(
            Vec3::zeros(),
            Quat::from_axis_angle(&Vec3::new(0.0, 0.0, 1.0), yaw),
        );
        // body.rot * offset.rot^-1 cancels to identity.
        let dipole = dipole_world_pose(&body, &offset);
        assert!((dipole.rot.w - 1.0).abs() < EPS);
        assert!(dipole.rot.v.norm() < EPS);
    }
}
