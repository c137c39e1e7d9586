//! Dipole-dipole force and torque.

use magsim_math::{Pose, Vec3};

use crate::{field, DipoleError, Result, MU0_OVER_FOUR_PI};

/// Force and torque exerted on the self dipole by the other dipole's field,
/// both in the world frame.
///
/// Moments must already be rotated into the world frame (see
/// [`crate::Magnet::world_moment`]). The force expression is symmetric
/// under simultaneous exchange of the moments and negation of the
/// separation vector, so the reaction on the other body is exactly the
/// negated result: callers apply `(force, torque)` to the self body and
/// `(-force, -torque)` to the other body from this single evaluation.
///
/// # Errors
/// [`DipoleError::CoincidentDipoles`] when the two dipole locations
/// coincide.
pub fn force_torque(
    p_self: &Pose,
    m_self: &Vec3,
    p_other: &Pose,
    m_other: &Vec3,
) -> Result<(Vec3, Vec3)> {
    let r = p_self.pos - p_other.pos;
    let d = r.norm();
    if d == 0.0 {
        return Err(DipoleError::CoincidentDipoles);
    }
    let r_unit = r / d;

    let kf = 3.0 * MU0_OVER_FOUR_PI / d.powi(4);
    let force = kf
        * (m_self * m_other.dot(&r_unit) + m_other * m_self.dot(&r_unit)
            + r_unit * m_other.dot(m_self)
            - 5.0 * r_unit * m_other.dot(&r_unit) * m_self.dot(&r_unit));

    // Torque is the self moment reacting to the other dipole's field at the
    // self location.
    let b_other = field::flux_density(&p_self.pos, &p_other.pos, m_other)?;
    let torque = m_self.cross(&b_other);

    Ok((force, torque))
}
