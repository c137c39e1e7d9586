//! Magnetic flux density of a point dipole.

use magsim_math::{Pose, Vec3};

use crate::{DipoleError, Result, MU0_OVER_FOUR_PI};

/// World-frame flux density of a point dipole at a given location.
///
/// B = (μ0/4π) / d³ · (3 (m·r̂) r̂ − m), with r the vector from the source
/// dipole to the evaluation point.
///
/// # Errors
/// [`DipoleError::CoincidentDipoles`] when the evaluation point coincides
/// with the source location.
pub fn flux_density(at: &Vec3, source_pos: &Vec3, m_source: &Vec3) -> Result<Vec3> {
    let r = at - source_pos;
    let d = r.norm();
    if d == 0.0 {
        return Err(DipoleError::CoincidentDipoles);
    }
    let r_unit = r / d;

    let k = MU0_OVER_FOUR_PI / d.powi(3);
    Ok(k * (3.0 * m_source.dot(&r_unit) * r_unit - m_source))
}

/// Flux density of the other dipole at the self dipole's location,
/// expressed in the self dipole's body frame.
///
/// This is the reading a magnetometer rigidly mounted at the self dipole
/// would report. With an identity self orientation the result equals the
/// world-frame field.
///
/// # Errors
/// [`DipoleError::CoincidentDipoles`] when the two dipole locations
/// coincide.
pub fn sensor_field(p_self: &Pose, p_other: &Pose, m_other: &Vec3) -> Result<Vec3> {
    let b_world = flux_density(&p_self.pos, &p_other.pos, m_other)?;
    Ok(p_self.rot.rotate_inverse(&b_world))
}
