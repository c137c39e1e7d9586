//! Math primitives for the magsim dipole interaction engine.
//!
//! Provides 3D vector aliases over nalgebra, a unit quaternion type, and a
//! rigid-body pose (position + orientation).

pub mod pose;
pub mod quaternion;

pub use pose::Pose;
pub use quaternion::Quat;

use nalgebra as na;

/// 3D vector alias.
pub type Vec3 = na::Vector3<f64>;
/// 3x3 matrix alias.
pub type Mat3 = na::Matrix3<f64>;
