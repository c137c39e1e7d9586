//! Magnetostatic point-dipole interaction between two rigid bodies.
//!
//! Given two rigid bodies each carrying a fixed magnetic dipole, this crate
//! computes the force and torque one dipole exerts on the other and the
//! magnetic flux density at a dipole's location, once per simulation tick.
//!
//! The model is strictly pairwise and uses the point-dipole approximation,
//! which is only valid when the separation between the bodies is large
//! compared to the physical magnet size. Moments are constant for the
//! lifetime of a pair; there is no demagnetization, hysteresis, or
//! saturation.
//!
//! All computations are pure functions of their inputs: no state is kept
//! between ticks and no locks are held, so the engine is safe to call from
//! the simulation thread's critical path.

pub mod field;
pub mod interaction;
pub mod magnet;
pub mod pose;

pub use field::{flux_density, sensor_field};
pub use interaction::force_torque;
pub use magnet::{Magnet, MagnetPair};
pub use pose::dipole_world_pose;

use thiserror::Error;

/// Vacuum permeability over 4 pi (T·m/A).
pub const MU0_OVER_FOUR_PI: f64 = 1e-7;

/// Errors raised by the dipole computations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DipoleError {
    /// The two dipole locations coincide, so the separation direction is
    /// undefined and the field diverges.
    #[error("dipole locations coincide: separation direction is undefined")]
    CoincidentDipoles,
}

/// Result type for dipole computations.
pub type Result<T> = std::result::Result<T, DipoleError>;
