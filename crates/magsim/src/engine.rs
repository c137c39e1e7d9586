//! Seam to the host simulation engine.
//!
//! The host engine owns the rigid bodies and the simulation clock; the
//! magnet pair model only reads poses and contributes forces through this
//! trait.

use magsim_math::{Pose, Vec3};

/// Opaque handle to a rigid body inside the host engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u64);

/// Interface a host simulation engine must provide.
///
/// `body_pose` and the force/torque sinks are called once per body per
/// tick from the simulation thread; implementations should be cheap and
/// non-blocking.
pub trait HostEngine {
    /// Resolve a configured body name to a handle, if the body exists.
    fn find_body(&self, name: &str) -> Option<BodyId>;

    /// Current world pose of a body.
    ///
    /// Only called with handles previously returned by `find_body`.
    fn body_pose(&self, body: BodyId) -> Pose;

    /// Accumulate a world-frame force on a body for this tick.
    fn apply_force(&mut self, body: BodyId, force: Vec3);

    /// Accumulate a world-frame torque on a body for this tick.
    fn apply_torque(&mut self, body: BodyId, torque: Vec3);

    /// Current simulation time in seconds.
    fn sim_time(&self) -> f64;
}
