//! magsim — magnetic dipole pair interaction for rigid-body simulators.
//!
//! This is the umbrella crate. It wires the pure physics core
//! ([`magsim_dipole`]) to a host simulation engine through the
//! [`HostEngine`] seam: once per tick, [`MagnetPairModel::step`] resolves
//! both dipole poses, evaluates the dipole-dipole interaction once, applies
//! the force/torque pair to the two host bodies, and offers the results to
//! an optional rate-limited publisher.
//!
//! The host engine owns the bodies and the simulation clock; this crate
//! holds no global state and a model can be instantiated once per
//! configured pair without interference.

pub mod engine;
pub mod error;
pub mod model;
pub mod publish;

pub use engine::{BodyId, HostEngine};
pub use error::{Error, Result};
pub use model::{MagnetPairModel, StepOutput};
pub use publish::{MagneticFieldStamped, MagnetPublisher, Sample, Subscription, WrenchStamped};

pub use magsim_dipole::{self, DipoleError, Magnet, MagnetPair};
pub use magsim_math::{self, Pose, Quat, Vec3};
pub use magsim_sdf::{self, PairConfig, SdfError};
