//! Per-tick orchestration of a magnet pair.

use magsim_dipole::{dipole_world_pose, force_torque, sensor_field, MagnetPair};
use magsim_math::Vec3;
use magsim_sdf::PairConfig;

use crate::engine::{BodyId, HostEngine};
use crate::error::{Error, Result};
use crate::publish::{MagneticFieldStamped, MagnetPublisher, WrenchStamped, WORLD_FRAME};

/// Interaction results of one tick, recomputed from scratch every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutput {
    /// Force applied to the parent body, world frame (N).
    pub force: Vec3,
    /// Torque applied to the parent body, world frame (N·m).
    pub torque: Vec3,
    /// Flux density at the parent dipole, parent body frame (T).
    pub field: Vec3,
}

/// A configured magnet pair attached to two host bodies.
///
/// Built once from a [`PairConfig`]; the magnets are immutable afterwards.
/// The host engine drives [`MagnetPairModel::step`] once per simulation
/// tick while the model is active.
#[derive(Debug)]
pub struct MagnetPairModel {
    pair: MagnetPair,
    parent_body: BodyId,
    child_body: BodyId,
    parent_frame: String,
    publisher: Option<MagnetPublisher>,
    active: bool,
}

impl MagnetPairModel {
    /// Resolve the configured bodies and build the model.
    ///
    /// # Errors
    /// [`Error::BodyNotFound`] when either configured body name does not
    /// exist in the host engine; nothing is activated in that case.
    pub fn load<E: HostEngine>(engine: &E, config: &PairConfig) -> Result<Self> {
        let parent_body = engine
            .find_body(&config.parent_body)
            .ok_or_else(|| Error::BodyNotFound(config.parent_body.clone()))?;
        let child_body = engine
            .find_body(&config.child_body)
            .ok_or_else(|| Error::BodyNotFound(config.child_body.clone()))?;

        let publisher = if config.should_publish {
            Some(MagnetPublisher::new(&config.topic_ns, config.update_rate))
        } else {
            None
        };

        log::info!(
            "loaded magnet pair on bodies {} and {}",
            config.parent_body,
            config.child_body
        );

        Ok(Self {
            pair: MagnetPair::new(config.parent_magnet(), config.child_magnet()),
            parent_body,
            child_body,
            parent_frame: config.parent_body.clone(),
            publisher,
            active: true,
        })
    }

    /// The configured pair of magnets.
    pub fn pair(&self) -> &MagnetPair {
        &self.pair
    }

    /// The publisher, when publishing was configured.
    pub fn publisher(&self) -> Option<&MagnetPublisher> {
        self.publisher.as_ref()
    }

    /// Whether `step` currently computes and applies forces.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Resume per-tick computation.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Suspend per-tick computation; `step` becomes a no-op.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Run one simulation tick.
    ///
    /// Resolves both dipole world poses, evaluates the interaction once,
    /// applies `+force/+torque` to the parent body and `-force/-torque` to
    /// the child body, and offers the results to the publisher. The torque
    /// reaction is the mirrored parent torque, not a separate evaluation of
    /// the parent's field at the child's location.
    ///
    /// Returns `Ok(None)` while deactivated.
    ///
    /// # Errors
    /// [`Error::Dipole`] when the two dipole locations coincide. The
    /// caller must handle this; no force is applied on such a tick.
    pub fn step<E: HostEngine>(&mut self, engine: &mut E) -> Result<Option<StepOutput>> {
        if !self.active {
            return Ok(None);
        }

        let p_parent = dipole_world_pose(
            &engine.body_pose(self.parent_body),
            &self.pair.parent.offset,
        );
        let p_child =
            dipole_world_pose(&engine.body_pose(self.child_body), &self.pair.child.offset);

        let m_parent = self.pair.parent.world_moment(&p_parent);
        let m_child = self.pair.child.world_moment(&p_child);

        let (force, torque) = force_torque(&p_parent, &m_parent, &p_child, &m_child)?;
        let field = sensor_field(&p_parent, &p_child, &m_child)?;

        engine.apply_force(self.parent_body, force);
        engine.apply_torque(self.parent_body, torque);
        engine.apply_force(self.child_body, -force);
        engine.apply_torque(self.child_body, -torque);

        if let Some(publisher) = &mut self.publisher {
            let stamp = engine.sim_time();
            publisher.publish(
                WrenchStamped {
                    frame_id: WORLD_FRAME.to_string(),
                    stamp,
                    force,
                    torque,
                },
                MagneticFieldStamped {
                    frame_id: self.parent_frame.clone(),
                    stamp,
                    field,
                },
                stamp,
            );
        }

        Ok(Some(StepOutput {
            force,
            torque,
            field,
        }))
    }
}
