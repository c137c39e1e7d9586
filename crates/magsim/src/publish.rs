//! Interaction-result publishing with rate limiting and subscriber gating.
//!
//! The publisher is an external collaborator of the physics core: the
//! simulation thread stages fully-built messages into an unbounded channel,
//! and a background worker thread fans them out to in-process subscribers.
//! Messages are only staged while at least one subscriber is connected, and
//! no more often than the configured rate.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use magsim_math::Vec3;

/// Frame identifier used for wrench messages.
pub const WORLD_FRAME: &str = "world";

/// Force/torque sample, world frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WrenchStamped {
    /// Frame the vectors are expressed in.
    pub frame_id: String,
    /// Simulation time of the sample (s).
    pub stamp: f64,
    /// Force on the parent body (N).
    pub force: Vec3,
    /// Torque on the parent body (N·m).
    pub torque: Vec3,
}

/// Magnetic flux density sample, sensor body frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MagneticFieldStamped {
    /// Frame the field is expressed in (the parent body's frame).
    pub frame_id: String,
    /// Simulation time of the sample (s).
    pub stamp: f64,
    /// Flux density at the parent dipole location (T).
    pub field: Vec3,
}

/// A published message.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// Force/torque on the parent body.
    Wrench(WrenchStamped),
    /// Field at the parent dipole.
    MagneticField(MagneticFieldStamped),
}

#[derive(Debug, Default)]
struct Shared {
    subscribers: Mutex<Vec<(u64, Sender<Sample>)>>,
    next_id: AtomicU64,
}

/// Handle to a subscription; dropping it disconnects.
pub struct Subscription {
    id: u64,
    rx: Receiver<Sample>,
    shared: Arc<Shared>,
}

impl Subscription {
    /// Take the next delivered message, if any.
    pub fn try_recv(&self) -> Option<Sample> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next delivered message.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Sample> {
        self.rx.recv_timeout(timeout).ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Ok(mut subs) = self.shared.subscribers.lock() {
            subs.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Rate-limited, subscriber-gated publisher for interaction results.
#[derive(Debug)]
pub struct MagnetPublisher {
    topic_ns: String,
    update_rate: f64,
    last_publish: Option<f64>,
    outbox: Option<Sender<Sample>>,
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl MagnetPublisher {
    /// Create a publisher and start its queue-servicing thread.
    ///
    /// `update_rate` is in Hz; 0 disables rate limiting.
    pub fn new(topic_ns: &str, update_rate: f64) -> Self {
        let (tx, rx) = unbounded();
        let shared = Arc::new(Shared::default());
        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || queue_thread(rx, worker_shared));

        Self {
            topic_ns: topic_ns.to_string(),
            update_rate,
            last_publish: None,
            outbox: Some(tx),
            shared,
            worker: Some(worker),
        }
    }

    /// Topic namespace the publisher was configured with.
    pub fn topic_ns(&self) -> &str {
        &self.topic_ns
    }

    /// Number of currently connected subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.shared
            .subscribers
            .lock()
            .map(|subs| subs.len())
            .unwrap_or(0)
    }

    /// Connect a subscriber.
    pub fn subscribe(&self) -> Subscription {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = unbounded();
        if let Ok(mut subs) = self.shared.subscribers.lock() {
            subs.push((id, tx));
        }
        Subscription {
            id,
            rx,
            shared: Arc::clone(&self.shared),
        }
    }

    /// Offer one tick's results for publishing.
    ///
    /// Skipped entirely when no subscriber is connected, or when less than
    /// `1/update_rate` seconds of simulation time have elapsed since the
    /// last emission (for a positive rate). `stamp` is simulation time, the
    /// same clock the rate limit is keyed off.
    pub fn publish(&mut self, wrench: WrenchStamped, field: MagneticFieldStamped, stamp: f64) {
        if self.subscriber_count() == 0 {
            return;
        }
        if self.update_rate > 0.0 {
            if let Some(last) = self.last_publish {
                if stamp - last < 1.0 / self.update_rate {
                    return;
                }
            }
        }
        self.last_publish = Some(stamp);

        if let Some(tx) = &self.outbox {
            let _ = tx.send(Sample::Wrench(wrench));
            let _ = tx.send(Sample::MagneticField(field));
        }
    }
}

impl Drop for MagnetPublisher {
    fn drop(&mut self) {
        // Closing the outbox disconnects the worker's receive loop.
        self.outbox.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn queue_thread(rx: Receiver<Sample>, shared: Arc<Shared>) {
    loop {
        // Short blocking wait keeps the thread cheap during idle gaps
        // while staying responsive to shutdown.
        match rx.recv_timeout(Duration::from_millis(10)) {
            Ok(sample) => {
                if let Ok(subs) = shared.subscribers.lock() {
                    for (_, tx) in subs.iter() {
                        let _ = tx.send(sample.clone());
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrench(stamp: f64) -> WrenchStamped {
        WrenchStamped {
            frame_id: WORLD_FRAME.to_string(),
            stamp,
            force: Vec3::new(1.0, 0.0, 0.0),
            torque: Vec3::zeros(),
        }
    }

    fn mfs(stamp: f64) -> MagneticFieldStamped {
        MagneticFieldStamped {
            frame_id: "base_link".to_string(),
            stamp,
            field: Vec3::new(0.0, 0.0, 1e-7),
        }
    }

    #[test]
    fn no_subscribers_no_emission() {
        let mut publisher = MagnetPublisher::new("magnet", 0.0);
        publisher.publish(wrench(0.0), mfs(0.0), 0.0);
        assert!(publisher.last_publish.is_none());
    }

    #[test]
    fn subscriber_receives_both_samples() {
        let mut publisher = MagnetPublisher::new("magnet", 0.0);
        let sub = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 1);

        publisher.publish(wrench(0.1), mfs(0.1), 0.1);

        let first = sub.recv_timeout(Duration::from_secs(1)).expect("wrench");
        let second = sub.recv_timeout(Duration::from_secs(1)).expect("field");
        assert_eq!(first, Sample::Wrench(wrench(0.1)));
        assert_eq!(second, Sample::MagneticField(mfs(0.1)));
    }

    #[test]
    fn rate_limit_skips_fast_ticks() {
        let mut publisher = MagnetPublisher::new("magnet", 10.0); // 0.1 s period
        let sub = publisher.subscribe();

        publisher.publish(wrench(0.00), mfs(0.00), 0.00);
        publisher.publish(wrench(0.05), mfs(0.05), 0.05); // too soon, dropped
        publisher.publish(wrench(0.12), mfs(0.12), 0.12);

        let mut stamps = Vec::new();
        while let Some(sample) = sub.recv_timeout(Duration::from_millis(200)) {
            if let Sample::Wrench(w) = sample {
                stamps.push(w.stamp);
            }
        }
        assert_eq!(stamps, vec![0.00, 0.12]);
    }

    #[test]
    fn unconstrained_rate_publishes_every_tick() {
        let mut publisher = MagnetPublisher::new("magnet", 0.0);
        let sub = publisher.subscribe();

        for i in 0..5 {
            let t = i as f64 * 1e-3;
            publisher.publish(wrench(t), mfs(t), t);
        }

        let mut wrenches = 0;
        while let Some(sample) = sub.recv_timeout(Duration::from_millis(200)) {
            if matches!(sample, Sample::Wrench(_)) {
                wrenches += 1;
            }
        }
        assert_eq!(wrenches, 5);
    }

    #[test]
    fn dropping_subscription_disconnects() {
        let publisher = MagnetPublisher::new("magnet", 0.0);
        let sub = publisher.subscribe();
        let sub2 = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 2);
        drop(sub);
        assert_eq!(publisher.subscriber_count(), 1);
        drop(sub2);
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[test]
    fn drop_joins_worker() {
        let publisher = MagnetPublisher::new("magnet", 0.0);
        drop(publisher); // must not hang
    }
}
