//! # Builder wiring subscribers around a sequencer.

use std::sync::Arc;

use crate::actuators::ActuatorRef;
use crate::core::config::SequencerConfig;
use crate::core::sequencer::Sequencer;
use crate::error::ConfigError;
use crate::events::Bus;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Builder for constructing a [`Sequencer`] with optional event subscribers.
pub struct SequencerBuilder {
    cfg: SequencerConfig,
    actuator: ActuatorRef,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SequencerBuilder {
    pub(crate) fn new(cfg: SequencerConfig, actuator: ActuatorRef) -> Self {
        Self {
            cfg,
            actuator,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events (triggers, presses, delays,
    /// outcomes) through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the sequencer, validating the fleet topology.
    ///
    /// When subscribers were attached this spawns their workers and the
    /// forwarding listener, and therefore must run inside a tokio runtime;
    /// without subscribers no task is spawned.
    pub fn build(self) -> Result<Arc<Sequencer>, ConfigError> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let seq = Sequencer::with_parts(self.cfg, self.actuator, bus.clone())?;

        if !self.subscribers.is_empty() {
            let set = SubscriberSet::new(self.subscribers, bus.clone());
            spawn_forwarding_listener(set, bus);
        }

        Ok(seq)
    }
}

/// Forwards bus events into the subscriber set until the bus closes.
///
/// The listener owns the set: when the sequencer (the last publisher) drops,
/// the channel closes, the listener exits, and the workers drain.
fn spawn_forwarding_listener(set: SubscriberSet, bus: Bus) {
    use tokio::sync::broadcast::error::RecvError;

    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => set.dispatch(&ev),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
        set.shutdown().await;
    });
}
