//! # Non-blocking event fan-out to multiple subscribers.
//!
//! [`SubscriberSet`] distributes events to every subscriber concurrently
//! without blocking the publisher.
//!
//! ## Rules
//! - **No cross-subscriber ordering**: subscriber A may process event N while
//!   B is still on N-5.
//! - **Per-subscriber FIFO**: each subscriber sees events in publish order.
//! - **Overflow**: the event is dropped for that subscriber only and a
//!   `SubscriberOverflow` is published (overflow events themselves are never
//!   re-reported, which would loop).
//! - **Panic isolation**: a panicking subscriber is reported via
//!   `SubscriberPanicked` and its worker keeps processing subsequent events.

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::{Bus, Event};
use crate::subscribers::Subscribe;

/// Per-subscriber delivery lane.
struct Lane {
    name: &'static str,
    tx: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for multiple event subscribers.
pub struct SubscriberSet {
    lanes: Vec<Lane>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker task per subscriber.
    ///
    /// Must be called from within a tokio runtime when `subs` is non-empty.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut lanes = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let name = sub.name();
            let (tx, rx) = mpsc::channel::<Arc<Event>>(sub.queue_capacity().max(1));
            workers.push(Self::spawn_worker(sub, rx, bus.clone()));
            lanes.push(Lane { name, tx });
        }

        Self { lanes, workers, bus }
    }

    /// Delivers an event to every subscriber's queue without blocking.
    ///
    /// On a full or closed queue the event is dropped for that subscriber and
    /// a `SubscriberOverflow` is published in its place.
    pub fn dispatch(&self, event: &Event) {
        let shared = Arc::new(event.clone());
        let is_overflow = shared.is_subscriber_overflow();

        for lane in &self.lanes {
            match lane.tx.try_send(Arc::clone(&shared)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    if !is_overflow {
                        self.bus.publish(Event::subscriber_overflow(lane.name, "full"));
                    }
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    if !is_overflow {
                        self.bus.publish(Event::subscriber_overflow(lane.name, "closed"));
                    }
                }
            }
        }
    }

    /// Gracefully shuts down all subscriber workers.
    ///
    /// Drops the delivery lanes (workers observe their queue closing) and
    /// awaits every worker.
    pub async fn shutdown(self) {
        drop(self.lanes);
        for worker in self.workers {
            let _ = worker.await;
        }
    }

    fn spawn_worker(
        sub: Arc<dyn Subscribe>,
        mut rx: mpsc::Receiver<Arc<Event>>,
        bus: Bus,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(ev) = rx.recv().await {
                let fut = sub.on_event(ev.as_ref());
                if let Err(panic) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                    bus.publish(Event::subscriber_panicked(sub.name(), panic_info(&panic)));
                }
            }
        })
    }
}

/// Best-effort extraction of a panic payload message.
fn panic_info(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
