//! # Event subscribers for the procvisor runtime.
//!
//! Provides the [`Subscribe`] trait and the fan-out machinery that delivers
//! [`Event`](crate::Event)s to user code without blocking the sequencer.
//!
//! ## Architecture
//! ```text
//! Sequencer ── publish(Event) ──► Bus ──► forwarding listener
//!                                              │
//!                                              ▼
//!                                        SubscriberSet
//!                                   ┌─────────┼─────────┐
//!                                   ▼         ▼         ▼
//!                               [queue 1] [queue 2] [queue N]
//!                                   ▼         ▼         ▼
//!                               worker 1  worker 2  worker N
//!                                   ▼         ▼         ▼
//!                              sub1.on_event()  ...  subN.on_event()
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use async_trait::async_trait;
//! use procvisor::{Event, EventKind, Subscribe};
//!
//! struct FailureCounter;
//!
//! #[async_trait]
//! impl Subscribe for FailureCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if matches!(event.kind, EventKind::SequenceFailed) {
//!             // bump a counter, raise an alarm, ...
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "failure-counter"
//!     }
//! }
//! ```

mod subscribe;
mod subscriber_set;

#[cfg(feature = "logging")]
mod log;

pub use subscribe::Subscribe;
pub use subscriber_set::SubscriberSet;

#[cfg(feature = "logging")]
pub use log::LogWriter;
