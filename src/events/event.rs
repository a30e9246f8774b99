//! # Event structure and classification.
//!
//! [`EventKind`] classifies what happened; [`Event`] carries the metadata
//! (command, action, batch size, delays, reasons). Each event has a globally
//! unique sequence number (`seq`) that increases monotonically — use it to
//! restore exact order when events are observed out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use procvisor::{Action, Command, Event, EventKind};
//!
//! let ev = Event::now(EventKind::BatchPressed)
//!     .with_command(Command::Start)
//!     .with_action(Action::Start)
//!     .with_batch(10);
//!
//! assert_eq!(ev.kind, EventKind::BatchPressed);
//! assert_eq!(ev.batch, Some(10));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::actuators::Action;
use crate::core::Command;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Command intake ===
    /// A command input was written with a nonzero value and its lifecycle
    /// operation is about to run.
    ///
    /// Sets: `command`, `value`, `at`, `seq`.
    CommandTriggered,

    /// A trigger was turned away at the intake (busy sequencer or full
    /// queue).
    ///
    /// Sets: `command`, `reason`, `at`, `seq`.
    CommandRejected,

    // === Sequencing steps ===
    /// A batched press was issued to the actuator.
    ///
    /// Sets: `action`, `batch` (number of buttons), `at`, `seq`.
    BatchPressed,

    /// A tier delay begins (fixed sleep, or the budget of a readiness poll).
    ///
    /// Sets: `delay_ms`, `at`, `seq`.
    DelayScheduled,

    /// A readiness poll exhausted its budget without every process reporting
    /// ready; the sequence proceeds open-loop.
    ///
    /// Sets: `delay_ms` (the lapsed budget), `batch`, `at`, `seq`.
    ReadinessLapsed,

    // === Operation outcomes ===
    /// The lifecycle operation finished and its command input was released.
    ///
    /// Sets: `command`, `at`, `seq`.
    SequenceCompleted,

    /// The lifecycle operation aborted on an actuator error; its command
    /// input stays armed.
    ///
    /// Sets: `command`, `reason`, `at`, `seq`.
    SequenceFailed,

    // === Service ===
    /// Shutdown requested (OS signal observed).
    ///
    /// Sets: `at`, `seq`.
    ShutdownRequested,

    // === Subscriber plumbing ===
    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `reason`, `at`, `seq`.
    SubscriberOverflow,

    /// Subscriber panicked during event processing.
    ///
    /// Sets: `reason` (panic info), `at`, `seq`.
    SubscriberPanicked,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Lifecycle command, if applicable.
    pub command: Option<Command>,
    /// Button action of a pressed batch.
    pub action: Option<Action>,
    /// Number of buttons in a pressed batch.
    pub batch: Option<u32>,
    /// Raw value written to the command input.
    pub value: Option<i64>,
    /// Tier delay in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (errors, rejection details, panic info).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            command: None,
            action: None,
            batch: None,
            value: None,
            delay_ms: None,
            reason: None,
        }
    }

    /// Attaches the lifecycle command.
    #[inline]
    pub fn with_command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    /// Attaches the button action.
    #[inline]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Attaches the batch size.
    #[inline]
    pub fn with_batch(mut self, len: usize) -> Self {
        self.batch = Some(len.min(u32::MAX as usize) as u32);
        self
    }

    /// Attaches the raw trigger value.
    #[inline]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    /// Attaches a delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::now(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::now(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} panic={info}"))
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::now(EventKind::CommandTriggered);
        let b = Event::now(EventKind::SequenceCompleted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_delay_stored_as_millis() {
        let ev = Event::now(EventKind::DelayScheduled).with_delay(Duration::from_secs(3));
        assert_eq!(ev.delay_ms, Some(3_000));
    }
}
