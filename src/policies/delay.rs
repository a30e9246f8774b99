//! # Delay strategy between startup tiers.
//!
//! `do_start` pauses twice: after the data batch (before the server) and
//! after the server (before the ioc). The configured tier delay is the
//! *budget* of that pause; [`DelayPolicy`] decides how the budget is spent.
//!
//! - [`DelayPolicy::Fixed`] sleeps for the whole budget, unconditionally.
//!   This matches remotes that expose no readiness signal.
//! - [`DelayPolicy::PollReady`] asks the actuator whether the just-started
//!   tier is ready, every `interval`, and proceeds as soon as it is — or when
//!   the budget lapses, so the configured delay stays an upper bound either
//!   way.

use std::time::Duration;

/// Policy controlling how a tier delay is spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelayPolicy {
    /// Open-loop: sleep for the full configured delay (default).
    Fixed,

    /// Closed-loop: poll [`Actuate::ready`](crate::Actuate::ready) for every
    /// process of the just-started tier until all report ready or the
    /// configured delay lapses.
    ///
    /// A lapse is not an error; the sequence proceeds and a
    /// [`ReadinessLapsed`](crate::EventKind::ReadinessLapsed) event records
    /// it. A transport failure during polling aborts the operation like any
    /// other actuator error.
    PollReady {
        /// Pause between readiness probes.
        interval: Duration,
    },
}

impl Default for DelayPolicy {
    /// Returns [`DelayPolicy::Fixed`].
    fn default() -> Self {
        DelayPolicy::Fixed
    }
}
