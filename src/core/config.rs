//! # Construction-time options for a sequencer.
//!
//! [`SequencerConfig`] is immutable once the sequencer is built: the fleet it
//! describes is statically known for one installation, and every change means
//! constructing a new sequencer.
//!
//! ## Field semantics
//! - `prefix`: base name stem of the numbered data processes.
//! - `process_count`: total number of numbered processes. The server is one
//!   of these numbered names and is sequenced separately.
//! - `server_process_name`: the numbered name acting as the front-end server.
//! - `server_delay`: budget between the data tier and the server (default 3 s).
//! - `ioc_name`: the dependent control-system process, started last.
//! - `ioc_delay`: budget between the server and the ioc (default 3 s).
//!
//! The remaining fields tune the ambient runtime (bus capacity, intake queue,
//! admission and delay policies) and have serviceable defaults.

use std::time::Duration;

use crate::policies::{AdmissionPolicy, DelayPolicy};

/// Default budget for both tier delays.
pub(crate) const DEFAULT_TIER_DELAY: Duration = Duration::from_secs(3);

/// Options for constructing a [`Sequencer`](crate::Sequencer).
///
/// Required fields go through [`SequencerConfig::new`]; everything else has a
/// default and a `with_*` override.
///
/// ## Example
/// ```
/// use std::time::Duration;
/// use procvisor::{AdmissionPolicy, SequencerConfig};
///
/// let cfg = SequencerConfig::new("DAQ-EA-PROC", 11, "DAQ-EA-PROC-01", "DAQ-EA-IOC-01")
///     .with_server_delay(Duration::from_secs(3))
///     .with_ioc_delay(Duration::from_secs(5))
///     .with_admission(AdmissionPolicy::Queue);
///
/// assert_eq!(cfg.process_count, 11);
/// ```
#[derive(Clone, Debug)]
pub struct SequencerConfig {
    /// Base name stem for the numbered data processes.
    pub prefix: String,

    /// Total number of numbered processes (including the server).
    pub process_count: usize,

    /// Numbered name of the front-end server process.
    pub server_process_name: String,

    /// Delay budget after starting the data tier, before the server.
    pub server_delay: Duration,

    /// Name of the dependent control-system process, started last.
    pub ioc_name: String,

    /// Delay budget after starting the server, before the ioc.
    pub ioc_delay: Duration,

    /// Capacity of the event bus ring buffer (clamped to ≥ 1).
    pub bus_capacity: usize,

    /// Capacity of the trigger intake queue (clamped to ≥ 1).
    pub queue_capacity: usize,

    /// What to do with triggers that arrive while an operation is in flight.
    pub admission: AdmissionPolicy,

    /// How tier delay budgets are spent.
    pub delay: DelayPolicy,
}

impl SequencerConfig {
    /// Creates a configuration with the required fleet identity and default
    /// tunables (3 s tier delays, `Reject` admission, fixed delays).
    pub fn new(
        prefix: impl Into<String>,
        process_count: usize,
        server_process_name: impl Into<String>,
        ioc_name: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            process_count,
            server_process_name: server_process_name.into(),
            server_delay: DEFAULT_TIER_DELAY,
            ioc_name: ioc_name.into(),
            ioc_delay: DEFAULT_TIER_DELAY,
            bus_capacity: 1024,
            queue_capacity: 8,
            admission: AdmissionPolicy::default(),
            delay: DelayPolicy::default(),
        }
    }

    /// Overrides the data-tier → server delay budget.
    pub fn with_server_delay(mut self, delay: Duration) -> Self {
        self.server_delay = delay;
        self
    }

    /// Overrides the server → ioc delay budget.
    pub fn with_ioc_delay(mut self, delay: Duration) -> Self {
        self.ioc_delay = delay;
        self
    }

    /// Overrides the admission policy for overlapping triggers.
    pub fn with_admission(mut self, admission: AdmissionPolicy) -> Self {
        self.admission = admission;
        self
    }

    /// Overrides the tier delay strategy.
    pub fn with_delay_policy(mut self, delay: DelayPolicy) -> Self {
        self.delay = delay;
        self
    }

    /// Overrides the event bus capacity.
    pub fn with_bus_capacity(mut self, capacity: usize) -> Self {
        self.bus_capacity = capacity;
        self
    }

    /// Overrides the trigger intake queue capacity.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Intake queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}
