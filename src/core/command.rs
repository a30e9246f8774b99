//! # Edge-triggered command inputs.
//!
//! Each lifecycle operation is exposed as an integer input that behaves like
//! a momentary button: idle at 0, armed by a nonzero write, and released back
//! to 0 by the sequencer only after the operation completed. A failed
//! operation leaves the input armed, so an operator can see which command is
//! stuck mid-cycle.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Lifecycle command selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the fleet tier by tier.
    Start,
    /// Stop the whole fleet in one batch.
    Stop,
    /// Stop, pause, then start.
    Restart,
}

impl Command {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Restart => "restart",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// One edge-triggered integer input.
///
/// The stored value is the raw integer last written by a trigger; 0 means
/// idle. Only the sequencer writes it back to 0.
#[derive(Debug, Default)]
pub struct CommandInput {
    value: AtomicI64,
}

impl CommandInput {
    pub(crate) fn new() -> Self {
        Self {
            value: AtomicI64::new(0),
        }
    }

    /// Current raw value (0 = idle).
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::Acquire)
    }

    /// True while a triggered operation has not completed.
    pub fn is_armed(&self) -> bool {
        self.value() != 0
    }

    pub(crate) fn arm(&self, value: i64) {
        self.value.store(value, Ordering::Release);
    }

    pub(crate) fn release(&self) {
        self.value.store(0, Ordering::Release);
    }
}

/// The three command inputs of one sequencer.
#[derive(Debug, Default)]
pub(crate) struct CommandInputs {
    start: CommandInput,
    stop: CommandInput,
    restart: CommandInput,
}

impl CommandInputs {
    pub(crate) fn new() -> Self {
        Self {
            start: CommandInput::new(),
            stop: CommandInput::new(),
            restart: CommandInput::new(),
        }
    }

    pub(crate) fn get(&self, command: Command) -> &CommandInput {
        match command {
            Command::Start => &self.start,
            Command::Stop => &self.stop,
            Command::Restart => &self.restart,
        }
    }
}
