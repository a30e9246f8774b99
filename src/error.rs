//! Error types used by the procvisor runtime.
//!
//! This module defines four error enums:
//!
//! - [`ConfigError`] — the fleet description is inconsistent; detected at
//!   construction, before any remote call is made.
//! - [`ActuatorError`] — a remote button press failed. Never retried: the
//!   failing press aborts the remaining steps of the current lifecycle
//!   operation and leaves the triggering command input armed.
//! - [`SubmitError`] — a trigger could not be accepted by the intake queue.
//! - [`RuntimeError`] — errors of the intake loop itself.
//!
//! All types provide `as_label` (stable snake_case identifiers for
//! logs/metrics) and `as_message` helpers.

use std::time::Duration;
use thiserror::Error;

/// # Errors detected while resolving the fleet topology.
///
/// Construction fails fast on an inconsistent configuration rather than
/// running lifecycle operations against a fleet that does not exist.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configured process count cannot describe a fleet.
    #[error("process count must be at least 1, got {count}")]
    EmptyFleet {
        /// The rejected count.
        count: usize,
    },

    /// The configured server process name is not one of the generated
    /// numbered process names.
    #[error("server process {server:?} is not among the {count} processes generated from prefix {prefix:?}")]
    ServerNotInFleet {
        /// The server name that failed to match.
        server: String,
        /// The prefix the numbered names were generated from.
        prefix: String,
        /// Number of generated names.
        count: usize,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use procvisor::ConfigError;
    ///
    /// let err = ConfigError::EmptyFleet { count: 0 };
    /// assert_eq!(err.as_label(), "config_empty_fleet");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::EmptyFleet { .. } => "config_empty_fleet",
            ConfigError::ServerNotInFleet { .. } => "config_server_not_in_fleet",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ConfigError::EmptyFleet { count } => format!("empty fleet: count={count}"),
            ConfigError::ServerNotInFleet {
                server,
                prefix,
                count,
            } => {
                format!("server {server} not generated from prefix={prefix} count={count}")
            }
        }
    }
}

/// # Errors produced by the remote actuator.
///
/// A press is a single batched round trip; any of these failures means the
/// batch cannot be assumed applied. The sequencer surfaces the error to the
/// invoking command handler without retrying, and the command input that
/// triggered the operation stays at its nonzero value as a visible marker of
/// the failed cycle.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ActuatorError {
    /// The remote end could not be reached.
    #[error("remote unreachable: {detail}")]
    Unreachable {
        /// Transport-level detail.
        detail: String,
    },

    /// The batched call did not complete within the actuator's own deadline.
    #[error("press timed out after {timeout:?}")]
    Timeout {
        /// The deadline that was exceeded.
        timeout: Duration,
    },

    /// One of the button identifiers does not exist on the remote.
    #[error("no such button: {button}")]
    UnknownButton {
        /// The offending identifier.
        button: String,
    },
}

impl ActuatorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use procvisor::ActuatorError;
    ///
    /// let err = ActuatorError::Unreachable { detail: "no route".into() };
    /// assert_eq!(err.as_label(), "actuator_unreachable");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ActuatorError::Unreachable { .. } => "actuator_unreachable",
            ActuatorError::Timeout { .. } => "actuator_timeout",
            ActuatorError::UnknownButton { .. } => "actuator_unknown_button",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ActuatorError::Unreachable { detail } => format!("unreachable: {detail}"),
            ActuatorError::Timeout { timeout } => format!("timeout: {timeout:?}"),
            ActuatorError::UnknownButton { button } => format!("unknown button: {button}"),
        }
    }
}

/// # Errors returned when submitting a trigger to the sequencer.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// A lifecycle operation is already in flight and the admission policy
    /// rejects overlapping triggers.
    #[error("sequencer busy")]
    Busy,

    /// The intake queue is full.
    #[error("intake queue full")]
    Full,

    /// The sequencer's intake loop has shut down.
    #[error("sequencer closed")]
    Closed,
}

impl SubmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SubmitError::Busy => "submit_busy",
            SubmitError::Full => "submit_full",
            SubmitError::Closed => "submit_closed",
        }
    }
}

/// # Errors produced by the intake loop itself.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// `run` was called while another intake loop already owns the receiver.
    #[error("intake loop already running")]
    AlreadyRunning,
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::AlreadyRunning => "runtime_already_running",
        }
    }
}
