//! # Actuator contract and button addressing.
//!
//! This module defines the [`Actuate`] trait (async, batched) and the button
//! naming it relies on. The common handle type is [`ActuatorRef`], an
//! `Arc<dyn Actuate>` suitable for sharing across the runtime.
//!
//! ## Buttons
//! Each controlled process exposes one remote boolean per lifecycle action,
//! addressed as `<process>:<ACTION>`:
//!
//! ```text
//! DAQ-EA-PROC-03:START
//! DAQ-EA-PROC-03:STOP
//! DAQ-EA-PROC-03:TOGGLE
//! ```
//!
//! A press sets every addressed button to its active value in **one** remote
//! round trip; within a batch the presses are logically simultaneous.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ActuatorError;

/// Lifecycle action a button press applies to a process.
///
/// The wire spelling is the uppercase suffix of the button identifier.
/// `Toggle` flips the process's auto-restart supervision, which a prior stop
/// disables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Start the process.
    Start,
    /// Stop the process (also disables its auto-restart supervision).
    Stop,
    /// Flip auto-restart supervision back on.
    Toggle,
}

impl Action {
    /// Returns the wire spelling used in button identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "START",
            Action::Stop => "STOP",
            Action::Toggle => "TOGGLE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds one button identifier per process name for the given action.
///
/// The separating `:` is added here; callers pass bare process names.
///
/// # Example
/// ```
/// use procvisor::{button_ids, Action};
///
/// let names = vec!["A".to_string(), "B".to_string()];
/// assert_eq!(button_ids(&names, Action::Start), vec!["A:START", "B:START"]);
/// ```
pub fn button_ids(names: &[String], action: Action) -> Vec<String> {
    names.iter().map(|name| format!("{name}:{action}")).collect()
}

/// # Asynchronous remote button actuator.
///
/// One `press` is a single batched round trip that sets every addressed
/// button to its active value. Implementations build the identifiers with
/// [`button_ids`] and must not return before the remote acknowledged the
/// batch; the sequencer awaits each press to completion before moving to the
/// next step.
///
/// ## Rules
/// - A failed press is reported as [`ActuatorError`]; the sequencer never
///   retries it.
/// - [`ready`](Actuate::ready) is only consulted by the poll-for-ready delay
///   strategy. The default implementation reports every process ready, so
///   remotes without a readiness signal degrade to pure fixed delays.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use procvisor::{button_ids, Action, Actuate, ActuatorError};
///
/// struct Printer;
///
/// #[async_trait]
/// impl Actuate for Printer {
///     async fn press(&self, names: &[String], action: Action) -> Result<(), ActuatorError> {
///         println!("set {:?} = 1", button_ids(names, action));
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Actuate: Send + Sync + 'static {
    /// Sets the `<name>:<action>` button of every given process to its
    /// active value, as one batched remote call.
    async fn press(&self, names: &[String], action: Action) -> Result<(), ActuatorError>;

    /// Reports whether the named process has reached a ready state.
    ///
    /// Transport failures propagate; they abort the operation that was
    /// polling.
    async fn ready(&self, name: &str) -> Result<bool, ActuatorError> {
        let _ = name;
        Ok(true)
    }
}

/// Shared handle to an actuator implementation.
pub type ActuatorRef = Arc<dyn Actuate>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_spelling() {
        assert_eq!(Action::Start.as_str(), "START");
        assert_eq!(Action::Stop.as_str(), "STOP");
        assert_eq!(Action::Toggle.as_str(), "TOGGLE");
    }

    #[test]
    fn test_button_ids_join_with_colon() {
        let names = vec!["X-01".to_string(), "X-02".to_string()];
        assert_eq!(
            button_ids(&names, Action::Toggle),
            vec!["X-01:TOGGLE", "X-02:TOGGLE"]
        );
    }

    #[test]
    fn test_button_ids_empty_batch() {
        assert!(button_ids(&[], Action::Stop).is_empty());
    }
}
