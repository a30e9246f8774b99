//! # Function-backed actuator (`ActuatorFn`)
//!
//! [`ActuatorFn`] wraps a closure `F: Fn(Vec<String>, Action) -> Fut`,
//! producing a fresh future per press. Handy for tests, demos, and embedders
//! that already have an async "set remote value" primitive in scope.
//!
//! ## Example
//! ```rust
//! use procvisor::{Action, ActuatorError, ActuatorFn, ActuatorRef};
//!
//! let actuator: ActuatorRef = ActuatorFn::arc(|names: Vec<String>, action: Action| async move {
//!     // forward to the real transport here
//!     let _ = (names, action);
//!     Ok::<_, ActuatorError>(())
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::actuators::actuator::{Action, Actuate};
use crate::error::ActuatorError;

/// Function-backed actuator implementation.
///
/// Wraps a closure that *creates* a new future per press.
#[derive(Debug)]
pub struct ActuatorFn<F> {
    f: F,
}

impl<F> ActuatorFn<F> {
    /// Creates a new function-backed actuator.
    ///
    /// Prefer [`ActuatorFn::arc`] when you immediately need an
    /// [`ActuatorRef`](crate::ActuatorRef).
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the actuator and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Actuate for ActuatorFn<F>
where
    F: Fn(Vec<String>, Action) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ActuatorError>> + Send + 'static,
{
    async fn press(&self, names: &[String], action: Action) -> Result<(), ActuatorError> {
        (self.f)(names.to_vec(), action).await
    }
}
