//! # Remote actuator seam.
//!
//! Everything the sequencer knows about the control network lives behind the
//! [`Actuate`] trait: a batched "press these buttons" call plus an optional
//! readiness probe. The transport itself (protocol, addressing, its own
//! timeouts) is the implementor's concern.

mod actuator;
mod actuator_fn;

pub use actuator::{button_ids, Action, Actuate, ActuatorRef};
pub use actuator_fn::ActuatorFn;
