//! # Tunable sequencing policies.
//!
//! - [`AdmissionPolicy`] — what happens when a trigger arrives while a
//!   lifecycle operation is already in flight.
//! - [`DelayPolicy`] — how a tier delay is spent: open-loop sleep, or a
//!   readiness poll bounded by the same budget.

mod admission;
mod delay;

pub use admission::AdmissionPolicy;
pub use delay::DelayPolicy;
