//! # Admission policy for overlapping triggers.
//!
//! The sequencer runs at most one lifecycle operation at a time. When a new
//! trigger arrives while one is in flight, the admission policy decides what
//! the intake does with it.
//!
//! ## Variants
//! - `Reject`: turn the trigger away with [`SubmitError::Busy`](crate::SubmitError::Busy).
//! - `Queue`: enqueue the trigger (FIFO) and run it when the current
//!   operation finishes.
//!
//! ## Invariants
//! - Lifecycle operations never interleave their batches, whichever variant
//!   is chosen.
//! - Queued triggers run strictly in submission order.

/// Policy controlling how triggers are handled while the sequencer is busy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdmissionPolicy {
    /// Turn overlapping triggers away (default).
    ///
    /// Use when:
    /// - An operator pressing a button twice should not stack two cycles
    /// - The caller can re-trigger after inspecting the outcome
    Reject,

    /// Queue overlapping triggers (FIFO order).
    ///
    /// Use when:
    /// - Every trigger must eventually execute
    /// - Callers are automated and order matters
    Queue,
}

impl Default for AdmissionPolicy {
    /// Returns [`AdmissionPolicy::Reject`].
    fn default() -> Self {
        AdmissionPolicy::Reject
    }
}
