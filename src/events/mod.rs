//! # Runtime events published by the sequencer.
//!
//! The sequencer narrates every lifecycle operation on a broadcast [`Bus`]:
//! which command fired, which batch was pressed, where the tier delays sit,
//! and how the operation ended. Subscribers (logging, metrics, custom) attach
//! through the subscriber layer.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
