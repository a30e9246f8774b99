//! Runtime core: fleet topology and lifecycle sequencing.
//!
//! Internal modules:
//! - [`config`]: construction-time options for a sequencer;
//! - [`topology`]: index→name bijection and fleet membership, validated once;
//! - [`command`]: edge-triggered command inputs;
//! - [`sequencer`]: the ordered start/stop/restart state machine and intake;
//! - [`builder`]: wires bus and subscribers around a sequencer;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod builder;
mod command;
mod config;
mod sequencer;
mod shutdown;
mod topology;

pub use builder::SequencerBuilder;
pub use command::{Command, CommandInput};
pub use config::SequencerConfig;
pub use sequencer::{Sequencer, SequencerHandle, RESTART_DELAY};
pub use topology::Topology;

pub(crate) use command::CommandInputs;
pub(crate) use shutdown::wait_for_shutdown_signal;
