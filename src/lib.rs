//! # procvisor
//!
//! **Procvisor** sequences the startup, shutdown, and restart of a small,
//! statically known fleet of cooperating processes that are controlled
//! remotely through named boolean "buttons".
//!
//! The fleet has three tiers: numbered **data processes**, one of which is
//! designated the front-end **server**, and a dependent control-system
//! process (the **ioc**) started last. Starting the fleet is ordered and
//! delayed — downstream tiers must not start before their data sources are
//! live — while stopping is a single batch. The remote transport is an
//! external collaborator behind the [`Actuate`] trait; procvisor's job is
//! deciding *which* buttons to press, *in what order*, and *with what
//! pauses*.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   trigger(cmd, value)                       on_start / on_stop / on_restart
//! ┌─────────────────┐    ┌──────────────┐        (direct, embedders)
//! │ SequencerHandle │───►│ intake queue │───► ┌───────────────────────────┐
//! └─────────────────┘    └──────────────┘     │  Sequencer                │
//!      (admission: Reject | Queue)            │  - CommandInputs (edge)   │
//!                                             │  - Topology (bijection)   │
//!                                             │  - exclusive op lock      │
//!                                             └──────┬──────────────┬─────┘
//!                                                    │              │
//!                                    batched press / │              │ publishes
//!                                    readiness probe ▼              ▼ Events
//!                                             ┌────────────┐   ┌─────────────┐
//!                                             │ ActuatorRef│   │     Bus     │
//!                                             │ (Actuate)  │   │ (broadcast) │
//!                                             └────────────┘   └──────┬──────┘
//!                                                                     ▼
//!                                                        forwarding listener
//!                                                                     │
//!                                                              SubscriberSet
//!                                                            ┌─────┼─────┐
//!                                                            ▼     ▼     ▼
//!                                                          sub1  sub2  subN
//! ```
//!
//! ### Startup order
//! ```text
//! press START on data tier ──► settle(server_delay) ──► press START on server
//!        ──► settle(ioc_delay) ──► press START on ioc ──► press TOGGLE on all
//! ```
//! Each press is one awaited batched remote call; `settle` is either an
//! open-loop sleep or a readiness poll bounded by the same budget (see
//! [`DelayPolicy`]). The final TOGGLE re-arms the auto-restart supervision
//! that a prior stop disabled.
//!
//! ## Features
//! | Area            | Description                                                  | Key types / traits                       |
//! |-----------------|--------------------------------------------------------------|------------------------------------------|
//! | **Sequencing**  | Ordered, delayed lifecycle operations over the fleet.        | [`Sequencer`], [`SequencerConfig`]       |
//! | **Actuation**   | The remote button seam; batched press + readiness probe.     | [`Actuate`], [`ActuatorFn`], [`Action`]  |
//! | **Intake**      | Edge-triggered commands with admission control.              | [`SequencerHandle`], [`AdmissionPolicy`] |
//! | **Policies**    | Fixed sleeps vs. poll-for-ready tier delays.                 | [`DelayPolicy`]                          |
//! | **Events**      | Structured narration of every operation.                     | [`Event`], [`EventKind`], [`Bus`]        |
//! | **Subscribers** | Hook into runtime events (logging, metrics, custom).         | [`Subscribe`], [`SubscriberSet`]         |
//! | **Errors**      | Typed errors for construction, actuation and intake.         | [`ConfigError`], [`ActuatorError`]       |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use procvisor::{
//!     Action, ActuatorError, ActuatorFn, ActuatorRef, Command, Sequencer, SequencerConfig,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Wire the remote transport in here; this one just prints.
//!     let actuator: ActuatorRef = ActuatorFn::arc(|names: Vec<String>, action: Action| async move {
//!         println!("press {names:?} -> {action}");
//!         Ok::<_, ActuatorError>(())
//!     });
//!
//!     let cfg = SequencerConfig::new("DAQ-EA-PROC", 4, "DAQ-EA-PROC-01", "DAQ-EA-IOC-01")
//!         .with_server_delay(Duration::from_millis(50))
//!         .with_ioc_delay(Duration::from_millis(50));
//!
//!     let seq = Sequencer::new(cfg, actuator)?;
//!
//!     // Edge-triggered: a nonzero write runs the full startup sequence and
//!     // releases the input; a zero write does nothing.
//!     seq.on_start(1).await?;
//!     assert_eq!(seq.command_value(Command::Start), 0);
//!     Ok(())
//! }
//! ```
mod actuators;
mod core;
mod error;
mod events;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use actuators::{button_ids, Action, Actuate, ActuatorFn, ActuatorRef};
pub use core::{
    Command, CommandInput, Sequencer, SequencerBuilder, SequencerConfig, SequencerHandle,
    Topology, RESTART_DELAY,
};
pub use error::{ActuatorError, ConfigError, RuntimeError, SubmitError};
pub use events::{Bus, Event, EventKind};
pub use policies::{AdmissionPolicy, DelayPolicy};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
