//! # Sequencer: ordered lifecycle operations over the remote fleet.
//!
//! The [`Sequencer`] owns the validated [`Topology`], the actuator handle,
//! the event bus, and the three edge-triggered command inputs. It implements
//! the three lifecycle operations as ordered, delayed batches of actuator
//! calls:
//!
//! ```text
//! START trigger (nonzero write)
//!   │
//!   ├─► press START on the data tier     (one batch, awaited)
//!   ├─► settle(server_delay)             (fixed sleep or readiness poll)
//!   ├─► press START on the server
//!   ├─► settle(ioc_delay)
//!   ├─► press START on the ioc
//!   ├─► press TOGGLE on the full set     (re-arm auto-restart supervision)
//!   └─► release the START input to 0
//!
//! STOP trigger
//!   ├─► press STOP on the full set       (single batch, no delays)
//!   └─► release the STOP input to 0
//!
//! RESTART trigger
//!   ├─► the STOP batch
//!   ├─► sleep RESTART_DELAY              (constant, policy-independent)
//!   ├─► the full START sequence
//!   └─► release the RESTART input to 0
//! ```
//!
//! ## Rules
//! - Steps within one operation are strictly sequential; the only suspension
//!   points are the awaited presses and the tier delays.
//! - The first actuator error aborts the remaining steps and leaves the
//!   triggering input armed; nothing is retried.
//! - At most one operation is in flight per sequencer: every handler takes an
//!   exclusive operation lock, and the intake loop is a single consumer.
//! - An operation that has begun cannot be cancelled; the intake token only
//!   stops the loop between operations.
//!
//! ## Intake
//! External writers go through [`SequencerHandle`]: a zero value is an edge
//! no-op, a nonzero value is queued for the intake loop (or turned away,
//! according to [`AdmissionPolicy`]). Embedders that do their own
//! serialization can call the `on_*` handlers directly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex, RwLock};
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::actuators::{Action, ActuatorRef};
use crate::core::builder::SequencerBuilder;
use crate::core::command::{Command, CommandInput, CommandInputs};
use crate::core::config::SequencerConfig;
use crate::core::topology::Topology;
use crate::core::wait_for_shutdown_signal;
use crate::error::{ActuatorError, ConfigError, RuntimeError, SubmitError};
use crate::events::{Bus, Event, EventKind};
use crate::policies::{AdmissionPolicy, DelayPolicy};

/// Pause between the stop and start halves of a restart.
///
/// Deliberately a constant: the restart gap is about letting the remote
/// supervision settle, not about data readiness, so it does not scale with
/// the configured tier delays.
pub const RESTART_DELAY: Duration = Duration::from_secs(3);

/// A trigger accepted by the intake queue.
struct Trigger {
    command: Command,
    value: i64,
}

/// Handle for triggering lifecycle operations on a running sequencer.
///
/// Cheap to clone. A write of 0 is an edge no-op and never reaches the
/// queue.
#[derive(Clone)]
pub struct SequencerHandle {
    tx: mpsc::Sender<Trigger>,
    bus: Bus,
    busy: Arc<AtomicBool>,
    admission: AdmissionPolicy,
}

impl SequencerHandle {
    /// Submits a trigger, waiting for queue space under
    /// [`AdmissionPolicy::Queue`].
    ///
    /// Under [`AdmissionPolicy::Reject`] this never waits; it behaves like
    /// [`try_trigger`](Self::try_trigger).
    pub async fn trigger(&self, command: Command, value: i64) -> Result<(), SubmitError> {
        if value == 0 {
            return Ok(());
        }
        match self.admission {
            AdmissionPolicy::Reject => self.try_trigger(command, value),
            AdmissionPolicy::Queue => self
                .tx
                .send(Trigger { command, value })
                .await
                .map_err(|_| SubmitError::Closed),
        }
    }

    /// Submits a trigger without blocking.
    ///
    /// Fails with [`SubmitError::Busy`] when an operation is in flight and
    /// the admission policy rejects overlap, or [`SubmitError::Full`] when
    /// the queue has no space. Both rejections publish a
    /// [`CommandRejected`](EventKind::CommandRejected) event.
    pub fn try_trigger(&self, command: Command, value: i64) -> Result<(), SubmitError> {
        if value == 0 {
            return Ok(());
        }
        if self.admission == AdmissionPolicy::Reject && self.busy.load(Ordering::Acquire) {
            self.reject(command, "busy");
            return Err(SubmitError::Busy);
        }
        self.tx
            .try_send(Trigger { command, value })
            .map_err(|err| match err {
                mpsc::error::TrySendError::Full(_) => {
                    self.reject(command, "queue_full");
                    SubmitError::Full
                }
                mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
            })
    }

    fn reject(&self, command: Command, reason: &'static str) {
        self.bus.publish(
            Event::now(EventKind::CommandRejected)
                .with_command(command)
                .with_reason(reason),
        );
    }
}

/// Sequences start, stop and restart of the controlled fleet.
pub struct Sequencer {
    cfg: SequencerConfig,
    topology: Topology,
    actuator: ActuatorRef,
    bus: Bus,
    inputs: CommandInputs,

    // Exclusive operation lock: at most one lifecycle operation in flight.
    op_lock: Mutex<()>,
    busy: Arc<AtomicBool>,

    tx: mpsc::Sender<Trigger>,
    rx: RwLock<Option<mpsc::Receiver<Trigger>>>,
}

impl Sequencer {
    /// Creates a sequencer without subscribers.
    ///
    /// Fails fast if the configuration cannot describe a consistent fleet.
    pub fn new(cfg: SequencerConfig, actuator: ActuatorRef) -> Result<Arc<Self>, ConfigError> {
        Self::builder(cfg, actuator).build()
    }

    /// Starts a builder for attaching event subscribers.
    pub fn builder(cfg: SequencerConfig, actuator: ActuatorRef) -> SequencerBuilder {
        SequencerBuilder::new(cfg, actuator)
    }

    pub(crate) fn with_parts(
        cfg: SequencerConfig,
        actuator: ActuatorRef,
        bus: Bus,
    ) -> Result<Arc<Self>, ConfigError> {
        let topology = Topology::resolve(&cfg)?;
        let (tx, rx) = mpsc::channel(cfg.queue_capacity_clamped());

        Ok(Arc::new(Self {
            cfg,
            topology,
            actuator,
            bus,
            inputs: CommandInputs::new(),
            op_lock: Mutex::new(()),
            busy: Arc::new(AtomicBool::new(false)),
            tx,
            rx: RwLock::new(Some(rx)),
        }))
    }

    /// Returns a cloneable trigger handle.
    pub fn handle(&self) -> SequencerHandle {
        SequencerHandle {
            tx: self.tx.clone(),
            bus: self.bus.clone(),
            busy: Arc::clone(&self.busy),
            admission: self.cfg.admission,
        }
    }

    /// The event bus this sequencer publishes on.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// The validated fleet topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The edge-triggered input backing a command.
    pub fn input(&self, command: Command) -> &CommandInput {
        self.inputs.get(command)
    }

    /// Current raw value of a command input (0 = idle; nonzero = a cycle is
    /// running or has failed).
    pub fn command_value(&self, command: Command) -> i64 {
        self.inputs.get(command).value()
    }

    /// Consumes triggers until `token` is cancelled or every handle is gone.
    ///
    /// Operation errors are not returned here: they are published as
    /// [`SequenceFailed`](EventKind::SequenceFailed) events and leave the
    /// triggering input armed. Cancellation takes effect between operations;
    /// an in-flight operation always runs to completion or to its first
    /// actuator error.
    pub async fn run(&self, token: CancellationToken) -> Result<(), RuntimeError> {
        let mut rx = self
            .rx
            .write()
            .await
            .take()
            .ok_or(RuntimeError::AlreadyRunning)?;

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                next = rx.recv() => match next {
                    Some(trigger) => {
                        self.busy.store(true, Ordering::Release);
                        let _ = self.dispatch(trigger.command, trigger.value).await;
                        self.busy.store(false, Ordering::Release);
                    }
                    None => break,
                }
            }
        }

        Ok(())
    }

    /// Runs the intake loop until an OS termination signal arrives.
    pub async fn serve(&self) -> Result<(), RuntimeError> {
        let token = CancellationToken::new();
        let run = self.run(token.clone());
        tokio::pin!(run);

        tokio::select! {
            res = &mut run => res,
            _ = wait_for_shutdown_signal() => {
                self.bus.publish(Event::now(EventKind::ShutdownRequested));
                token.cancel();
                run.await
            }
        }
    }

    /// Edge-trigger handler for the START input.
    ///
    /// A zero `value` does nothing. A nonzero `value` arms the input, runs
    /// the full startup sequence, and releases the input back to 0 on
    /// success. On error the input stays armed and the error propagates.
    pub async fn on_start(&self, value: i64) -> Result<(), ActuatorError> {
        self.dispatch(Command::Start, value).await
    }

    /// Edge-trigger handler for the STOP input. Same contract as
    /// [`on_start`](Self::on_start).
    pub async fn on_stop(&self, value: i64) -> Result<(), ActuatorError> {
        self.dispatch(Command::Stop, value).await
    }

    /// Edge-trigger handler for the RESTART input. Same contract as
    /// [`on_start`](Self::on_start).
    pub async fn on_restart(&self, value: i64) -> Result<(), ActuatorError> {
        self.dispatch(Command::Restart, value).await
    }

    async fn dispatch(&self, command: Command, value: i64) -> Result<(), ActuatorError> {
        if value == 0 {
            return Ok(());
        }

        let input = self.inputs.get(command);
        input.arm(value);

        let _running = self.op_lock.lock().await;
        self.bus.publish(
            Event::now(EventKind::CommandTriggered)
                .with_command(command)
                .with_value(value),
        );

        let outcome = match command {
            Command::Start => self.do_start().await,
            Command::Stop => self.do_stop().await,
            Command::Restart => self.do_restart().await,
        };

        match outcome {
            Ok(()) => {
                input.release();
                self.bus
                    .publish(Event::now(EventKind::SequenceCompleted).with_command(command));
                Ok(())
            }
            Err(err) => {
                self.bus.publish(
                    Event::now(EventKind::SequenceFailed)
                        .with_command(command)
                        .with_reason(err.to_string()),
                );
                Err(err)
            }
        }
    }

    /// Startup: data tier, settle, server, settle, ioc, then re-arm
    /// auto-restart supervision fleet-wide (a prior stop toggled it off).
    async fn do_start(&self) -> Result<(), ActuatorError> {
        self.press(self.topology.data_processes(), Action::Start)
            .await?;
        self.settle(self.cfg.server_delay, self.topology.data_processes())
            .await?;

        self.press(self.topology.server_batch(), Action::Start)
            .await?;
        self.settle(self.cfg.ioc_delay, self.topology.server_batch())
            .await?;

        self.press(self.topology.ioc_batch(), Action::Start).await?;

        self.press(self.topology.full_set(), Action::Toggle).await
    }

    /// Shutdown: one full-set batch, no delays.
    async fn do_stop(&self) -> Result<(), ActuatorError> {
        self.press(self.topology.full_set(), Action::Stop).await
    }

    /// Restart is a direct composition: the pause is applied even when the
    /// stop batch completes instantly.
    async fn do_restart(&self) -> Result<(), ActuatorError> {
        self.do_stop().await?;

        self.bus
            .publish(Event::now(EventKind::DelayScheduled).with_delay(RESTART_DELAY));
        time::sleep(RESTART_DELAY).await;

        self.do_start().await
    }

    async fn press(&self, names: &[String], action: Action) -> Result<(), ActuatorError> {
        self.bus.publish(
            Event::now(EventKind::BatchPressed)
                .with_action(action)
                .with_batch(names.len()),
        );
        self.actuator.press(names, action).await
    }

    /// Spends one tier delay budget according to the configured policy.
    ///
    /// `started` is the tier whose readiness the budget is bounding.
    async fn settle(&self, budget: Duration, started: &[String]) -> Result<(), ActuatorError> {
        self.bus
            .publish(Event::now(EventKind::DelayScheduled).with_delay(budget));

        match self.cfg.delay {
            DelayPolicy::Fixed => {
                time::sleep(budget).await;
                Ok(())
            }
            DelayPolicy::PollReady { interval } => {
                // A zero interval would re-poll without ever advancing the
                // timer.
                let step = interval.max(Duration::from_millis(1));
                let deadline = time::Instant::now() + budget;

                loop {
                    if self.all_ready(started).await? {
                        return Ok(());
                    }
                    let now = time::Instant::now();
                    if now >= deadline {
                        self.bus.publish(
                            Event::now(EventKind::ReadinessLapsed)
                                .with_delay(budget)
                                .with_batch(started.len()),
                        );
                        return Ok(());
                    }
                    time::sleep(step.min(deadline - now)).await;
                }
            }
        }
    }

    async fn all_ready(&self, names: &[String]) -> Result<bool, ActuatorError> {
        for name in names {
            if !self.actuator.ready(name).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuators::Actuate;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    /// One recorded press: batch contents, action, and paused-clock instant.
    #[derive(Clone, Debug)]
    struct Press {
        names: Vec<String>,
        action: Action,
        at: time::Instant,
    }

    /// Actuator that records every press; `fail_at` makes the n-th press
    /// (0-based) fail after recording it, `ready` drives the poll strategy.
    struct Recorder {
        calls: StdMutex<Vec<Press>>,
        fail_at: Option<usize>,
        ready: bool,
    }

    impl Recorder {
        fn arc() -> Arc<Self> {
            Arc::new(Self {
                calls: StdMutex::new(Vec::new()),
                fail_at: None,
                ready: true,
            })
        }

        fn failing_at(index: usize) -> Arc<Self> {
            Arc::new(Self {
                calls: StdMutex::new(Vec::new()),
                fail_at: Some(index),
                ready: true,
            })
        }

        fn never_ready() -> Arc<Self> {
            Arc::new(Self {
                calls: StdMutex::new(Vec::new()),
                fail_at: None,
                ready: false,
            })
        }

        fn presses(&self) -> Vec<Press> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Actuate for Recorder {
        async fn press(&self, names: &[String], action: Action) -> Result<(), ActuatorError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(Press {
                names: names.to_vec(),
                action,
                at: time::Instant::now(),
            });
            if self.fail_at == Some(calls.len() - 1) {
                return Err(ActuatorError::Unreachable {
                    detail: "injected".into(),
                });
            }
            Ok(())
        }

        async fn ready(&self, _name: &str) -> Result<bool, ActuatorError> {
            Ok(self.ready)
        }
    }

    /// Actuator whose presses park on the paused clock for a long time,
    /// keeping an operation in flight while the test pokes the intake.
    struct Parking {
        inner: Arc<Recorder>,
    }

    #[async_trait]
    impl Actuate for Parking {
        async fn press(&self, names: &[String], action: Action) -> Result<(), ActuatorError> {
            self.inner.press(names, action).await?;
            time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    fn fixture_config() -> SequencerConfig {
        SequencerConfig::new("B-ODN", 11, "B-ODN-01", "B-IOC-01")
            .with_server_delay(Duration::from_secs(3))
            .with_ioc_delay(Duration::from_secs(5))
    }

    fn data_names() -> Vec<String> {
        (2..=11).map(|i| format!("B-ODN-{i:02}")).collect()
    }

    fn full_names() -> Vec<String> {
        let mut names = data_names();
        names.push("B-ODN-01".to_string());
        names.push("B-IOC-01".to_string());
        names
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_sequence_order_and_delays() {
        let recorder = Recorder::arc();
        let seq = Sequencer::new(fixture_config(), recorder.clone()).unwrap();
        let t0 = time::Instant::now();

        seq.on_start(1).await.unwrap();

        let presses = recorder.presses();
        assert_eq!(presses.len(), 4, "data, server, ioc, toggle");

        assert_eq!(presses[0].names, data_names());
        assert_eq!(presses[0].action, Action::Start);
        assert_eq!(presses[0].at - t0, Duration::ZERO);

        assert_eq!(presses[1].names, ["B-ODN-01"]);
        assert_eq!(presses[1].action, Action::Start);
        assert_eq!(presses[1].at - t0, Duration::from_secs(3));

        assert_eq!(presses[2].names, ["B-IOC-01"]);
        assert_eq!(presses[2].action, Action::Start);
        assert_eq!(presses[2].at - t0, Duration::from_secs(8));

        assert_eq!(presses[3].names, full_names());
        assert_eq!(presses[3].action, Action::Toggle);
        assert_eq!(presses[3].at - t0, Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_releases_input_on_success() {
        let seq = Sequencer::new(fixture_config(), Recorder::arc()).unwrap();

        seq.on_start(1).await.unwrap();

        assert_eq!(seq.command_value(Command::Start), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_write_is_a_no_op() {
        let recorder = Recorder::arc();
        let seq = Sequencer::new(fixture_config(), recorder.clone()).unwrap();

        seq.on_start(0).await.unwrap();
        seq.on_stop(0).await.unwrap();
        seq.on_restart(0).await.unwrap();

        assert!(recorder.presses().is_empty());
        assert_eq!(seq.command_value(Command::Start), 0);
        assert_eq!(seq.command_value(Command::Stop), 0);
        assert_eq!(seq.command_value(Command::Restart), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_one_batch_with_no_delay() {
        let recorder = Recorder::arc();
        let seq = Sequencer::new(fixture_config(), recorder.clone()).unwrap();
        let t0 = time::Instant::now();

        seq.on_stop(1).await.unwrap();

        let presses = recorder.presses();
        assert_eq!(presses.len(), 1);
        assert_eq!(presses[0].names, full_names());
        assert_eq!(presses[0].action, Action::Stop);
        assert_eq!(presses[0].at - t0, Duration::ZERO);
        assert_eq!(seq.command_value(Command::Stop), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_pause_ignores_configured_delays() {
        // server_delay deliberately differs from RESTART_DELAY so the presses
        // tell the two pauses apart.
        let cfg = fixture_config().with_server_delay(Duration::from_secs(7));
        let recorder = Recorder::arc();
        let seq = Sequencer::new(cfg, recorder.clone()).unwrap();
        let t0 = time::Instant::now();

        seq.on_restart(1).await.unwrap();

        let presses = recorder.presses();
        assert_eq!(presses.len(), 5, "stop, data, server, ioc, toggle");

        assert_eq!(presses[0].action, Action::Stop);
        assert_eq!(presses[0].at - t0, Duration::ZERO);

        assert_eq!(presses[1].names, data_names());
        assert_eq!(presses[1].at - t0, RESTART_DELAY);

        assert_eq!(presses[2].names, ["B-ODN-01"]);
        assert_eq!(presses[2].at - t0, RESTART_DELAY + Duration::from_secs(7));

        assert_eq!(presses[3].names, ["B-IOC-01"]);
        assert_eq!(
            presses[3].at - t0,
            RESTART_DELAY + Duration::from_secs(7 + 5)
        );

        assert_eq!(presses[4].action, Action::Toggle);
        assert_eq!(seq.command_value(Command::Restart), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_aborts_tail_and_keeps_input_armed() {
        // Press #1 is the server START; it fails after the data batch went
        // through.
        let recorder = Recorder::failing_at(1);
        let seq = Sequencer::new(fixture_config(), recorder.clone()).unwrap();

        let err = seq.on_start(1).await.unwrap_err();
        assert_eq!(err.as_label(), "actuator_unreachable");

        let presses = recorder.presses();
        assert_eq!(presses.len(), 2, "ioc start and toggle never issued");
        assert_eq!(presses[1].names, ["B-ODN-01"]);

        assert_eq!(seq.command_value(Command::Start), 1, "input stays armed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_stop_leaves_restart_marker() {
        let recorder = Recorder::failing_at(0);
        let seq = Sequencer::new(fixture_config(), recorder.clone()).unwrap();

        seq.on_restart(1).await.unwrap_err();

        assert_eq!(recorder.presses().len(), 1, "start half never runs");
        assert_eq!(seq.command_value(Command::Restart), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_ready_proceeds_without_waiting() {
        let cfg = fixture_config().with_delay_policy(DelayPolicy::PollReady {
            interval: Duration::from_millis(500),
        });
        let recorder = Recorder::arc();
        let seq = Sequencer::new(cfg, recorder.clone()).unwrap();
        let t0 = time::Instant::now();

        seq.on_start(1).await.unwrap();

        let presses = recorder.presses();
        assert_eq!(
            presses[1].at - t0,
            Duration::ZERO,
            "ready tier skips the budget"
        );
        assert_eq!(presses[2].at - t0, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_ready_falls_back_to_full_budget() {
        let cfg = fixture_config().with_delay_policy(DelayPolicy::PollReady {
            interval: Duration::from_millis(500),
        });
        let recorder = Recorder::never_ready();
        let seq = Sequencer::new(cfg, recorder.clone()).unwrap();
        let mut events = seq.bus().subscribe();
        let t0 = time::Instant::now();

        seq.on_start(1).await.unwrap();

        let presses = recorder.presses();
        assert_eq!(presses[1].at - t0, Duration::from_secs(3));
        assert_eq!(presses[2].at - t0, Duration::from_secs(8));

        let mut lapses = 0;
        while let Ok(ev) = events.try_recv() {
            if ev.kind == EventKind::ReadinessLapsed {
                lapses += 1;
            }
        }
        assert_eq!(lapses, 2, "one lapse per settled tier");
    }

    #[tokio::test(start_paused = true)]
    async fn test_direct_handlers_never_interleave() {
        let recorder = Recorder::arc();
        let seq = Sequencer::new(fixture_config(), recorder.clone()).unwrap();

        let starter = {
            let seq = Arc::clone(&seq);
            tokio::spawn(async move { seq.on_start(1).await })
        };
        let stopper = {
            let seq = Arc::clone(&seq);
            tokio::spawn(async move { seq.on_stop(1).await })
        };
        starter.await.unwrap().unwrap();
        stopper.await.unwrap().unwrap();

        let presses = recorder.presses();
        assert_eq!(presses.len(), 5);

        let stop_index = presses
            .iter()
            .position(|p| p.action == Action::Stop)
            .unwrap();
        assert!(
            stop_index == 0 || stop_index == 4,
            "stop batch must not land inside the start sequence (index {stop_index})"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_intake_runs_trigger_and_releases_input() {
        let recorder = Recorder::arc();
        let seq = Sequencer::new(fixture_config(), recorder.clone()).unwrap();
        let handle = seq.handle();
        let mut events = seq.bus().subscribe();

        let token = CancellationToken::new();
        let loop_task = {
            let seq = Arc::clone(&seq);
            let token = token.clone();
            tokio::spawn(async move { seq.run(token).await })
        };

        handle.try_trigger(Command::Start, 1).unwrap();
        loop {
            let ev = events.recv().await.unwrap();
            if ev.kind == EventKind::SequenceCompleted {
                assert_eq!(ev.command, Some(Command::Start));
                break;
            }
        }

        assert_eq!(recorder.presses().len(), 4);
        assert_eq!(seq.command_value(Command::Start), 0);

        token.cancel();
        loop_task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reject_admission_turns_away_overlap() {
        let recorder = Recorder::arc();
        let parking = Arc::new(Parking {
            inner: recorder.clone(),
        });
        let seq = Sequencer::new(fixture_config(), parking).unwrap();
        let handle = seq.handle();

        let token = CancellationToken::new();
        {
            let seq = Arc::clone(&seq);
            let token = token.clone();
            tokio::spawn(async move { seq.run(token).await });
        }

        handle.try_trigger(Command::Start, 1).unwrap();
        while seq.command_value(Command::Start) == 0 {
            tokio::task::yield_now().await;
        }

        assert_eq!(
            handle.try_trigger(Command::Stop, 1),
            Err(SubmitError::Busy)
        );
        token.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_queue_admission_runs_triggers_in_order() {
        let cfg = fixture_config().with_admission(AdmissionPolicy::Queue);
        let recorder = Recorder::arc();
        let seq = Sequencer::new(cfg, recorder.clone()).unwrap();
        let handle = seq.handle();
        let mut events = seq.bus().subscribe();

        let token = CancellationToken::new();
        {
            let seq = Arc::clone(&seq);
            let token = token.clone();
            tokio::spawn(async move { seq.run(token).await });
        }

        handle.trigger(Command::Stop, 1).await.unwrap();
        handle.trigger(Command::Start, 1).await.unwrap();

        let mut completed = Vec::new();
        while completed.len() < 2 {
            let ev = events.recv().await.unwrap();
            if ev.kind == EventKind::SequenceCompleted {
                completed.push(ev.command.unwrap());
            }
        }
        assert_eq!(completed, [Command::Stop, Command::Start]);

        let presses = recorder.presses();
        assert_eq!(presses[0].action, Action::Stop);
        assert_eq!(presses.len(), 5);
        token.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_with_zero_never_enqueues() {
        let recorder = Recorder::arc();
        let seq = Sequencer::new(fixture_config(), recorder.clone()).unwrap();
        let handle = seq.handle();

        let token = CancellationToken::new();
        {
            let seq = Arc::clone(&seq);
            let token = token.clone();
            tokio::spawn(async move { seq.run(token).await });
        }

        handle.try_trigger(Command::Start, 0).unwrap();
        handle.trigger(Command::Stop, 0).await.unwrap();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert!(recorder.presses().is_empty());
        token.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_run_reports_already_running() {
        let seq = Sequencer::new(fixture_config(), Recorder::arc()).unwrap();

        let token = CancellationToken::new();
        {
            let seq = Arc::clone(&seq);
            let token = token.clone();
            tokio::spawn(async move { seq.run(token).await });
        }
        tokio::task::yield_now().await;

        let err = seq.run(CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.as_label(), "runtime_already_running");
        token.cancel();
    }
}
