//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [triggered] command=start value=1
//! [press] action=START batch=10
//! [delay] 3000ms
//! [not-ready] budget=3000ms batch=10
//! [completed] command=start
//! [failed] command=start err="remote unreachable: no route"
//! [rejected] command=stop reason="busy"
//! [shutdown-requested]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Not intended for production use —
/// implement a custom [`Subscribe`] for structured logging or metrics.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::CommandTriggered => {
                if let (Some(cmd), Some(value)) = (e.command, e.value) {
                    println!("[triggered] command={cmd} value={value}");
                }
            }
            EventKind::CommandRejected => {
                println!("[rejected] command={:?} reason={:?}", e.command, e.reason);
            }
            EventKind::BatchPressed => {
                if let (Some(action), Some(batch)) = (e.action, e.batch) {
                    println!("[press] action={action} batch={batch}");
                }
            }
            EventKind::DelayScheduled => {
                println!("[delay] {}ms", e.delay_ms.unwrap_or(0));
            }
            EventKind::ReadinessLapsed => {
                println!(
                    "[not-ready] budget={}ms batch={:?}",
                    e.delay_ms.unwrap_or(0),
                    e.batch
                );
            }
            EventKind::SequenceCompleted => {
                if let Some(cmd) = e.command {
                    println!("[completed] command={cmd}");
                }
            }
            EventKind::SequenceFailed => {
                println!("[failed] command={:?} err={:?}", e.command, e.reason);
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::SubscriberOverflow => {
                println!("[subscriber-overflow] {:?}", e.reason);
            }
            EventKind::SubscriberPanicked => {
                println!("[subscriber-panicked] {:?}", e.reason);
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
