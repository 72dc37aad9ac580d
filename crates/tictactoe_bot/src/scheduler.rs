//! Deferred opponent replies.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, instrument};

/// Posts a round's generation number back to the driver after a fixed
/// delay.
#[derive(Debug, Clone)]
pub struct ReplyScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<u64>,
}

impl ReplyScheduler {
    /// Creates a scheduler delivering to `tx`.
    pub fn new(delay: Duration, tx: mpsc::UnboundedSender<u64>) -> Self {
        Self { delay, tx }
    }

    /// Schedules a reply for `generation`. Must be called inside a Tokio
    /// runtime.
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    pub fn schedule(&self, generation: u64) -> ScheduledReply {
        let tx = self.tx.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(generation).is_err() {
                debug!(generation, "Driver gone, dropping reply");
            }
        });

        ScheduledReply {
            generation,
            handle: handle.abort_handle(),
        }
    }
}

/// Handle to a pending reply.
#[derive(Debug)]
pub struct ScheduledReply {
    generation: u64,
    handle: AbortHandle,
}

impl ScheduledReply {
    /// Generation the reply was scheduled for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancels the reply if it has not fired yet.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn cancel(self) {
        debug!("Cancelling scheduled reply");
        self.handle.abort();
    }
}
