use std::{future::Future, sync::Arc, time::Duration};

use contester_common::{L1Client, L2Client, TransitionProvedEvent};
use contester_config::{ConfigError, ContesterConfig};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    contest_queue, transition_proved_task, ContestReceiver, DispatchCtx, TransitionProvedHandler,
};

/// Default number of transition-proved events buffered ahead of the handler.
const DEFAULT_EVENT_BUFFER: usize = 256;

/// Errors from submitting a transition-proved event to the contester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EventSubmitError {
    /// The contester was shut down. The event was not accepted.
    #[error("contester shut down")]
    ShutDown,

    /// The contester task is gone and no longer takes events.
    #[error("event channel closed")]
    Closed,
}

/// Handle for feeding events to a running contester and stopping it.
#[derive(Debug, Clone)]
pub struct ContesterHandle {
    events_tx: mpsc::Sender<TransitionProvedEvent>,
    shutdown: CancellationToken,
}

impl ContesterHandle {
    /// Returns a sender for transition-proved events.
    pub fn event_sender(&self) -> mpsc::Sender<TransitionProvedEvent> {
        self.events_tx.clone()
    }

    /// Submits one transition-proved event, waiting while the event buffer is full.
    pub async fn submit_event(
        &self,
        event: TransitionProvedEvent,
    ) -> Result<(), EventSubmitError> {
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Err(EventSubmitError::ShutDown),
            res = self.events_tx.send(event) => res.map_err(|_| EventSubmitError::Closed),
        }
    }

    /// Stops the contester task. In-flight events are cancelled.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

/// Builder for a contester wired from configuration.
#[derive(Debug)]
pub struct ContesterBuilder<L1, L2> {
    config: ContesterConfig,
    l1: Arc<L1>,
    l2: Arc<L2>,
    shutdown: Option<CancellationToken>,
    event_buffer: Option<usize>,
}

impl<L1, L2> ContesterBuilder<L1, L2> {
    /// Creates a new contester builder with all required fields.
    pub fn new(config: ContesterConfig, l1: Arc<L1>, l2: Arc<L2>) -> Self {
        Self {
            config,
            l1,
            l2,
            shutdown: None,
            event_buffer: None,
        }
    }

    /// Ties the contester to an external shutdown token.
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Sets how many events may wait for the handler.
    pub fn with_event_buffer(mut self, v: usize) -> Self {
        self.event_buffer = Some(v);
        self
    }

    /// Builds and returns the contester handle, the contest queue receiver and the task.
    ///
    /// The receiver belongs to the submission pipeline. The task must be spawned by the caller.
    pub fn build(
        self,
    ) -> Result<(ContesterHandle, ContestReceiver, impl Future<Output = ()>), ConfigError>
    where
        L1: L1Client,
        L2: L2Client,
    {
        self.config.validate()?;
        let event_buffer = self.event_buffer.unwrap_or(DEFAULT_EVENT_BUFFER);
        if event_buffer == 0 {
            return Err(ConfigError::Invalid(
                "event buffer must be greater than zero".into(),
            ));
        }

        let section = &self.config.contester;
        let (contest_tx, contest_rx) = contest_queue(section.queue_capacity);
        let (events_tx, events_rx) = mpsc::channel(event_buffer);
        let shutdown = self.shutdown.unwrap_or_default();

        let handler = Arc::new(
            TransitionProvedHandler::new(self.l1, self.l2, contest_tx, section.enabled)
                .with_read_timeout(Duration::from_millis(section.handler_timeout_ms)),
        );
        let ctx = DispatchCtx {
            retry: self.config.retry.clone(),
            max_concurrent_events: section.max_concurrent_events,
            shutdown: shutdown.clone(),
        };

        info!(
            contester_mode = section.enabled,
            queue_capacity = section.queue_capacity,
            max_concurrent_events = section.max_concurrent_events,
            handler_timeout_ms = section.handler_timeout_ms,
            "contester configured"
        );

        let handle = ContesterHandle {
            events_tx,
            shutdown,
        };
        let task = transition_proved_task(handler, events_rx, ctx);

        Ok((handle, contest_rx, task))
    }
}
