use std::sync::Arc;

use contester_common::{L1Client, L2Client, TransitionProvedEvent};
use contester_config::RetryConfig;
use futures::StreamExt;
use tokio::{sync::mpsc, time::Instant};
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{metrics, HandleOutcome, HandlerError, TransitionProvedHandler};

/// Settings of the event dispatch task.
#[derive(Debug, Clone)]
pub struct DispatchCtx {
    /// Backoff applied to retryable handler failures.
    pub retry: RetryConfig,
    /// Maximum number of events in flight.
    pub max_concurrent_events: usize,
    /// Stops the task and cancels in-flight handler calls.
    pub shutdown: CancellationToken,
}

/// Feeds transition-proved events from `events` through `handler`.
///
/// Runs until `ctx.shutdown` fires or every event sender is dropped. Failed events are retried
/// according to `ctx.retry` and skipped once the failure is permanent or retries run out.
pub async fn transition_proved_task<L1, L2>(
    handler: Arc<TransitionProvedHandler<L1, L2>>,
    events: mpsc::Receiver<TransitionProvedEvent>,
    ctx: DispatchCtx,
) where
    L1: L1Client,
    L2: L2Client,
{
    let handler = handler.as_ref();
    let ctx = &ctx;

    ReceiverStream::new(events)
        .take_until(ctx.shutdown.cancelled())
        .for_each_concurrent(ctx.max_concurrent_events, |event| async move {
            // failures are logged in process_event
            let _ = process_event(handler, &event, ctx).await;
        })
        .await;

    info!("transition proved task exiting");
}

/// Handles one event, retrying retryable failures with backoff.
pub(crate) async fn process_event<L1, L2>(
    handler: &TransitionProvedHandler<L1, L2>,
    event: &TransitionProvedEvent,
    ctx: &DispatchCtx,
) -> Result<HandleOutcome, HandlerError>
where
    L1: L1Client,
    L2: L2Client,
{
    let block_id = event.block_id;
    let mut retry_count = 0;

    loop {
        let started = Instant::now();
        // Chain reads are bounded by the handler's read timeout. A full contest queue stalls
        // the attempt until the pipeline catches up or shutdown fires.
        let result = handler.handle(event, &ctx.shutdown).await;
        metrics::observe_handle_duration(started.elapsed());

        let error = match result {
            Ok(outcome) => {
                debug!(%block_id, ?outcome, "handled transition proved event");
                return Ok(outcome);
            }
            Err(HandlerError::Cancelled) => {
                debug!(%block_id, "transition proved handling cancelled");
                return Err(HandlerError::Cancelled);
            }
            Err(error) => error,
        };

        if !error.is_retryable() {
            error!(%block_id, %error, "permanent failure handling proven transition, skipping");
            return Err(error);
        }

        if !ctx.retry.should_retry(retry_count) {
            error!(
                %block_id,
                %error,
                retries = retry_count,
                "retries exhausted handling proven transition, skipping"
            );
            return Err(error);
        }

        let delay = ctx.retry.calculate_delay(retry_count);
        warn!(
            %block_id,
            %error,
            retry = retry_count + 1,
            ?delay,
            "failed to handle proven transition, retrying"
        );

        tokio::select! {
            biased;
            _ = ctx.shutdown.cancelled() => return Err(HandlerError::Cancelled),
            _ = tokio::time::sleep(delay) => {}
        }
        retry_count += 1;
    }
}
