//! Bounded hand-off of contest requests to the submission pipeline.

use contester_common::ContestRequest;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

/// Errors from handing a request to the submission pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The caller was cancelled while waiting for queue space. Nothing was enqueued.
    #[error("contest dispatch cancelled")]
    Cancelled,

    /// The submission pipeline dropped its receiver.
    #[error("contest queue closed")]
    Closed,
}

/// Creates the contest queue with room for `capacity` pending requests.
///
/// # Panics
///
/// Panics if `capacity` is zero. Configuration validation rejects that value.
pub fn contest_queue(capacity: usize) -> (ContestSender, ContestReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (ContestSender { tx }, ContestReceiver { rx })
}

/// Producer side of the contest queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ContestSender {
    tx: mpsc::Sender<ContestRequest>,
}

impl ContestSender {
    /// Enqueues `request`, waiting for space while the queue is full.
    ///
    /// Space is reserved before the request is moved in, so a cancelled send either
    /// completed entirely or left the queue untouched.
    pub async fn send(
        &self,
        request: ContestRequest,
        cancel: &CancellationToken,
    ) -> Result<(), DispatchError> {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DispatchError::Cancelled),
            permit = self.tx.reserve() => permit.map_err(|_| DispatchError::Closed)?,
        };
        permit.send(request);
        Ok(())
    }

    pub fn max_capacity(&self) -> usize {
        self.tx.max_capacity()
    }

    /// Number of free slots right now.
    pub fn capacity(&self) -> usize {
        self.tx.capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side of the contest queue, owned by the submission pipeline.
#[derive(Debug)]
pub struct ContestReceiver {
    rx: mpsc::Receiver<ContestRequest>,
}

impl ContestReceiver {
    /// Waits for the next request. `None` once all senders are gone and the queue is drained.
    pub async fn recv(&mut self) -> Option<ContestRequest> {
        self.rx.recv().await
    }

    /// Takes a pending request without waiting.
    pub fn try_recv(&mut self) -> Option<ContestRequest> {
        self.rx.try_recv().ok()
    }

    /// Stops accepting new requests. Already queued requests can still be received.
    pub fn close(&mut self) {
        self.rx.close();
    }

    pub fn into_stream(self) -> ReceiverStream<ContestRequest> {
        ReceiverStream::new(self.rx)
    }
}
