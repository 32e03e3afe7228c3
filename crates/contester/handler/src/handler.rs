use std::{fmt, future::Future, sync::Arc, time::Duration};

use contester_common::{
    ContestRequest, L1Client, L2Client, ProofTier, TransitionField, TransitionProvedEvent,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    metrics, resolve_proposal_metadata, verify_transition, ContestSender, HandlerError,
    ProofVerdict,
};

/// What happened to a transition-proved event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Contester role is disabled, the event was only recorded.
    Skipped,
    /// The proven transition matches the local chain.
    Valid,
    /// A contest at `tier` was handed to the submission pipeline.
    Contested { tier: ProofTier },
}

/// Picks the tier to contest a transition proven at `contested` with.
///
/// This is the weakest tier strictly above `contested`, raised to `min_tier` if the proposal
/// demands more. `None` if nothing is above `contested`.
pub fn select_contest_tier(contested: ProofTier, min_tier: ProofTier) -> Option<ProofTier> {
    contested.next_higher().map(|tier| tier.max(min_tier))
}

/// Checks proven transitions against the local chain and contests the ones that disagree.
///
/// Stateless apart from the shared queue, so one instance can serve concurrent events.
pub struct TransitionProvedHandler<L1, L2> {
    l1: Arc<L1>,
    l2: Arc<L2>,
    contest_tx: ContestSender,
    contester_mode: bool,
    read_timeout: Option<Duration>,
}

impl<L1, L2> fmt::Debug for TransitionProvedHandler<L1, L2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionProvedHandler")
            .field("contest_tx", &self.contest_tx)
            .field("contester_mode", &self.contester_mode)
            .field("read_timeout", &self.read_timeout)
            .finish_non_exhaustive()
    }
}

impl<L1, L2> TransitionProvedHandler<L1, L2>
where
    L1: L1Client,
    L2: L2Client,
{
    pub fn new(l1: Arc<L1>, l2: Arc<L2>, contest_tx: ContestSender, contester_mode: bool) -> Self {
        Self {
            l1,
            l2,
            contest_tx,
            contester_mode,
            read_timeout: None,
        }
    }

    pub fn contester_mode(&self) -> bool {
        self.contester_mode
    }

    /// Bounds the chain reads of a single [`handle`](Self::handle) call by `timeout`.
    ///
    /// The queue send is never bounded, a full queue stalls the call until it has room or
    /// the call is cancelled.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Handles one transition-proved event.
    ///
    /// Every chain read and the queue send give way to `cancel`. A cancelled call returns
    /// [`HandlerError::Cancelled`] and has enqueued nothing.
    pub async fn handle(
        &self,
        event: &TransitionProvedEvent,
        cancel: &CancellationToken,
    ) -> Result<HandleOutcome, HandlerError> {
        let block_id = event.block_id;
        metrics::set_received_proven_block(block_id);

        if !self.contester_mode {
            debug!(%block_id, tier = %event.tier, "contester mode disabled, skipping proven transition");
            return Ok(HandleOutcome::Skipped);
        }

        let prepare = self.prepare_contest(event, cancel);
        let prepared = match self.read_timeout {
            Some(timeout) => tokio::time::timeout(timeout, prepare)
                .await
                .unwrap_or(Err(HandlerError::Timeout(timeout)))?,
            None => prepare.await?,
        };
        let Some((request, mismatched)) = prepared else {
            return Ok(HandleOutcome::Valid);
        };

        let tier = request.tier();
        let l1_height = request.proposed_in();
        self.contest_tx.send(request, cancel).await?;

        info!(
            %block_id,
            l1_height,
            contested_tier = %event.tier,
            tier = %tier,
            prover = %event.prover,
            mismatched = %join_fields(&mismatched),
            parent_hash = %hex::encode(event.transition.parent_hash),
            block_hash = %hex::encode(event.transition.block_hash),
            state_root = %hex::encode(event.transition.state_root),
            "contest filed"
        );
        metrics::record_contest_filed(tier);

        Ok(HandleOutcome::Contested { tier })
    }

    /// Runs the chain reads of [`handle`](Self::handle): verification and, on mismatch, the
    /// proposal lookup. `None` if the proven transition is valid.
    async fn prepare_contest(
        &self,
        event: &TransitionProvedEvent,
        cancel: &CancellationToken,
    ) -> Result<Option<(ContestRequest, Vec<TransitionField>)>, HandlerError> {
        let block_id = event.block_id;

        let verdict = match with_cancel(
            cancel,
            verify_transition(self.l2.as_ref(), block_id, &event.transition),
        )
        .await?
        {
            Ok(verdict) => verdict,
            Err(err) => {
                metrics::record_verification_failure(err.is_incomplete());
                return Err(err.into());
            }
        };
        metrics::record_verdict(&verdict);

        let mismatched = match verdict {
            ProofVerdict::Valid => {
                debug!(%block_id, tier = %event.tier, "proven transition is valid");
                return Ok(None);
            }
            ProofVerdict::Invalid {
                expected,
                mismatched,
            } => {
                warn!(
                    %block_id,
                    prover = %event.prover,
                    tier = %event.tier,
                    mismatched = %join_fields(&mismatched),
                    proven_parent_hash = %event.transition.parent_hash,
                    expected_parent_hash = %expected.parent_hash,
                    proven_block_hash = %event.transition.block_hash,
                    expected_block_hash = %expected.block_hash,
                    proven_state_root = %event.transition.state_root,
                    expected_state_root = %expected.state_root,
                    "proven transition disagrees with local chain"
                );
                mismatched
            }
        };

        let block = with_cancel(cancel, self.l1.get_block(block_id)).await??;
        let meta = with_cancel(
            cancel,
            resolve_proposal_metadata(self.l1.as_ref(), block_id, block.proposed_in),
        )
        .await??;

        let tier = select_contest_tier(event.tier, meta.min_tier)
            .ok_or(HandlerError::NoHigherTier(event.tier))?;

        let request = ContestRequest::new(
            block_id,
            block.proposed_in,
            event.transition.parent_hash,
            meta,
            event.tier,
            tier,
        )?;
        Ok(Some((request, mismatched)))
    }
}

async fn with_cancel<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = T>,
) -> Result<T, HandlerError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(HandlerError::Cancelled),
        out = fut => Ok(out),
    }
}

fn join_fields(fields: &[TransitionField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
