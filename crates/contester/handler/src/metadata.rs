//! Rebuilds the original proposal metadata of a block from its historical L1 record.

use contester_common::{BlockId, L1Client, L1ClientError, L1Height, ProposalMetadata};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while resolving proposal metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Reading the historical records failed.
    #[error("L1 client error: {0}")]
    L1Client(#[from] L1ClientError),

    /// No proposal of the block at the given height.
    #[error("no proposal of block {block_id} found at L1 height {l1_height}")]
    NotFound {
        block_id: BlockId,
        l1_height: L1Height,
    },

    /// The record was returned for a height other than the one asked for.
    #[error("proposal of block {block_id} recorded at L1 height {found}, expected {expected}")]
    HeightMismatch {
        block_id: BlockId,
        expected: L1Height,
        found: L1Height,
    },

    /// Several distinct proposals of the same block at one height.
    #[error("{count} conflicting proposals of block {block_id} at L1 height {l1_height}")]
    Ambiguous {
        block_id: BlockId,
        l1_height: L1Height,
        count: usize,
    },
}

impl MetadataError {
    /// Returns true if the lookup may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            // Conflicting records do not go away by asking again.
            MetadataError::Ambiguous { .. } => false,

            // Reads fail transiently, and a missing or moved record points at an L1 reorg.
            MetadataError::L1Client(_)
            | MetadataError::NotFound { .. }
            | MetadataError::HeightMismatch { .. } => true,
        }
    }
}

/// Returns the metadata `block_id` was proposed with in the L1 block at `proposed_in`.
///
/// Duplicate identical records of the block are tolerated.
pub async fn resolve_proposal_metadata(
    l1: &impl L1Client,
    block_id: BlockId,
    proposed_in: L1Height,
) -> Result<ProposalMetadata, MetadataError> {
    let events = l1.block_proposed_events(proposed_in).await?;

    let mut matching = events.into_iter().filter(|ev| ev.block_id == block_id);
    let first = matching.next().ok_or(MetadataError::NotFound {
        block_id,
        l1_height: proposed_in,
    })?;

    let conflicting = matching.filter(|ev| *ev != first).count();
    if conflicting > 0 {
        return Err(MetadataError::Ambiguous {
            block_id,
            l1_height: proposed_in,
            count: conflicting + 1,
        });
    }

    if first.l1_height != proposed_in {
        return Err(MetadataError::HeightMismatch {
            block_id,
            expected: proposed_in,
            found: first.l1_height,
        });
    }

    debug!(%block_id, l1_height = proposed_in, "resolved proposal metadata");
    Ok(first.meta)
}
