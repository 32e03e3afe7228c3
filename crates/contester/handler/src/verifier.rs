//! Recomputes a block's transition from the local L2 chain and compares it with a proven one.
//!
//! Only the direct parent linkage is checked. Consistency against earlier ancestors is not
//! verified here.

use std::fmt;

use contester_common::{BlockId, L2Client, L2ClientError, Transition, TransitionField};
use thiserror::Error;
use tracing::debug;

/// Result of comparing a proven transition with the locally derived one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofVerdict {
    /// The proven transition matches the local chain exactly.
    Valid,
    /// At least one field differs. There is no partial validity.
    Invalid {
        expected: Transition,
        mismatched: Vec<TransitionField>,
    },
}

impl ProofVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, ProofVerdict::Valid)
    }
}

/// Why a block cannot be derived locally yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompleteReason {
    /// The genesis block has no parent to link against.
    Genesis,
    /// The block itself is not in the local chain.
    MissingBlock,
    /// The parent block is not in the local chain.
    MissingParent(BlockId),
    /// The local header does not point at the local parent, the local view is mid-reorg.
    ParentLinkMismatch,
}

impl fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncompleteReason::Genesis => write!(f, "genesis has no parent"),
            IncompleteReason::MissingBlock => write!(f, "block not processed locally"),
            IncompleteReason::MissingParent(parent) => {
                write!(f, "parent block {parent} not processed locally")
            }
            IncompleteReason::ParentLinkMismatch => {
                write!(f, "local header does not link to local parent")
            }
        }
    }
}

/// Verification could not reach a verdict. Never grounds for a contest.
#[derive(Debug, Error)]
pub enum VerifierError {
    /// The block cannot be derived from the local chain yet. Retry later.
    #[error("block {block_id} cannot be derived locally yet: {reason}")]
    Incomplete {
        block_id: BlockId,
        reason: IncompleteReason,
    },

    /// Reading the local chain failed.
    #[error("L2 client error: {0}")]
    L2Client(#[from] L2ClientError),
}

impl VerifierError {
    fn incomplete(block_id: BlockId, reason: IncompleteReason) -> Self {
        Self::Incomplete { block_id, reason }
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, VerifierError::Incomplete { .. })
    }
}

/// Derives the transition the local chain expects for `block_id`.
///
/// The expected parent hash is the hash of the local block at `block_id - 1`; block hash and
/// state root come from the local header at `block_id`.
pub async fn derive_expected_transition(
    l2: &impl L2Client,
    block_id: BlockId,
) -> Result<Transition, VerifierError> {
    let parent_id = block_id
        .parent()
        .ok_or(VerifierError::incomplete(block_id, IncompleteReason::Genesis))?;

    let header = l2
        .header_by_number(block_id)
        .await?
        .ok_or(VerifierError::incomplete(
            block_id,
            IncompleteReason::MissingBlock,
        ))?;

    let parent = l2
        .header_by_number(parent_id)
        .await?
        .ok_or(VerifierError::incomplete(
            block_id,
            IncompleteReason::MissingParent(parent_id),
        ))?;

    if header.parent_hash != parent.hash {
        return Err(VerifierError::incomplete(
            block_id,
            IncompleteReason::ParentLinkMismatch,
        ));
    }

    Ok(Transition::new(parent.hash, header.hash, header.state_root))
}

/// Checks a proven transition for `block_id` against the local chain.
pub async fn verify_transition(
    l2: &impl L2Client,
    block_id: BlockId,
    proven: &Transition,
) -> Result<ProofVerdict, VerifierError> {
    let expected = derive_expected_transition(l2, block_id).await?;

    let mismatched = proven.mismatched_fields(&expected);
    if mismatched.is_empty() {
        debug!(%block_id, "proven transition matches local chain");
        return Ok(ProofVerdict::Valid);
    }

    debug!(%block_id, ?mismatched, "proven transition differs from local chain");
    Ok(ProofVerdict::Invalid {
        expected,
        mismatched,
    })
}
