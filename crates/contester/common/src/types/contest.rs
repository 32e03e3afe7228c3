use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BlockId, L1Height, ProofTier, ProposalMetadata};

/// Errors raised when a contest request would break its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContestRequestError {
    /// The requested tier does not escalate over the contested one.
    #[error("contest tier {requested} is not higher than contested tier {contested}")]
    TierNotHigher {
        contested: ProofTier,
        requested: ProofTier,
    },

    /// The requested tier is weaker than what the block's proposal allows.
    #[error("contest tier {requested} is below the block's minimum tier {min_tier}")]
    BelowMinTier {
        min_tier: ProofTier,
        requested: ProofTier,
    },

    /// The metadata belongs to a different block.
    #[error("metadata is for block {meta_id}, expected block {block_id}")]
    MetadataMismatch { block_id: BlockId, meta_id: BlockId },
}

/// Request to contest a proven transition with a stronger proof.
///
/// Handed to the submission pipeline by value; immutable once built. Deserializing goes
/// through [`ContestRequest::new`], so a decoded request upholds the same invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawContestRequest")]
pub struct ContestRequest {
    block_id: BlockId,
    proposed_in: L1Height,
    parent_hash: B256,
    meta: ProposalMetadata,
    contested_tier: ProofTier,
    tier: ProofTier,
}

/// Unchecked wire form of [`ContestRequest`].
#[derive(Deserialize)]
struct RawContestRequest {
    block_id: BlockId,
    proposed_in: L1Height,
    parent_hash: B256,
    meta: ProposalMetadata,
    contested_tier: ProofTier,
    tier: ProofTier,
}

impl TryFrom<RawContestRequest> for ContestRequest {
    type Error = ContestRequestError;

    fn try_from(raw: RawContestRequest) -> Result<Self, Self::Error> {
        Self::new(
            raw.block_id,
            raw.proposed_in,
            raw.parent_hash,
            raw.meta,
            raw.contested_tier,
            raw.tier,
        )
    }
}

impl ContestRequest {
    /// Builds a contest request against a transition proven at `contested_tier`.
    ///
    /// Fails unless `tier` is strictly higher than `contested_tier`, at least
    /// the proposal's minimum tier, and `meta` describes `block_id`.
    pub fn new(
        block_id: BlockId,
        proposed_in: L1Height,
        parent_hash: B256,
        meta: ProposalMetadata,
        contested_tier: ProofTier,
        tier: ProofTier,
    ) -> Result<Self, ContestRequestError> {
        if !tier.is_higher_than(&contested_tier) {
            return Err(ContestRequestError::TierNotHigher {
                contested: contested_tier,
                requested: tier,
            });
        }
        if tier < meta.min_tier {
            return Err(ContestRequestError::BelowMinTier {
                min_tier: meta.min_tier,
                requested: tier,
            });
        }
        if meta.id != block_id {
            return Err(ContestRequestError::MetadataMismatch {
                block_id,
                meta_id: meta.id,
            });
        }

        Ok(Self {
            block_id,
            proposed_in,
            parent_hash,
            meta,
            contested_tier,
            tier,
        })
    }

    pub fn block_id(&self) -> BlockId {
        self.block_id
    }

    pub fn proposed_in(&self) -> L1Height {
        self.proposed_in
    }

    pub fn parent_hash(&self) -> B256 {
        self.parent_hash
    }

    pub fn meta(&self) -> &ProposalMetadata {
        &self.meta
    }

    /// Tier of the proof being contested.
    pub fn contested_tier(&self) -> ProofTier {
        self.contested_tier
    }

    pub fn tier(&self) -> ProofTier {
        self.tier
    }
}
