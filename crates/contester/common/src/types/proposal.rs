use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::{BlockId, L1Height, ProofTier};

/// Metadata committed on L1 when a block was proposed.
///
/// This is the input a prover needs to regenerate a proof for the block, so a
/// contest must carry the exact original value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalMetadata {
    pub id: BlockId,
    pub l1_hash: B256,
    pub l1_height: L1Height,
    pub difficulty: B256,
    pub blob_hash: B256,
    pub extra_data: B256,
    pub deposits_hash: B256,
    pub coinbase: Address,
    pub gas_limit: u32,
    pub timestamp: u64,
    /// Weakest tier the contract accepts for this block.
    pub min_tier: ProofTier,
    pub blob_used: bool,
    pub parent_meta_hash: B256,
    pub sender: Address,
}

/// Historical `BlockProposed` record emitted by the settlement contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockProposedEvent {
    pub block_id: BlockId,
    /// L1 block the proposal transaction was included in.
    pub l1_height: L1Height,
    pub meta: ProposalMetadata,
}

/// On-chain record of a proposed block, as returned by the contract's
/// `getBlock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedBlockInfo {
    pub block_id: BlockId,
    pub meta_hash: B256,
    pub assigned_prover: Address,
    /// Timestamp of the proposal.
    pub proposed_at: u64,
    /// L1 height the block was proposed in.
    pub proposed_in: L1Height,
}

/// Header fields of a locally executed L2 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2Header {
    pub number: BlockId,
    pub hash: B256,
    pub parent_hash: B256,
    pub state_root: B256,
}
