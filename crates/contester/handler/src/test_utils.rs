use std::collections::HashMap;

use alloy_primitives::{Address, B256, U256};
use contester_common::{
    BlockId, BlockProposedEvent, L1Height, L2Header, MockL2Client, ProofTier, ProposalMetadata,
    ProposedBlockInfo, Transition, TransitionProvedEvent,
};

pub(crate) fn make_hash(byte: u8) -> B256 {
    B256::repeat_byte(byte)
}

pub(crate) fn make_header(number: u64, hash: u8, parent_hash: u8, state_root: u8) -> L2Header {
    L2Header {
        number: BlockId::new(number),
        hash: make_hash(hash),
        parent_hash: make_hash(parent_hash),
        state_root: make_hash(state_root),
    }
}

pub(crate) fn make_event(
    block_id: u64,
    transition: Transition,
    tier: ProofTier,
) -> TransitionProvedEvent {
    TransitionProvedEvent {
        block_id: BlockId::new(block_id),
        transition,
        prover: Address::repeat_byte(0x77),
        validity_bond: U256::from(1_000u64),
        tier,
    }
}

pub(crate) fn make_meta(block_id: u64, l1_height: L1Height, min_tier: ProofTier) -> ProposalMetadata {
    ProposalMetadata {
        id: BlockId::new(block_id),
        l1_hash: make_hash(0x11),
        l1_height: l1_height.saturating_sub(1),
        difficulty: make_hash(0x22),
        blob_hash: make_hash(0x33),
        extra_data: B256::ZERO,
        deposits_hash: B256::ZERO,
        coinbase: Address::repeat_byte(0x44),
        gas_limit: 15_000_000,
        timestamp: 1_700_000_000 + block_id,
        min_tier,
        blob_used: true,
        parent_meta_hash: make_hash(0x55),
        sender: Address::repeat_byte(0x66),
    }
}

pub(crate) fn make_proposed_event(
    block_id: u64,
    l1_height: L1Height,
    min_tier: ProofTier,
) -> BlockProposedEvent {
    BlockProposedEvent {
        block_id: BlockId::new(block_id),
        l1_height,
        meta: make_meta(block_id, l1_height, min_tier),
    }
}

pub(crate) fn make_block_info(block_id: u64, proposed_in: L1Height) -> ProposedBlockInfo {
    ProposedBlockInfo {
        block_id: BlockId::new(block_id),
        meta_hash: make_hash(0x88),
        assigned_prover: Address::repeat_byte(0x99),
        proposed_at: 1_700_000_000 + block_id,
        proposed_in,
    }
}

/// L2 client backed by a fixed set of local headers.
pub(crate) fn mock_l2_chain(headers: Vec<L2Header>) -> MockL2Client {
    let chain: HashMap<BlockId, L2Header> = headers.into_iter().map(|h| (h.number, h)).collect();

    let mut l2 = MockL2Client::new();
    l2.expect_header_by_number()
        .returning(move |number| Ok(chain.get(&number).copied()));
    l2
}

/// Local chain where block `n` has hash byte `n`, parent byte `n - 1` and state root byte
/// `n + 0x80`, for all `n` in `1..=tip`.
pub(crate) fn linear_chain(tip: u8) -> MockL2Client {
    mock_l2_chain((1..=tip).map(linear_header).collect())
}

pub(crate) fn linear_header(n: u8) -> L2Header {
    make_header(n as u64, n, n - 1, n.wrapping_add(0x80))
}

/// The transition [`linear_chain`] expects for block `n`.
pub(crate) fn linear_transition(n: u8) -> Transition {
    Transition::new(make_hash(n - 1), make_hash(n), make_hash(n.wrapping_add(0x80)))
}
