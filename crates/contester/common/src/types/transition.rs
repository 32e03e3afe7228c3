use std::fmt;

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{BlockId, ProofTier};

/// A block's claimed execution result: its parent linkage, its own hash and the
/// resulting state root.
///
/// The same shape is used for the value proven on L1 and for the value
/// recomputed from the local L2 view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub parent_hash: B256,
    pub block_hash: B256,
    pub state_root: B256,
}

impl Transition {
    pub fn new(parent_hash: B256, block_hash: B256, state_root: B256) -> Self {
        Self {
            parent_hash,
            block_hash,
            state_root,
        }
    }

    /// Lists the fields in which `self` differs from `other`.
    ///
    /// Empty iff the transitions are equal.
    pub fn mismatched_fields(&self, other: &Transition) -> Vec<TransitionField> {
        let mut fields = Vec::new();
        if self.parent_hash != other.parent_hash {
            fields.push(TransitionField::ParentHash);
        }
        if self.block_hash != other.block_hash {
            fields.push(TransitionField::BlockHash);
        }
        if self.state_root != other.state_root {
            fields.push(TransitionField::StateRoot);
        }
        fields
    }
}

/// One of the three components of a [`Transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionField {
    ParentHash,
    BlockHash,
    StateRoot,
}

impl fmt::Display for TransitionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransitionField::ParentHash => "parent_hash",
            TransitionField::BlockHash => "block_hash",
            TransitionField::StateRoot => "state_root",
        };
        write!(f, "{name}")
    }
}

/// Notification that some prover submitted a proof for an L2 block on L1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionProvedEvent {
    /// Block the proof is for.
    pub block_id: BlockId,
    /// The proven transition.
    pub transition: Transition,
    /// Address that submitted the proof.
    pub prover: Address,
    /// Bond posted with the proof.
    pub validity_bond: U256,
    /// Tier of the submitted proof.
    pub tier: ProofTier,
}
