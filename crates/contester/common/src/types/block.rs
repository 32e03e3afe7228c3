use std::fmt;

use serde::{Deserialize, Serialize};

/// Height of a block on the base chain (L1).
pub type L1Height = u64;

/// Identifier of a proposed L2 block within the rollup's block sequence.
///
/// Assigned by the settlement contract at proposal time and never reused.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockId(u64);

impl BlockId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the id of the immediately preceding block, `None` for genesis.
    pub fn parent(&self) -> Option<BlockId> {
        self.0.checked_sub(1).map(BlockId)
    }
}

impl From<u64> for BlockId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<BlockId> for u64 {
    fn from(value: BlockId) -> Self {
        value.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
