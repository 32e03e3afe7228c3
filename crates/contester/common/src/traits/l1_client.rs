use async_trait::async_trait;
use thiserror::Error;

use crate::{BlockId, BlockProposedEvent, L1Height, ProposedBlockInfo};

/// Read access to the settlement contract on the base chain.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait L1Client: Send + Sync + 'static {
    /// Returns the contract's record of a proposed block.
    ///
    /// Fails with [`L1ClientError::UnknownBlock`] if the contract has no such
    /// block.
    async fn get_block(&self, block_id: BlockId) -> Result<ProposedBlockInfo, L1ClientError>;

    /// Returns all `BlockProposed` events emitted in the L1 block at `l1_height`.
    ///
    /// An empty vector means the L1 block holds no proposals.
    async fn block_proposed_events(
        &self,
        l1_height: L1Height,
    ) -> Result<Vec<BlockProposedEvent>, L1ClientError>;
}

/// Errors from [`L1Client`] calls. All are treated as transient by callers.
#[derive(Debug, Error)]
pub enum L1ClientError {
    /// The contract does not know the block.
    #[error("block {0} unknown to the settlement contract")]
    UnknownBlock(BlockId),

    /// Network-related error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// RPC call failed.
    #[error("rpc error: {0}")]
    Rpc(String),

    /// Other unspecified error.
    #[error(transparent)]
    Other(#[from] eyre::Error),
}

impl L1ClientError {
    /// Creates a network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Creates an RPC error.
    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::Rpc(msg.into())
    }
}
