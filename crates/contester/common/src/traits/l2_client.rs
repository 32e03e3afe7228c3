use async_trait::async_trait;
use thiserror::Error;

use crate::{BlockId, L2Header};

/// Read access to the locally synced L2 chain.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait L2Client: Send + Sync + 'static {
    /// Returns the canonical local header at `number`.
    ///
    /// `None` if the block has not been processed locally yet.
    async fn header_by_number(&self, number: BlockId) -> Result<Option<L2Header>, L2ClientError>;
}

/// Errors from [`L2Client`] calls.
#[derive(Debug, Error)]
pub enum L2ClientError {
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

impl L2ClientError {
    /// Creates a network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Creates an RPC error.
    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::Rpc(msg.into())
    }
}
