use std::time::Duration;

use contester_common::{ContestRequestError, L1ClientError, ProofTier};
use thiserror::Error;

use crate::{DispatchError, MetadataError, VerifierError};

/// Errors that can occur while handling a transition-proved event.
///
/// None of these means the proven transition is valid.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The transition could not be verified against the local chain.
    #[error("verification failed: {0}")]
    Verification(#[from] VerifierError),

    /// Reading the proposed block record failed.
    #[error("L1 client error: {0}")]
    L1Client(#[from] L1ClientError),

    /// The original proposal metadata could not be rebuilt.
    #[error("metadata resolution failed: {0}")]
    Metadata(#[from] MetadataError),

    /// The proven tier is already the strongest one.
    #[error("no tier above {0} to contest with")]
    NoHigherTier(ProofTier),

    /// The contest request would be rejected by the contract.
    #[error("invalid contest request: {0}")]
    InvalidContest(#[from] ContestRequestError),

    /// The request could not be handed to the submission pipeline.
    #[error("dispatch failed: {0}")]
    Dispatch(DispatchError),

    /// The invocation was cancelled before completing.
    #[error("handler cancelled")]
    Cancelled,

    /// A single attempt ran past its deadline.
    #[error("handler timed out after {0:?}")]
    Timeout(Duration),
}

impl From<DispatchError> for HandlerError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Cancelled => HandlerError::Cancelled,
            DispatchError::Closed => HandlerError::Dispatch(err),
        }
    }
}

impl HandlerError {
    /// Returns true if handling the same event again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            HandlerError::NoHigherTier(_)
            | HandlerError::InvalidContest(_)
            | HandlerError::Dispatch(_)
            | HandlerError::Cancelled => false,

            HandlerError::Metadata(err) => err.is_retryable(),

            // Chain reads fail transiently and the local chain catches up.
            HandlerError::Verification(_) | HandlerError::L1Client(_) | HandlerError::Timeout(_) => {
                true
            }
        }
    }
}
