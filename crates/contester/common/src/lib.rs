//! Common traits and types shared by the transition contester components.

mod traits;
mod types;

#[cfg(feature = "test-utils")]
pub use traits::{l1_client::MockL1Client, l2_client::MockL2Client};
pub use traits::{
    l1_client::{L1Client, L1ClientError},
    l2_client::{L2Client, L2ClientError},
};
pub use types::{
    block::{BlockId, L1Height},
    contest::{ContestRequest, ContestRequestError},
    proposal::{BlockProposedEvent, L2Header, ProposalMetadata, ProposedBlockInfo},
    tier::ProofTier,
    transition::{Transition, TransitionField, TransitionProvedEvent},
};
