//! Contests proven transitions that disagree with the local L2 chain.
//!
//! Flow for one `TransitionProved` event:
//!
//! 1. [`TransitionProvedHandler`] records the event and, in contester mode, recomputes the expected
//!    transition from the local chain ([`verify_transition`]).
//! 2. On mismatch it looks up where the block was proposed and rebuilds the original proposal
//!    metadata ([`resolve_proposal_metadata`]).
//! 3. A [`ContestRequest`](contester_common::ContestRequest) with a stronger tier is handed to the
//!    submission pipeline through the bounded [`contest_queue`].
//!
//! [`transition_proved_task`] drives the handler from an event channel with retries, and
//! [`ContesterBuilder`] wires everything from a [`ContesterConfig`](contester_config::ContesterConfig).

mod builder;
mod error;
mod handler;
mod metadata;
pub mod metrics;
mod queue;
mod task;
#[cfg(test)]
pub(crate) mod test_utils;
mod verifier;

pub use builder::{ContesterBuilder, ContesterHandle, EventSubmitError};
pub use error::HandlerError;
pub use handler::{select_contest_tier, HandleOutcome, TransitionProvedHandler};
pub use metadata::{resolve_proposal_metadata, MetadataError};
pub use queue::{contest_queue, ContestReceiver, ContestSender, DispatchError};
pub use task::{transition_proved_task, DispatchCtx};
pub use verifier::{
    derive_expected_transition, verify_transition, IncompleteReason, ProofVerdict, VerifierError,
};
