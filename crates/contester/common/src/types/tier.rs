use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Proof tiers accepted by the settlement contract, weakest first.
///
/// The discriminant is the on-chain tier id. Variants are declared in
/// ascending strength, so the derived ordering is the "higher than" relation
/// used when escalating a contest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ProofTier {
    /// No proof, contestable by anyone during the cooldown window.
    Optimistic = 100,
    /// SGX attestation.
    Sgx = 200,
    /// SGX attestation combined with a zkVM proof.
    SgxAndZkVm = 300,
    /// Guardian multisig, final.
    Guardian = 1000,
}

impl ProofTier {
    /// All tiers in ascending strength.
    pub const ALL: [ProofTier; 4] = [
        ProofTier::Optimistic,
        ProofTier::Sgx,
        ProofTier::SgxAndZkVm,
        ProofTier::Guardian,
    ];

    /// On-chain tier id.
    pub fn id(&self) -> u16 {
        (*self).into()
    }

    /// Returns the weakest tier that is strictly stronger than this one.
    ///
    /// `None` for [`ProofTier::Guardian`], which cannot be contested.
    pub fn next_higher(&self) -> Option<ProofTier> {
        Self::ALL.into_iter().find(|tier| tier > self)
    }

    /// Returns true if `self` is strictly stronger than `other`.
    pub fn is_higher_than(&self, other: &ProofTier) -> bool {
        self > other
    }
}

impl fmt::Display for ProofTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProofTier::Optimistic => "optimistic",
            ProofTier::Sgx => "sgx",
            ProofTier::SgxAndZkVm => "sgx_zkvm",
            ProofTier::Guardian => "guardian",
        };
        write!(f, "{name}")
    }
}
