//! Commit-reveal coin flip deciding which peer attacks first.
//!
//! The challenger draws secret `A` and a nonce `N`, and sends only
//! `commit(A, N)`. The accepter answers with its own secret `B` in the
//! clear. The challenger then reveals `A` together with `N`, and the
//! accepter checks both against the commitment before trusting the flip.
//! Neither side can steer the parity of `A ^ B`: the challenger is bound to
//! `A` before seeing `B`, and the nonce keeps `A` out of reach of a search
//! over the commitment before the accepter has chosen `B`.

use rand::Rng;
use sha2::{Digest, Sha256};

/// A peer's private random value.
pub type Secret = u32;
/// Blinding value committed and revealed alongside the challenger's secret.
pub type Nonce = u64;

/// Number of 32-bit words in a [`Commitment`].
pub const COMMITMENT_WORDS: usize = 3;
/// One-way image of a secret and nonce: the leading 96 bits of the digest.
pub type Commitment = [u32; COMMITMENT_WORDS];

const COMMIT_DOMAIN: &[u8] = b"battleboats-commit-v2";

/// Outcome of the coin flip, from the challenger's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CoinFlip {
    /// The challenger attacks first.
    Heads,
    /// The accepter attacks first.
    Tails,
}

/// Draw a fresh secret, uniform over the whole `u32` domain.
pub fn generate_secret<R: Rng + ?Sized>(rng: &mut R) -> Secret {
    rng.random()
}

/// Draw a fresh commitment nonce.
pub fn generate_nonce<R: Rng + ?Sized>(rng: &mut R) -> Nonce {
    rng.random()
}

/// Commitment to `secret` blinded by `nonce`.
pub fn commit(secret: Secret, nonce: Nonce) -> Commitment {
    let digest = Sha256::new()
        .chain_update(COMMIT_DOMAIN)
        .chain_update(secret.to_be_bytes())
        .chain_update(nonce.to_be_bytes())
        .finalize();
    let mut words = [0u32; COMMITMENT_WORDS];
    for (word, chunk) in words.iter_mut().zip(digest.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// `true` iff `secret` and `nonce` are the opening of `commitment`.
pub fn verify_commitment(secret: Secret, nonce: Nonce, commitment: Commitment) -> bool {
    commit(secret, nonce) == commitment
}

/// Heads iff `a ^ b` has odd parity. Symmetric in its arguments.
pub fn decide_coin_flip(a: Secret, b: Secret) -> CoinFlip {
    if (a ^ b).count_ones() % 2 == 1 {
        CoinFlip::Heads
    } else {
        CoinFlip::Tails
    }
}

/// Which side of the handshake this agent plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Challenger,
    Accepter,
}

impl CoinFlip {
    /// Whether the holder of `role` attacks first under this outcome.
    pub fn attacks_first(self, role: Role) -> bool {
        matches!(
            (self, role),
            (CoinFlip::Heads, Role::Challenger) | (CoinFlip::Tails, Role::Accepter)
        )
    }
}

/// Per-session handshake data. Dropped once the flip is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Negotiation {
    role: Role,
    secret: Secret,
    /// Blinding nonce; only the challenger commits, so it is zero for an accepter.
    nonce: Nonce,
    /// Commitment received in the peer's challenge; accepter only.
    peer_commitment: Option<Commitment>,
}

impl Negotiation {
    /// Challenger side, committing to `secret` under `nonce`.
    pub fn challenge(secret: Secret, nonce: Nonce) -> Self {
        Self {
            role: Role::Challenger,
            secret,
            nonce,
            peer_commitment: None,
        }
    }

    /// Accepter side, remembering the challenger's commitment.
    pub fn accept(secret: Secret, peer_commitment: Commitment) -> Self {
        Self {
            role: Role::Accepter,
            secret,
            nonce: 0,
            peer_commitment: Some(peer_commitment),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn secret(&self) -> Secret {
        self.secret
    }

    pub fn nonce(&self) -> Nonce {
        self.nonce
    }

    pub fn commitment(&self) -> Commitment {
        commit(self.secret, self.nonce)
    }

    pub fn peer_commitment(&self) -> Option<Commitment> {
        self.peer_commitment
    }

    /// Check the challenger's revealed opening against its commitment.
    pub fn verify_reveal(&self, secret: Secret, nonce: Nonce) -> bool {
        self.peer_commitment
            .is_some_and(|c| verify_commitment(secret, nonce, c))
    }

    /// Flip outcome given the peer's secret.
    pub fn flip(&self, peer_secret: Secret) -> CoinFlip {
        decide_coin_flip(self.secret, peer_secret)
    }
}
