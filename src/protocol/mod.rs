//! Messages exchanged with the peer and events consumed by the agent.

use crate::engine::common::AttackOutcome;
use crate::engine::negotiation::{Commitment, Nonce, Secret};

#[cfg(feature = "std")]
pub mod frame;

/// Messages exchanged between two agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    /// Nothing to send.
    #[default]
    None,
    /// Opens a game, binding the challenger to its secret.
    Challenge { commitment: Commitment },
    /// Accepts a challenge, disclosing the accepter's secret.
    Accept { secret: Secret },
    /// Opens the challenger's commitment.
    Reveal { secret: Secret, nonce: Nonce },
    /// Attack at a square.
    Shot { row: u8, col: u8 },
    /// Outcome of the peer's shot at a square.
    Result {
        row: u8,
        col: u8,
        outcome: AttackOutcome,
    },
}

impl Message {
    pub fn is_none(&self) -> bool {
        matches!(self, Message::None)
    }
}

/// Framing faults reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportErrorKind {
    BadChecksum,
    PayloadLengthExceeded,
    ChecksumLengthExceeded,
    ChecksumLengthInsufficient,
    InvalidMessageType,
    ParseFailure,
}

impl TransportErrorKind {
    /// Status line shown when this fault ends a game.
    pub fn status_text(self) -> &'static str {
        match self {
            TransportErrorKind::BadChecksum => "ERROR: BAD CHECKSUM",
            TransportErrorKind::PayloadLengthExceeded => "ERROR: PAYLOAD LENGTH EXCEEDED",
            TransportErrorKind::ChecksumLengthExceeded => "ERROR: CHECKSUM LENGTH EXCEEDED",
            TransportErrorKind::ChecksumLengthInsufficient => {
                "ERROR: CHECKSUM LENGTH INSUFFICIENT"
            }
            TransportErrorKind::InvalidMessageType => "ERROR: INVALID MESSAGE TYPE",
            TransportErrorKind::ParseFailure => "ERROR: MESSAGE PARSE FAILURE",
        }
    }
}

impl core::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.status_text())
    }
}

/// Inputs to [`Agent::handle_event`](crate::engine::agent::Agent::handle_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Local request to open a game.
    StartRequested,
    /// Local request to abandon everything and return to idle.
    ResetRequested,
    ChallengeReceived { commitment: Commitment },
    ChallengeAccepted { secret: Secret },
    RevealReceived { secret: Secret, nonce: Nonce },
    ShotReceived { row: u8, col: u8 },
    ResultReceived {
        row: u8,
        col: u8,
        outcome: AttackOutcome,
    },
    /// The transport finished sending the last outbound message.
    MessageSent,
    TransportError(TransportErrorKind),
}

impl Event {
    /// The event raised when `msg` arrives from the peer, if any.
    pub fn from_peer(msg: Message) -> Option<Event> {
        match msg {
            Message::None => None,
            Message::Challenge { commitment } => Some(Event::ChallengeReceived { commitment }),
            Message::Accept { secret } => Some(Event::ChallengeAccepted { secret }),
            Message::Reveal { secret, nonce } => Some(Event::RevealReceived { secret, nonce }),
            Message::Shot { row, col } => Some(Event::ShotReceived { row, col }),
            Message::Result { row, col, outcome } => {
                Some(Event::ResultReceived { row, col, outcome })
            }
        }
    }
}
