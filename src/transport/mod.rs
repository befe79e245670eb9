use crate::protocol::{Message, TransportErrorKind};

/// Boundary between an agent and the link to its peer.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Deliver `msg` to the peer. Returns once the message has left this side.
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    /// Next message from the peer.
    ///
    /// A corrupted frame fails with a [`FrameError`]; any other error means
    /// the link itself is gone.
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

/// A frame arrived but could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameError {
    pub kind: TransportErrorKind,
}

impl FrameError {
    pub fn new(kind: TransportErrorKind) -> Self {
        Self { kind }
    }
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Corrupted frame: {}", self.kind)
    }
}

impl std::error::Error for FrameError {}

pub mod in_memory;
pub mod line;
