use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::protocol::Message;
use crate::transport::Transport;

/// Lossless loopback link between two agents in one process.
///
/// Messages cross as values, so no framing fault can ever be reported.
pub struct InMemoryTransport {
    outbound: UnboundedSender<Message>,
    inbound: UnboundedReceiver<Message>,
}

impl InMemoryTransport {
    /// Two transports wired to each other.
    pub fn pair() -> (Self, Self) {
        let (left_tx, right_rx) = unbounded_channel();
        let (right_tx, left_rx) = unbounded_channel();
        (
            Self {
                outbound: left_tx,
                inbound: left_rx,
            },
            Self {
                outbound: right_tx,
                inbound: right_rx,
            },
        )
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        log::trace!("loopback send {:?}", msg);
        self.outbound
            .send(msg)
            .map_err(|_| anyhow::anyhow!("Channel closed by peer"))
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        self.inbound
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Channel closed by peer"))
    }
}
