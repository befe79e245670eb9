use crate::{
    engine::agent::{Agent, AgentState, EndReason, Step},
    protocol::{Event, Message},
    transport::{FrameError, Transport},
};

/// Drives one [`Agent`] over one transport until the game ends.
pub struct AgentNode {
    agent: Agent,
    transport: Box<dyn Transport>,
    on_redraw: Option<Box<dyn FnMut(&Agent) + Send>>,
}

impl AgentNode {
    pub fn new(agent: Agent, transport: Box<dyn Transport>) -> Self {
        Self {
            agent,
            transport,
            on_redraw: None,
        }
    }

    /// Call `f` whenever the agent asks for the display to be refreshed.
    pub fn with_redraw(mut self, f: impl FnMut(&Agent) + Send + 'static) -> Self {
        self.on_redraw = Some(Box::new(f));
        self
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn into_agent(self) -> Agent {
        self.agent
    }

    fn dispatch(&mut self, event: Event) -> Message {
        let Step { message, redraw } = self.agent.handle_event(event);
        if redraw {
            if let Some(f) = self.on_redraw.as_mut() {
                f(&self.agent);
            }
        }
        message
    }

    /// Send `message` and everything the agent produces in reply to the
    /// send confirmations.
    async fn flush(&mut self, mut message: Message) -> anyhow::Result<()> {
        while !message.is_none() {
            self.transport.send(message).await?;
            message = self.dispatch(Event::MessageSent);
        }
        Ok(())
    }

    /// Play one game. The initiator opens with a challenge; the other side
    /// waits for one. Returns why the game ended.
    pub async fn run(&mut self, initiator: bool) -> anyhow::Result<EndReason> {
        if initiator {
            let opening = self.dispatch(Event::StartRequested);
            self.flush(opening).await?;
        }

        loop {
            if self.agent.state() == AgentState::EndScreen {
                break;
            }
            let event = match self.transport.recv().await {
                Ok(msg) => match Event::from_peer(msg) {
                    Some(event) => event,
                    None => continue,
                },
                Err(e) => match e.downcast_ref::<FrameError>().map(|fe| fe.kind) {
                    Some(kind) => {
                        log::warn!("[AgentNode] {}", e);
                        Event::TransportError(kind)
                    }
                    None => {
                        log::error!(
                            "[AgentNode] link lost in {:?}: {}",
                            self.agent.state(),
                            e
                        );
                        return Err(e);
                    }
                },
            };
            let reply = self.dispatch(event);
            self.flush(reply).await?;
        }

        self.agent
            .end_reason()
            .ok_or_else(|| anyhow::anyhow!("Game ended without a reason"))
    }

    /// Number of shots this side fired.
    pub fn turn_count(&self) -> u32 {
        self.agent.turn_count()
    }
}
