//! Event-driven session for one side of a game.
//!
//! An [`Agent`] owns everything a session needs: its random source, the
//! handshake state and both boards. Callers feed it one [`Event`] at a time
//! through [`Agent::handle_event`] and forward the returned message to the
//! peer. Events that do not fit the current state are dropped without a
//! reply, so duplicates from a noisy link cannot desynchronise the game.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::ai;
use super::board::{self, Board};
use super::negotiation::{generate_nonce, generate_secret, Negotiation, Role, Secret};
use crate::protocol::{Event, Message, TransportErrorKind};

pub const NEW_GAME_TEXT: &str = "Press start to begin a new game";
pub const CHEAT_TEXT: &str = "Cheating detected: sending to end screen.";
pub const DEFEAT_TEXT: &str = "Defeated! You lost.";
pub const VICTORY_TEXT: &str = "Victory! You won.";
pub const PLACEMENT_FAILED_TEXT: &str = "ERROR: UNABLE TO PLACE SHIPS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    Idle,
    /// Sent a challenge, waiting for the peer to accept.
    Challenging,
    /// Accepted a challenge, waiting for the reveal.
    Accepting,
    /// Our turn; waiting for the transport to flush before shooting.
    WaitingToSend,
    /// Shot sent, waiting for its result.
    Attacking,
    /// Waiting for the peer's shot.
    Defending,
    EndScreen,
}

/// Whose turn the display should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    None,
    Mine,
    Theirs,
}

/// Why a session reached the end screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum EndReason {
    Victory,
    Defeat,
    CheatDetected,
    Transport(TransportErrorKind),
    PlacementFailed,
}

impl EndReason {
    pub fn status_text(self) -> &'static str {
        match self {
            EndReason::Victory => VICTORY_TEXT,
            EndReason::Defeat => DEFEAT_TEXT,
            EndReason::CheatDetected => CHEAT_TEXT,
            EndReason::Transport(kind) => kind.status_text(),
            EndReason::PlacementFailed => PLACEMENT_FAILED_TEXT,
        }
    }
}

/// What one event produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Message to hand to the transport; [`Message::None`] when there is nothing to send.
    pub message: Message,
    /// The display should be refreshed from [`Agent::view`].
    pub redraw: bool,
}

impl Step {
    fn ignored() -> Self {
        Self {
            message: Message::None,
            redraw: false,
        }
    }
}

/// Snapshot handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub own: &'a Board,
    pub knowledge: &'a Board,
    pub turn: Turn,
    pub turn_count: u32,
    pub status: Option<&'static str>,
}

pub struct Agent {
    rng: SmallRng,
    state: AgentState,
    negotiation: Option<Negotiation>,
    own: Board,
    knowledge: Board,
    turn: Turn,
    turn_count: u32,
    /// Square of the shot awaiting its result.
    pending_shot: Option<(u8, u8)>,
    end: Option<EndReason>,
    #[cfg(test)]
    pinned_secret: Option<Secret>,
}

impl Agent {
    /// A fresh idle session drawing randomness from `rng`.
    pub fn new(rng: SmallRng) -> Self {
        Self {
            rng,
            state: AgentState::Idle,
            negotiation: None,
            own: Board::new_own(),
            knowledge: Board::new_knowledge(),
            turn: Turn::None,
            turn_count: 0,
            pending_shot: None,
            end: None,
            #[cfg(test)]
            pinned_secret: None,
        }
    }

    /// Convenience constructor for reproducible sessions.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn own_board(&self) -> &Board {
        &self.own
    }

    pub fn knowledge_board(&self) -> &Board {
        &self.knowledge
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Number of shots this side has fired.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end
    }

    /// Status line for the current state, if any.
    pub fn status_text(&self) -> Option<&'static str> {
        match (self.state, self.end) {
            (AgentState::Idle, _) => Some(NEW_GAME_TEXT),
            (_, Some(reason)) => Some(reason.status_text()),
            _ => None,
        }
    }

    pub fn view(&self) -> FieldView<'_> {
        FieldView {
            own: &self.own,
            knowledge: &self.knowledge,
            turn: self.turn,
            turn_count: self.turn_count,
            status: self.status_text(),
        }
    }

    /// Return to startup defaults, discarding handshake and board state.
    pub fn reset(&mut self) {
        self.state = AgentState::Idle;
        self.negotiation = None;
        board::initialize(&mut self.own, &mut self.knowledge);
        self.turn = Turn::None;
        self.turn_count = 0;
        self.pending_shot = None;
        self.end = None;
    }

    /// Process one event to completion.
    pub fn handle_event(&mut self, event: Event) -> Step {
        let before = self.state;
        match self.transition(event) {
            Some(message) => {
                log::debug!(
                    "{:?} -> {:?} on {:?}, sending {:?}",
                    before,
                    self.state,
                    event,
                    message
                );
                Step {
                    message,
                    redraw: true,
                }
            }
            None => {
                log::trace!("ignoring {:?} in {:?}", event, before);
                Step::ignored()
            }
        }
    }

    /// Apply the transition table. `None` means the event does not apply in
    /// the current state.
    fn transition(&mut self, event: Event) -> Option<Message> {
        use AgentState::*;

        match (self.state, event) {
            (_, Event::ResetRequested) => {
                self.reset();
                Some(Message::None)
            }
            (EndScreen, _) => None,
            (_, Event::TransportError(kind)) => Some(self.finish(EndReason::Transport(kind))),

            (Idle, Event::StartRequested) => {
                let secret = self.draw_secret();
                let negotiation = Negotiation::challenge(secret, generate_nonce(&mut self.rng));
                Some(self.open_game(negotiation, Challenging, |n| Message::Challenge {
                    commitment: n.commitment(),
                }))
            }
            (Idle, Event::ChallengeReceived { commitment }) => {
                let negotiation = Negotiation::accept(self.draw_secret(), commitment);
                Some(self.open_game(negotiation, Accepting, |n| Message::Accept {
                    secret: n.secret(),
                }))
            }
            (Challenging, Event::ChallengeAccepted { secret }) => {
                let negotiation = self.negotiation.take()?;
                let flip = negotiation.flip(secret);
                log::info!("coin flip: {:?}", flip);
                if flip.attacks_first(Role::Challenger) {
                    self.state = WaitingToSend;
                    self.turn = Turn::Mine;
                } else {
                    self.defend();
                }
                Some(Message::Reveal {
                    secret: negotiation.secret(),
                    nonce: negotiation.nonce(),
                })
            }
            (Accepting, Event::RevealReceived { secret, nonce }) => {
                let negotiation = self.negotiation.take()?;
                if !negotiation.verify_reveal(secret, nonce) {
                    log::warn!("revealed secret does not match the challenge commitment");
                    return Some(self.finish(EndReason::CheatDetected));
                }
                let flip = negotiation.flip(secret);
                log::info!("coin flip: {:?}", flip);
                if flip.attacks_first(Role::Accepter) {
                    Some(self.fire())
                } else {
                    self.defend();
                    Some(Message::None)
                }
            }
            (Defending, Event::ShotReceived { row, col }) => {
                let outcome = match self.own.resolve_incoming_attack(row as usize, col as usize) {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        log::warn!("rejecting shot: {}", e);
                        return Some(self.finish(EndReason::Transport(
                            TransportErrorKind::ParseFailure,
                        )));
                    }
                };
                let reply = Message::Result { row, col, outcome };
                if self.own.all_ships_sunk() {
                    self.finish(EndReason::Defeat);
                } else {
                    self.state = WaitingToSend;
                    self.turn = Turn::Mine;
                }
                Some(reply)
            }
            (WaitingToSend, Event::MessageSent) => Some(self.fire()),
            // A result for any other square is not an answer to our shot.
            (Attacking, Event::ResultReceived { row, col, outcome })
                if self.pending_shot == Some((row, col)) =>
            {
                self.pending_shot = None;
                if let Err(e) =
                    self.knowledge
                        .apply_outgoing_result(row as usize, col as usize, outcome)
                {
                    log::warn!("rejecting result: {}", e);
                    return Some(self.finish(EndReason::Transport(
                        TransportErrorKind::ParseFailure,
                    )));
                }
                if self.knowledge.all_ships_sunk() {
                    Some(self.finish(EndReason::Victory))
                } else {
                    self.defend();
                    Some(Message::None)
                }
            }

            // Anything else is a guard violation and is dropped.
            (_, _) => None,
        }
    }

    /// Set up boards for a new game and record the handshake.
    fn open_game(
        &mut self,
        negotiation: Negotiation,
        next: AgentState,
        opening: impl FnOnce(&Negotiation) -> Message,
    ) -> Message {
        board::initialize(&mut self.own, &mut self.knowledge);
        self.turn_count = 0;
        if let Err(e) = ai::auto_place_all_ships(&mut self.rng, &mut self.own) {
            log::error!("ship placement failed: {}", e);
            return self.finish(EndReason::PlacementFailed);
        }
        let message = opening(&negotiation);
        self.negotiation = Some(negotiation);
        self.state = next;
        message
    }

    fn draw_secret(&mut self) -> Secret {
        #[cfg(test)]
        let pinned = self.pinned_secret.take();
        #[cfg(not(test))]
        let pinned = None;
        pinned.unwrap_or_else(|| generate_secret(&mut self.rng))
    }

    fn defend(&mut self) {
        self.state = AgentState::Defending;
        self.turn = Turn::Theirs;
    }

    /// Pick a target and shoot at it.
    fn fire(&mut self) -> Message {
        match ai::decide_next_guess(&mut self.rng, &self.knowledge) {
            Ok((row, col)) => {
                let (row, col) = (row as u8, col as u8);
                self.turn_count += 1;
                self.state = AgentState::Attacking;
                self.turn = Turn::Mine;
                self.pending_shot = Some((row, col));
                Message::Shot { row, col }
            }
            // Every square resolved with ships still afloat: the peer's results were false.
            Err(e) => {
                log::warn!("unable to pick a target: {}", e);
                self.finish(EndReason::CheatDetected)
            }
        }
    }

    /// Move to the end screen. Always yields no outbound message.
    fn finish(&mut self, reason: EndReason) -> Message {
        log::info!("game over: {}", reason.status_text());
        self.state = AgentState::EndScreen;
        self.negotiation = None;
        self.pending_shot = None;
        self.turn = Turn::None;
        self.end = Some(reason);
        Message::None
    }
}
