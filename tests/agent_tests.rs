use std::collections::VecDeque;

use battleboats::agent::{CHEAT_TEXT, DEFEAT_TEXT, NEW_GAME_TEXT, VICTORY_TEXT};
use battleboats::{
    commit, Agent, AgentState, AttackOutcome, Board, EndReason, Event, Message, SquareState,
    TransportErrorKind, Turn, FIELD_COLS, FIELD_ROWS, TOTAL_SHIP_CELLS,
};

/// Two agents wired back to back. Every outbound message is delivered to
/// the peer and followed by a send confirmation to the sender.
struct Duel {
    agents: [Agent; 2],
    queue: VecDeque<(usize, Event)>,
}

impl Duel {
    fn new(seed: u64) -> Self {
        Self {
            agents: [Agent::from_seed(seed), Agent::from_seed(seed ^ 0x5eed)],
            queue: VecDeque::new(),
        }
    }

    fn start(&mut self) {
        self.apply(0, Event::StartRequested);
    }

    fn apply(&mut self, who: usize, event: Event) {
        let step = self.agents[who].handle_event(event);
        if let Some(peer_event) = Event::from_peer(step.message) {
            self.queue.push_back((1 - who, peer_event));
            self.queue.push_back((who, Event::MessageSent));
        }
    }

    /// Handle the next queued event. Returns `false` once the queue is empty.
    fn step(&mut self) -> bool {
        match self.queue.pop_front() {
            Some((who, event)) => {
                self.apply(who, event);
                true
            }
            None => false,
        }
    }

    fn run(&mut self) {
        let mut steps = 0;
        while self.step() {
            steps += 1;
            assert!(steps < 10_000, "game did not finish");
        }
    }
}

/// An agent taken from a live game at the first moment it sits in `target`.
fn agent_in(target: AgentState) -> Agent {
    for seed in 0..64 {
        let mut duel = Duel::new(seed);
        duel.start();
        loop {
            if let Some(i) = duel.agents.iter().position(|a| a.state() == target) {
                let [first, second] = duel.agents;
                return if i == 0 { first } else { second };
            }
            if !duel.step() {
                break;
            }
        }
    }
    panic!("no game passed through {:?}", target);
}

const LIVE_STATES: [AgentState; 6] = [
    AgentState::Idle,
    AgentState::Challenging,
    AgentState::Accepting,
    AgentState::WaitingToSend,
    AgentState::Attacking,
    AgentState::Defending,
];

#[test]
fn fresh_agent_is_idle() {
    let agent = Agent::from_seed(1);
    assert_eq!(agent.state(), AgentState::Idle);
    assert_eq!(agent.turn(), Turn::None);
    assert_eq!(agent.turn_count(), 0);
    assert_eq!(agent.end_reason(), None);
    assert_eq!(agent.status_text(), Some(NEW_GAME_TEXT));
}

#[test]
fn start_places_fleet_and_challenges() {
    let mut agent = Agent::from_seed(2);
    let step = agent.handle_event(Event::StartRequested);

    assert!(matches!(step.message, Message::Challenge { .. }));
    assert!(step.redraw);
    assert_eq!(agent.state(), AgentState::Challenging);
    assert_eq!(
        agent.own_board().occupied_mask().count_ones(),
        TOTAL_SHIP_CELLS
    );
    assert_eq!(*agent.knowledge_board(), Board::new_knowledge());
}

#[test]
fn handshake_puts_exactly_one_side_on_the_attack() {
    for seed in 0..16 {
        let mut challenger = Agent::from_seed(seed);
        let mut accepter = Agent::from_seed(seed + 100);

        let Message::Challenge { commitment } =
            challenger.handle_event(Event::StartRequested).message
        else {
            panic!("expected a challenge");
        };
        let Message::Accept { secret } = accepter
            .handle_event(Event::ChallengeReceived { commitment })
            .message
        else {
            panic!("expected an accept");
        };
        assert_eq!(accepter.state(), AgentState::Accepting);

        let Message::Reveal {
            secret: revealed,
            nonce,
        } = challenger
            .handle_event(Event::ChallengeAccepted { secret })
            .message
        else {
            panic!("expected a reveal");
        };
        assert_eq!(commit(revealed, nonce), commitment);

        let reply = accepter
            .handle_event(Event::RevealReceived {
                secret: revealed,
                nonce,
            })
            .message;

        match challenger.state() {
            AgentState::WaitingToSend => {
                assert_eq!(challenger.turn(), Turn::Mine);
                assert_eq!(accepter.state(), AgentState::Defending);
                assert_eq!(accepter.turn(), Turn::Theirs);
                assert_eq!(reply, Message::None);
            }
            AgentState::Defending => {
                assert_eq!(accepter.state(), AgentState::Attacking);
                assert!(matches!(reply, Message::Shot { .. }));
                assert_eq!(accepter.turn_count(), 1);
            }
            other => panic!("challenger left in {:?}", other),
        }
    }
}

#[test]
fn full_game_has_one_winner() {
    for seed in [1, 2, 3, 42] {
        let mut duel = Duel::new(seed);
        duel.start();
        duel.run();

        let [a, b] = &duel.agents;
        assert_eq!(a.state(), AgentState::EndScreen);
        assert_eq!(b.state(), AgentState::EndScreen);

        let (winner, loser) = match (a.end_reason(), b.end_reason()) {
            (Some(EndReason::Victory), Some(EndReason::Defeat)) => (a, b),
            (Some(EndReason::Defeat), Some(EndReason::Victory)) => (b, a),
            other => panic!("unexpected ending {:?}", other),
        };
        assert_eq!(winner.status_text(), Some(VICTORY_TEXT));
        assert_eq!(loser.status_text(), Some(DEFEAT_TEXT));
        assert!(winner.knowledge_board().all_ships_sunk());
        assert!(loser.own_board().all_ships_sunk());

        let shots = winner.turn_count();
        assert!(shots as usize >= TOTAL_SHIP_CELLS);
        assert!(shots as usize <= FIELD_ROWS * FIELD_COLS);
        assert!(shots - loser.turn_count() <= 1);

        // The winner's hits are exactly the loser's fleet
        for r in 0..FIELD_ROWS {
            for c in 0..FIELD_COLS {
                assert_eq!(
                    winner.knowledge_board().square(r, c) == SquareState::Hit,
                    loser.own_board().square(r, c) == SquareState::Hit,
                    "square ({}, {})",
                    r,
                    c
                );
            }
        }
    }
}

#[test]
fn framing_fault_ends_game_from_any_live_state() {
    for state in LIVE_STATES {
        let mut agent = agent_in(state);
        let step = agent.handle_event(Event::TransportError(TransportErrorKind::BadChecksum));

        assert_eq!(step.message, Message::None, "from {:?}", state);
        assert!(step.redraw);
        assert_eq!(agent.state(), AgentState::EndScreen);
        assert_eq!(
            agent.end_reason(),
            Some(EndReason::Transport(TransportErrorKind::BadChecksum))
        );
        assert_eq!(agent.status_text(), Some("ERROR: BAD CHECKSUM"));
    }
}

#[test]
fn end_screen_ignores_everything_but_reset() {
    let mut agent = agent_in(AgentState::Defending);
    agent.handle_event(Event::TransportError(TransportErrorKind::ParseFailure));

    for event in [
        Event::StartRequested,
        Event::MessageSent,
        Event::ShotReceived { row: 0, col: 0 },
        Event::TransportError(TransportErrorKind::BadChecksum),
    ] {
        let step = agent.handle_event(event);
        assert_eq!(step.message, Message::None);
        assert!(!step.redraw);
        assert_eq!(
            agent.end_reason(),
            Some(EndReason::Transport(TransportErrorKind::ParseFailure))
        );
    }
}

fn accepter_after_reveal(secret: u32, nonce: u64) -> Agent {
    let mut accepter = Agent::from_seed(4);
    let step = accepter.handle_event(Event::ChallengeReceived {
        commitment: commit(5, 77),
    });
    assert!(matches!(step.message, Message::Accept { .. }));

    let step = accepter.handle_event(Event::RevealReceived { secret, nonce });
    if accepter.state() == AgentState::EndScreen {
        assert_eq!(step.message, Message::None);
    }
    accepter
}

#[test]
fn forged_reveal_is_cheating() {
    let accepter = accepter_after_reveal(6, 77);
    assert_eq!(accepter.state(), AgentState::EndScreen);
    assert_eq!(accepter.end_reason(), Some(EndReason::CheatDetected));
    assert_eq!(accepter.status_text(), Some(CHEAT_TEXT));
}

#[test]
fn reveal_with_wrong_nonce_is_cheating() {
    let accepter = accepter_after_reveal(5, 78);
    assert_eq!(accepter.end_reason(), Some(EndReason::CheatDetected));
}

#[test]
fn honest_reveal_is_trusted() {
    let accepter = accepter_after_reveal(5, 77);
    assert!(matches!(
        accepter.state(),
        AgentState::Attacking | AgentState::Defending
    ));
}

#[test]
fn reset_returns_to_idle_from_anywhere() {
    for state in LIVE_STATES {
        let mut agent = agent_in(state);
        let step = agent.handle_event(Event::ResetRequested);

        assert_eq!(step.message, Message::None);
        assert!(step.redraw);
        assert_eq!(agent.state(), AgentState::Idle);
        assert_eq!(agent.turn(), Turn::None);
        assert_eq!(agent.turn_count(), 0);
        assert_eq!(*agent.own_board(), Board::new_own());
        assert_eq!(*agent.knowledge_board(), Board::new_knowledge());
    }

    let mut agent = agent_in(AgentState::Attacking);
    agent.handle_event(Event::TransportError(TransportErrorKind::InvalidMessageType));
    agent.handle_event(Event::ResetRequested);
    assert_eq!(agent.state(), AgentState::Idle);
    assert_eq!(agent.end_reason(), None);
    assert_eq!(agent.status_text(), Some(NEW_GAME_TEXT));

    // A reset agent can open a new game
    let step = agent.handle_event(Event::StartRequested);
    assert!(matches!(step.message, Message::Challenge { .. }));
}

#[test]
fn out_of_place_events_are_dropped() {
    let cases = [
        (AgentState::Idle, Event::ShotReceived { row: 1, col: 1 }),
        (AgentState::Idle, Event::MessageSent),
        (AgentState::Challenging, Event::StartRequested),
        (
            AgentState::Challenging,
            Event::ChallengeReceived {
                commitment: [1, 2, 3],
            },
        ),
        (AgentState::Accepting, Event::ChallengeAccepted { secret: 1 }),
        (
            AgentState::Defending,
            Event::ResultReceived {
                row: 0,
                col: 0,
                outcome: AttackOutcome::Hit,
            },
        ),
        (AgentState::Attacking, Event::ShotReceived { row: 0, col: 0 }),
        (
            AgentState::Attacking,
            Event::RevealReceived { secret: 3, nonce: 0 },
        ),
        (AgentState::WaitingToSend, Event::ShotReceived { row: 2, col: 2 }),
    ];

    for (state, event) in cases {
        let mut agent = agent_in(state);
        let own = *agent.own_board();
        let knowledge = *agent.knowledge_board();
        let turns = agent.turn_count();

        let step = agent.handle_event(event);
        assert_eq!(step.message, Message::None, "{:?} in {:?}", event, state);
        assert!(!step.redraw);
        assert_eq!(agent.state(), state);
        assert_eq!(*agent.own_board(), own);
        assert_eq!(*agent.knowledge_board(), knowledge);
        assert_eq!(agent.turn_count(), turns);
    }
}

#[test]
fn shot_off_the_field_ends_the_game() {
    let mut agent = agent_in(AgentState::Defending);
    let step = agent.handle_event(Event::ShotReceived {
        row: FIELD_ROWS as u8,
        col: 0,
    });
    assert_eq!(step.message, Message::None);
    assert_eq!(
        agent.end_reason(),
        Some(EndReason::Transport(TransportErrorKind::ParseFailure))
    );
}

#[test]
fn send_confirmation_fires_a_shot() {
    let mut agent = agent_in(AgentState::WaitingToSend);
    let turns = agent.turn_count();
    let step = agent.handle_event(Event::MessageSent);

    let Message::Shot { row, col } = step.message else {
        panic!("expected a shot, got {:?}", step.message);
    };
    assert_eq!(
        agent.knowledge_board().square(row as usize, col as usize),
        SquareState::Unknown
    );
    assert_eq!(agent.state(), AgentState::Attacking);
    assert_eq!(agent.turn_count(), turns + 1);
}

#[test]
fn only_the_answer_to_our_shot_is_accepted() {
    let mut agent = agent_in(AgentState::WaitingToSend);
    let Message::Shot { row, col } = agent.handle_event(Event::MessageSent).message else {
        panic!("expected a shot");
    };
    let knowledge = *agent.knowledge_board();

    let other_col = (col + 1) % FIELD_COLS as u8;
    let step = agent.handle_event(Event::ResultReceived {
        row,
        col: other_col,
        outcome: AttackOutcome::Hit,
    });
    assert_eq!(step.message, Message::None);
    assert!(!step.redraw);
    assert_eq!(agent.state(), AgentState::Attacking);
    assert_eq!(*agent.knowledge_board(), knowledge);

    agent.handle_event(Event::ResultReceived {
        row,
        col,
        outcome: AttackOutcome::Hit,
    });
    assert_eq!(agent.state(), AgentState::Defending);
    assert_eq!(
        agent.knowledge_board().square(row as usize, col as usize),
        SquareState::Hit
    );

    // A repeat of the same result after the turn passed is dropped too
    let step = agent.handle_event(Event::ResultReceived {
        row,
        col,
        outcome: AttackOutcome::Hit,
    });
    assert!(!step.redraw);
    assert_eq!(agent.state(), AgentState::Defending);
}

#[test]
fn view_reflects_session() {
    let agent = agent_in(AgentState::Defending);
    let view = agent.view();
    assert_eq!(view.turn, Turn::Theirs);
    assert_eq!(view.turn_count, agent.turn_count());
    assert_eq!(view.status, None);
    assert_eq!(view.own, agent.own_board());
}
