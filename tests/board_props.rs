use battleboats::{
    auto_place_all_ships, decide_next_guess, AttackOutcome, Board, ShipKind, SquareState,
    FIELD_COLS, FIELD_ROWS, SHIPS, TOTAL_SHIP_CELLS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn placed_board(rng: &mut SmallRng) -> Board {
    let mut board = Board::new_own();
    auto_place_all_ships(rng, &mut board).unwrap();
    board
}

fn cells_of(board: &Board, kind: ShipKind) -> usize {
    (0..FIELD_ROWS)
        .flat_map(|r| (0..FIELD_COLS).map(move |c| (r, c)))
        .filter(|&(r, c)| board.square(r, c) == SquareState::Occupied(kind))
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn auto_placement_covers_every_ship_once(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = placed_board(&mut rng);

        prop_assert_eq!(board.occupied_mask().count_ones(), TOTAL_SHIP_CELLS);
        for kind in SHIPS {
            prop_assert_eq!(cells_of(&board, kind), kind.length() as usize);
            prop_assert_eq!(board.lives(kind), kind.length());
        }
        prop_assert_eq!(board.boat_states(), 0b1111);
    }

    #[test]
    fn repeated_attack_is_idempotent(
        seed in any::<u64>(),
        row in 0..FIELD_ROWS,
        col in 0..FIELD_COLS,
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = placed_board(&mut rng);

        let first = board.resolve_incoming_attack(row, col).unwrap();
        let after_first = board;
        let second = board.resolve_incoming_attack(row, col).unwrap();

        prop_assert_eq!(board, after_first);
        match first {
            AttackOutcome::ShipSunk(_) => prop_assert_eq!(second, AttackOutcome::Hit),
            other => prop_assert_eq!(second, other),
        }
    }

    #[test]
    fn guesses_never_repeat(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut knowledge = Board::new_knowledge();
        let shots = rng.random_range(0..FIELD_ROWS * FIELD_COLS);

        for _ in 0..shots {
            let (row, col) = decide_next_guess(&mut rng, &knowledge).unwrap();
            prop_assert_eq!(knowledge.square(row, col), SquareState::Unknown);
            knowledge.apply_outgoing_result(row, col, AttackOutcome::Miss).unwrap();
        }
        prop_assert_eq!(
            knowledge.unknown_mask().count_ones(),
            FIELD_ROWS * FIELD_COLS - shots
        );
    }
}

#[test]
fn guess_fails_once_field_is_resolved() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut knowledge = Board::new_knowledge();
    for r in 0..FIELD_ROWS {
        for c in 0..FIELD_COLS {
            knowledge
                .apply_outgoing_result(r, c, AttackOutcome::Miss)
                .unwrap();
        }
    }
    assert!(decide_next_guess(&mut rng, &knowledge).is_err());
}
