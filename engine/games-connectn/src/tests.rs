use super::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn board(rows: &[&str]) -> Snapshot {
    Snapshot::parse(rows, Player::A).unwrap()
}

/// Minimal live board used to exercise `Snapshot::capture`.
struct FixedBoard {
    rows: Vec<Vec<Cell>>,
    target: usize,
}

impl BoardView for FixedBoard {
    fn width(&self) -> usize {
        self.rows[0].len()
    }

    fn height(&self) -> usize {
        self.rows.len()
    }

    fn target(&self) -> usize {
        self.target
    }

    fn occupant(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }
}

#[test]
fn test_new_snapshot_is_empty() {
    let snapshot = Snapshot::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, Player::B);
    assert_eq!(snapshot.width(), 7);
    assert_eq!(snapshot.height(), 6);
    assert_eq!(snapshot.me(), Player::B);
    assert_eq!(snapshot.opponent(), Player::A);
    assert_eq!(snapshot.to_move(), Player::B);
    assert_eq!(snapshot.piece_count(), 0);
    assert!(!snapshot.is_full());
}

#[test]
#[should_panic(expected = "non-zero")]
fn test_zero_width_panics() {
    let _ = Snapshot::new(0, 6, Player::A);
}

#[test]
fn test_legal_actions_empty_board() {
    let snapshot = Snapshot::new(7, 6, Player::A);
    let actions = snapshot.legal_actions();
    assert_eq!(actions.len(), 7);
    for (col, action) in actions.iter().enumerate() {
        assert_eq!(*action, Action::new(col, 0));
    }
}

#[test]
fn test_pieces_stack_upward() {
    let mut snapshot = Snapshot::new(7, 6, Player::A);
    for expected_row in 0..6 {
        let action = snapshot.legal_actions()[2];
        assert_eq!(action, Action::new(2, expected_row));
        snapshot = snapshot.apply(action);
    }

    assert!(snapshot.is_column_full(2));
    assert_eq!(snapshot.lowest_empty_row(2), None);
    let columns: Vec<usize> = snapshot.legal_actions().iter().map(|a| a.column).collect();
    assert_eq!(columns, vec![0, 1, 3, 4, 5, 6]);
}

#[test]
fn test_apply_swaps_mover_and_leaves_source_untouched() {
    let snapshot = Snapshot::new(7, 6, Player::A);
    let next = snapshot.apply(Action::new(3, 0));

    assert_eq!(snapshot.get(3, 0), Cell::Empty);
    assert_eq!(snapshot.to_move(), Player::A);

    assert_eq!(next.get(3, 0), Cell::PlayerA);
    assert_eq!(next.to_move(), Player::B);
    assert_eq!(next.me(), Player::A);

    let after = next.apply(Action::new(3, 1));
    assert_eq!(after.get(3, 1), Cell::PlayerB);
    assert_eq!(after.to_move(), Player::A);
}

#[test]
#[should_panic(expected = "already occupied")]
fn test_apply_on_occupied_cell_panics() {
    let snapshot = Snapshot::new(7, 6, Player::A).apply(Action::new(0, 0));
    let _ = snapshot.apply(Action::new(0, 0));
}

#[test]
#[should_panic(expected = "outside")]
fn test_out_of_bounds_get_panics() {
    let snapshot = Snapshot::new(7, 6, Player::A);
    let _ = snapshot.get(7, 0);
}

#[test]
fn test_legal_actions_match_non_full_columns_during_random_play() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    for _ in 0..20 {
        let mut snapshot = Snapshot::new(7, 6, Player::A);
        loop {
            let actions = snapshot.legal_actions();
            let non_full = (0..7).filter(|&c| !snapshot.is_column_full(c)).count();
            assert_eq!(actions.len(), non_full);

            for action in &actions {
                assert!(snapshot.get(action.column, action.row).is_empty());
                if action.row > 0 {
                    assert!(!snapshot.get(action.column, action.row - 1).is_empty());
                }
            }

            match actions.choose(&mut rng) {
                Some(&action) => snapshot = snapshot.apply(action),
                None => break,
            }
        }
        assert!(snapshot.is_full());
    }
}

#[test]
fn test_horizontal_win() {
    let snapshot = board(&[
        ".......", //
        ".......",
        ".......",
        ".......",
        "BBB....",
        ".AAAA..",
    ]);
    assert_eq!(snapshot.winner(4), Some(Player::A));
    assert!(snapshot.is_terminal(4));
    assert_eq!(snapshot.outcome(4), Some(Outcome::Winner(Player::A)));
}

#[test]
fn test_vertical_win() {
    let snapshot = board(&[
        ".......", //
        ".......",
        "......B",
        "......B",
        "A.....B",
        "AA....B",
    ]);
    assert_eq!(snapshot.winner(4), Some(Player::B));
}

#[test]
fn test_diagonal_win() {
    let snapshot = board(&[
        ".......", //
        ".......",
        "...A...",
        "..AB...",
        ".ABB...",
        "ABBA...",
    ]);
    assert_eq!(snapshot.winner(4), Some(Player::A));
}

#[test]
fn test_anti_diagonal_win() {
    let snapshot = board(&[
        ".......", //
        ".......",
        "...B...",
        "...AB..",
        "...AAB.",
        "...ABAB",
    ]);
    assert_eq!(snapshot.winner(4), Some(Player::B));
}

#[test]
fn test_three_in_a_row_is_not_a_win() {
    let snapshot = board(&[
        ".......", //
        ".......",
        ".......",
        ".......",
        "BB.....",
        "AAA.B..",
    ]);
    assert_eq!(snapshot.winner(4), None);
    assert!(!snapshot.is_terminal(4));
    assert_eq!(snapshot.outcome(4), None);
}

#[test]
fn test_runs_do_not_wrap_across_rows() {
    // Row-major storage puts (6, 0) next to (0, 1).
    let snapshot = board(&[
        ".......", //
        ".......",
        ".......",
        ".......",
        "AA.....",
        ".....AA",
    ]);
    assert_eq!(snapshot.winner(4), None);
}

#[test]
fn test_configurable_target() {
    let snapshot = board(&[
        ".........", //
        ".........",
        ".........",
        ".........",
        ".........",
        "BBBB.....",
        "AAAA.....",
    ]);
    assert_eq!(snapshot.winner(5), None);
    assert_eq!(snapshot.winner(4), Some(Player::A));
    assert_eq!(snapshot.winner(3), Some(Player::A));

    let five = board(&[
        ".........", //
        ".........",
        ".........",
        ".........",
        ".........",
        "BBBB.....",
        "AAAAA....",
    ]);
    assert_eq!(five.winner(5), Some(Player::A));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let snapshot = board(&[
        "ABABABA", //
        "ABABABA",
        "BABABAB",
        "BABABAB",
        "ABABABA",
        "ABABABA",
    ]);
    assert!(snapshot.is_full());
    assert!(snapshot.legal_actions().is_empty());
    assert_eq!(snapshot.winner(4), None);
    assert!(snapshot.is_terminal(4));
    assert_eq!(snapshot.outcome(4), Some(Outcome::Draw));
}

#[test]
fn test_capture_copies_live_board() {
    let mut rows = vec![vec![Cell::Empty; 5]; 4];
    rows[0][1] = Cell::PlayerA;
    rows[0][2] = Cell::PlayerB;
    rows[1][1] = Cell::PlayerB;
    let view = FixedBoard { rows, target: 3 };

    let snapshot = Snapshot::capture(&view, Player::B);
    assert_eq!(snapshot.width(), 5);
    assert_eq!(snapshot.height(), 4);
    assert_eq!(snapshot.get(1, 0), Cell::PlayerA);
    assert_eq!(snapshot.get(2, 0), Cell::PlayerB);
    assert_eq!(snapshot.get(1, 1), Cell::PlayerB);
    assert_eq!(snapshot.piece_count(), 3);
    assert_eq!(snapshot.to_move(), Player::B);
    assert_eq!(snapshot.legal_actions()[1], Action::new(1, 2));
}

#[test]
fn test_parse_and_display_round_trip() {
    let rows = [".....", "..B..", ".AAB."];
    let snapshot = board(&rows);
    assert_eq!(snapshot.get(1, 0), Cell::PlayerA);
    assert_eq!(snapshot.get(2, 1), Cell::PlayerB);
    assert_eq!(snapshot.to_string(), ".....\n..B..\n.AAB.\n");
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        Snapshot::parse(&[], Player::A).unwrap_err(),
        BoardParseError::Empty
    );
    assert_eq!(
        Snapshot::parse(&["...", ".."], Player::A).unwrap_err(),
        BoardParseError::Ragged {
            row: 1,
            expected: 3,
            found: 2
        }
    );
    assert_eq!(
        Snapshot::parse(&["..X"], Player::A).unwrap_err(),
        BoardParseError::InvalidCell('X')
    );
}

#[test]
fn test_player_helpers() {
    assert_eq!(Player::A.other(), Player::B);
    assert_eq!(Player::B.to_cell(), Cell::PlayerB);
    assert_eq!(Cell::PlayerA.owner(), Some(Player::A));
    assert_eq!(Cell::Empty.owner(), None);
    assert_eq!(Player::B.to_string(), "B");
}
