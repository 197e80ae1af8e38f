//! Session tests - end-to-end scenarios through the public command surface

use tetromino::core::{Board, GameSnapshot, Randomizer, Session, SessionConfig, SimpleRng};
use tetromino::types::{Cell, Color, GameAction, PieceKind, Rotation, SessionState};

fn session_with(board_rows: &[&str], kinds: &[PieceKind]) -> Session {
    let config =
        SessionConfig::default().with_randomizer(Randomizer::Sequence(kinds.to_vec()));
    let board = Board::from_rows(config.width, config.height, board_rows);
    let mut session = Session::new(config).with_board(board).unwrap();
    assert!(session.start());
    session
}

#[test]
fn test_single_line_clear() {
    let mut session = session_with(&["####..####"], &[PieceKind::O, PieceKind::T]);
    let o = session.active().unwrap();
    assert_eq!((o.x, o.y), (4, 0));

    assert!(session.hard_drop());

    let event = session.take_last_event().unwrap();
    assert_eq!(event.lines_cleared(), 1);
    assert_eq!(event.cleared_rows.as_slice(), &[19]);
    assert_eq!(event.line_clear_score, 100);
    assert_eq!(event.drop_score, 36);
    assert_eq!(session.score(), 136);
    assert_eq!(session.lines(), 1);

    // the top half of the O drops into the cleared row
    assert!(session.board().is_occupied(4, 19));
    assert!(session.board().is_occupied(5, 19));
    assert_eq!(session.board().filled_count(), 2);
}

#[test]
fn test_four_line_clear() {
    let rows = ["#####.####"; 4];
    let mut session = session_with(&rows, &[PieceKind::I, PieceKind::O]);

    assert!(session.rotate());
    let active = session.active().unwrap();
    assert_eq!(active.rotation, Rotation::East);
    assert_eq!(active.cells().map(|(x, _)| x), [5, 5, 5, 5]);

    assert!(session.hard_drop());
    let event = session.take_last_event().unwrap();
    assert_eq!(event.lines_cleared(), 4);
    assert_eq!(event.line_clear_score, 800);
    assert_eq!(session.score(), 800 + 32);
    assert_eq!(session.board().filled_count(), 0);
}

#[test]
fn test_game_over_on_blocked_spawn() {
    let rows = ["....##...."; 18];
    let mut session = session_with(&rows, &[PieceKind::O]);

    assert!(session.hard_drop());
    assert_eq!(session.state(), SessionState::GameOver);
    assert!(session.take_last_event().unwrap().game_over);
    assert!(session.active().is_none());

    let frozen = session.snapshot();
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::GravityTick,
    ] {
        assert!(!session.apply_action(action), "{:?}", action);
        assert_eq!(session.snapshot(), frozen);
    }

    assert!(session.reset());
    assert_eq!(session.state(), SessionState::Falling);
    assert_eq!(session.board().filled_count(), 0);
    assert_eq!(session.score(), 0);
}

fn blocked_session(cells: &[(i8, i8)], kinds: &[PieceKind]) -> Session {
    let mut board = Board::new();
    for &(x, y) in cells {
        board.set_cell(x, y, Cell::Filled(Color::Red)).unwrap();
    }
    let config =
        SessionConfig::default().with_randomizer(Randomizer::Sequence(kinds.to_vec()));
    let mut session = Session::new(config).with_board(board).unwrap();
    assert!(session.start());
    session
}

#[test]
fn test_wall_kick_shifts_right() {
    // I at (3, 0): east state needs column 5, one left needs column 4
    let mut session = blocked_session(&[(4, 2), (5, 2)], &[PieceKind::I]);

    assert!(session.rotate());
    let kicked = session.active().unwrap();
    assert_eq!(kicked.rotation, Rotation::East);
    assert_eq!((kicked.x, kicked.y), (4, 0));
    assert_eq!(kicked.cells().map(|(x, _)| x), [6, 6, 6, 6]);
}

#[test]
fn test_rotation_rejected_when_every_kick_collides() {
    let cells: Vec<(i8, i8)> = (3..8).map(|x| (x, 2)).collect();
    let mut session = blocked_session(&cells, &[PieceKind::I]);

    let before = session.snapshot();
    assert!(!session.rotate());
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_level_progression() {
    let rows = ["#####.####"; 12];
    let mut session = session_with(&rows, &[PieceKind::I]);

    for _ in 0..2 {
        assert!(session.rotate());
        assert!(session.hard_drop());
    }
    assert_eq!(session.lines(), 8);
    assert_eq!(session.level(), 1);
    assert_eq!(session.drop_interval_ms(), 1000);

    assert!(session.rotate());
    assert!(session.hard_drop());
    let event = session.take_last_event().unwrap();
    assert!(event.leveled_up);
    // scored at the level in effect when the piece locked
    assert_eq!(event.line_clear_score, 800);

    assert_eq!(session.lines(), 12);
    assert_eq!(session.level(), 2);
    assert_eq!(session.drop_interval_ms(), 900);
    assert_eq!(session.score(), 3 * 800 + 3 * 32);
}

#[test]
fn test_invariants_hold_under_random_play() {
    let actions = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::GravityTick,
    ];

    for seed in [1, 7, 12345] {
        let mut session = Session::new(SessionConfig::default().with_seed(seed));
        session.start();
        let mut rng = SimpleRng::new(seed ^ 0xA5A5);
        let mut last_score = 0;

        for _ in 0..3000 {
            let action = actions[rng.next_range(actions.len() as u32) as usize];
            session.apply_action(action);

            assert!(session.board().full_rows().is_empty());
            assert!(session.score() >= last_score);
            last_score = session.score();

            match session.state() {
                SessionState::Falling => {
                    let active = session.active().unwrap();
                    assert!(tetromino::core::piece_fits(session.board(), &active));
                    assert!(session.ghost_y().unwrap() >= active.y);
                }
                SessionState::GameOver => {
                    assert!(session.active().is_none());
                    session.reset();
                    last_score = 0;
                }
                SessionState::Spawning => unreachable!(),
            }
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let play = || {
        let mut session = Session::new(SessionConfig::default().with_seed(99));
        session.start();
        for i in 0..200 {
            let action = if i % 3 == 0 {
                GameAction::HardDrop
            } else {
                GameAction::MoveLeft
            };
            session.apply_action(action);
        }
        session.snapshot()
    };
    assert_eq!(play(), play());
}

#[test]
fn test_reset_replays_from_seed() {
    let mut a = Session::new(SessionConfig::default().with_seed(3));
    let mut b = Session::new(SessionConfig::default().with_seed(3));
    a.start();
    b.start();
    a.hard_drop();
    b.hard_drop();
    a.reset();
    b.reset();
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.episode(), 1);
}

#[test]
fn test_snapshot_json() {
    let mut session = session_with(&["##.#######"], &[PieceKind::T, PieceKind::S]);
    session.move_left();

    let snapshot = session.snapshot();
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["state"], "falling");
    assert_eq!(json["next"], "s");
    assert_eq!(json["active"]["kind"], "t");
    assert_eq!(json["active"]["x"], 2);
    assert_eq!(json["board"].as_array().unwrap().len(), 200);

    let back: GameSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snapshot);
    assert_eq!(back.code_at(0, 19), Some(Color::Blue.code()));
    assert_eq!(back.code_at(2, 19), Some(0));
    assert_eq!(back.code_at(10, 0), None);
}
