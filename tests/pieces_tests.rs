//! Pieces and rotation tests

use tetromino::core::pieces::spawn_x;
use tetromino::core::{get_shape, try_rotate, ActivePiece, Board, KickStrategy, SimpleKicks, SrsKicks};
use tetromino::types::{PieceKind, Rotation};

#[test]
fn test_every_kind_has_four_minos_in_its_box() {
    for kind in PieceKind::ALL {
        for r in 0..4 {
            let shape = get_shape(kind, Rotation::from_index(r));
            for (dx, dy) in shape.minos {
                assert!(dx >= 0 && (dx as u8) < shape.size);
                assert!(dy >= 0 && (dy as u8) < shape.size);
            }
        }
    }
}

#[test]
fn test_four_rotations_return_to_start() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let start = ActivePiece {
            y: 8,
            ..ActivePiece::spawn(kind, 10)
        };
        let mut piece = start;
        for _ in 0..4 {
            piece = try_rotate(&board, &piece, true, &SimpleKicks).unwrap().piece;
        }
        assert_eq!(piece, start, "{:?}", kind);
        assert_eq!(
            get_shape(kind, piece.rotation).normalized(),
            get_shape(kind, start.rotation).normalized()
        );
    }
}

#[test]
fn test_cw_then_ccw_is_identity_in_open_space() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let start = ActivePiece {
            y: 8,
            ..ActivePiece::spawn(kind, 10)
        };
        let cw = try_rotate(&board, &start, true, &SimpleKicks).unwrap().piece;
        let back = try_rotate(&board, &cw, false, &SimpleKicks).unwrap().piece;
        assert_eq!(back, start);
    }
}

#[test]
fn test_spawn_columns() {
    assert_eq!(spawn_x(PieceKind::I, 10), 3);
    assert_eq!(spawn_x(PieceKind::O, 10), 4);
    assert_eq!(spawn_x(PieceKind::T, 10), 3);
    assert_eq!(spawn_x(PieceKind::O, 7), 2);
}

#[test]
fn test_o_rotation_keeps_shape() {
    let board = Board::new();
    let o = ActivePiece::spawn(PieceKind::O, 10);
    let rotated = try_rotate(&board, &o, true, &SimpleKicks).unwrap().piece;
    assert_eq!(rotated.rotation, Rotation::East);
    assert_eq!(rotated.cells(), o.cells());
}

#[test]
fn test_strategies_are_object_safe() {
    let strategies: [&dyn KickStrategy; 2] = [&SimpleKicks, &SrsKicks];
    let board = Board::new();
    let piece = ActivePiece {
        y: 5,
        ..ActivePiece::spawn(PieceKind::J, 10)
    };
    for kicks in strategies {
        let rotated = try_rotate(&board, &piece, true, kicks).unwrap();
        assert_eq!(rotated.kick, (0, 0));
    }
}
