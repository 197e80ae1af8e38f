//! Collision and placement queries.
//!
//! Both functions are pure: they only read the board, so they can be called any number of
//! times for movement, rotation and ghost projection.

use crate::board::Board;
use crate::pieces::{ActivePiece, Shape};

/// Check whether `shape` fits with its origin at `(x, y)`.
///
/// Every mino must be inside `[0, width)` horizontally and below `height`. Minos above the
/// top edge (negative y) are allowed; minos on the board must land on empty cells.
pub fn can_place(board: &Board, shape: &Shape, x: i8, y: i8) -> bool {
    shape.minos.iter().all(|&(dx, dy)| {
        let bx = x + dx;
        let by = y + dy;
        if bx < 0 || bx >= board.width() as i8 || by >= board.height() as i8 {
            return false;
        }
        by < 0 || board.is_empty_at(bx, by)
    })
}

/// `can_place` for a piece at its own position
pub fn piece_fits(board: &Board, piece: &ActivePiece) -> bool {
    can_place(board, &piece.shape(), piece.x, piece.y)
}

/// Lowest row the piece can reach by falling straight down from where it is.
///
/// Returns the piece's own y when it cannot move down at all.
pub fn ghost_y(board: &Board, piece: &ActivePiece) -> i8 {
    let shape = piece.shape();
    let mut y = piece.y;
    while can_place(board, &shape, piece.x, y + 1) {
        y += 1;
    }
    y
}

/// Rows the piece would fall before landing
pub fn drop_distance(board: &Board, piece: &ActivePiece) -> u32 {
    (ghost_y(board, piece) - piece.y) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_shape;
    use crate::types::{Cell, Color, PieceKind, Rotation};

    #[test]
    fn test_can_place_walls_and_floor() {
        let board = Board::new();
        let i_flat = get_shape(PieceKind::I, Rotation::North);

        assert!(can_place(&board, &i_flat, 0, 0));
        assert!(can_place(&board, &i_flat, 6, 0));
        assert!(!can_place(&board, &i_flat, 7, 0));
        assert!(!can_place(&board, &i_flat, -1, 0));
        // minos are on row 1 of the box
        assert!(can_place(&board, &i_flat, 0, 18));
        assert!(!can_place(&board, &i_flat, 0, 19));
    }

    #[test]
    fn test_can_place_above_top_is_allowed() {
        let board = Board::new();
        let i_tall = get_shape(PieceKind::I, Rotation::East);
        assert!(can_place(&board, &i_tall, 0, -3));
        // but horizontal bounds still apply above the board
        assert!(!can_place(&board, &i_tall, 8, -3));
    }

    #[test]
    fn test_can_place_blocked_by_stack() {
        let mut board = Board::new();
        board.set_cell(4, 1, Cell::Filled(Color::Red)).unwrap();
        let o = get_shape(PieceKind::O, Rotation::North);
        assert!(!can_place(&board, &o, 4, 0));
        assert!(!can_place(&board, &o, 3, 0));
        assert!(can_place(&board, &o, 5, 0));
        assert!(can_place(&board, &o, 4, -1));
    }

    #[test]
    fn test_can_place_is_idempotent() {
        let board = Board::from_rows(10, 20, &["##..######"]);
        let before = board.clone();
        let o = get_shape(PieceKind::O, Rotation::North);
        let first = can_place(&board, &o, 2, 18);
        for _ in 0..10 {
            assert_eq!(can_place(&board, &o, 2, 18), first);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_ghost_y() {
        let board = Board::from_rows(10, 20, &["#.........", "#........."]);
        let piece = ActivePiece::spawn(PieceKind::O, 10);
        assert_eq!(ghost_y(&board, &piece), 18);
        assert_eq!(drop_distance(&board, &piece), 18);

        let left = ActivePiece { x: 0, ..piece };
        assert_eq!(ghost_y(&board, &left), 16);
    }

    #[test]
    fn test_ghost_y_when_resting() {
        let board = Board::new();
        let piece = ActivePiece {
            y: 18,
            ..ActivePiece::spawn(PieceKind::O, 10)
        };
        assert_eq!(ghost_y(&board, &piece), 18);
    }
}
