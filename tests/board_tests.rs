//! Board tests - cell access, row queries and row removal

use tetromino::core::Board;
use tetromino::types::{BoardError, Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.cell_at(x, y), Ok(Cell::Empty), "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_board_cell_at_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.cell_at(-1, 0), Err(BoardError::OutOfBounds { x: -1, y: 0 }));
    assert!(board.cell_at(0, -1).is_err());
    assert!(board.cell_at(BOARD_WIDTH as i8, 0).is_err());
    assert!(board.cell_at(0, BOARD_HEIGHT as i8).is_err());
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    board.set_cell(5, 10, Cell::Filled(Color::Purple)).unwrap();
    assert_eq!(board.cell_at(5, 10), Ok(Cell::Filled(Color::Purple)));
    assert!(board.is_occupied(5, 10));

    board.set_cell(5, 10, Cell::Empty).unwrap();
    assert!(board.is_empty_at(5, 10));
}

#[test]
fn test_board_set_out_of_bounds_leaves_board_unchanged() {
    let mut board = Board::new();

    assert!(board.set_cell(-1, 0, Cell::Filled(Color::Red)).is_err());
    assert!(board.set_cell(0, BOARD_HEIGHT as i8, Cell::Filled(Color::Red)).is_err());
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_row_full_and_remove() {
    let mut board = Board::from_rows(10, 20, &["..#.......", "##########"]);
    assert!(board.is_row_full(19));
    assert!(!board.is_row_full(18));

    board.remove_row(19).unwrap();
    assert!(!board.is_row_full(19));
    assert!(board.is_occupied(2, 19));
    assert!(board.is_row_empty(0));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_remove_top_row() {
    let mut board = Board::new();
    for x in 0..10 {
        board.set_cell(x, 0, Cell::Filled(Color::Cyan)).unwrap();
    }
    board.remove_row(0).unwrap();
    assert!(board.is_row_empty(0));
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_remove_row_out_of_range() {
    let mut board = Board::new();
    assert!(board.remove_row(20).is_err());
    assert!(board.remove_row(-1).is_err());
}

#[test]
fn test_full_rows_bottom_to_top() {
    let board = Board::from_rows(
        10,
        20,
        &["##########", "#.........", "##########", "##########"],
    );
    assert_eq!(board.full_rows().as_slice(), &[19, 18, 16]);
}

#[test]
fn test_custom_dimensions() {
    let board = Board::with_size(6, 12);
    assert_eq!((board.width(), board.height()), (6, 12));
    assert_eq!(board.cells().len(), 72);
}
